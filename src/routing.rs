//! Application router configuration for the JSON API and the static file routes.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{any, get, put},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
    health::get_health,
    not_found::{get_api_method_not_allowed, get_api_not_found},
    restaurant::{
        create_restaurant_endpoint, delete_restaurant_endpoint, list_restaurants_endpoint,
        update_restaurant_endpoint,
    },
    stats::get_expense_stats_endpoint,
};

/// The largest restaurant form, photo included, that the server accepts.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Return a router with all the app's routes.
///
/// Requests are matched against the API routes first, then unknown `/api`
/// paths get a JSON 404. Everything else is served from the frontend bundle
/// in [AppState::static_dir], falling back to its `index.html` so that
/// client-side routes survive a page reload.
pub fn build_router(state: AppState) -> Router {
    let expense_routes = Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::EXPENSE_STATS, get(get_expense_stats_endpoint))
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        );

    let restaurant_routes = Router::new()
        .route(
            endpoints::RESTAURANTS,
            get(list_restaurants_endpoint).post(create_restaurant_endpoint),
        )
        .route(
            endpoints::RESTAURANT,
            put(update_restaurant_endpoint).delete(delete_restaurant_endpoint),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let frontend = ServeDir::new(&state.static_dir)
        .fallback(ServeFile::new(state.static_dir.join("index.html")));

    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .merge(expense_routes)
        .merge(restaurant_routes)
        .route(endpoints::API, any(get_api_not_found))
        .route(endpoints::API_FALLBACK, any(get_api_not_found))
        // Only covers the routes added above.
        .method_not_allowed_fallback(get_api_method_not_allowed)
        .nest_service(endpoints::UPLOADS, ServeDir::new(&state.upload_dir))
        .fallback_service(frontend)
        .with_state(state)
}
