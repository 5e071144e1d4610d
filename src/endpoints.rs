//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}', use [format_endpoint].

/// The route for checking the server is up.
pub const HEALTH: &str = "/api/health";
/// The route to list and create expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route for the aggregated expense statistics.
pub const EXPENSE_STATS: &str = "/api/expenses/stats";
/// The route to list and create restaurant visits.
pub const RESTAURANTS: &str = "/api/restaurants";
/// The route to update or delete a single restaurant visit.
pub const RESTAURANT: &str = "/api/restaurants/{restaurant_id}";
/// The prefix shared by every API route.
pub const API: &str = "/api";
/// Matches any path under [API] that no other route handles.
pub const API_FALLBACK: &str = "/api/{*path}";
/// The route uploaded photos are served from.
pub const UPLOADS: &str = "/uploads";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
