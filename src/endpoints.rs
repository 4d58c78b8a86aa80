//! The URIs of the pages, fragments and form endpoints.
//!
//! For endpoints that take a parameter, e.g., '/views/{view_id}', use [format_endpoint].

/// The listing page: balances and the transactions table.
pub const ROOT: &str = "/";
/// The page for importing transactions from CSV files.
pub const IMPORT_VIEW: &str = "/import";
/// The balance cards and transactions table of a mounted dashboard view.
pub const DASHBOARD_CONTENT: &str = "/views/{view_id}";
/// Sort the transactions of a dashboard view by a column.
pub const SORT_TRANSACTIONS: &str = "/views/{view_id}/sort/{column}";
/// Discard the state of a dashboard view once its page is closed.
pub const DISPOSE_VIEW: &str = "/views/{view_id}/dispose";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to upload CSV files for importing transactions.
pub const IMPORT: &str = "/api/import";

/// Replace the first parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/views/{view_id}', '{view_id}' is the parameter.
/// Endpoints with several parameters are formatted by calling this function
/// once per parameter, left to right.
///
/// This function assumes that an endpoint path only contains ASCII characters.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
