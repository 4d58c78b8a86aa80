//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{dispose_view, get_dashboard_content, get_dashboard_page, sort_transactions},
    endpoints,
    import::{get_import_page, import_transactions},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // Fragments and form endpoints requested by htmx. Errors are rendered as
    // alerts or returned with the HX-Redirect header.
    let fragments = Router::new()
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .route(endpoints::SORT_TRANSACTIONS, post(sort_transactions))
        .route(endpoints::DISPOSE_VIEW, post(dispose_view))
        .route(endpoints::IMPORT, post(import_transactions));

    pages
        .merge(fragments)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
