//! Dashboard module
//!
//! Provides the listing page: balance cards and a transactions table that
//! can be sorted by any of its columns. Each page load mounts a view whose
//! state is kept on the server until the page is closed.

mod cards;
mod handlers;
mod registry;
mod sort;
mod table;

pub use handlers::{dispose_view, get_dashboard_content, get_dashboard_page, sort_transactions};
pub use registry::{ViewId, ViewRegistry};
