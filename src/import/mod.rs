//! Importing transactions from CSV files.
//!
//! The files are not parsed here, they are forwarded to the transactions API
//! which does the importing.

mod page;
mod upload;

pub use page::get_import_page;
pub use upload::import_transactions;
