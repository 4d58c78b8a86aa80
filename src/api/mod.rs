//! Access to the remote transactions API.
//!
//! The API is an external service: this crate only reads the transaction
//! listing from it and forwards CSV files to be imported.

mod client;
mod models;

pub use client::{ApiClient, ApiError};
pub use models::{Balance, Transaction, TransactionType, TransactionsResponse};

#[cfg(test)]
pub use models::Category;
