//! Ordering of the transactions table.
//!
//! The table starts out in the order the API listed the transactions.
//! Activating a column header sorts by that column:
//! - a column that is not active yet becomes active, sorted ascending,
//! - activating the active column again flips the direction.

use std::{cmp::Ordering, fmt::Display};

use serde::Deserialize;

use crate::api::Transaction;

/// A column of the transactions table that can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    /// The transaction title, compared lexicographically.
    Title,
    /// The transaction value, compared numerically.
    Price,
    /// The category title, compared lexicographically.
    Category,
    /// The creation timestamp, compared chronologically.
    Date,
}

impl SortColumn {
    /// Every column, in the order they appear in the table.
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Title,
        SortColumn::Price,
        SortColumn::Category,
        SortColumn::Date,
    ];

    /// The path segment used in the sort endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Title => "title",
            SortColumn::Price => "price",
            SortColumn::Category => "category",
            SortColumn::Date => "date",
        }
    }

    /// The column header text.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Title => "Título",
            SortColumn::Price => "Preço",
            SortColumn::Category => "Categoria",
            SortColumn::Date => "Data",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortColumn::Title => a.title.cmp(&b.title),
            SortColumn::Price => a.value.total_cmp(&b.value),
            SortColumn::Category => a.category.title.cmp(&b.category.title),
            SortColumn::Date => a.created_at.cmp(&b.created_at),
        }
    }
}

impl Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort column and direction of the transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    /// `None` while the table is still in the order the API listed it.
    pub column: Option<SortColumn>,
    /// Meaningless while `column` is `None`.
    pub ascending: bool,
}

impl SortState {
    /// The state after the header of `column` has been activated.
    pub fn activate(self, column: SortColumn) -> Self {
        if self.column == Some(column) {
            Self {
                column: self.column,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column: Some(column),
                ascending: true,
            }
        }
    }

    /// Whether `column` is the active column and sorted ascending.
    pub fn is_ascending(self, column: SortColumn) -> bool {
        self.column == Some(column) && self.ascending
    }
}

/// Return `transactions` ordered according to `state`.
///
/// The sort is stable: transactions with equal keys keep their relative order.
pub fn sort_transactions(transactions: &[Transaction], state: SortState) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();

    if let Some(column) = state.column {
        sorted.sort_by(|a, b| {
            let ordering = column.compare(a, b);

            if state.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    sorted
}
