//! GoFinances is a dashboard for a personal-finance ledger.
//!
//! This library serves HTML pages for the transactions API of a GoFinances
//! back-end: a listing of every transaction with income, outcome and total
//! balances, a table that can be sorted by any of its columns, and a page for
//! importing transactions from CSV files.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod import;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, ApiError};
pub use app_state::AppState;
pub use routing::build_router;

use crate::{alert::Alert, dashboard::ViewId, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request to the transactions API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The dashboard view was disposed, has expired or never existed.
    ///
    /// The client should mount a new view by reloading the listing page.
    #[error("the dashboard view {0} does not exist")]
    ViewNotFound(ViewId),

    /// Could not acquire the lock on the dashboard view registry.
    #[error("could not acquire the view registry lock")]
    ViewRegistryLock,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The multipart form could not be parsed as a list of CSV files.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a CSV file.
    #[error("File is not a CSV")]
    NotCSV,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::ViewNotFound(view_id) => {
                tracing::debug!("view {view_id} not found, redirecting to a new view");
                (
                    HxRedirect(endpoints::ROOT.to_owned()),
                    StatusCode::NOT_FOUND,
                )
                    .into_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &format!(
                    "Não foi possível usar o fuso horário \"{timezone}\". Verifique as \
                    configurações do servidor."
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::Api(ApiError::Status(status)) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "A API recusou o pedido".to_owned(),
                    details: format!("A API de transações respondeu com o status {status}."),
                },
            )
                .into_response(),
            Error::Api(error) => {
                tracing::error!("transactions API request failed: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Não foi possível falar com a API".to_owned(),
                        details: "Verifique se a API de transações está no ar e tente novamente."
                            .to_owned(),
                    },
                )
                    .into_response()
            }
            Error::NotCSV => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "O arquivo deve ser um CSV.".to_owned(),
                },
            )
                .into_response(),
            Error::MultipartError(error) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Não foi possível ler o formulário".to_owned(),
                    details: error,
                },
            )
                .into_response(),
            Error::ViewNotFound(_) => self.into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Algo deu errado".to_owned(),
                        details: "Ocorreu um erro inesperado, verifique os logs do servidor."
                            .to_owned(),
                    },
                )
                    .into_response()
            }
        }
    }
}
