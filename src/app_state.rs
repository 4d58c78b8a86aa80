//! Implements a struct that holds the state of the web server.

use crate::{Error, api::ApiClient, dashboard::ViewRegistry, timezone::get_local_offset};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the transactions API.
    pub api_client: ApiClient,

    /// The dashboard views that are currently mounted.
    pub views: ViewRegistry,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with no mounted views.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(api_client: ApiClient, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            tracing::error!("Invalid timezone {local_timezone}");
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            api_client,
            views: ViewRegistry::default(),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
