//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element that every page
//! carries, see [crate::html::base].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A message shown at the bottom of the page until dismissed.
#[derive(Debug, Clone)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_markup(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                details,
            ),
            Alert::ErrorSimple { message } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                message,
                String::new(),
            ),
        };

        html! {
            div class=(container_style) role="alert"
            {
                div class="flex justify-between items-start gap-4"
                {
                    div
                    {
                        span class="font-medium" data-alert-message { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Fechar"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
