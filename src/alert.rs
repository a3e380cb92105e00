//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the fixed `#alert-container` element that every
//! page carries, either as the target of a failed htmx request or as an
//! out-of-band swap alongside a successful one.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An alert message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with an explanation.
    Success {
        /// The headline of the alert.
        message: String,
        /// Extra text shown below the headline.
        details: String,
    },
    /// A success message with no explanation.
    SuccessSimple {
        /// The headline of the alert.
        message: String,
    },
    /// An error message with an explanation of what the user can do about it.
    Error {
        /// The headline of the alert.
        message: String,
        /// Extra text shown below the headline.
        details: String,
    },
}

const SUCCESS_STYLE: &str = "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow \
    text-green-800 bg-green-50 border border-green-300 \
    dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_STYLE: &str = "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow \
    text-red-800 bg-red-50 border border-red-300 \
    dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

impl Alert {
    /// Render the alert box.
    pub fn into_html(self) -> Markup {
        let (style, role, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, "status", message, details),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, "status", message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, "alert", message, details),
        };

        html! {
            div class=(style) role=(role) data-alert
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    class="ml-auto font-bold leading-none cursor-pointer"
                    aria-label="Dismiss"
                    data-dismiss-alert
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap into the alert container.
    ///
    /// Use this when the main target of the request is something other than
    /// the alert container, e.g., a row removed with `hx-swap="delete"`.
    pub fn into_oob_html(self) -> Markup {
        html! {
            div id="alert-container" hx-swap-oob="innerHTML" { (self.into_html()) }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_oob_html().into_string()).into_response()
    }
}
