//! Alert messages that are swapped into the page's alert container by htmx.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An error message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Error { message: String, details: String },
    /// An error with one line per problem, e.g. every invalid form field.
    ErrorList { message: String, details: Vec<String> },
}

impl Alert {
    pub fn into_markup(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, vec![details]),
            Alert::ErrorList { message, details } => (message, details),
        };
        let details: Vec<String> = details
            .into_iter()
            .filter(|detail| !detail.is_empty())
            .collect();

        let style = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                class=(style)
                role="alert"
                data-alert-kind="error"
            {
                div class="flex items-start justify-between gap-4"
                {
                    span class="font-medium" { (message) }

                    button
                        type="button"
                        aria-label="Dismiss"
                        onclick="this.closest('[role=alert]').remove()"
                        class="bg-transparent border-none cursor-pointer"
                    {
                        "×"
                    }
                }

                @if details.len() == 1 {
                    p class="mt-1" { (details[0]) }
                } @else if !details.is_empty() {
                    ul class="mt-1.5 list-disc list-inside"
                    {
                        @for detail in &details {
                            li { (detail) }
                        }
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
