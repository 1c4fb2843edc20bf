use std::any::Any;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

use super::layout::{document, escape_html};
use super::FORM_ROUTE;

pub const HEADING: &str = "Something went wrong!";

/// Last-resort page for failures nothing else handled.
///
/// Constructing one through [`capture`](Self::capture) or
/// [`from_panic`](Self::from_panic) logs the failure. The rendered page shows
/// the failure message verbatim and a `Try again` control that reloads the
/// reset route from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBoundary {
    message: String,
    reset_to: String,
}

impl ErrorBoundary {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reset_to: FORM_ROUTE.to_string(),
        }
    }

    pub fn capture(failure: &(dyn std::error::Error + 'static)) -> Self {
        error!(
            error = %failure,
            source = ?failure.source().map(ToString::to_string),
            "uncaught failure while serving page"
        );
        Self::new(failure.to_string())
    }

    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic".to_string()
        };
        error!(panic = %message, "handler panicked while serving page");
        Self::new(message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn reset_to(&self) -> &str {
        &self.reset_to
    }

    pub fn render(&self) -> Html<String> {
        let body = format!(
            "<main class=\"page-error\"><h1>{HEADING}</h1><p>{message}</p>\
             <form method=\"get\" action=\"{reset}\">\
             <button type=\"submit\" class=\"button\">Try again</button></form></main>",
            message = escape_html(&self.message),
            reset = escape_html(&self.reset_to),
        );
        Html(document("Something went wrong", &body))
    }
}

impl IntoResponse for ErrorBoundary {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.render()).into_response()
    }
}
