use axum::response::Html;

use super::layout::document;
use super::FORM_ROUTE;

pub const HEADING: &str = "Thank you for submitting your assignment!";

/// Confirmation page shown after the remote API accepts a submission.
pub fn render() -> Html<String> {
    let body = format!(
        "<main class=\"page-done\"><div class=\"card\"><h1>{HEADING}</h1>\
         <p>Your submission has been received.</p>\
         <a class=\"button\" href=\"{FORM_ROUTE}\">Back to Form</a></div></main>"
    );
    Html(document("Submission received", &body))
}

/// Shown for routes the portal does not serve.
pub fn render_not_found() -> Html<String> {
    let body = format!(
        "<main class=\"page-form\"><div class=\"card\"><h1>Page not found</h1>\
         <a class=\"button\" href=\"{FORM_ROUTE}\">Back to Form</a></div></main>"
    );
    Html(document("Page not found", &body))
}
