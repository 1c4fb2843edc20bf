use axum::response::Html;

use super::layout::{document, escape_html};
use super::FORM_ROUTE;
use crate::submission::{FormView, SubmissionField};

const TITLE: &str = "Assignment Submission";

/// Renders the submission form for a view snapshot.
pub fn render(view: &FormView) -> Html<String> {
    let mut body = String::new();
    body.push_str(&format!(
        "<main class=\"page-form\"><div class=\"card\"><h1>{TITLE}</h1>\
         <form method=\"post\" action=\"{FORM_ROUTE}\" novalidate \
         onsubmit=\"this.querySelector('button[type=submit]').disabled=true\">"
    ));

    if let Some(message) = &view.server_error {
        body.push_str(&format!(
            "<div class=\"banner\" role=\"alert\">{}</div>",
            escape_html(message)
        ));
    }

    text_input(&mut body, view, SubmissionField::Name, "John Doe");
    text_input(&mut body, view, SubmissionField::Email, "you@example.com");
    description_input(&mut body, view);
    text_input(
        &mut body,
        view,
        SubmissionField::GithubRepoUrl,
        "https://github.com/your-repo",
    );
    level_selector(&mut body, view);

    let (disabled, label) = if view.submitting {
        (" disabled", "Submitting...")
    } else {
        ("", "Submit")
    };
    body.push_str(&format!(
        "<button type=\"submit\" class=\"submit\"{disabled}>{label}</button></form></div></main>"
    ));

    Html(document(TITLE, &body))
}

fn text_input(body: &mut String, view: &FormView, field: SubmissionField, placeholder: &str) {
    let error = view.field_errors.get(field);
    body.push_str(&format!(
        "<div class=\"field\"><label for=\"{name}\">{label}</label>\
         <input id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" value=\"{value}\"{class}>",
        name = field.as_str(),
        label = field.label(),
        value = escape_html(view.draft.value(field)),
        class = invalid_class(error.is_some()),
    ));
    field_error(body, error);
    body.push_str("</div>");
}

fn description_input(body: &mut String, view: &FormView) {
    let field = SubmissionField::AssignmentDescription;
    let error = view.field_errors.get(field);
    body.push_str(&format!(
        "<div class=\"field\"><label for=\"{name}\">{label}</label>\
         <textarea id=\"{name}\" name=\"{name}\" \
         placeholder=\"Brief description of your solution\"{class}>{value}</textarea>",
        name = field.as_str(),
        label = field.label(),
        value = escape_html(view.draft.value(field)),
        class = invalid_class(error.is_some()),
    ));
    field_error(body, error);
    body.push_str("</div>");
}

fn level_selector(body: &mut String, view: &FormView) {
    let field = SubmissionField::CandidateLevel;
    let error = view.field_errors.get(field);
    body.push_str(&format!(
        "<div class=\"field\"><label for=\"{name}\">{label}</label>",
        name = field.as_str(),
        label = field.label(),
    ));

    match view.options.fetch_error() {
        Some(message) => {
            body.push_str(&format!("<p class=\"field-error\">{}</p>", escape_html(message)));
        }
        None => {
            body.push_str(&format!(
                "<select id=\"{name}\" name=\"{name}\"{class}><option value=\"\">Select level</option>",
                name = field.as_str(),
                class = invalid_class(error.is_some()),
            ));
            let selected = view.draft.value(field);
            for level in view.options.labels() {
                let marker = if level == selected { " selected" } else { "" };
                let level = escape_html(level);
                body.push_str(&format!("<option value=\"{level}\"{marker}>{level}</option>"));
            }
            body.push_str("</select>");
        }
    }

    field_error(body, error);
    body.push_str("</div>");
}

fn field_error(body: &mut String, error: Option<&str>) {
    if let Some(message) = error {
        body.push_str(&format!("<p class=\"field-error\">{}</p>", escape_html(message)));
    }
}

fn invalid_class(invalid: bool) -> &'static str {
    if invalid {
        " class=\"invalid\""
    } else {
        ""
    }
}
