use crate::infra::{AppState, PortalState};
use assignment_portal::pages::{self, ErrorBoundary, FORM_ROUTE, THANK_YOU_ROUTE};
use assignment_portal::submission::{
    AssignmentForm, CandidatesApi, SubmissionDraft, SubmitOutcome,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Form, Json, Router};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

/// Form, confirmation and fallback routes backed by `api`.
pub(crate) fn portal_router<A>(api: Arc<A>) -> Router
where
    A: CandidatesApi + 'static,
{
    Router::new()
        .route(FORM_ROUTE, get(show_form::<A>).post(submit_form::<A>))
        .route(THANK_YOU_ROUTE, get(thank_you))
        .fallback(not_found)
        .with_state(PortalState::new(api))
}

pub(crate) fn with_ops_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

/// Turns handler panics into the error-boundary page.
pub(crate) fn with_error_boundary(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(render_panic))
}

fn render_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    ErrorBoundary::from_panic(payload).into_response()
}

pub(crate) async fn show_form<A>(State(state): State<PortalState<A>>) -> Html<String>
where
    A: CandidatesApi + 'static,
{
    let form = AssignmentForm::new(state.api);
    form.mount().await;
    pages::form::render(&form.view())
}

pub(crate) async fn submit_form<A>(
    State(state): State<PortalState<A>>,
    Form(draft): Form<SubmissionDraft>,
) -> Response
where
    A: CandidatesApi + 'static,
{
    let form = AssignmentForm::with_draft(state.api, draft);
    form.mount().await;

    let status = match form.submit().await {
        SubmitOutcome::Submitted { redirect_to } => {
            return Redirect::to(redirect_to).into_response();
        }
        SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Rejected(_) => StatusCode::BAD_GATEWAY,
        // Each request owns its form, so the guard is never contended here.
        // Browsers are kept to one post by the page's onsubmit disable.
        SubmitOutcome::InFlight => StatusCode::CONFLICT,
    };

    (status, pages::form::render(&form.view())).into_response()
}

pub(crate) async fn thank_you() -> Html<String> {
    pages::thank_you::render()
}

pub(crate) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, pages::thank_you::render_not_found())
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
