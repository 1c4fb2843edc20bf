//! Assignment submission workflow: draft, validation schema, remote API
//! client, level loading, and the form component tying them together.

pub mod api;
pub mod draft;
pub mod form;
pub mod levels;
pub mod schema;

pub use api::{
    failure_message, ApiError, CandidatesApi, HttpCandidatesApi, FALLBACK_SUBMISSION_ERROR,
};
pub use draft::{FieldErrors, SubmissionDraft, SubmissionField};
pub use form::{AssignmentForm, FormView, SubmitOutcome};
pub use levels::{load_levels, CandidateLevelOptions, FALLBACK_LEVELS, LEVEL_FETCH_ERROR};
pub use schema::{validate_draft, LEVEL_NOT_OFFERED, LEVEL_REQUIRED};
