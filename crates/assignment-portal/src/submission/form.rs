use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::api::CandidatesApi;
use super::draft::{FieldErrors, SubmissionDraft, SubmissionField};
use super::levels::{load_levels, CandidateLevelOptions};
use super::schema::validate_draft;
use crate::pages::THANK_YOU_ROUTE;

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The remote API accepted the draft; the caller should navigate.
    Submitted { redirect_to: &'static str },
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The remote API refused the draft; the banner message is attached.
    Rejected(String),
    /// Another submission from this form is still outstanding.
    InFlight,
}

/// Snapshot of everything needed to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub draft: SubmissionDraft,
    pub options: CandidateLevelOptions,
    pub field_errors: FieldErrors,
    pub server_error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Default)]
struct FormState {
    draft: SubmissionDraft,
    field_errors: FieldErrors,
    server_error: Option<String>,
}

/// One instance of the assignment submission form.
///
/// Owns the draft and the level options for its lifetime. Levels are fetched
/// at most once (on [`mount`](Self::mount)) and submissions are serialized by
/// an in-flight flag, so a second submit while one is outstanding never
/// reaches the network.
pub struct AssignmentForm<A> {
    api: Arc<A>,
    options: OnceCell<CandidateLevelOptions>,
    state: Mutex<FormState>,
    in_flight: AtomicBool,
}

impl<A> AssignmentForm<A>
where
    A: CandidatesApi,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            options: OnceCell::new(),
            state: Mutex::new(FormState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Starts a form pre-filled with input carried over from a request.
    pub fn with_draft(api: Arc<A>, draft: SubmissionDraft) -> Self {
        let form = Self::new(api);
        form.lock().draft = draft;
        form
    }

    /// Loads the level options. Later calls reuse the first result.
    pub async fn mount(&self) -> &CandidateLevelOptions {
        self.options
            .get_or_init(|| async { load_levels(self.api.as_ref()).await })
            .await
    }

    pub fn options(&self) -> CandidateLevelOptions {
        self.options.get().cloned().unwrap_or_default()
    }

    pub fn update_field(&self, field: SubmissionField, value: impl Into<String>) {
        self.lock().draft.set(field, value);
    }

    pub fn draft(&self) -> SubmissionDraft {
        self.lock().draft.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates the current draft against the loaded options without side effects.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let draft = self.draft();
        validate_draft(&draft, &self.options())
    }

    /// Validate, then send, then report where to go next.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("submission already in flight");
            return SubmitOutcome::InFlight;
        };

        let draft = {
            let mut state = self.lock();
            state.server_error = None;
            state.draft.clone()
        };

        if let Err(errors) = validate_draft(&draft, &self.options()) {
            self.lock().field_errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.lock().field_errors = FieldErrors::new();

        match self.api.submit_assignment(&draft).await {
            Ok(()) => {
                info!(level = %draft.candidate_level, "assignment submitted");
                self.lock().draft = SubmissionDraft::default();
                SubmitOutcome::Submitted {
                    redirect_to: THANK_YOU_ROUTE,
                }
            }
            Err(err) => {
                let message = err.display_message();
                warn!(error = %err, status = ?err.status(), "assignment submission rejected");
                self.lock().server_error = Some(message.clone());
                SubmitOutcome::Rejected(message)
            }
        }
    }

    pub fn view(&self) -> FormView {
        let state = self.lock();
        FormView {
            draft: state.draft.clone(),
            options: self.options(),
            field_errors: state.field_errors.clone(),
            server_error: state.server_error.clone(),
            submitting: self.is_submitting(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the in-flight flag for the duration of one submission and clears
/// it on drop, whatever the outcome.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
