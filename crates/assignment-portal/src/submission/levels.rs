use tracing::{debug, warn};

use super::api::CandidatesApi;

/// Static message shown in place of the selector when the fetch fails.
pub const LEVEL_FETCH_ERROR: &str = "Failed to load candidate levels.";

/// Levels accepted while the remote list is not available.
pub const FALLBACK_LEVELS: [&str; 4] = ["Junior", "Middle", "Senior", "Principal"];

/// Candidate level choices for one form instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateLevelOptions {
    /// Fetch not resolved yet; the selector renders without options.
    #[default]
    Pending,
    /// Labels in the order the server returned them.
    Loaded(Vec<String>),
    /// Fetch failed; terminal for the page instance.
    Unavailable,
}

impl CandidateLevelOptions {
    pub fn labels(&self) -> &[String] {
        match self {
            CandidateLevelOptions::Loaded(labels) => labels,
            CandidateLevelOptions::Pending | CandidateLevelOptions::Unavailable => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CandidateLevelOptions::Unavailable)
    }

    pub fn fetch_error(&self) -> Option<&'static str> {
        self.is_unavailable().then_some(LEVEL_FETCH_ERROR)
    }

    /// Whether `level` is a selectable value for this instance.
    pub fn accepts(&self, level: &str) -> bool {
        match self {
            CandidateLevelOptions::Loaded(labels) => labels.iter().any(|label| label == level),
            CandidateLevelOptions::Pending | CandidateLevelOptions::Unavailable => {
                FALLBACK_LEVELS.contains(&level)
            }
        }
    }
}

/// Issues the single level read. Failures degrade to `Unavailable`; there is
/// no retry.
pub async fn load_levels<A>(api: &A) -> CandidateLevelOptions
where
    A: CandidatesApi,
{
    match api.fetch_levels().await {
        Ok(labels) => {
            debug!(count = labels.len(), "candidate level options loaded");
            CandidateLevelOptions::Loaded(labels)
        }
        Err(err) => {
            warn!(error = %err, "candidate level fetch failed");
            CandidateLevelOptions::Unavailable
        }
    }
}
