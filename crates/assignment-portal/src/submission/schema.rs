//! Field constraints applied to a draft before it may leave the form.
//!
//! Shape rules (required name, email, minimum description length, URL) come
//! from the `validator` derive on [`SubmissionDraft`]. The level rule depends
//! on the options loaded for the current form instance, so it is checked here.

use validator::Validate;

use super::draft::{FieldErrors, SubmissionDraft, SubmissionField};
use super::levels::CandidateLevelOptions;

pub const LEVEL_REQUIRED: &str = "Candidate level is required.";
pub const LEVEL_NOT_OFFERED: &str = "Invalid candidate level.";

/// Runs every constraint; `Ok` only when all five fields pass together.
pub fn validate_draft(
    draft: &SubmissionDraft,
    options: &CandidateLevelOptions,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Err(report) = draft.validate() {
        for (name, violations) in report.field_errors() {
            let Some(field) = SubmissionField::from_wire(&name) else {
                continue;
            };
            if let Some(violation) = violations.first() {
                let message = violation
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{} is invalid.", field.label()));
                errors.insert(field, message);
            }
        }
    }

    if let Some(message) = level_violation(&draft.candidate_level, options) {
        errors.insert(SubmissionField::CandidateLevel, message);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn level_violation(level: &str, options: &CandidateLevelOptions) -> Option<&'static str> {
    if level.is_empty() {
        Some(LEVEL_REQUIRED)
    } else if !options.accepts(level) {
        Some(LEVEL_NOT_OFFERED)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> SubmissionDraft {
        SubmissionDraft {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            assignment_description: "Compiler for the form service".into(),
            github_repo_url: "https://github.com/grace/compiler".into(),
            candidate_level: "Senior".into(),
        }
    }

    fn loaded() -> CandidateLevelOptions {
        CandidateLevelOptions::Loaded(vec![
            "Junior".into(),
            "Middle".into(),
            "Senior".into(),
            "Principal".into(),
        ])
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(validate_draft(&valid_draft(), &loaded()), Ok(()));
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let errors = validate_draft(&SubmissionDraft::default(), &loaded())
            .expect_err("empty draft is rejected");

        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(SubmissionField::Name), Some("Name is required."));
        assert_eq!(errors.get(SubmissionField::Email), Some("Invalid email."));
        assert_eq!(
            errors.get(SubmissionField::AssignmentDescription),
            Some("Description must be at least 10 characters.")
        );
        assert_eq!(
            errors.get(SubmissionField::GithubRepoUrl),
            Some("Invalid GitHub URL.")
        );
        assert_eq!(
            errors.get(SubmissionField::CandidateLevel),
            Some(LEVEL_REQUIRED)
        );
    }

    #[test]
    fn single_violation_is_reported_alone() {
        let mut draft = valid_draft();
        draft.email = "grace-at-example".into();

        let errors = validate_draft(&draft, &loaded()).expect_err("bad email");
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(SubmissionField::Email));
    }

    #[test]
    fn description_length_counts_characters() {
        let mut draft = valid_draft();
        draft.assignment_description = "123456789".into();
        assert!(validate_draft(&draft, &loaded()).is_err());

        draft.assignment_description = "ünïcödé!!!".into();
        assert_eq!(validate_draft(&draft, &loaded()), Ok(()));
    }

    #[test]
    fn repo_url_requires_url_shape() {
        let mut draft = valid_draft();
        draft.github_repo_url = "github.com/grace/compiler".into();
        let errors = validate_draft(&draft, &loaded()).expect_err("missing scheme");
        assert_eq!(
            errors.get(SubmissionField::GithubRepoUrl),
            Some("Invalid GitHub URL.")
        );
    }

    #[test]
    fn level_must_be_one_of_loaded_options() {
        let mut draft = valid_draft();
        draft.candidate_level = "Senior".into();
        let options = CandidateLevelOptions::Loaded(vec!["Junior".into(), "Middle".into()]);

        let errors = validate_draft(&draft, &options).expect_err("not offered");
        assert_eq!(
            errors.get(SubmissionField::CandidateLevel),
            Some(LEVEL_NOT_OFFERED)
        );
    }

    #[test]
    fn pending_options_require_a_selection() {
        let mut draft = valid_draft();
        draft.candidate_level.clear();

        let errors = validate_draft(&draft, &CandidateLevelOptions::Pending)
            .expect_err("no selection");
        assert_eq!(
            errors.get(SubmissionField::CandidateLevel),
            Some(LEVEL_REQUIRED)
        );
    }

    #[test]
    fn validation_is_repeatable() {
        let draft = valid_draft();
        let first = validate_draft(&draft, &loaded());
        let second = validate_draft(&draft, &loaded());
        assert_eq!(first, second);
    }
}
