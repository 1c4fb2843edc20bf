use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// In-progress assignment submission as typed by the candidate.
///
/// The serialized form doubles as the body posted to the candidates API, so
/// the field names must stay in sync with the remote contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubmissionDraft {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 10, message = "Description must be at least 10 characters."))]
    pub assignment_description: String,
    #[serde(default)]
    #[validate(url(message = "Invalid GitHub URL."))]
    pub github_repo_url: String,
    /// Checked against the loaded level options by the schema, not by the derive.
    #[serde(default)]
    pub candidate_level: String,
}

impl SubmissionDraft {
    pub fn value(&self, field: SubmissionField) -> &str {
        match field {
            SubmissionField::Name => &self.name,
            SubmissionField::Email => &self.email,
            SubmissionField::AssignmentDescription => &self.assignment_description,
            SubmissionField::GithubRepoUrl => &self.github_repo_url,
            SubmissionField::CandidateLevel => &self.candidate_level,
        }
    }

    pub fn set(&mut self, field: SubmissionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            SubmissionField::Name => self.name = value,
            SubmissionField::Email => self.email = value,
            SubmissionField::AssignmentDescription => self.assignment_description = value,
            SubmissionField::GithubRepoUrl => self.github_repo_url = value,
            SubmissionField::CandidateLevel => self.candidate_level = value,
        }
    }
}

/// The five inputs of the submission form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubmissionField {
    Name,
    Email,
    AssignmentDescription,
    GithubRepoUrl,
    CandidateLevel,
}

impl SubmissionField {
    pub const ALL: [SubmissionField; 5] = [
        SubmissionField::Name,
        SubmissionField::Email,
        SubmissionField::AssignmentDescription,
        SubmissionField::GithubRepoUrl,
        SubmissionField::CandidateLevel,
    ];

    /// Name used on the wire and as the HTML input name.
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionField::Name => "name",
            SubmissionField::Email => "email",
            SubmissionField::AssignmentDescription => "assignment_description",
            SubmissionField::GithubRepoUrl => "github_repo_url",
            SubmissionField::CandidateLevel => "candidate_level",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionField::Name => "Name",
            SubmissionField::Email => "Email",
            SubmissionField::AssignmentDescription => "Assignment Description",
            SubmissionField::GithubRepoUrl => "GitHub Repo URL",
            SubmissionField::CandidateLevel => "Candidate Level",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field violation messages produced by the validation schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<SubmissionField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message; the first violation reported for a field wins.
    pub fn insert(&mut self, field: SubmissionField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: SubmissionField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: SubmissionField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubmissionField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
