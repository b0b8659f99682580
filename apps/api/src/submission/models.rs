use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

/// Per-request identifier. Namespaces every intermediate file of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Form fields exactly as received, after whitespace trimming.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Comma-delimited, unparsed.
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub projects: String,
}

impl RawSubmission {
    /// Stores a text field by its form name. Returns `false` for names the
    /// form does not define.
    pub fn set_field(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "skills" => &mut self.skills,
            "education" => &mut self.education,
            "experience" => &mut self.experience,
            "projects" => &mut self.projects,
            _ => return false,
        };
        *slot = value.trim().to_string();
        true
    }
}

/// A validated resume request. Only built from a `RawSubmission` that passed
/// `validation::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub education: String,
    pub experience: String,
    pub projects: String,
}

impl Submission {
    pub(crate) fn from_validated(raw: RawSubmission) -> Self {
        Self {
            skills: parse_skills(&raw.skills),
            name: raw.name,
            email: raw.email,
            phone: raw.phone,
            education: raw.education,
            experience: raw.experience,
            projects: raw.projects,
        }
    }

    /// The single line the Skills section shows.
    pub fn skills_line(&self) -> String {
        self.skills.join(", ")
    }
}

/// Splits a comma-delimited skills string. Entries are trimmed and blanks
/// dropped, so blank input yields an empty list.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// An uploaded photo stored on disk for the duration of one cycle.
#[derive(Debug, Clone)]
pub struct TempPhoto {
    pub path: PathBuf,
    pub original_name: String,
    pub content_type: &'static str,
}
