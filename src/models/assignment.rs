use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Id;

/// The role a resource plays on a project. The dashboard offers four fixed labels,
/// but the backend stores free text, so anything else survives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectRole {
    TeamLead,
    BackendDeveloper,
    FrontendDeveloper,
    QualityAssurance,
    Other(String),
}

impl ProjectRole {
    pub const KNOWN: [ProjectRole; 4] = [
        ProjectRole::TeamLead,
        ProjectRole::BackendDeveloper,
        ProjectRole::FrontendDeveloper,
        ProjectRole::QualityAssurance,
    ];

    pub fn label(&self) -> &str {
        match self {
            ProjectRole::TeamLead => "Team Lead",
            ProjectRole::BackendDeveloper => "Backend Developer",
            ProjectRole::FrontendDeveloper => "Frontend Developer",
            ProjectRole::QualityAssurance => "Quality Assurance",
            ProjectRole::Other(label) => label,
        }
    }

    /// Parses user input. Blank input is no role at all.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ProjectRole::from(trimmed.to_string()))
        }
    }
}

impl From<String> for ProjectRole {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Team Lead" => ProjectRole::TeamLead,
            "Backend Developer" => ProjectRole::BackendDeveloper,
            "Frontend Developer" => ProjectRole::FrontendDeveloper,
            "Quality Assurance" => ProjectRole::QualityAssurance,
            _ => ProjectRole::Other(label),
        }
    }
}

impl From<ProjectRole> for String {
    fn from(role: ProjectRole) -> Self {
        match role {
            ProjectRole::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    #[serde(alias = "ASSIGNED")]
    Active,
    Released,
    Expired,
    #[serde(other)]
    Unknown,
}

impl AssignmentStatus {
    pub fn is_current(self) -> bool {
        matches!(self, AssignmentStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Active => "ACTIVE",
            AssignmentStatus::Released => "RELEASED",
            AssignmentStatus::Expired => "EXPIRED",
            AssignmentStatus::Unknown => "UNKNOWN",
        }
    }
}

/// One row of `GET /projects/{id}/resources`: a resource staffed on the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub assignment_id: Id,
    pub resource_name: String,
    pub project_role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: AssignmentStatus,
}

/// POST /resources/assign and POST /requests/assign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub resource_id: Id,
    pub project_id: Id,
    pub project_role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// POST /assignments/extend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendRequest {
    pub assignment_id: Id,
    pub new_end_date: NaiveDate,
    pub reason: String,
}

/// POST /assignments/release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequest {
    pub assignment_id: Id,
    pub release_date: NaiveDate,
    pub reason: String,
}
