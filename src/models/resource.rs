use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AssignmentStatus, Id, ProjectRole, ProjectStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceStatus {
    Available,
    Assigned,
}

impl ResourceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceStatus::Available => "AVAILABLE",
            ResourceStatus::Assigned => "ASSIGNED",
        }
    }
}

/// A staffable employee as returned by `GET /resources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_id: Id,
    pub resource_name: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub status: ResourceStatus,
    #[serde(default)]
    pub project_count: Option<u32>,
    #[serde(default)]
    pub current_assignments: Vec<AssignmentInfo>,
}

impl Resource {
    /// Number of projects the resource is active in. Falls back to counting
    /// `ACTIVE` assignments when the backend omits the field.
    pub fn project_count(&self) -> u32 {
        self.project_count.unwrap_or_else(|| {
            self.current_assignments
                .iter()
                .filter(|a| a.assignment_status.is_current())
                .count() as u32
        })
    }

    pub fn active_assignments(&self) -> impl Iterator<Item = &AssignmentInfo> {
        self.current_assignments
            .iter()
            .filter(|a| a.assignment_status.is_current())
    }
}

/// An assignment as embedded in a resource, and as listed by
/// `GET /resources/{id}/assignments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInfo {
    pub assignment_id: Id,
    pub project_id: Id,
    pub project_name: String,
    pub project_role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub assignment_status: AssignmentStatus,
    #[serde(default)]
    pub project_status: Option<ProjectStatus>,
}

impl AssignmentInfo {
    /// Inclusive on both ends.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// POST /resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    pub resource_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub email: String,
    pub status: ResourceStatus,
}
