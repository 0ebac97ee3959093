use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Id, ProjectRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

/// A DevMan request (assign, extend, release or new project) awaiting or past
/// admin review, as returned by `GET /requests` and `GET /requests/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingRequest {
    pub id: Id,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub requester: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub current_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub new_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub submitted_date: Option<NaiveDateTime>,
}

impl StaffingRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// One resource slot in a project proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub resource_id: Id,
    pub role: ProjectRole,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// POST /requests/project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProposal {
    pub project_name: String,
    pub client_name: String,
    #[serde(default)]
    pub description: String,
    pub resource_plan: Vec<PlanItem>,
}

/// POST /requests/{id}/reject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}
