use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[serde(rename = "ON_GOING", alias = "ONGOING")]
    OnGoing,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::OnGoing => "ON_GOING",
            ProjectStatus::Hold => "HOLD",
            ProjectStatus::Closed => "CLOSED",
            ProjectStatus::Completed => "COMPLETED",
        }
    }
}

/// A project as returned by `GET /projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: Id,
    pub project_name: String,
    pub client_name: String,
    #[serde(default, alias = "pmName")]
    pub dev_man_name: Option<String>,
    #[serde(default)]
    pub dev_man_id: Option<Id>,
    #[serde(default)]
    pub member_count: u32,
    pub status: ProjectStatus,
}

/// POST /projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub project_name: String,
    pub client_name: String,
    pub pm_id: Id,
}
