use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Id, ProjectStatus};

/// GET /dashboard/stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_resources: u64,
    pub available_resources: u64,
    pub active_projects: u64,
    pub pending_requests: u64,
}

/// GET /dashboard/assignments-ending-soon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndingSoon {
    pub assignment_id: Id,
    pub project_id: Id,
    pub resource_name: String,
    pub project_role: String,
    pub project_name: String,
    pub end_date: NaiveDate,
    pub days_left: i64,
}

/// GET /dashboard/active-projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveProject {
    pub project_id: Id,
    pub project_name: String,
    pub client_name: String,
    pub status: ProjectStatus,
    pub member_count: u64,
}

/// GET /history-logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLog {
    pub log_id: Id,
    pub entity_type: String,
    pub activity_type: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub resource_name: Option<String>,
    #[serde(default)]
    pub resource_role: Option<String>,
    pub description: String,
    #[serde(default)]
    pub performed_by: Option<String>,
    pub timestamp: NaiveDateTime,
}
