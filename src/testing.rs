//! In-memory backend for unit tests.
//!
//! Records every call in order and answers from canned data. A failure can be
//! queued per operation; it is returned once, on the next call of that operation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::Backend;
use crate::error::{ConsoleError, Result};
use crate::models::{
    ActiveProject, AssignRequest, AssignmentInfo, AssignmentStatus, DashboardStats, DevMan,
    EndingSoon, ExtendRequest, HistoryLog, Id, LoginRequest, LoginResponse, NewDevMan,
    NewProject, NewResource, Project, ProjectMember, ProjectProposal, ProjectStatus,
    RejectRequest, ReleaseRequest, Resource, ResourceStatus, StaffingRequest, UserType,
};

#[derive(Default)]
pub struct ScriptedBackend {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, ConsoleError>>,
    pub resources: Mutex<Vec<Resource>>,
    pub projects: Mutex<Vec<Project>>,
    pub members: Mutex<HashMap<Id, Vec<ProjectMember>>>,
    pub requests: Mutex<Vec<StaffingRequest>>,
    pub stats: Mutex<DashboardStats>,
}

impl ScriptedBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(op))
            .count()
    }

    pub fn fail(&self, op: &'static str, err: ConsoleError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    fn record(&self, op: &'static str, detail: String) -> Result<()> {
        let entry = if detail.is_empty() {
            op.to_string()
        } else {
            format!("{} {}", op, detail)
        };
        self.calls.lock().unwrap().push(entry);
        match self.failures.lock().unwrap().remove(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn available(resource_id: Id, name: &str) -> Resource {
    Resource {
        resource_id,
        resource_name: name.to_string(),
        employee_id: None,
        email: None,
        status: ResourceStatus::Available,
        project_count: Some(0),
        current_assignments: Vec::new(),
    }
}

pub fn project(project_id: Id, name: &str, client: &str, status: ProjectStatus) -> Project {
    Project {
        project_id,
        project_name: name.to_string(),
        client_name: client.to_string(),
        dev_man_name: Some("Budi".to_string()),
        dev_man_id: Some(3),
        member_count: 0,
        status,
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        self.record("login", credentials.email.clone())?;
        let user_type = if credentials.email.starts_with("devman") {
            UserType::DevManager
        } else {
            UserType::Admin
        };
        Ok(LoginResponse {
            token: "scripted-token".to_string(),
            name: "Scripted".to_string(),
            email: credentials.email.clone(),
            user_type,
        })
    }

    async fn resources(&self) -> Result<Vec<Resource>> {
        self.record("resources", String::new())?;
        Ok(self.resources.lock().unwrap().clone())
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<()> {
        self.record("create_resource", resource.resource_name.clone())?;
        let mut resources = self.resources.lock().unwrap();
        let next_id = resources.iter().map(|r| r.resource_id).max().unwrap_or(0) + 1;
        resources.push(Resource {
            email: Some(resource.email.clone()),
            ..available(next_id, &resource.resource_name)
        });
        Ok(())
    }

    async fn delete_resource(&self, resource_id: Id) -> Result<()> {
        self.record("delete_resource", resource_id.to_string())?;
        self.resources
            .lock()
            .unwrap()
            .retain(|r| r.resource_id != resource_id);
        Ok(())
    }

    async fn resource_assignments(&self, resource_id: Id) -> Result<Vec<AssignmentInfo>> {
        self.record("resource_assignments", resource_id.to_string())?;
        Ok(self
            .resources
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.resource_id == resource_id)
            .map(|r| r.current_assignments.clone())
            .unwrap_or_default())
    }

    async fn assign_resource(&self, body: &AssignRequest) -> Result<()> {
        self.record(
            "assign_resource",
            format!("{} {}", body.resource_id, body.project_id),
        )?;
        let project_name = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.project_id == body.project_id)
            .map(|p| p.project_name.clone())
            .unwrap_or_default();
        let mut resources = self.resources.lock().unwrap();
        if let Some(resource) = resources.iter_mut().find(|r| r.resource_id == body.resource_id) {
            resource.status = ResourceStatus::Assigned;
            resource.current_assignments.push(AssignmentInfo {
                assignment_id: 100 + resource.current_assignments.len() as Id,
                project_id: body.project_id,
                project_name,
                project_role: body.project_role.clone(),
                start_date: body.start_date,
                end_date: body.end_date,
                assignment_status: AssignmentStatus::Active,
                project_status: Some(ProjectStatus::OnGoing),
            });
            resource.project_count = Some(resource.project_count() + 1);
        }
        Ok(())
    }

    async fn request_assignment(&self, body: &AssignRequest) -> Result<()> {
        self.record(
            "request_assignment",
            format!("{} {}", body.resource_id, body.project_id),
        )
    }

    async fn extend_assignment(&self, body: &ExtendRequest) -> Result<()> {
        self.record(
            "extend_assignment",
            format!("{} {}", body.assignment_id, body.new_end_date),
        )?;
        for roster in self.members.lock().unwrap().values_mut() {
            for member in roster.iter_mut().filter(|m| m.assignment_id == body.assignment_id) {
                member.end_date = body.new_end_date;
            }
        }
        Ok(())
    }

    async fn release_assignment(&self, body: &ReleaseRequest) -> Result<()> {
        self.record(
            "release_assignment",
            format!("{} {}", body.assignment_id, body.release_date),
        )?;
        for roster in self.members.lock().unwrap().values_mut() {
            for member in roster.iter_mut().filter(|m| m.assignment_id == body.assignment_id) {
                member.end_date = body.release_date;
                member.status = AssignmentStatus::Released;
            }
        }
        Ok(())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        self.record("projects", String::new())?;
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, project: &NewProject) -> Result<()> {
        self.record("create_project", project.project_name.clone())
    }

    async fn project_members(&self, project_id: Id) -> Result<Vec<ProjectMember>> {
        self.record("project_members", project_id.to_string())?;
        Ok(self
            .members
            .lock()
            .unwrap()
            .get(&project_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn dev_mans(&self) -> Result<Vec<DevMan>> {
        self.record("dev_mans", String::new())?;
        Ok(Vec::new())
    }

    async fn create_dev_man(&self, dev_man: &NewDevMan) -> Result<()> {
        self.record("create_dev_man", dev_man.email.clone())
    }

    async fn delete_user(&self, user_id: Id) -> Result<()> {
        self.record("delete_user", user_id.to_string())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.record("dashboard_stats", String::new())?;
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn ending_soon(&self, days: u32) -> Result<Vec<EndingSoon>> {
        self.record("ending_soon", days.to_string())?;
        Ok(Vec::new())
    }

    async fn active_projects(&self) -> Result<Vec<ActiveProject>> {
        self.record("active_projects", String::new())?;
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == ProjectStatus::OnGoing)
            .map(|p| ActiveProject {
                project_id: p.project_id,
                project_name: p.project_name.clone(),
                client_name: p.client_name.clone(),
                status: p.status,
                member_count: u64::from(p.member_count),
            })
            .collect())
    }

    async fn requests(&self) -> Result<Vec<StaffingRequest>> {
        self.record("requests", String::new())?;
        Ok(self.requests.lock().unwrap().clone())
    }

    async fn request_history(&self) -> Result<Vec<StaffingRequest>> {
        self.record("request_history", String::new())?;
        Ok(Vec::new())
    }

    async fn project_pending_requests(&self, project_id: Id) -> Result<Vec<StaffingRequest>> {
        self.record("project_pending_requests", project_id.to_string())?;
        Ok(Vec::new())
    }

    async fn propose_project(&self, proposal: &ProjectProposal) -> Result<()> {
        self.record("propose_project", proposal.project_name.clone())
    }

    async fn approve_request(&self, request_id: Id) -> Result<()> {
        self.record("approve_request", request_id.to_string())
    }

    async fn reject_request(&self, request_id: Id, body: &RejectRequest) -> Result<()> {
        self.record("reject_request", format!("{} {}", request_id, body.reason))
    }

    async fn history_logs(&self) -> Result<Vec<HistoryLog>> {
        self.record("history_logs", String::new())?;
        Ok(Vec::new())
    }
}
