// src/directory.rs
//
// Resources, projects, DevMan accounts and the request queue: the forms around the
// assignment lifecycle. Reads return data; writes return the notice to show.

use std::sync::OnceLock;

use log::{error, info};
use regex::Regex;

use crate::api::Backend;
use crate::assignment::parse_date;
use crate::error::{ConsoleError, Result};
use crate::models::{
    AssignmentInfo, Id, NewDevMan, NewProject, NewResource, PlanItem, ProjectProposal,
    ProjectRole, RejectRequest, Resource, ResourceStatus, StaffingRequest,
};
use crate::notice::Notice;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

fn require_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email_pattern().is_match(email) {
        Ok(email.to_string())
    } else {
        Err(ConsoleError::validation("Email must be valid"))
    }
}

fn notice_for(outcome: Result<()>, success: &str, fallback: &str) -> Notice {
    match outcome {
        Ok(()) => Notice::success(success),
        Err(e) => {
            if !e.is_validation() {
                error!("{}: {}", fallback, e);
            }
            Notice::from_error(&e, fallback)
        }
    }
}

// ─── RESOURCES ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ResourceForm {
    pub full_name: String,
    pub email: String,
    pub employee_id: Option<String>,
}

impl ResourceForm {
    pub fn validate(&self) -> Result<NewResource> {
        if self.full_name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ConsoleError::validation("Please fill in all fields"));
        }
        Ok(NewResource {
            resource_name: self.full_name.trim().to_string(),
            employee_id: self
                .employee_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from),
            email: require_email(&self.email)?,
            status: ResourceStatus::Available,
        })
    }
}

/// New resources always start `AVAILABLE`.
pub async fn create_resource<B: Backend + ?Sized>(backend: &B, form: &ResourceForm) -> Notice {
    let outcome = async {
        let resource = form.validate()?;
        backend.create_resource(&resource).await?;
        info!("Resource {} created", resource.resource_name);
        Ok(())
    }
    .await;
    notice_for(
        outcome,
        "Saved Successfully! Resource created successfully.",
        "Failed to create resource",
    )
}

pub async fn delete_resource<B: Backend + ?Sized>(backend: &B, resource_id: Id) -> Notice {
    notice_for(
        backend.delete_resource(resource_id).await,
        "Resource deleted successfully!",
        "Failed to delete resource",
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceDetail {
    /// Nothing to fetch for an available resource.
    Available(Notice),
    Assignments(Vec<AssignmentInfo>),
}

pub async fn resource_detail<B: Backend + ?Sized>(backend: &B, resource: &Resource) -> Result<ResourceDetail> {
    if resource.status == ResourceStatus::Available {
        return Ok(ResourceDetail::Available(Notice::info(format!(
            "{} Currently Available for Assignment",
            resource.resource_name
        ))));
    }
    let assignments = backend.resource_assignments(resource.resource_id).await?;
    Ok(ResourceDetail::Assignments(assignments))
}

// ─── PROJECTS ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub project_name: String,
    pub client_name: String,
    pub pm_id: String,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<NewProject> {
        if self.project_name.trim().is_empty()
            || self.client_name.trim().is_empty()
            || self.pm_id.trim().is_empty()
        {
            return Err(ConsoleError::validation("Please fill in all fields"));
        }
        let pm_id = self
            .pm_id
            .trim()
            .parse()
            .map_err(|_| ConsoleError::validation("Please select a valid DevMan"))?;
        Ok(NewProject {
            project_name: self.project_name.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            pm_id,
        })
    }
}

pub async fn create_project<B: Backend + ?Sized>(backend: &B, form: &ProjectForm) -> Notice {
    let outcome = async {
        let project = form.validate()?;
        backend.create_project(&project).await
    }
    .await;
    notice_for(outcome, "Project created successfully!", "Failed to create project")
}

// ─── DEVMAN ACCOUNTS ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DevManForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl DevManForm {
    pub fn validate(&self) -> Result<NewDevMan> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ConsoleError::validation("Please fill in all fields"));
        }
        Ok(NewDevMan {
            name: self.name.trim().to_string(),
            email: require_email(&self.email)?,
            password: self.password.clone(),
        })
    }
}

pub async fn create_dev_man<B: Backend + ?Sized>(backend: &B, form: &DevManForm) -> Notice {
    let outcome = async {
        let dev_man = form.validate()?;
        backend.create_dev_man(&dev_man).await
    }
    .await;
    notice_for(
        outcome,
        "DevMan account created successfully",
        "Failed to create DevMan account",
    )
}

pub async fn delete_dev_man<B: Backend + ?Sized>(backend: &B, user_id: Id) -> Notice {
    notice_for(
        backend.delete_user(user_id).await,
        "DevMan deleted successfully",
        "Failed to delete DevMan",
    )
}

// ─── PROPOSALS & REQUEST QUEUE ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct PlanForm {
    pub resource_id: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProposalForm {
    pub project_name: String,
    pub client_name: String,
    pub description: String,
    pub plan: Vec<PlanForm>,
}

impl ProposalForm {
    pub fn validate(&self) -> Result<ProjectProposal> {
        if self.project_name.trim().is_empty()
            || self.client_name.trim().is_empty()
            || self.plan.is_empty()
        {
            return Err(ConsoleError::validation(
                "Please fill project details and add at least one resource",
            ));
        }

        let mut resource_plan = Vec::with_capacity(self.plan.len());
        for slot in &self.plan {
            let (Ok(resource_id), Some(role)) =
                (slot.resource_id.trim().parse::<Id>(), ProjectRole::parse(&slot.role))
            else {
                return Err(ConsoleError::validation(
                    "Please complete every resource in the plan",
                ));
            };
            let start_date = parse_date(&slot.start_date)?;
            let end_date = parse_date(&slot.end_date)?;
            if end_date < start_date {
                return Err(ConsoleError::validation("End Date cannot be before Start Date"));
            }
            resource_plan.push(PlanItem {
                resource_id,
                role,
                start_date,
                end_date,
            });
        }

        Ok(ProjectProposal {
            project_name: self.project_name.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            description: self.description.trim().to_string(),
            resource_plan,
        })
    }
}

pub async fn propose_project<B: Backend + ?Sized>(backend: &B, form: &ProposalForm) -> Notice {
    let outcome = async {
        let proposal = form.validate()?;
        backend.propose_project(&proposal).await
    }
    .await;
    // Backend wording is logged only; the user always sees the generic failure.
    match outcome {
        Err(ConsoleError::Api { status, message }) => {
            error!("Failed to submit project proposal: {} {:?}", status, message);
            Notice::error("Failed to submit project proposal")
        }
        outcome => notice_for(
            outcome,
            "Project proposal submitted successfully!",
            "Failed to submit project proposal",
        ),
    }
}

pub async fn approve_request<B: Backend + ?Sized>(backend: &B, request_id: Id) -> Notice {
    notice_for(
        backend.approve_request(request_id).await,
        "Request approved successfully",
        "Failed to approve request",
    )
}

pub async fn reject_request<B: Backend + ?Sized>(backend: &B, request_id: Id, reason: &str) -> Notice {
    let outcome = async {
        if reason.trim().is_empty() {
            return Err(ConsoleError::validation("Please provide a reason for rejection"));
        }
        backend
            .reject_request(
                request_id,
                &RejectRequest {
                    reason: reason.trim().to_string(),
                },
            )
            .await
    }
    .await;
    notice_for(outcome, "Request rejected successfully", "Failed to reject request")
}

pub fn pending_count(requests: &[StaffingRequest]) -> usize {
    requests.iter().filter(|r| r.is_pending()).count()
}
