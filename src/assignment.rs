// src/assignment.rs
//
// Assign, extend and release. Each form is validated locally, forwarded to the
// backend, and the affected list is fetched again on success. Nothing is written
// to the local lists before the backend confirms.

use chrono::{NaiveDate, Utc};
use log::{debug, error, info, warn};

use crate::api::Backend;
use crate::auth::Session;
use crate::error::{ConsoleError, Result};
use crate::models::{
    AssignRequest, ExtendRequest, Id, ProjectMember, ProjectRole, ReleaseRequest, Resource,
    UserType,
};
use crate::notice::Notice;

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ConsoleError::validation(format!("Invalid date: {}", input.trim())))
}

fn is_blank(field: &str) -> bool {
    field.trim().is_empty()
}

// ─── FORMS ─────────────────────────────────────────────────────────────────────

/// Input of the "assign to project" form, as typed.
#[derive(Debug, Clone, Default)]
pub struct AssignForm {
    pub resource_id: Id,
    pub project_id: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

impl AssignForm {
    pub fn validate(&self) -> Result<AssignRequest> {
        if is_blank(&self.project_id)
            || is_blank(&self.role)
            || is_blank(&self.start_date)
            || is_blank(&self.end_date)
        {
            return Err(ConsoleError::validation("Please fill in all fields"));
        }

        let project_id = self
            .project_id
            .trim()
            .parse::<Id>()
            .map_err(|_| ConsoleError::validation("Please select a valid project"))?;
        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;
        if end_date < start_date {
            return Err(ConsoleError::validation("End Date cannot be before Start Date"));
        }
        let project_role = ProjectRole::parse(&self.role)
            .ok_or_else(|| ConsoleError::validation("Please fill in all fields"))?;

        Ok(AssignRequest {
            resource_id: self.resource_id,
            project_id,
            project_role,
            start_date,
            end_date,
        })
    }
}

/// Input of the "extend assignment" form.
///
/// The new end date is not compared with the current one, so an extension can also
/// pull the end date in.
#[derive(Debug, Clone, Default)]
pub struct ExtendForm {
    pub assignment_id: Id,
    pub new_end_date: String,
    pub reason: String,
}

impl ExtendForm {
    pub fn validate(&self) -> Result<ExtendRequest> {
        if is_blank(&self.new_end_date) || is_blank(&self.reason) {
            return Err(ConsoleError::validation("Please fill all fields"));
        }
        Ok(ExtendRequest {
            assignment_id: self.assignment_id,
            new_end_date: parse_date(&self.new_end_date)?,
            reason: self.reason.trim().to_string(),
        })
    }
}

/// Input of the "release assignment" form. The release date is fixed when the form
/// is opened and cannot be edited afterwards.
#[derive(Debug, Clone)]
pub struct ReleaseForm {
    assignment_id: Id,
    release_date: NaiveDate,
    pub reason: String,
}

impl ReleaseForm {
    /// Opens the form dated today (UTC).
    pub fn open(assignment_id: Id) -> Self {
        Self::open_on(assignment_id, Utc::now().date_naive())
    }

    pub fn open_on(assignment_id: Id, today: NaiveDate) -> Self {
        Self {
            assignment_id,
            release_date: today,
            reason: String::new(),
        }
    }

    pub fn assignment_id(&self) -> Id {
        self.assignment_id
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn validate(&self) -> Result<ReleaseRequest> {
        if is_blank(&self.reason) {
            return Err(ConsoleError::validation("Please provide a reason for release"));
        }
        Ok(ReleaseRequest {
            assignment_id: self.assignment_id,
            release_date: self.release_date,
            reason: self.reason.trim().to_string(),
        })
    }
}

// ─── CONTROLLER ────────────────────────────────────────────────────────────────

/// Resources staffed on one project, as last fetched.
#[derive(Debug, Clone)]
pub struct Roster {
    pub project_id: Id,
    pub members: Vec<ProjectMember>,
}

/// Drives the assignment lifecycle against a backend and keeps the lists the
/// operator is looking at.
///
/// Every state-changing call takes `&mut self`, so a controller never has two
/// submissions in flight.
pub struct AssignmentController<B> {
    backend: B,
    role: UserType,
    resources: Vec<Resource>,
    roster: Option<Roster>,
    loading: bool,
}

impl<B: Backend> AssignmentController<B> {
    pub fn new(backend: B, role: UserType) -> Self {
        Self {
            backend,
            role,
            resources: Vec::new(),
            roster: None,
            loading: false,
        }
    }

    pub fn for_session(backend: B, session: &Session) -> Self {
        Self::new(backend, session.user.user_type)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// GET /resources, replacing the local list. On failure the previous list stays.
    pub async fn refresh_resources(&mut self) -> Result<()> {
        self.loading = true;
        let fetched = self.backend.resources().await;
        self.loading = false;

        let resources = fetched.map_err(|e| {
            error!("Error fetching resources: {}", e);
            e
        })?;
        debug!("Fetched resources count: {}", resources.len());
        self.resources = resources;
        Ok(())
    }

    /// GET /projects/{id}/resources, replacing the open roster.
    pub async fn open_project(&mut self, project_id: Id) -> Result<()> {
        self.loading = true;
        let fetched = self.backend.project_members(project_id).await;
        self.loading = false;

        let members = fetched.map_err(|e| {
            error!("Error fetching project resources for {}: {}", project_id, e);
            e
        })?;
        self.roster = Some(Roster {
            project_id,
            members,
        });
        Ok(())
    }

    /// Administrators assign directly; DevMan users file an assignment request that
    /// an administrator approves later.
    pub async fn assign(&mut self, form: &AssignForm) -> Notice {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return Notice::from_error(&e, ""),
        };

        let (submitted, success) = match self.role {
            UserType::Admin => (
                self.backend.assign_resource(&request).await,
                "Assigned Successfully!",
            ),
            UserType::DevManager => (
                self.backend.request_assignment(&request).await,
                "Assignment request submitted for approval!",
            ),
        };
        if let Err(e) = submitted {
            error!("Error assigning resource {}: {}", request.resource_id, e);
            return Notice::from_error(&e, "Failed to assign resource");
        }

        info!(
            "Resource {} assigned to project {} as {}",
            request.resource_id, request.project_id, request.project_role
        );
        if let Err(e) = self.refresh_resources().await {
            warn!("Resource list left stale after assignment: {}", e);
        }
        Notice::success(success)
    }

    pub async fn extend(&mut self, project_id: Id, form: &ExtendForm) -> Notice {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return Notice::from_error(&e, ""),
        };

        if let Err(e) = self.backend.extend_assignment(&request).await {
            error!("Error extending assignment {}: {}", request.assignment_id, e);
            return Notice::from_error(&e, "Failed to extend assignment");
        }

        info!(
            "Assignment {} extended to {}",
            request.assignment_id, request.new_end_date
        );
        if let Err(e) = self.open_project(project_id).await {
            warn!("Project roster left stale after extension: {}", e);
        }
        Notice::success("Assignment extended successfully!")
    }

    pub async fn release(&mut self, project_id: Id, form: &ReleaseForm) -> Notice {
        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => return Notice::from_error(&e, ""),
        };

        if let Err(e) = self.backend.release_assignment(&request).await {
            error!("Error releasing assignment {}: {}", request.assignment_id, e);
            return Notice::from_error(&e, "Failed to release assignment");
        }

        info!(
            "Assignment {} released on {}",
            request.assignment_id, request.release_date
        );
        if let Err(e) = self.open_project(project_id).await {
            warn!("Project roster left stale after release: {}", e);
        }
        Notice::success("Assignment released successfully!")
    }
}
