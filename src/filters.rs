//! Client-side views over fetched lists: resource and project filters, and the
//! project-load tier shown next to each resource.

use chrono::NaiveDate;

use crate::models::{Project, ProjectRole, ProjectStatus, Resource, ResourceStatus};

/// A resource as seen through a [`ResourceFilter`]. With a date filter the status and
/// role are those in effect on that date rather than the stored ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceView<'a> {
    pub resource: &'a Resource,
    pub status: ResourceStatus,
    pub role_on_date: Option<&'a ProjectRole>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub date: Option<NaiveDate>,
    /// `None` is "all".
    pub status: Option<ResourceStatus>,
    pub search: String,
    pub role: Option<ProjectRole>,
}

impl ResourceFilter {
    /// Applies date, status, search and role, in that order.
    pub fn apply<'a>(&self, resources: &'a [Resource]) -> Vec<ResourceView<'a>> {
        let query = self.search.trim().to_lowercase();

        resources
            .iter()
            .map(|resource| self.view(resource))
            .filter(|view| self.status.map_or(true, |status| view.status == status))
            .filter(|view| {
                query.is_empty() || view.resource.resource_name.to_lowercase().contains(&query)
            })
            .filter(|view| match &self.role {
                None => true,
                Some(role) if self.date.is_some() => view.role_on_date == Some(role),
                Some(role) => view
                    .resource
                    .current_assignments
                    .iter()
                    .any(|a| &a.project_role == role),
            })
            .collect()
    }

    fn view<'a>(&self, resource: &'a Resource) -> ResourceView<'a> {
        let Some(day) = self.date else {
            return ResourceView {
                resource,
                status: resource.status,
                role_on_date: None,
            };
        };

        match resource
            .active_assignments()
            .find(|assignment| assignment.covers(day))
        {
            Some(assignment) => ResourceView {
                resource,
                status: ResourceStatus::Assigned,
                role_on_date: Some(&assignment.project_role),
            },
            None => ResourceView {
                resource,
                status: ResourceStatus::Available,
                role_on_date: None,
            },
        }
    }
}

/// Status tabs of the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectTab {
    #[default]
    All,
    Ongoing,
    Hold,
    Closed,
}

impl ProjectTab {
    pub fn status(self) -> Option<ProjectStatus> {
        match self {
            ProjectTab::All => None,
            ProjectTab::Ongoing => Some(ProjectStatus::OnGoing),
            ProjectTab::Hold => Some(ProjectStatus::Hold),
            ProjectTab::Closed => Some(ProjectStatus::Closed),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub tab: ProjectTab,
    pub search: String,
}

impl ProjectFilter {
    /// Search matches project name, client name or manager name.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let query = self.search.trim().to_lowercase();
        projects
            .iter()
            .filter(|p| self.tab.status().map_or(true, |status| p.status == status))
            .filter(|p| {
                query.is_empty()
                    || p.project_name.to_lowercase().contains(&query)
                    || p.client_name.to_lowercase().contains(&query)
                    || p.dev_man_name
                        .as_deref()
                        .map_or(false, |name| name.to_lowercase().contains(&query))
            })
            .collect()
    }
}

/// How loaded a resource is, by number of active projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLoad {
    Idle,
    Normal,
    Busy,
    Overloaded,
}

impl ProjectLoad {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => ProjectLoad::Idle,
            1 => ProjectLoad::Normal,
            2 => ProjectLoad::Busy,
            _ => ProjectLoad::Overloaded,
        }
    }

    pub fn badge(count: u32) -> String {
        format!(
            "ACTIVE IN {} PROJECT{}",
            count,
            if count == 1 { "" } else { "S" }
        )
    }
}
