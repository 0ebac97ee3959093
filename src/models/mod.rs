//! Wire types exchanged with the staffing backend.
//!
//! Every response body is parsed into one of these structs at the client boundary;
//! a payload that does not match fails with a decode error instead of flowing through
//! the console as untyped JSON.

pub mod assignment;
pub mod dashboard;
pub mod project;
pub mod request;
pub mod resource;
pub mod user;

pub use assignment::{
    AssignRequest, AssignmentStatus, ExtendRequest, ProjectMember, ProjectRole, ReleaseRequest,
};
pub use dashboard::{ActiveProject, DashboardStats, EndingSoon, HistoryLog};
pub use project::{NewProject, Project, ProjectStatus};
pub use request::{PlanItem, ProjectProposal, RejectRequest, RequestStatus, StaffingRequest};
pub use resource::{AssignmentInfo, NewResource, Resource, ResourceStatus};
pub use user::{DevMan, LoginRequest, LoginResponse, NewDevMan, UserProfile, UserType};

/// Backend identifiers are database integers.
pub type Id = i64;

/// Body of a non-2xx response. The backend only guarantees `message`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
