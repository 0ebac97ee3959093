// src/api.rs

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{ConsoleError, Result};
use crate::models::{
    ActiveProject, AssignRequest, AssignmentInfo, DashboardStats, DevMan, EndingSoon, ErrorBody,
    ExtendRequest, HistoryLog, Id, LoginRequest, LoginResponse, NewDevMan, NewProject,
    NewResource, Project, ProjectMember, ProjectProposal, RejectRequest, ReleaseRequest,
    Resource, StaffingRequest,
};

/// Everything the console asks of the staffing backend.
///
/// `ApiClient` is the real implementation. Controllers take any `Backend` so they can
/// be exercised against scripted data.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse>;

    // ─── RESOURCES ──────────────────────────────────────────────────────────────
    async fn resources(&self) -> Result<Vec<Resource>>;
    async fn create_resource(&self, resource: &NewResource) -> Result<()>;
    async fn delete_resource(&self, resource_id: Id) -> Result<()>;
    async fn resource_assignments(&self, resource_id: Id) -> Result<Vec<AssignmentInfo>>;

    // ─── ASSIGNMENTS ────────────────────────────────────────────────────────────
    async fn assign_resource(&self, body: &AssignRequest) -> Result<()>;
    async fn request_assignment(&self, body: &AssignRequest) -> Result<()>;
    async fn extend_assignment(&self, body: &ExtendRequest) -> Result<()>;
    async fn release_assignment(&self, body: &ReleaseRequest) -> Result<()>;

    // ─── PROJECTS ───────────────────────────────────────────────────────────────
    async fn projects(&self) -> Result<Vec<Project>>;
    async fn create_project(&self, project: &NewProject) -> Result<()>;
    async fn project_members(&self, project_id: Id) -> Result<Vec<ProjectMember>>;

    // ─── USERS ──────────────────────────────────────────────────────────────────
    async fn dev_mans(&self) -> Result<Vec<DevMan>>;
    async fn create_dev_man(&self, dev_man: &NewDevMan) -> Result<()>;
    async fn delete_user(&self, user_id: Id) -> Result<()>;

    // ─── DASHBOARD ──────────────────────────────────────────────────────────────
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
    async fn ending_soon(&self, days: u32) -> Result<Vec<EndingSoon>>;
    async fn active_projects(&self) -> Result<Vec<ActiveProject>>;

    // ─── REQUESTS & HISTORY ─────────────────────────────────────────────────────
    async fn requests(&self) -> Result<Vec<StaffingRequest>>;
    async fn request_history(&self) -> Result<Vec<StaffingRequest>>;
    async fn project_pending_requests(&self, project_id: Id) -> Result<Vec<StaffingRequest>>;
    async fn propose_project(&self, proposal: &ProjectProposal) -> Result<()>;
    async fn approve_request(&self, request_id: Id) -> Result<()>;
    async fn reject_request(&self, request_id: Id, body: &RejectRequest) -> Result<()>;
    async fn history_logs(&self) -> Result<Vec<HistoryLog>>;
}

/// HTTP client for the staffing REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// A request without the bearer token. Only login goes out this way.
    fn anonymous(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.http.request(method, url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.anonymous(method, path);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.send_as(builder, self.token.is_some()).await
    }

    async fn send_as(&self, builder: RequestBuilder, authenticated: bool) -> Result<Response> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        warn!("request failed with {}: {:?}", status, message);

        // A 401 on an authenticated call means the stored token is no longer honoured.
        // Without a token (login) the backend's own message is what the user needs.
        if status == StatusCode::UNAUTHORIZED && authenticated {
            return Err(ConsoleError::Unauthorized);
        }
        Err(ConsoleError::Api { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn post_empty(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::POST, path)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let builder = self.anonymous(Method::POST, "/auth/login").json(credentials);
        let resp = self.send_as(builder, false).await?;
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn resources(&self) -> Result<Vec<Resource>> {
        self.get_json("/resources").await
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<()> {
        self.post_json("/resources", resource).await?;
        Ok(())
    }

    async fn delete_resource(&self, resource_id: Id) -> Result<()> {
        self.delete(&format!("/resources/{}", resource_id)).await
    }

    async fn resource_assignments(&self, resource_id: Id) -> Result<Vec<AssignmentInfo>> {
        self.get_json(&format!("/resources/{}/assignments", resource_id))
            .await
    }

    async fn assign_resource(&self, body: &AssignRequest) -> Result<()> {
        self.post_json("/resources/assign", body).await?;
        Ok(())
    }

    async fn request_assignment(&self, body: &AssignRequest) -> Result<()> {
        self.post_json("/requests/assign", body).await?;
        Ok(())
    }

    async fn extend_assignment(&self, body: &ExtendRequest) -> Result<()> {
        self.post_json("/assignments/extend", body).await?;
        Ok(())
    }

    async fn release_assignment(&self, body: &ReleaseRequest) -> Result<()> {
        self.post_json("/assignments/release", body).await?;
        Ok(())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        self.get_json("/projects").await
    }

    async fn create_project(&self, project: &NewProject) -> Result<()> {
        self.post_json("/projects", project).await?;
        Ok(())
    }

    async fn project_members(&self, project_id: Id) -> Result<Vec<ProjectMember>> {
        self.get_json(&format!("/projects/{}/resources", project_id))
            .await
    }

    async fn dev_mans(&self) -> Result<Vec<DevMan>> {
        self.get_json("/users/pms").await
    }

    async fn create_dev_man(&self, dev_man: &NewDevMan) -> Result<()> {
        self.post_json("/users/pm", dev_man).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: Id) -> Result<()> {
        self.delete(&format!("/users/{}", user_id)).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_json("/dashboard/stats").await
    }

    async fn ending_soon(&self, days: u32) -> Result<Vec<EndingSoon>> {
        self.get_json(&format!("/dashboard/assignments-ending-soon?days={}", days))
            .await
    }

    async fn active_projects(&self) -> Result<Vec<ActiveProject>> {
        self.get_json("/dashboard/active-projects").await
    }

    async fn requests(&self) -> Result<Vec<StaffingRequest>> {
        self.get_json("/requests").await
    }

    async fn request_history(&self) -> Result<Vec<StaffingRequest>> {
        self.get_json("/requests/history").await
    }

    async fn project_pending_requests(&self, project_id: Id) -> Result<Vec<StaffingRequest>> {
        self.get_json(&format!("/requests/project/{}/pending", project_id))
            .await
    }

    async fn propose_project(&self, proposal: &ProjectProposal) -> Result<()> {
        self.post_json("/requests/project", proposal).await?;
        Ok(())
    }

    async fn approve_request(&self, request_id: Id) -> Result<()> {
        self.post_empty(&format!("/requests/{}/approve", request_id))
            .await
    }

    async fn reject_request(&self, request_id: Id, body: &RejectRequest) -> Result<()> {
        self.post_json(&format!("/requests/{}/reject", request_id), body)
            .await?;
        Ok(())
    }

    async fn history_logs(&self) -> Result<Vec<HistoryLog>> {
        self.get_json("/history-logs").await
    }
}
