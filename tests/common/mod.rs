// tests/common/mod.rs
//
// In-process staffing backend for integration tests. Handlers keep their data in
// JSON, record every call, and check the bearer token like the real API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use actix_web::{http::header, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use staffing_console::{ApiClient, Config};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
    /// Raw `Authorization` header, if the call carried one.
    pub authorization: Option<String>,
}

pub struct StubBackend {
    log: Mutex<Vec<Recorded>>,
    pub resources: Mutex<Vec<Value>>,
    pub members: Mutex<Vec<Value>>,
    pub requests: Mutex<Vec<Value>>,
    /// Status and raw body the next mutating call answers with.
    pub next_failure: Mutex<Option<(u16, String)>>,
    pub reject_tokens: AtomicBool,
    token: String,
}

impl Default for StubBackend {
    fn default() -> Self {
        let claims = json!({
            "sub": "admin@inteleq.test",
            "exp": Utc::now().timestamp() + 3600,
        });
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"stub-secret"))
            .expect("stub token");
        Self {
            log: Mutex::new(Vec::new()),
            resources: Mutex::new(vec![json!({
                "resourceId": 7,
                "resourceName": "Rizky Pratama",
                "employeeId": "EMP-007",
                "email": "rizky@inteleq.test",
                "status": "AVAILABLE",
                "projectCount": 0,
                "currentAssignments": []
            })]),
            members: Mutex::new(vec![json!({
                "assignmentId": 41,
                "resourceName": "Sari Wulandari",
                "projectRole": "Quality Assurance",
                "startDate": "2026-01-01",
                "endDate": "2026-06-30",
                "status": "ACTIVE"
            })]),
            requests: Mutex::new(Vec::new()),
            next_failure: Mutex::new(None),
            reject_tokens: AtomicBool::new(false),
            token,
        }
    }
}

impl StubBackend {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// `"METHOD /path"` for every call, in order.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn body_of(&self, path: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.path == path)
            .and_then(|c| c.body)
    }

    pub fn fail_next(&self, status: u16, body: &str) {
        *self.next_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    fn record(&self, req: &HttpRequest, body: Option<Value>) {
        self.log.lock().unwrap().push(Recorded {
            method: req.method().to_string(),
            path: req.path().to_string(),
            body,
            authorization: req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
    }

    fn authorised(&self, req: &HttpRequest) -> bool {
        if self.reject_tokens.load(Ordering::SeqCst) {
            return false;
        }
        let expected = format!("Bearer {}", self.token);
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v == expected)
    }

    fn take_failure(&self) -> Option<HttpResponse> {
        self.next_failure.lock().unwrap().take().map(|(status, body)| {
            let status = actix_web::http::StatusCode::from_u16(status)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status)
                .content_type("application/json")
                .body(body)
        })
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" }))
}

/// POST /auth/login
async fn login(req: HttpRequest, data: web::Data<StubBackend>, body: web::Json<Value>) -> impl Responder {
    data.record(&req, Some(body.0.clone()));
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["password"] == "wrong" {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid email or password" }));
    }
    let user_type = if email.starts_with("devman") { "DEV_MANAGER" } else { "Admin" };
    HttpResponse::Ok().json(json!({
        "token": data.token,
        "name": "Rina Kusuma",
        "email": email,
        "userType": user_type,
    }))
}

/// GET /resources
async fn list_resources(req: HttpRequest, data: web::Data<StubBackend>) -> impl Responder {
    data.record(&req, None);
    if !data.authorised(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(data.resources.lock().unwrap().clone())
}

/// POST /resources/assign
async fn assign_resource(req: HttpRequest, data: web::Data<StubBackend>, body: web::Json<Value>) -> impl Responder {
    data.record(&req, Some(body.0.clone()));
    if !data.authorised(&req) {
        return unauthorized();
    }
    if let Some(resp) = data.take_failure() {
        return resp;
    }

    let mut resources = data.resources.lock().unwrap();
    let Some(resource) = resources
        .iter_mut()
        .find(|r| r["resourceId"] == body["resourceId"])
    else {
        return HttpResponse::NotFound().json(json!({ "message": "Resource not found" }));
    };
    resource["status"] = json!("ASSIGNED");
    resource["projectCount"] = json!(resource["projectCount"].as_u64().unwrap_or(0) + 1);
    if let Some(list) = resource["currentAssignments"].as_array_mut() {
        let assignment_id = 100 + list.len();
        list.push(json!({
            "assignmentId": assignment_id,
            "projectId": body["projectId"],
            "projectName": "Atlas",
            "projectRole": body["projectRole"],
            "startDate": body["startDate"],
            "endDate": body["endDate"],
            "assignmentStatus": "ACTIVE",
            "projectStatus": "ON_GOING"
        }));
    }
    HttpResponse::Ok().json(json!({ "message": "Resource assigned successfully" }))
}

/// POST /requests/assign
async fn request_assignment(req: HttpRequest, data: web::Data<StubBackend>, body: web::Json<Value>) -> impl Responder {
    data.record(&req, Some(body.0.clone()));
    if !data.authorised(&req) {
        return unauthorized();
    }
    if let Some(resp) = data.take_failure() {
        return resp;
    }
    let mut requests = data.requests.lock().unwrap();
    let id = requests.len() + 1;
    requests.push(json!({
        "id": id,
        "type": "ASSIGN",
        "status": "PENDING",
        "requester": "Budi",
        "startDate": body["startDate"],
    }));
    HttpResponse::Created().json(json!({ "message": "Request submitted" }))
}

/// POST /assignments/extend
async fn extend_assignment(req: HttpRequest, data: web::Data<StubBackend>, body: web::Json<Value>) -> impl Responder {
    data.record(&req, Some(body.0.clone()));
    if !data.authorised(&req) {
        return unauthorized();
    }
    if let Some(resp) = data.take_failure() {
        return resp;
    }
    for member in data.members.lock().unwrap().iter_mut() {
        if member["assignmentId"] == body["assignmentId"] {
            member["endDate"] = body["newEndDate"].clone();
        }
    }
    HttpResponse::Ok().finish()
}

/// POST /assignments/release
async fn release_assignment(req: HttpRequest, data: web::Data<StubBackend>, body: web::Json<Value>) -> impl Responder {
    data.record(&req, Some(body.0.clone()));
    if !data.authorised(&req) {
        return unauthorized();
    }
    if let Some(resp) = data.take_failure() {
        return resp;
    }
    for member in data.members.lock().unwrap().iter_mut() {
        if member["assignmentId"] == body["assignmentId"] {
            member["endDate"] = body["releaseDate"].clone();
            member["status"] = json!("RELEASED");
        }
    }
    HttpResponse::Ok().finish()
}

/// GET /projects/{id}/resources
async fn project_resources(req: HttpRequest, data: web::Data<StubBackend>, _project_id: web::Path<i64>) -> impl Responder {
    data.record(&req, None);
    if !data.authorised(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(data.members.lock().unwrap().clone())
}

/// GET /requests
async fn list_requests(req: HttpRequest, data: web::Data<StubBackend>) -> impl Responder {
    data.record(&req, None);
    if !data.authorised(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(data.requests.lock().unwrap().clone())
}

/// GET /dashboard/stats
async fn dashboard_stats(req: HttpRequest, data: web::Data<StubBackend>) -> impl Responder {
    data.record(&req, None);
    if !data.authorised(&req) {
        return unauthorized();
    }
    let resources = data.resources.lock().unwrap();
    let available = resources.iter().filter(|r| r["status"] == "AVAILABLE").count();
    HttpResponse::Ok().json(json!({
        "totalResources": resources.len(),
        "availableResources": available,
        "activeProjects": 1,
        "pendingRequests": data.requests.lock().unwrap().len(),
    }))
}

/// GET /dashboard/assignments-ending-soon
async fn ending_soon(req: HttpRequest, data: web::Data<StubBackend>) -> impl Responder {
    data.record(&req, None);
    // Broken on purpose: the console must survive an unreadable section.
    HttpResponse::Ok().content_type("text/html").body("<html>oops</html>")
}

/// GET /dashboard/active-projects
async fn active_projects(req: HttpRequest, data: web::Data<StubBackend>) -> impl Responder {
    data.record(&req, None);
    if !data.authorised(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!([{
        "projectId": 12,
        "projectName": "Atlas",
        "clientName": "Bank Nusantara",
        "status": "ON_GOING",
        "memberCount": 1
    }]))
}

/// Starts the stub on a free local port and returns its API base URL.
pub async fn spawn_backend(data: web::Data<StubBackend>) -> String {
    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).service(
            web::scope("/api")
                .route("/auth/login", web::post().to(login))
                .route("/resources", web::get().to(list_resources))
                .route("/resources/assign", web::post().to(assign_resource))
                .route("/requests", web::get().to(list_requests))
                .route("/requests/assign", web::post().to(request_assignment))
                .route("/assignments/extend", web::post().to(extend_assignment))
                .route("/assignments/release", web::post().to(release_assignment))
                .route("/projects/{id}/resources", web::get().to(project_resources))
                .route("/dashboard/stats", web::get().to(dashboard_stats))
                .route("/dashboard/assignments-ending-soon", web::get().to(ending_soon))
                .route("/dashboard/active-projects", web::get().to(active_projects)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind stub backend");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}/api", addr)
}

pub fn config_for(api_url: &str) -> Config {
    Config {
        api_url: api_url.to_string(),
        ..Config::default()
    }
}

/// A client already carrying the stub's token.
pub fn client_for(api_url: &str, data: &StubBackend) -> ApiClient {
    ApiClient::new(&config_for(api_url))
        .expect("client")
        .with_token(data.token())
}
