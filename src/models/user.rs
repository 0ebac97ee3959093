use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "Admin", alias = "ADMIN")]
    Admin,
    #[serde(rename = "DEV_MANAGER", alias = "PM")]
    DevManager,
}

impl UserType {
    pub fn label(self) -> &'static str {
        match self {
            UserType::Admin => "Admin",
            UserType::DevManager => "DevMan",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

/// Identity shown in the console header and used for role gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

/// A DevMan account as listed by `GET /users/pms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevMan {
    pub user_id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub project_count: u32,
}

/// POST /users/pm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDevMan {
    pub name: String,
    pub email: String,
    pub password: String,
}
