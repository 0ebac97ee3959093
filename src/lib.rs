//! Staffing console: a client for the resource/project staffing backend.
//!
//! The assignment lifecycle (assign, extend, release) lives in [`assignment`]. The
//! other modules cover what surrounds it in the dashboard: session handling, the REST
//! client, list filters, the dashboard aggregate, directory maintenance, request
//! polling and spreadsheet export.

pub mod api;
pub mod app_state;
pub mod assignment;
pub mod auth;
pub mod config;
pub mod dashboard_data;
pub mod directory;
pub mod error;
pub mod export;
pub mod filters;
pub mod models;
pub mod notice;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, Backend};
pub use app_state::AppState;
pub use config::Config;
pub use error::{ConsoleError, Result};
pub use notice::{Notice, NoticeKind};
