use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub ending_soon_days: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let request_timeout = env::var("STAFFING_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);
        let poll_interval = env::var("STAFFING_POLL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(30);

        Self {
            api_url: env::var("STAFFING_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_file: env::var("STAFFING_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_session_file()),
            request_timeout: Duration::from_secs(request_timeout),
            poll_interval: Duration::from_secs(poll_interval),
            ending_soon_days: env::var("STAFFING_ENDING_SOON_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            request_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_secs(30),
            ending_soon_days: 7,
        }
    }
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("staffing-console")
        .join("session.json")
}
