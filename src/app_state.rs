use log::info;

use crate::api::ApiClient;
use crate::auth::{Session, SessionStore};
use crate::config::Config;
use crate::error::{ConsoleError, Result};

/// What every console command works against: configuration, the API client and
/// the signed-in session, if any.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub config: Config,
    session: Option<Session>,
}

impl AppState {
    /// Builds the client and picks up a stored session. The client carries that
    /// session's token.
    pub fn load(config: Config) -> Result<Self> {
        let sessions = SessionStore::new(&config.session_file);
        let session = sessions.load()?;
        let mut api = ApiClient::new(&config)?;
        api.set_token(session.as_ref().map(|s| s.token.clone()));
        Ok(Self {
            api,
            sessions,
            config,
            session,
        })
    }

    pub fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(ConsoleError::NotLoggedIn)
    }

    /// The session, provided it belongs to an administrator.
    pub fn admin(&self) -> Result<&Session> {
        let session = self.session()?;
        session.require_admin()?;
        Ok(session)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session> {
        let session = Session::login(&self.api, email, password).await?;
        self.sessions.save(&session)?;
        self.api.set_token(Some(session.token.clone()));
        Ok(self.session.insert(session))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.sessions.clear()?;
        self.api.set_token(None);
        if let Some(session) = self.session.take() {
            info!("Signed out {}", session.user.email);
        }
        Ok(())
    }
}
