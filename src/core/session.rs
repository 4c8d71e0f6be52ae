/// Session state and the route guard
///
/// The session is an explicit object: `init` reads the persisted flag,
/// `establish` signs in and writes the flag, `teardown` signs out and clears
/// it. "Remember me" only decides whether the flag expires.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{MonitorError, MonitorResult};

pub const REMEMBER_ME_DAYS: i64 = 30;
pub const SESSION_FILE: &str = "session.toml";

/// On-disk form of the session flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub authenticated: bool,
    pub user: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl PersistedSession {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.authenticated && self.expires_at.map_or(true, |exp| now < exp)
    }
}

pub trait SessionStore {
    fn load(&self) -> MonitorResult<Option<PersistedSession>>;
    fn save(&self, session: &PersistedSession) -> MonitorResult<()>;
    fn clear(&self) -> MonitorResult<()>;
}

/// Stores the session flag as a TOML file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> MonitorResult<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|e| MonitorError::Session(format!("read {}: {}", self.path.display(), e)))?;
        let session = toml::from_str(&contents)
            .map_err(|e| MonitorError::Session(format!("parse {}: {}", self.path.display(), e)))?;

        Ok(Some(session))
    }

    fn save(&self, session: &PersistedSession) -> MonitorResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| MonitorError::Session(e.to_string()))?;
        }
        let contents = toml::to_string_pretty(session).map_err(|e| MonitorError::Session(e.to_string()))?;
        fs::write(&self.path, contents)
            .map_err(|e| MonitorError::Session(format!("write {}: {}", self.path.display(), e)))
    }

    fn clear(&self) -> MonitorResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MonitorError::Session(format!("remove {}: {}", self.path.display(), e))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SessionState {
    pub authenticated: bool,
    pub user: Option<String>,
}

pub struct Session {
    store: Box<dyn SessionStore + Send>,
    state: SessionState,
}

impl Session {
    /// Read the persisted flag. Expired or unreadable sessions count as signed out.
    pub fn init(store: Box<dyn SessionStore + Send>, now: DateTime<Utc>) -> Self {
        let state = match store.load() {
            Ok(Some(persisted)) if persisted.is_valid_at(now) => SessionState {
                authenticated: true,
                user: persisted.user,
            },
            Ok(Some(_)) => {
                tracing::info!("persisted session expired");
                if let Err(e) = store.clear() {
                    tracing::warn!("failed to clear expired session: {}", e);
                }
                SessionState::default()
            }
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::warn!("ignoring unreadable session: {}", e);
                SessionState::default()
            }
        };

        Self { store, state }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    pub fn user(&self) -> Option<&str> {
        self.state.user.as_deref()
    }

    /// Sign in and persist the flag. Remembered sessions expire after
    /// `REMEMBER_ME_DAYS`; others stay until logout.
    pub fn establish(&mut self, user: &str, remember: bool, now: DateTime<Utc>) -> MonitorResult<()> {
        self.state = SessionState {
            authenticated: true,
            user: Some(user.to_string()),
        };

        self.store.save(&PersistedSession {
            authenticated: true,
            user: Some(user.to_string()),
            expires_at: remember.then(|| now + Duration::days(REMEMBER_ME_DAYS)),
        })
    }

    pub fn teardown(&mut self) -> MonitorResult<()> {
        self.state = SessionState::default();
        self.store.clear()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Unauthenticated users always land on the login screen
pub fn resolve_route(requested: Route, session: &Session) -> Route {
    match requested {
        Route::Dashboard if !session.is_authenticated() => Route::Login,
        other => other,
    }
}
