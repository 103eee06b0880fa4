use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

// ============================================================================
// CREDENTIAL VERIFICATION
// ============================================================================

/// Decides whether a username/password pair may open an admin session.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// A single admin account whose password is stored as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct BcryptCredentials {
    username: String,
    password_hash: String,
}

impl BcryptCredentials {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl CredentialVerifier for BcryptCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        match bcrypt::verify(password, &self.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Stored admin password hash is unusable: {}", e);
                false
            }
        }
    }
}

/// Used when no admin account is configured: nobody gets in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialVerifier for NoCredentials {
    fn verify(&self, _username: &str, _password: &str) -> bool {
        false
    }
}

/// Build the verifier for the configured account, if there is one.
pub fn verifier_from_config(
    username: Option<&str>,
    password_hash: Option<&str>,
) -> Box<dyn CredentialVerifier> {
    match (username, password_hash) {
        (Some(username), Some(hash)) => Box::new(BcryptCredentials::new(username, hash)),
        _ => {
            warn!("No admin account configured, the dashboard will refuse every sign-in");
            Box::new(NoCredentials)
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

// ============================================================================
// SESSIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Open admin sessions. Sessions never expire on their own: a token stays
/// here until it is revoked by sign-out or the process exits.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: HashSet<SessionToken>,
}

impl SessionRegistry {
    pub fn issue(&mut self) -> SessionToken {
        let token = SessionToken::generate();
        self.active.insert(token);
        token
    }

    pub fn revoke(&mut self, token: &SessionToken) -> bool {
        self.active.remove(token)
    }

    pub fn is_active(&self, token: &SessionToken) -> bool {
        self.active.contains(token)
    }
}
