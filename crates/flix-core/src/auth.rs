//! Hardcoded-credential login.
//!
//! This is a stand-in for real authentication: two fixed accounts, no
//! hashing, no expiry. It exists to supply `is_admin` to consumers that
//! gate the content store's mutating operations.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;
use crate::error::AuthError;
use crate::traits::Persistence;

/// Storage key holding the logged-in user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

struct Account {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    is_admin: bool,
}

const ACCOUNTS: &[Account] = &[
    Account {
        id: "admin",
        name: "Administrador",
        email: "admin@bahamaflix.com",
        password: "admin123",
        is_admin: true,
    },
    Account {
        id: "user1",
        name: "Usuário",
        email: "user@example.com",
        password: "user123",
        is_admin: false,
    },
];

/// Login state persisted alongside the catalog's modification log.
#[derive(Debug, Clone)]
pub struct Authenticator<P> {
    backend: P,
}

impl<P: Persistence> Authenticator<P> {
    pub fn new(backend: P) -> Self {
        Self { backend }
    }

    /// Check the credentials and remember the user.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let account = ACCOUNTS
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = User {
            id: account.id.to_string(),
            name: account.name.to_string(),
            email: account.email.to_string(),
            is_admin: account.is_admin,
        };

        self.backend
            .set(CURRENT_USER_KEY, &serde_json::to_string(&user)?)?;

        info!(email = %user.email, admin = user.is_admin, "Logged in");
        Ok(user)
    }

    /// Forget the current user.
    pub fn logout(&self) -> Result<()> {
        self.backend.remove(CURRENT_USER_KEY)
    }

    /// The remembered user. Unreadable state counts as logged out.
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.backend.get(CURRENT_USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Could not read login state");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| warn!(error = %e, "Ignoring malformed login state"))
            .ok()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin)
    }

    /// The current user, if they are an administrator.
    pub fn require_admin(&self) -> Result<User> {
        match self.current_user() {
            Some(user) if user.is_admin => Ok(user),
            _ => Err(AuthError::NotAdmin.into()),
        }
    }
}
