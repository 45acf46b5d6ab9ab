//! Client-side session state machine.
//!
//! ```text
//! LoggedOut --submit login--> Authenticating --delay elapsed--> LoggedIn
//! LoggedOut --register--> PendingVerification --code ok--> LoggedIn
//! any --logout--> LoggedOut
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    validation::{LoginCredentials, Registration},
    verification::{VerificationChallenge, VerificationError},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no verification is pending")]
    NoPendingVerification,
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    /// Known only when the session came from registration.
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    /// Login submitted; waiting on the artificial delay.
    Authenticating { email: String },
    PendingVerification(VerificationChallenge),
    LoggedIn(Session),
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::LoggedIn(session) => Some(session),
            _ => None,
        }
    }

    /// Email of the logged-in user or of the pending registration.
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::LoggedOut => None,
            Self::Authenticating { email } => Some(email),
            Self::PendingVerification(challenge) => Some(challenge.email()),
            Self::LoggedIn(session) => Some(&session.email),
        }
    }

    pub fn challenge(&self) -> Option<&VerificationChallenge> {
        match self {
            Self::PendingVerification(challenge) => Some(challenge),
            _ => None,
        }
    }

    pub fn challenge_mut(&mut self) -> Option<&mut VerificationChallenge> {
        match self {
            Self::PendingVerification(challenge) => Some(challenge),
            _ => None,
        }
    }

    /// Records a submitted login for `email` until its delay elapses.
    pub fn begin_login(&mut self, email: impl Into<String>) {
        *self = Self::Authenticating {
            email: email.into(),
        };
    }

    /// Whether a login for `email` is still waiting on its delay.
    pub fn is_authenticating(&self, email: &str) -> bool {
        matches!(self, Self::Authenticating { email: pending } if pending == email)
    }

    /// Marks the user as logged in. The mock accepts any validated credentials.
    pub fn login(&mut self, credentials: &LoginCredentials) -> Session {
        let session = Session {
            email: credentials.email.clone(),
            full_name: None,
        };
        *self = Self::LoggedIn(session.clone());
        session
    }

    /// Parks a validated registration until its code is confirmed.
    pub fn await_verification(&mut self, challenge: VerificationChallenge) {
        *self = Self::PendingVerification(challenge);
    }

    /// Checks `code` against the pending challenge and logs in on success.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoPendingVerification`] outside the pending state, or the challenge's
    /// [`VerificationError`]. A failed check leaves the state untouched.
    pub fn verify(&mut self, code: &str) -> Result<Session, SessionError> {
        let challenge = self
            .challenge()
            .ok_or(SessionError::NoPendingVerification)?;
        challenge.check(code)?;
        let Registration { full_name, email } = challenge.registration.clone();
        let session = Session {
            email,
            full_name: Some(full_name),
        };
        *self = Self::LoggedIn(session.clone());
        Ok(session)
    }

    pub fn logout(&mut self) {
        *self = Self::LoggedOut;
    }
}
