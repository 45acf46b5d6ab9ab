//! Email verification challenge issued after registration.
//!
//! The code is never mailed anywhere; a [`VerificationCodeSource`] decides what the expected
//! value is. The resend countdown is cosmetic and does not expire the code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::Registration;

/// Code accepted by the mocked mail flow.
pub const MOCK_VERIFICATION_CODE: &str = "123";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("verification code must be {expected} characters")]
    IncompleteCode { expected: usize },
    #[error("verification code does not match")]
    CodeMismatch,
    #[error("a new code can be requested in {remaining_secs} s")]
    ResendNotReady { remaining_secs: u32 },
}

/// Supplies the code a challenge expects.
pub trait VerificationCodeSource {
    fn issue_code(&self, email: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
/// Always issues [`MOCK_VERIFICATION_CODE`].
pub struct MockCodeSource;

impl VerificationCodeSource for MockCodeSource {
    fn issue_code(&self, _email: &str) -> String {
        MOCK_VERIFICATION_CODE.to_string()
    }
}

/// Exact string comparison of a submitted code against the expected one.
pub fn verify_code(submitted: &str, expected: &str) -> bool {
    submitted == expected
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationChallenge {
    pub registration: Registration,
    expected_code: String,
    code_len: usize,
    cooldown_secs: u32,
    remaining_secs: u32,
}

impl VerificationChallenge {
    pub fn issue(
        registration: Registration,
        source: &dyn VerificationCodeSource,
        code_len: usize,
        cooldown_secs: u32,
    ) -> Self {
        let expected_code = source.issue_code(&registration.email);
        Self {
            registration,
            expected_code,
            code_len,
            cooldown_secs,
            remaining_secs: cooldown_secs,
        }
    }

    pub fn email(&self) -> &str {
        &self.registration.email
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn can_resend(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Whether a code of this length may be submitted at all.
    pub fn is_submittable(&self, submitted: &str) -> bool {
        submitted.chars().count() == self.code_len
    }

    /// # Errors
    ///
    /// [`VerificationError::IncompleteCode`] for a wrong-length code,
    /// [`VerificationError::CodeMismatch`] when it differs from the expected code.
    pub fn check(&self, submitted: &str) -> Result<(), VerificationError> {
        if !self.is_submittable(submitted) {
            return Err(VerificationError::IncompleteCode {
                expected: self.code_len,
            });
        }
        if verify_code(submitted, &self.expected_code) {
            Ok(())
        } else {
            Err(VerificationError::CodeMismatch)
        }
    }

    /// Advances the resend countdown by one second. Returns `true` when it just reached zero.
    pub fn tick_second(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    /// Issues a fresh code and restarts the countdown.
    ///
    /// # Errors
    ///
    /// [`VerificationError::ResendNotReady`] while the countdown is still running.
    pub fn resend(&mut self, source: &dyn VerificationCodeSource) -> Result<(), VerificationError> {
        if !self.can_resend() {
            return Err(VerificationError::ResendNotReady {
                remaining_secs: self.remaining_secs,
            });
        }
        self.expected_code = source.issue_code(&self.registration.email);
        self.remaining_secs = self.cooldown_secs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(&'static str);

    impl VerificationCodeSource for FixedSource {
        fn issue_code(&self, _email: &str) -> String {
            self.0.to_string()
        }
    }

    fn challenge(cooldown: u32) -> VerificationChallenge {
        VerificationChallenge::issue(
            Registration {
                full_name: "Ivan Ivanov".to_string(),
                email: "a@b.com".to_string(),
            },
            &MockCodeSource,
            3,
            cooldown,
        )
    }

    #[test]
    fn verify_code_is_exact_equality() {
        assert!(verify_code("123", "123"));
        assert!(!verify_code("123 ", "123"));
        assert!(!verify_code("ABC", "abc"));
    }

    #[test]
    fn check_rejects_short_codes_before_comparing() {
        let challenge = challenge(60);
        assert_eq!(
            challenge.check("12"),
            Err(VerificationError::IncompleteCode { expected: 3 })
        );
        assert_eq!(challenge.check("124"), Err(VerificationError::CodeMismatch));
        assert_eq!(challenge.check("123"), Ok(()));
    }

    #[test]
    fn countdown_gates_resend() {
        let mut challenge = challenge(2);
        assert_eq!(
            challenge.resend(&MockCodeSource),
            Err(VerificationError::ResendNotReady { remaining_secs: 2 })
        );
        assert!(!challenge.tick_second());
        assert!(challenge.tick_second());
        assert!(!challenge.tick_second());
        assert!(challenge.can_resend());

        challenge.resend(&FixedSource("777")).expect("resend");
        assert_eq!(challenge.remaining_secs(), 2);
        assert_eq!(challenge.check("123"), Err(VerificationError::CodeMismatch));
        assert_eq!(challenge.check("777"), Ok(()));
    }
}
