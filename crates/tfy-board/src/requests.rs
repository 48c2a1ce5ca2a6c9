//! Whitelisted request payloads.
//!
//! Each operation accepts exactly the fields it may act on. Missing fields
//! deserialize to empty values so validation reports them as domain errors
//! rather than parse failures.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUp {
    pub email: String,
    pub username: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

impl SignUp {
    pub(crate) fn validate(&self) -> BoardResult<()> {
        if self.email.trim().is_empty() {
            return Err(BoardError::BadRequest("email is required".into()));
        }
        if self.password.is_empty() {
            return Err(BoardError::BadRequest("password is required".into()));
        }
        if self.password != self.password_confirmation {
            return Err(BoardError::BadRequest(
                "password confirmation does not match".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangePassword {
    pub old: String,
    pub new: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewThread {
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewComment {
    pub text: String,
}

/// Raw profile photo upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoUpload {
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub(crate) fn require_text(text: &str, what: &str) -> BoardResult<()> {
    if text.trim().is_empty() {
        return Err(BoardError::BadRequest(format!("{what} text must not be empty")));
    }
    Ok(())
}
