use serde::Deserialize;
use uuid::Uuid;

use crate::error::AccountError;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PHONE_MAX_LENGTH: usize = 20;

/// Transient password change pair. Carried on create/update requests, never
/// persisted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreatePassword {
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

impl CreatePassword {
    pub fn is_empty(&self) -> bool {
        self.new_password.is_none() && self.confirm_new_password.is_none()
    }

    /// Check the pair and return the validated plaintext candidate.
    pub fn validate(&self) -> Result<String, AccountError> {
        let new_password = self
            .new_password
            .as_deref()
            .ok_or_else(|| AccountError::Validation("new_password is required".to_string()))?;
        let confirm_new_password = self.confirm_new_password.as_deref().ok_or_else(|| {
            AccountError::Validation("confirm_new_password is required".to_string())
        })?;
        if new_password != confirm_new_password {
            return Err(AccountError::Validation(
                "new_password and confirm_new_password must be same".to_string(),
            ));
        }
        if new_password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(AccountError::Validation(format!(
                "new_password must be at least {} characters",
                PASSWORD_MIN_LENGTH
            )));
        }
        Ok(new_password.to_string())
    }
}

/// Creation / update input for a user record.
#[derive(Clone, Debug, Deserialize)]
pub struct UserForm {
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub is_blocked: Option<bool>,
    pub role_id: Uuid,
    pub upload_id: Option<Uuid>,
    #[serde(flatten)]
    pub password: CreatePassword,
}

impl UserForm {
    pub fn validate(&self) -> Result<(), AccountError> {
        if self.fullname.trim().is_empty() {
            return Err(AccountError::Validation(
                "fullname must not be empty".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(AccountError::Validation(
                "email must not be empty".to_string(),
            ));
        }
        if let Some(phone) = &self.phone {
            if phone.chars().count() > PHONE_MAX_LENGTH {
                return Err(AccountError::Validation(format!(
                    "phone must be at most {} characters",
                    PHONE_MAX_LENGTH
                )));
            }
        }
        Ok(())
    }
}
