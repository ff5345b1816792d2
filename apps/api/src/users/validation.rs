//! Field rules for profile updates.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::user::User;

const NAME_LEN: (usize, usize) = (2, 100);
const EMAIL_LEN: (usize, usize) = (5, 255);
const MAX_PICTURE_LEN: usize = 500;

/// Profile attributes as they arrive from the client. A missing or blank
/// field keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// Provided fields that passed validation, trimmed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

/// The full profile to store.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProfile {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn check_name(name: &str) -> Result<String, AppError> {
    let (min, max) = NAME_LEN;
    let len = name.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "name must be between {min} and {max} characters"
        )));
    }
    Ok(name.to_string())
}

/// `local@domain.tld` with no whitespace. Deliverability is the mailer's problem.
fn check_email(email: &str) -> Result<String, AppError> {
    let (min, max) = EMAIL_LEN;
    let len = email.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "email must be between {min} and {max} characters"
        )));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("email is not a valid address".to_string()));
    }
    Ok(email.to_string())
}

fn check_picture(picture: &str) -> Result<String, AppError> {
    if picture.chars().count() > MAX_PICTURE_LEN {
        return Err(AppError::Validation(format!(
            "picture must be at most {MAX_PICTURE_LEN} characters"
        )));
    }
    let rest = picture
        .strip_prefix("https://")
        .or_else(|| picture.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !picture.chars().any(char::is_whitespace) => {
            Ok(picture.to_string())
        }
        _ => Err(AppError::Validation("picture must be an http(s) URL".to_string())),
    }
}

impl ProfileFields {
    /// Checks each provided field on its own; stored values already passed.
    pub fn validate(&self) -> Result<ProfileUpdate, AppError> {
        Ok(ProfileUpdate {
            name: present(&self.name).map(check_name).transpose()?,
            email: present(&self.email).map(check_email).transpose()?,
            picture: present(&self.picture).map(check_picture).transpose()?,
        })
    }
}

impl ProfileUpdate {
    pub fn apply(self, existing: &User) -> ValidProfile {
        ValidProfile {
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            email: self.email.unwrap_or_else(|| existing.email.clone()),
            picture: self.picture.or_else(|| existing.picture.clone()),
        }
    }
}
