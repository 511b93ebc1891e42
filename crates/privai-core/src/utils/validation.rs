//! Input validation helpers for form-backed endpoints.
//!
//! These mirror the rules the account and sign-in forms enforce on the client,
//! so a request that bypasses the UI is held to the same schema.

use url::Url;

/// Minimum password length accepted by the sign-in form.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum username length accepted by the profile form.
pub const MIN_USERNAME_LEN: usize = 3;

/// Loose syntactic e-mail check: one `@`, non-empty local part, dotted domain
/// without empty labels, no whitespace.
///
/// # Examples
///
/// ```rust
/// use privai_core::utils::validation::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(!is_valid_email("ada@localhost"));
/// assert!(!is_valid_email("not an email"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

/// Validate a sign-in password, returning the message shown to the user.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must contain {MIN_PASSWORD_LEN} or more characters"
        ));
    }
    Ok(())
}

/// Validate an optional website field: must be an absolute http(s) URL.
pub fn validate_website(website: &str) -> Result<(), String> {
    match Url::parse(website) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(format!("website must be an http(s) URL, got {website:?}")),
    }
}

/// Validate an optional username field.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        ));
    }
    Ok(())
}
