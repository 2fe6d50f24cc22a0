//! Input validation for projects, comments, and account fields.
//!
//! Every check returns `Err(String)` with a human-readable message; callers
//! wrap it in [`CoreError::Validation`](crate::error::CoreError::Validation).

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_PROJECT_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 300;
pub const MAX_FULL_DESCRIPTION_LENGTH: usize = 10_000;
pub const MAX_IMAGES: usize = 10;
pub const MAX_CREATORS: usize = 20;
pub const MAX_COMMENT_LENGTH: usize = 2_000;
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
pub const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_.-]{3,32}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(USERNAME_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

fn require_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

/// Validate the three required text fields of a project.
pub fn validate_project_text(
    name: &str,
    description: &str,
    full_description: &str,
) -> Result<(), String> {
    require_text("Project name", name, MAX_PROJECT_NAME_LENGTH)?;
    require_text("Description", description, MAX_DESCRIPTION_LENGTH)?;
    require_text("Full description", full_description, MAX_FULL_DESCRIPTION_LENGTH)?;
    Ok(())
}

/// An empty website is allowed; anything else must be an http(s) URL.
pub fn validate_website(website: &str) -> Result<(), String> {
    let website = website.trim();
    if website.is_empty() || website.starts_with("http://") || website.starts_with("https://") {
        Ok(())
    } else {
        Err("Website must start with http:// or https://".to_string())
    }
}

pub fn validate_images(images: &[String]) -> Result<(), String> {
    if images.len() > MAX_IMAGES {
        return Err(format!("At most {MAX_IMAGES} images are allowed"));
    }
    Ok(())
}

/// Trim creator names and drop blank entries.
pub fn normalize_creators(creators: &[String]) -> Result<Vec<String>, String> {
    let cleaned: Vec<String> = creators
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.len() > MAX_CREATORS {
        return Err(format!("At most {MAX_CREATORS} creators are allowed"));
    }
    Ok(cleaned)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub fn validate_comment_content(content: &str) -> Result<(), String> {
    require_text("Comment content", content, MAX_COMMENT_LENGTH)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub fn validate_email(email: &str) -> Result<(), String> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err("Invalid email address".to_string())
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(
            "Username must be 3-32 characters of letters, digits, '_', '.' or '-'".to_string(),
        )
    }
}

pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}
