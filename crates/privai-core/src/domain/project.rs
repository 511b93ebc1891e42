//! Inference project types.
//!
//! Projects group conversations on the inference side; users pick one from
//! the settings dropdown.

use serde::{Deserialize, Serialize};

use crate::ports::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

/// Data for creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProject {
    pub name: String,
}

/// Data for renaming a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRename {
    pub id: i64,
    pub name: String,
}

/// Trim a project name and reject blanks.
pub fn normalize_project_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("project name must not be empty".into()));
    }
    Ok(name.to_string())
}
