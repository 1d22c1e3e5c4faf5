use crate::domain::models::Project;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("project {name} {version} not found in catalog")]
pub struct ProjectNotFound {
    pub name: String,
    pub version: String,
}

/// Picks the first catalog entry whose name and version match exactly.
///
/// Matching is case-sensitive with no normalization. Duplicate name+version pairs
/// in the catalog resolve to the earliest one.
pub fn resolve_project(
    projects: Vec<Project>,
    name: &str,
    version: &str,
) -> Result<Project, ProjectNotFound> {
    projects
        .into_iter()
        .find(|p| p.name == name && p.version.as_deref() == Some(version))
        .ok_or_else(|| ProjectNotFound {
            name: name.to_string(),
            version: version.to_string(),
        })
}
