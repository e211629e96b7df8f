use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecifyError {
    #[error("not on a feature branch: current branch is '{0}'")]
    NotFeatureBranch(String),

    #[error("{item} not found: {}", .path.display())]
    MissingPrerequisite {
        item: String,
        path: PathBuf,
        remedy: String,
    },

    #[error("feature already exists: {0}")]
    FeatureExists(String),

    #[error("no feature number left after '{0}'")]
    FeatureNumberOverflow(String),

    #[error("failed to create branch '{branch}': {detail}")]
    BranchCreate { branch: String, detail: String },

    #[error("git error: {0}")]
    Vcs(String),

    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("unknown agent '{key}' (valid: {valid})")]
    UnknownAgent { key: String, valid: String },

    #[error("{}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl SpecifyError {
    /// One-line remedial step to print after the error, when there is one.
    pub fn remedy(&self) -> Option<&str> {
        match self {
            SpecifyError::NotFeatureBranch(_) => {
                Some("feature branches should be named like: 001-feature-name")
            }
            SpecifyError::MissingPrerequisite { remedy, .. } => Some(remedy),
            SpecifyError::FeatureExists(_) => {
                Some("another allocation claimed this number; re-run create-feature")
            }
            SpecifyError::FeatureNumberOverflow(_) => {
                Some("rename the specs/ directory with the oversized numeric prefix")
            }
            SpecifyError::TemplateNotFound(_) => {
                Some("run 'specify init' to restore the default templates")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecifyError>;
