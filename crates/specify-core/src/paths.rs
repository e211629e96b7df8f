use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPECIFY_DIR: &str = ".specify";
pub const TEMPLATES_DIR: &str = ".specify/templates";
pub const CONFIG_FILE: &str = ".specify/config.yaml";
pub const SPECS_DIR: &str = "specs";

pub const SPEC_TEMPLATE: &str = "spec-template.md";
pub const PLAN_TEMPLATE: &str = "plan-template.md";
pub const AGENT_TEMPLATE: &str = "agent-template.md";

pub const SPEC_MD: &str = "spec.md";
pub const PLAN_MD: &str = "plan.md";
pub const TASKS_MD: &str = "tasks.md";
pub const RESEARCH_MD: &str = "research.md";
pub const DATA_MODEL_MD: &str = "data-model.md";
pub const QUICKSTART_MD: &str = "quickstart.md";
pub const CONTRACTS_DIR: &str = "contracts";

/// Identifier used when nothing else names the current feature.
pub const FALLBACK_FEATURE: &str = "main";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn specs_dir(root: &Path) -> PathBuf {
    root.join(SPECS_DIR)
}

pub fn feature_dir(root: &Path, feature: &str) -> PathBuf {
    specs_dir(root).join(feature)
}

pub fn specify_dir(root: &Path) -> PathBuf {
    root.join(SPECIFY_DIR)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

pub fn template_path(root: &Path, name: &str) -> PathBuf {
    templates_dir(root).join(name)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// FeaturePaths
// ---------------------------------------------------------------------------

/// Every well-known location for one feature workspace.
///
/// Derived from `(repo_root, feature_id)` alone and never persisted; the
/// files it names may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturePaths {
    pub repo_root: PathBuf,
    pub feature_id: String,
    pub has_vcs: bool,
    pub feature_dir: PathBuf,
    pub spec: PathBuf,
    pub plan: PathBuf,
    pub tasks: PathBuf,
    pub research: PathBuf,
    pub data_model: PathBuf,
    pub quickstart: PathBuf,
    pub contracts_dir: PathBuf,
}

impl FeaturePaths {
    pub fn new(repo_root: &Path, feature_id: &str, has_vcs: bool) -> Self {
        let dir = feature_dir(repo_root, feature_id);
        Self {
            repo_root: repo_root.to_path_buf(),
            feature_id: feature_id.to_string(),
            has_vcs,
            spec: dir.join(SPEC_MD),
            plan: dir.join(PLAN_MD),
            tasks: dir.join(TASKS_MD),
            research: dir.join(RESEARCH_MD),
            data_model: dir.join(DATA_MODEL_MD),
            quickstart: dir.join(QUICKSTART_MD),
            contracts_dir: dir.join(CONTRACTS_DIR),
            feature_dir: dir,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
