//! Plan document fields and the helpers derived from them.

use crate::document::FenceTracker;
use crate::error::Result;
use crate::io;
use crate::paths::{self, FeaturePaths};
use serde::Serialize;
use std::path::Path;

pub const LANGUAGE_LABEL: &str = "Language/Version";
pub const DEPENDENCIES_LABEL: &str = "Primary Dependencies";
pub const STORAGE_LABEL: &str = "Storage";
pub const PROJECT_TYPE_LABEL: &str = "Project Type";

/// Field values that mean "not decided yet".
pub const SENTINELS: &[&str] = &["NEEDS CLARIFICATION", "N/A"];

/// Value of the first `**{label}**: value` line, outside fenced code.
///
/// The label is matched literally. Empty values and sentinels yield `None`.
pub fn extract_field(label: &str, text: &str) -> Option<String> {
    let prefix = format!("**{label}**:");
    let mut fence = FenceTracker::default();
    let raw = text
        .lines()
        .filter(|line| !fence.step(line))
        .find_map(|line| line.strip_prefix(prefix.as_str()))?;
    let value = raw.trim();
    if value.is_empty() || SENTINELS.contains(&value) {
        return None;
    }
    Some(value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanData {
    pub language: Option<String>,
    pub framework: Option<String>,
    pub storage: Option<String>,
    pub project_type: Option<String>,
}

impl PlanData {
    pub fn parse(text: &str) -> Self {
        Self {
            language: extract_field(LANGUAGE_LABEL, text),
            framework: extract_field(DEPENDENCIES_LABEL, text),
            storage: extract_field(STORAGE_LABEL, text),
            project_type: extract_field(PROJECT_TYPE_LABEL, text),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::parse(&io::read_text(path)?))
    }

    /// `language + framework`, or empty when neither is known.
    pub fn tech_stack(&self) -> String {
        [self.language.as_deref(), self.framework.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Build and test command hint for the plan's language.
    pub fn commands(&self) -> String {
        let Some(lang) = self.language.as_deref() else {
            return "# Add commands here".to_string();
        };
        if lang.contains("Python") {
            "cd src && pytest && ruff check .".to_string()
        } else if lang.contains("Rust") {
            "cargo test && cargo clippy".to_string()
        } else if lang.contains("JavaScript") || lang.contains("TypeScript") {
            "npm test && npm run lint".to_string()
        } else {
            format!("# Add commands for {lang}")
        }
    }

    /// Directory layout hint: two roots for web projects, one otherwise.
    pub fn project_structure(&self) -> &'static str {
        let web = self
            .project_type
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains("web"));
        if web {
            "backend/\nfrontend/\ntests/"
        } else {
            "src/\ntests/"
        }
    }

    pub fn language_conventions(&self) -> String {
        match self.language.as_deref() {
            Some(lang) => format!("{lang}: Follow standard conventions"),
            None => "General: Follow standard conventions".to_string(),
        }
    }
}

/// Result of seeding a feature's plan document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSetup {
    FromTemplate,
    Empty,
    Kept,
}

/// Ensure the feature directory exists and seed `plan.md` from the plan
/// template. An existing plan is kept unless `force` is set.
pub fn setup_plan(paths: &FeaturePaths, force: bool) -> Result<PlanSetup> {
    io::ensure_dir(&paths.feature_dir)?;
    if paths.plan.exists() && !force {
        return Ok(PlanSetup::Kept);
    }
    let template = paths::template_path(&paths.repo_root, paths::PLAN_TEMPLATE);
    if io::copy_if_exists(&template, &paths.plan)? {
        return Ok(PlanSetup::FromTemplate);
    }
    tracing::warn!(template = %template.display(), "plan template not found; writing empty plan");
    io::atomic_write(&paths.plan, b"")?;
    Ok(PlanSetup::Empty)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
