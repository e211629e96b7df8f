//! Phase gating on the presence of planning artifacts.

use crate::error::{Result, SpecifyError};
use crate::io;
use crate::paths::{self, FeaturePaths};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrereqOptions {
    /// Fail unless `tasks.md` exists.
    pub require_tasks: bool,
    /// Report `tasks.md` among the available documents when present.
    pub include_tasks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PrereqReport {
    pub feature_dir: PathBuf,
    pub available_docs: Vec<String>,
}

/// One optional artifact and whether it is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocStatus {
    pub label: String,
    pub present: bool,
}

fn missing(item: &str, path: &Path, remedy: &str) -> SpecifyError {
    SpecifyError::MissingPrerequisite {
        item: item.to_string(),
        path: path.to_path_buf(),
        remedy: remedy.to_string(),
    }
}

/// Optional artifacts in reporting order.
pub fn doc_checklist(paths: &FeaturePaths, include_tasks: bool) -> Vec<DocStatus> {
    let mut docs = vec![
        (paths::RESEARCH_MD.to_string(), paths.research.is_file()),
        (paths::DATA_MODEL_MD.to_string(), paths.data_model.is_file()),
        (
            format!("{}/", paths::CONTRACTS_DIR),
            paths.contracts_dir.is_dir() && io::dir_has_entries(&paths.contracts_dir),
        ),
        (paths::QUICKSTART_MD.to_string(), paths.quickstart.is_file()),
    ];
    if include_tasks {
        docs.push((paths::TASKS_MD.to_string(), paths.tasks.is_file()));
    }
    docs.into_iter()
        .map(|(label, present)| DocStatus { label, present })
        .collect()
}

/// Fail unless the feature's `plan.md` exists.
pub fn require_plan(paths: &FeaturePaths) -> Result<()> {
    if !paths.plan.is_file() {
        return Err(missing(
            paths::PLAN_MD,
            &paths.plan,
            "run /course.plan first to create the implementation plan",
        ));
    }
    Ok(())
}

/// Require the artifacts a later phase depends on, then list the optional
/// ones that are present. Never touches the filesystem beyond reading.
pub fn check_prerequisites(paths: &FeaturePaths, opts: PrereqOptions) -> Result<PrereqReport> {
    if !paths.feature_dir.is_dir() {
        return Err(missing(
            "feature directory",
            &paths.feature_dir,
            "run /course.specify first to create the feature structure",
        ));
    }
    require_plan(paths)?;
    if opts.require_tasks && !paths.tasks.is_file() {
        return Err(missing(
            paths::TASKS_MD,
            &paths.tasks,
            "run /course.tasks first to create the task list",
        ));
    }

    let available_docs = doc_checklist(paths, opts.include_tasks)
        .into_iter()
        .filter(|d| d.present)
        .map(|d| d.label)
        .collect();

    Ok(PrereqReport {
        feature_dir: paths.feature_dir.clone(),
        available_docs,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
