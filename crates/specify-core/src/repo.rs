//! Repository and current-feature resolution.

use crate::error::{Result, SpecifyError};
use crate::feature::{self, NewFeature};
use crate::io;
use crate::paths::{self, FeaturePaths};
use crate::vcs::Vcs;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static FEATURE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn feature_id_re() -> &'static Regex {
    FEATURE_ID_RE.get_or_init(|| Regex::new(r"^(\d{3})-").expect("static regex"))
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Resolve the repository root.
///
/// Priority:
/// 1. The version-control root containing `cwd`
/// 2. Walk upward from `cwd` looking for `.specify/`
/// 3. Fall back to `cwd`
pub fn resolve_root(vcs: &(impl Vcs + ?Sized), cwd: &Path) -> PathBuf {
    if let Some(root) = vcs.current_root(cwd) {
        return root;
    }

    let mut dir = cwd.to_path_buf();
    loop {
        if dir.join(paths::SPECIFY_DIR).is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    cwd.to_path_buf()
}

// ---------------------------------------------------------------------------
// Feature identifier
// ---------------------------------------------------------------------------

/// Highest-numbered `NNN-*` directory under `{root}/specs`.
///
/// Prefixes compare numerically; equal prefixes fall back to the name so the
/// answer does not depend on directory iteration order.
pub fn latest_feature_dir(root: &Path) -> Option<String> {
    io::child_dir_names(&paths::specs_dir(root))
        .into_iter()
        .filter_map(|name| {
            let n: u32 = feature_id_re().captures(&name)?.get(1)?.as_str().parse().ok()?;
            Some((n, name))
        })
        .max()
        .map(|(_, name)| name)
}

/// Resolve the current feature identifier. First match wins:
/// explicit override, current branch, latest `specs/NNN-*` directory, `main`.
pub fn resolve_feature(vcs: &(impl Vcs + ?Sized), root: &Path, explicit: Option<&str>) -> String {
    if let Some(id) = explicit.filter(|id| !id.trim().is_empty()) {
        return id.to_string();
    }
    if let Some(branch) = vcs.current_branch(root) {
        return branch;
    }
    latest_feature_dir(root).unwrap_or_else(|| paths::FALLBACK_FEATURE.to_string())
}

/// Outcome of a successful feature-identifier check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureCheck {
    /// The identifier carries the `NNN-` prefix.
    Valid,
    /// No version control; naming was not enforced.
    Unverified,
}

/// Check that `id` names a feature branch.
///
/// Without version control the check is skipped with a warning and callers
/// proceed without the naming guarantee.
pub fn check_feature_id(id: &str, has_vcs: bool) -> Result<FeatureCheck> {
    if !has_vcs {
        tracing::warn!("git repository not detected; skipped branch validation");
        return Ok(FeatureCheck::Unverified);
    }
    if !feature_id_re().is_match(id) {
        return Err(SpecifyError::NotFeatureBranch(id.to_string()));
    }
    Ok(FeatureCheck::Valid)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One invocation's view of the repository.
///
/// Holds the resolved root, the result of the version-control probe and the
/// active feature override. Allocating a feature through the session makes it
/// the active feature for every later call on the same session.
pub struct Session<V: Vcs> {
    vcs: V,
    root: PathBuf,
    has_vcs: bool,
    feature: Option<String>,
}

impl<V: Vcs> Session<V> {
    pub fn open(vcs: V, cwd: &Path, explicit_root: Option<&Path>, feature: Option<String>) -> Self {
        let root = match explicit_root {
            Some(p) => p.to_path_buf(),
            None => resolve_root(&vcs, cwd),
        };
        let has_vcs = vcs.is_available(&root);
        tracing::debug!(root = %root.display(), has_vcs, "resolved repository");
        Self {
            vcs,
            root,
            has_vcs,
            feature,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_vcs(&self) -> bool {
        self.has_vcs
    }

    pub fn feature_id(&self) -> String {
        resolve_feature(&self.vcs, &self.root, self.feature.as_deref())
    }

    pub fn paths(&self) -> FeaturePaths {
        FeaturePaths::new(&self.root, &self.feature_id(), self.has_vcs)
    }

    /// Resolve the paths and require a valid feature identifier.
    pub fn checked_paths(&self) -> Result<FeaturePaths> {
        let paths = self.paths();
        check_feature_id(&paths.feature_id, self.has_vcs)?;
        Ok(paths)
    }

    /// Allocate a new feature workspace and make it the active feature.
    pub fn create_feature(&mut self, description: &str) -> Result<NewFeature> {
        let created = feature::create_feature(&self.root, description, &self.vcs, self.has_vcs)?;
        self.feature = Some(created.branch_name.clone());
        Ok(created)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
