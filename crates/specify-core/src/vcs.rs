//! Version-control capability.
//!
//! Everything the workspace needs from version control goes through [`Vcs`],
//! so git-backed and git-less repositories are handled by the same code and
//! tests can swap in a double instead of spawning `git`.

use crate::error::{Result, SpecifyError};
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Vcs {
    /// True when `dir` sits inside a repository. Never fails.
    fn is_available(&self, dir: &Path) -> bool {
        self.current_root(dir).is_some()
    }

    /// Top-level directory of the repository containing `dir`.
    fn current_root(&self, dir: &Path) -> Option<PathBuf>;

    /// Name of the checked-out branch, if one can be determined.
    fn current_branch(&self, root: &Path) -> Option<String>;

    /// Create `name` and switch to it.
    fn create_branch(&self, root: &Path, name: &str) -> Result<()>;

    /// Initialize a new repository in `dir`.
    fn init(&self, dir: &Path) -> Result<()>;
}

/// [`Vcs`] backed by the `git` binary on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    /// Run git in `dir` and return trimmed stdout on success.
    fn capture(dir: &Path, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn run(dir: &Path, args: &[&str]) -> std::result::Result<(), String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| e.to_string())?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(if stderr.is_empty() {
                format!("git {} exited with {}", args.join(" "), output.status)
            } else {
                stderr
            })
        }
    }
}

impl Vcs for GitCli {
    fn current_root(&self, dir: &Path) -> Option<PathBuf> {
        Self::capture(dir, &["rev-parse", "--show-toplevel"]).map(PathBuf::from)
    }

    /// A detached HEAD reports `HEAD`, which the feature-id check rejects.
    fn current_branch(&self, root: &Path) -> Option<String> {
        // `rev-parse` fails on an unborn branch; `symbolic-ref` still knows its name.
        match Self::capture(root, &["rev-parse", "--abbrev-ref", "HEAD"]) {
            Some(branch) if branch != "HEAD" => Some(branch),
            detached => {
                Self::capture(root, &["symbolic-ref", "--short", "HEAD"]).or(detached)
            }
        }
    }

    fn create_branch(&self, root: &Path, name: &str) -> Result<()> {
        Self::run(root, &["checkout", "-b", name]).map_err(|detail| SpecifyError::BranchCreate {
            branch: name.to_string(),
            detail,
        })
    }

    fn init(&self, dir: &Path) -> Result<()> {
        Self::run(dir, &["init"]).map_err(SpecifyError::Vcs)
    }
}
