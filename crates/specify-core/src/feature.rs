//! Feature workspace allocation.

use crate::error::{Result, SpecifyError};
use crate::io;
use crate::paths;
use crate::vcs::Vcs;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maximum number of description words carried into a feature slug.
const SLUG_WORDS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewFeature {
    pub branch_name: String,
    pub spec_file: PathBuf,
    pub feature_num: String,
}

/// Turn a free-text description into a short hyphenated slug.
///
/// `"Add OAuth2 login!!"` becomes `"add-oauth2-login"`; a blank description
/// yields an empty slug.
pub fn slugify(description: &str) -> String {
    let lowered = description.to_lowercase();
    let mut hyphenated = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            hyphenated.push(c);
        } else if !hyphenated.ends_with('-') {
            hyphenated.push('-');
        }
    }
    hyphenated
        .trim_matches('-')
        .split('-')
        .filter(|w| !w.is_empty())
        .take(SLUG_WORDS)
        .collect::<Vec<_>>()
        .join("-")
}

/// One more than the highest leading number among the directories in `specs_dir`.
///
/// A numeric prefix too large to count past fails with
/// [`SpecifyError::FeatureNumberOverflow`] naming the directory.
pub fn next_feature_number(specs_dir: &Path) -> Result<u32> {
    let mut highest: Option<(u32, String)> = None;
    for name in io::child_dir_names(specs_dir) {
        let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            continue;
        }
        let n = digits
            .parse::<u32>()
            .map_err(|_| SpecifyError::FeatureNumberOverflow(name.clone()))?;
        if highest.as_ref().map_or(true, |(max, _)| n > *max) {
            highest = Some((n, name));
        }
    }
    match highest {
        None => Ok(1),
        Some((n, name)) => n
            .checked_add(1)
            .ok_or(SpecifyError::FeatureNumberOverflow(name)),
    }
}

pub fn format_feature_number(n: u32) -> String {
    format!("{n:03}")
}

/// Allocate the next numbered feature workspace under `{root}/specs`.
///
/// The workspace directory is claimed with an exclusive create, so an
/// allocation racing another one for the same number fails with
/// [`SpecifyError::FeatureExists`]. With version control a branch named after
/// the feature is created and checked out; if that fails the claimed
/// directory is removed and the error returned. The spec document is seeded
/// from the spec template, or left empty when there is no template.
pub fn create_feature(
    root: &Path,
    description: &str,
    vcs: &(impl Vcs + ?Sized),
    has_vcs: bool,
) -> Result<NewFeature> {
    let specs = paths::specs_dir(root);
    io::ensure_dir(&specs)?;

    let feature_num = format_feature_number(next_feature_number(&specs)?);
    let branch_name = format!("{feature_num}-{}", slugify(description));
    let feature_dir = specs.join(&branch_name);

    match std::fs::create_dir(&feature_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(SpecifyError::FeatureExists(branch_name));
        }
        Err(source) => {
            return Err(SpecifyError::FileIo {
                path: feature_dir,
                source,
            })
        }
    }

    if has_vcs {
        if let Err(e) = vcs.create_branch(root, &branch_name) {
            let _ = std::fs::remove_dir(&feature_dir);
            return Err(e);
        }
        tracing::info!(branch = %branch_name, "created feature branch");
    } else {
        tracing::warn!(
            branch = %branch_name,
            "git repository not detected; skipped branch creation"
        );
    }

    let spec_file = feature_dir.join(paths::SPEC_MD);
    let template = paths::template_path(root, paths::SPEC_TEMPLATE);
    if !io::copy_if_exists(&template, &spec_file)? {
        tracing::debug!(template = %template.display(), "no spec template; writing empty spec");
        io::atomic_write(&spec_file, b"")?;
    }

    Ok(NewFeature {
        branch_name,
        spec_file,
        feature_num,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
