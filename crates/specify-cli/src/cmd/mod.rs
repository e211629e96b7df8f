pub mod agent_context;
pub mod check;
pub mod feature;
pub mod init;
pub mod plan;
pub mod prerequisites;

use anyhow::Context;
use specify_core::repo::Session;
use specify_core::vcs::GitCli;
use std::path::Path;

/// Open a session rooted at `root`, or discovered from the working directory.
pub fn open_session(
    root: Option<&Path>,
    feature: Option<String>,
) -> anyhow::Result<Session<GitCli>> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(Session::open(GitCli, &cwd, root, feature))
}
