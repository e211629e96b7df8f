use crate::agent::{self, AgentSpec};
use crate::error::Result;
use crate::io;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// `.specify/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    /// Assistant whose context file is created when a workspace has none.
    #[serde(default = "default_agent_key")]
    pub agent: String,
}

fn default_version() -> u32 {
    1
}

fn default_agent_key() -> String {
    agent::DEFAULT_AGENT.to_string()
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: default_version(),
            project: ProjectConfig {
                name: project_name.into(),
            },
            agent: default_agent_key(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let data = io::read_text(&paths::config_path(root))?;
        Ok(serde_yaml::from_str(&data)?)
    }

    /// Load the config, or derive one from the directory name when the
    /// project has none.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        if paths::config_path(root).exists() {
            Self::load(root)
        } else {
            Ok(Self::new(project_name_for(root)))
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    /// The configured default assistant, falling back to Claude when the key
    /// is unknown.
    pub fn default_agent(&self) -> &'static AgentSpec {
        agent::find_agent(&self.agent).unwrap_or_else(|| {
            tracing::warn!(
                agent = %self.agent,
                "unknown agent in config.yaml; using {}",
                agent::DEFAULT_AGENT
            );
            &agent::AGENTS[0]
        })
    }
}

/// Directory name of `root`, used as the project name.
pub fn project_name_for(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("demo");
        cfg.agent = "gemini".to_string();
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.default_agent().key, "gemini");
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let cfg: Config = serde_yaml::from_str("project:\n  name: x\n").unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.agent, "claude");
    }

    #[test]
    fn missing_config_derives_name_from_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("my-service");
        std::fs::create_dir(&root).unwrap();
        let cfg = Config::load_or_default(&root).unwrap();
        assert_eq!(cfg.project.name, "my-service");
    }

    #[test]
    fn unknown_agent_falls_back_to_claude() {
        let mut cfg = Config::new("x");
        cfg.agent = "emacs".to_string();
        assert_eq!(cfg.default_agent().key, "claude");
    }
}
