use super::check::tool_installed;
use crate::output::print_json;
use anyhow::{bail, Context};
use specify_core::{
    agent::{self, AgentSpec},
    config::{self, Config},
    io, paths, templates,
    vcs::{GitCli, Vcs},
};
use std::path::{Path, PathBuf};

pub struct InitOptions {
    pub name: Option<String>,
    pub ai: Option<String>,
    pub no_git: bool,
    pub force: bool,
    pub ignore_agent_tools: bool,
}

pub fn run(root: Option<&Path>, opts: InitOptions, json: bool) -> anyhow::Result<()> {
    let base = match root {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let (project_dir, in_place) = project_dir(&base, opts.name.as_deref(), opts.force)?;

    let existing = if paths::config_path(&project_dir).exists() {
        Some(Config::load(&project_dir).context("failed to load config.yaml")?)
    } else {
        None
    };
    let selected = match (&opts.ai, &existing) {
        (Some(key), _) => agent::lookup_agent(key)?,
        (None, Some(cfg)) => cfg.default_agent(),
        (None, None) => agent::lookup_agent(agent::DEFAULT_AGENT)?,
    };

    if selected.requires_cli && !opts.ignore_agent_tools && !tool_installed(selected.key) {
        let install = selected
            .install_url
            .map(|u| format!("; install from {u}"))
            .unwrap_or_default();
        bail!(
            "{} CLI is required for {} projects{install} (or pass --ignore-agent-tools)",
            selected.name,
            selected.key
        );
    }

    let mut log = Vec::new();

    // 1. Templates
    let templates_dir = paths::templates_dir(&project_dir);
    io::ensure_dir(&templates_dir)
        .with_context(|| format!("failed to create {}", templates_dir.display()))?;
    for (name, content) in templates::defaults() {
        let path = templates_dir.join(name);
        let rel = format!("{}/{name}", paths::TEMPLATES_DIR);
        if opts.force {
            let existed = path.exists();
            io::atomic_write(&path, content.as_bytes())?;
            log.push(if existed { ("updated", rel) } else { ("created", rel) });
        } else if io::write_if_missing(&path, content.as_bytes())? {
            log.push(("created", rel));
        } else {
            log.push(("exists", rel));
        }
    }

    // 2. config.yaml
    let config_rel = paths::CONFIG_FILE.to_string();
    match existing {
        None => {
            let mut cfg = Config::new(config::project_name_for(&project_dir));
            cfg.agent = selected.key.to_string();
            cfg.save(&project_dir).context("failed to write config.yaml")?;
            log.push(("created", config_rel));
        }
        Some(mut cfg) if cfg.agent != selected.key => {
            cfg.agent = selected.key.to_string();
            cfg.save(&project_dir).context("failed to write config.yaml")?;
            log.push(("updated", config_rel));
        }
        Some(_) => log.push(("exists", config_rel)),
    }

    // 3. specs/
    io::ensure_dir(&paths::specs_dir(&project_dir))?;

    // 4. git
    let git = init_git(&project_dir, opts.no_git);

    if json {
        return print_json(&serde_json::json!({
            "PROJECT_DIR": project_dir,
            "AGENT": selected.key,
            "GIT": git,
        }));
    }

    println!("Initializing specify in: {}", project_dir.display());
    println!("Selected AI assistant: {}", selected.key);
    for (status, rel) in &log {
        println!("  {:<8} {rel}", format!("{status}:"));
    }
    println!("  git:     {git}");
    print_next_steps(&project_dir, in_place, selected);
    Ok(())
}

/// Resolve the directory to initialize, creating it when a NAME is given.
/// Returns the directory and whether it is the base directory itself.
fn project_dir(base: &Path, name: Option<&str>, force: bool) -> anyhow::Result<(PathBuf, bool)> {
    let name = match name {
        None | Some(".") => return Ok((base.to_path_buf(), true)),
        Some(n) => n,
    };
    let dir = base.join(name);
    if dir.exists() && io::dir_has_entries(&dir) && !force {
        bail!(
            "directory {} already exists and is not empty (use --force to merge into it)",
            dir.display()
        );
    }
    io::ensure_dir(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    Ok((dir, false))
}

fn init_git(dir: &Path, no_git: bool) -> &'static str {
    if no_git {
        return "skipped (--no-git)";
    }
    let git = GitCli;
    if git.is_available(dir) {
        return "existing repo detected";
    }
    if which::which("git").is_err() {
        tracing::warn!("git not found on PATH; skipping repository initialization");
        return "skipped (git not available)";
    }
    match git.init(dir) {
        Ok(()) => "initialized",
        Err(e) => {
            tracing::warn!("git init failed: {e}");
            "init failed"
        }
    }
}

fn print_next_steps(dir: &Path, in_place: bool, selected: &AgentSpec) {
    let cd = if in_place {
        ".".to_string()
    } else {
        dir.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string())
    };
    println!("\nProject initialized.");
    println!("Next steps:");
    println!("  cd {cd}");
    println!("  specify create-feature \"<what you want to build>\"");
    println!("  # then /speckit.specify, /speckit.plan, /speckit.tasks in {}", selected.name);

    if !selected.folder.is_empty() && selected.folder != ".github/" {
        println!(
            "\nSecurity notice: {} may store credentials in {}. Consider adding it to .gitignore.",
            selected.name, selected.folder
        );
    }
}
