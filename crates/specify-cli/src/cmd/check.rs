use crate::output::{print_json, print_table};
use specify_core::agent::{AgentSpec, AGENTS};

const GIT_INSTALL_URL: &str = "https://git-scm.com/downloads";

/// True when `tool` resolves on `PATH`. Claude is also found at its
/// migrated-installer location, `~/.claude/local/claude`.
pub fn tool_installed(tool: &str) -> bool {
    if tool == "claude" {
        if let Some(home) = home::home_dir() {
            if home.join(".claude").join("local").join("claude").is_file() {
                return true;
            }
        }
    }
    which::which(tool).is_ok()
}

fn cli_agents() -> impl Iterator<Item = &'static AgentSpec> {
    AGENTS.iter().filter(|a| a.requires_cli)
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let git = tool_installed("git");
    let agents: Vec<(&AgentSpec, bool)> = cli_agents()
        .map(|a| (a, tool_installed(a.key)))
        .collect();

    if json {
        let agents: serde_json::Map<String, serde_json::Value> = agents
            .iter()
            .map(|(a, installed)| (a.key.to_string(), serde_json::Value::Bool(*installed)))
            .collect();
        return print_json(&serde_json::json!({
            "git": git,
            "agents": agents,
        }));
    }

    let status = |installed: bool| (if installed { "installed" } else { "missing" }).to_string();
    let mut rows = vec![vec![
        "git".to_string(),
        status(git),
        if git { String::new() } else { GIT_INSTALL_URL.to_string() },
    ]];
    for (agent, installed) in &agents {
        rows.push(vec![
            agent.name.to_string(),
            status(*installed),
            if *installed {
                String::new()
            } else {
                agent.install_url.unwrap_or("").to_string()
            },
        ]);
    }
    print_table(&["TOOL", "STATUS", "INSTALL"], rows);

    if !git {
        println!("\nTip: install git for branch-per-feature workflows");
    }
    if !agents.iter().any(|(_, installed)| *installed) {
        println!("\nTip: install an AI assistant CLI for the best experience");
    }
    Ok(())
}
