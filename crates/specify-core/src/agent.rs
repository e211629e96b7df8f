//! Per-assistant context files kept in sync with the plan document.
//!
//! Each supported assistant reads its own markdown file (`CLAUDE.md`,
//! `.github/copilot-instructions.md`, ...). A file that does not exist yet is
//! rendered from the agent template; an existing file is patched through the
//! [`Document`] section model so repeated runs never duplicate the stack entry.

use crate::document::Document;
use crate::error::{Result, SpecifyError};
use crate::io;
use crate::paths;
use crate::plan::PlanData;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Agent table
// ---------------------------------------------------------------------------

/// One supported assistant. Keys and context-file paths are stable: existing
/// workspaces depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentSpec {
    pub key: &'static str,
    pub name: &'static str,
    /// Context file, relative to the repository root.
    pub context_file: &'static str,
    /// Folder the assistant keeps its own files in.
    pub folder: &'static str,
    pub install_url: Option<&'static str>,
    pub requires_cli: bool,
}

pub const DEFAULT_AGENT: &str = "claude";

pub const AGENTS: &[AgentSpec] = &[
    AgentSpec {
        key: "claude",
        name: "Claude Code",
        context_file: "CLAUDE.md",
        folder: ".claude/",
        install_url: Some("https://docs.anthropic.com/en/docs/claude-code/setup"),
        requires_cli: true,
    },
    AgentSpec {
        key: "gemini",
        name: "Gemini CLI",
        context_file: "GEMINI.md",
        folder: ".gemini/",
        install_url: Some("https://github.com/google-gemini/gemini-cli"),
        requires_cli: true,
    },
    AgentSpec {
        key: "copilot",
        name: "GitHub Copilot",
        context_file: ".github/copilot-instructions.md",
        folder: ".github/",
        install_url: None,
        requires_cli: false,
    },
    AgentSpec {
        key: "cursor-agent",
        name: "Cursor IDE",
        context_file: ".cursor/rules/specify-rules.mdc",
        folder: ".cursor/",
        install_url: None,
        requires_cli: false,
    },
    AgentSpec {
        key: "qwen",
        name: "Qwen Code",
        context_file: "QWEN.md",
        folder: ".qwen/",
        install_url: Some("https://github.com/QwenLM/qwen-code"),
        requires_cli: true,
    },
    AgentSpec {
        key: "opencode",
        name: "opencode",
        context_file: "OPENCODE.md",
        folder: ".opencode/",
        install_url: Some("https://opencode.ai"),
        requires_cli: true,
    },
    AgentSpec {
        key: "codex",
        name: "Codex CLI",
        context_file: "CODEX.md",
        folder: ".codex/",
        install_url: Some("https://github.com/openai/codex"),
        requires_cli: true,
    },
    AgentSpec {
        key: "windsurf",
        name: "Windsurf",
        context_file: ".windsurf/rules/specify-rules.md",
        folder: ".windsurf/",
        install_url: None,
        requires_cli: false,
    },
    AgentSpec {
        key: "kilocode",
        name: "Kilo Code",
        context_file: ".kilocode/rules/specify-rules.md",
        folder: ".kilocode/",
        install_url: None,
        requires_cli: false,
    },
    AgentSpec {
        key: "auggie",
        name: "Auggie CLI",
        context_file: ".augment/rules/specify-rules.md",
        folder: ".augment/",
        install_url: Some("https://docs.augmentcode.com/cli/overview"),
        requires_cli: true,
    },
    AgentSpec {
        key: "roo",
        name: "Roo Code",
        context_file: ".roo/rules/specify-rules.md",
        folder: ".roo/",
        install_url: None,
        requires_cli: false,
    },
    AgentSpec {
        key: "codebuddy",
        name: "CodeBuddy",
        context_file: ".codebuddy/rules/specify-rules.md",
        folder: ".codebuddy/",
        install_url: Some("https://www.codebuddy.ai/"),
        requires_cli: true,
    },
    AgentSpec {
        key: "q",
        name: "Amazon Q Developer",
        context_file: ".amazonq/prompts/agents-instructions.md",
        folder: ".amazonq/",
        install_url: Some("https://aws.amazon.com/developer/learning/q-developer-cli/"),
        requires_cli: true,
    },
];

pub fn find_agent(key: &str) -> Option<&'static AgentSpec> {
    AGENTS.iter().find(|a| a.key == key)
}

pub fn lookup_agent(key: &str) -> Result<&'static AgentSpec> {
    find_agent(key).ok_or_else(|| SpecifyError::UnknownAgent {
        key: key.to_string(),
        valid: agent_keys(),
    })
}

pub fn agent_keys() -> String {
    AGENTS.iter().map(|a| a.key).collect::<Vec<_>>().join(", ")
}

impl AgentSpec {
    pub fn target(&self, root: &Path) -> PathBuf {
        root.join(self.context_file)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub const TECH_STACK_SECTION: &str = "Technology Stack";
pub const RECENT_CHANGES_SECTION: &str = "Recent Changes";

pub const PROJECT_NAME_TOKEN: &str = "[PROJECT NAME]";
pub const DATE_TOKEN: &str = "[DATE]";
pub const TECH_STACK_TOKEN: &str = "[EXTRACTED FROM ALL PLAN.MD FILES]";
pub const STRUCTURE_TOKEN: &str = "[ACTUAL STRUCTURE FROM PLANS]";
pub const COMMANDS_TOKEN: &str = "[ONLY COMMANDS FOR ACTIVE TECHNOLOGIES]";
pub const CONVENTIONS_TOKEN: &str = "[LANGUAGE-SPECIFIC, ONLY FOR LANGUAGES IN USE]";
pub const RECENT_CHANGES_TOKEN: &str = "[LAST 3 FEATURES AND WHAT THEY ADDED]";

static LAST_UPDATED_RE: OnceLock<Regex> = OnceLock::new();

fn last_updated_re() -> &'static Regex {
    LAST_UPDATED_RE.get_or_init(|| {
        Regex::new(r"Last Updated: \d{4}-\d{2}-\d{2}").expect("static regex")
    })
}

/// Everything a context-file write needs to know about this run.
#[derive(Debug, Clone)]
pub struct SyncContext<'a> {
    pub project_name: &'a str,
    /// Today's date, `YYYY-MM-DD`.
    pub date: &'a str,
    pub plan: &'a PlanData,
    pub feature: &'a str,
}

impl SyncContext<'_> {
    fn stack_entry(&self) -> String {
        let stack = self.plan.tech_stack();
        if stack.is_empty() {
            format!("- ({})", self.feature)
        } else {
            format!("- {stack} ({})", self.feature)
        }
    }

    fn recent_change(&self) -> String {
        let stack = self.plan.tech_stack();
        if stack.is_empty() {
            format!("- {}: Added", self.feature)
        } else {
            format!("- {}: Added {stack}", self.feature)
        }
    }
}

/// Substitute the seven template tokens. Tokens absent from the template are
/// simply not substituted.
pub fn render_template(template: &str, ctx: &SyncContext<'_>) -> String {
    let substitutions = [
        (PROJECT_NAME_TOKEN, ctx.project_name.to_string()),
        (DATE_TOKEN, ctx.date.to_string()),
        (TECH_STACK_TOKEN, ctx.stack_entry()),
        (STRUCTURE_TOKEN, ctx.plan.project_structure().to_string()),
        (COMMANDS_TOKEN, ctx.plan.commands()),
        (CONVENTIONS_TOKEN, ctx.plan.language_conventions()),
        (RECENT_CHANGES_TOKEN, ctx.recent_change()),
    ];
    substitutions
        .iter()
        .fold(template.to_string(), |acc, (token, value)| {
            acc.replace(token, value)
        })
}

/// Render a new context file at `target` from the template at `template`.
pub fn create_agent_file(target: &Path, template: &Path, ctx: &SyncContext<'_>) -> Result<()> {
    if !template.is_file() {
        return Err(SpecifyError::TemplateNotFound(template.to_path_buf()));
    }
    let rendered = render_template(&io::read_text(template)?, ctx);
    io::atomic_write(target, rendered.as_bytes())
}

/// Patch an existing context file in place.
///
/// The stack entry is added only when the stack is not already mentioned
/// anywhere in the file; a Recent Changes entry is added on every call.
pub fn update_agent_file(target: &Path, ctx: &SyncContext<'_>) -> Result<()> {
    let mut doc = Document::parse(&io::read_text(target)?);

    let stack = ctx.plan.tech_stack();
    if !stack.is_empty() && !doc.contains(&stack) {
        doc.prepend_to_section(TECH_STACK_SECTION, &ctx.stack_entry());
    }

    if !doc.prepend_to_section(RECENT_CHANGES_SECTION, &ctx.recent_change()) {
        tracing::debug!(target = %target.display(), "no Recent Changes section");
    }

    doc.replace_first(last_updated_re(), &format!("Last Updated: {}", ctx.date));

    io::atomic_write(target, doc.to_string().as_bytes())
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum SyncOutcome {
    Created,
    Updated,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSync {
    pub agent: &'static str,
    pub name: &'static str,
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: SyncOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub agents: Vec<AgentSync>,
}

impl SyncReport {
    pub fn success(&self) -> bool {
        self.agents
            .iter()
            .all(|a| !matches!(a.outcome, SyncOutcome::Failed(_)))
    }
}

/// Create or update one assistant's context file. Failures are captured in
/// the returned outcome rather than propagated.
pub fn sync_agent(root: &Path, agent: &'static AgentSpec, ctx: &SyncContext<'_>) -> AgentSync {
    let target = agent.target(root);
    let result = if target.exists() {
        update_agent_file(&target, ctx).map(|()| SyncOutcome::Updated)
    } else {
        let template = paths::template_path(root, paths::AGENT_TEMPLATE);
        create_agent_file(&target, &template, ctx).map(|()| SyncOutcome::Created)
    };
    let outcome = match result {
        Ok(outcome) => {
            tracing::info!(agent = agent.key, path = %target.display(), ?outcome, "synced context file");
            outcome
        }
        Err(e) => {
            tracing::error!(agent = agent.key, path = %target.display(), "context file sync failed: {e}");
            SyncOutcome::Failed(e.to_string())
        }
    };
    AgentSync {
        agent: agent.key,
        name: agent.name,
        path: target,
        outcome,
    }
}

/// Update every assistant whose context file already exists. When none
/// exists, create the file for `default_agent` so a fresh workspace always
/// ends up with one.
pub fn update_all(root: &Path, ctx: &SyncContext<'_>, default_agent: &'static AgentSpec) -> SyncReport {
    let agents: Vec<AgentSync> = AGENTS
        .iter()
        .filter(|a| a.target(root).exists())
        .map(|a| sync_agent(root, a, ctx))
        .collect();

    if agents.is_empty() {
        tracing::info!(agent = default_agent.key, "no agent files found; creating default");
        return SyncReport {
            agents: vec![sync_agent(root, default_agent, ctx)],
        };
    }
    SyncReport { agents }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use tempfile::TempDir;

    fn plan() -> PlanData {
        PlanData {
            language: Some("Rust 1.75".to_string()),
            framework: Some("Axum".to_string()),
            storage: Some("SQLite".to_string()),
            project_type: Some("single".to_string()),
        }
    }

    fn ctx<'a>(plan: &'a PlanData, date: &'a str) -> SyncContext<'a> {
        SyncContext {
            project_name: "demo",
            date,
            plan,
            feature: "001-core",
        }
    }

    fn with_template() -> TempDir {
        let dir = TempDir::new().unwrap();
        io::atomic_write(
            &paths::template_path(dir.path(), paths::AGENT_TEMPLATE),
            templates::AGENT_TEMPLATE.as_bytes(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn agent_keys_are_unique() {
        let mut keys: Vec<_> = AGENTS.iter().map(|a| a.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), AGENTS.len());
        assert!(find_agent(DEFAULT_AGENT).is_some());
    }

    #[test]
    fn unknown_agent_lists_valid_keys() {
        let err = lookup_agent("vim").unwrap_err();
        assert!(err.to_string().contains("claude, gemini"));
    }

    #[test]
    fn render_substitutes_every_token() {
        let plan = plan();
        let out = render_template(templates::AGENT_TEMPLATE, &ctx(&plan, "2025-01-02"));
        assert!(!out.contains('['), "unsubstituted token in:\n{out}");
        assert!(out.contains("# demo Development Guidelines"));
        assert!(out.contains("Last Updated: 2025-01-02"));
        assert!(out.contains("- Rust 1.75 + Axum (001-core)"));
        assert!(out.contains("cargo test && cargo clippy"));
        assert!(out.contains("- 001-core: Added Rust 1.75 + Axum"));
    }

    #[test]
    fn render_leaves_unknown_text_alone() {
        let plan = PlanData::default();
        let out = render_template("[PROJECT NAME] [OTHER]", &ctx(&plan, "2025-01-02"));
        assert_eq!(out, "demo [OTHER]");
    }

    #[test]
    fn create_without_template_fails() {
        let dir = TempDir::new().unwrap();
        let plan = plan();
        let target = dir.path().join("CLAUDE.md");
        let err = create_agent_file(
            &target,
            &dir.path().join("missing.md"),
            &ctx(&plan, "2025-01-02"),
        )
        .unwrap_err();
        assert!(matches!(err, SpecifyError::TemplateNotFound(_)));
        assert!(!target.exists());
    }

    #[test]
    fn create_then_update_twice_is_idempotent_for_stack() {
        let dir = with_template();
        let plan = plan();
        let claude = find_agent("claude").unwrap();

        let first = sync_agent(dir.path(), claude, &ctx(&plan, "2025-01-01"));
        assert_eq!(first.outcome, SyncOutcome::Created);
        let second = sync_agent(dir.path(), claude, &ctx(&plan, "2025-01-02"));
        assert_eq!(second.outcome, SyncOutcome::Updated);
        sync_agent(dir.path(), claude, &ctx(&plan, "2025-01-03"));

        let text = std::fs::read_to_string(claude.target(dir.path())).unwrap();
        let doc = Document::parse(&text);
        let stack = doc.section(TECH_STACK_SECTION).unwrap();
        assert_eq!(
            stack.lines.iter().filter(|l| l.contains("Rust 1.75 + Axum")).count(),
            1
        );
        let changes = doc.section(RECENT_CHANGES_SECTION).unwrap();
        assert_eq!(
            changes.lines.iter().filter(|l| l.starts_with("- 001-core:")).count(),
            3,
            "one recent-change entry per invocation"
        );
        assert!(text.contains("Last Updated: 2025-01-03"));
        assert!(!text.contains("2025-01-01"));
    }

    #[test]
    fn update_adds_new_stack_at_top_of_section() {
        let dir = with_template();
        let claude = find_agent("claude").unwrap();
        let first = plan();
        sync_agent(dir.path(), claude, &ctx(&first, "2025-01-01"));

        let second = PlanData {
            language: Some("Python 3.12".to_string()),
            ..PlanData::default()
        };
        let update = SyncContext {
            feature: "002-etl",
            ..ctx(&second, "2025-02-01")
        };
        update_agent_file(&claude.target(dir.path()), &update).unwrap();

        let text = std::fs::read_to_string(claude.target(dir.path())).unwrap();
        assert!(text.contains("## Technology Stack\n\n- Python 3.12 (002-etl)\n- Rust 1.75 + Axum (001-core)"));
        assert!(text.contains("## Recent Changes\n\n- 002-etl: Added Python 3.12\n"));
    }

    #[test]
    fn update_skips_stack_mentioned_outside_its_section() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("CLAUDE.md");
        std::fs::write(
            &target,
            "## Technology Stack\n\n## Recent Changes\n\n- 000-x: Added Rust 1.75 + Axum\n",
        )
        .unwrap();
        let plan = plan();
        update_agent_file(&target, &ctx(&plan, "2025-01-02")).unwrap();

        let text = std::fs::read_to_string(&target).unwrap();
        assert!(!text.contains("- Rust 1.75 + Axum (001-core)"));
        assert!(text.contains("- 001-core: Added Rust 1.75 + Axum"));
    }

    #[test]
    fn update_with_empty_stack_only_records_change() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("GEMINI.md");
        std::fs::write(&target, "## Technology Stack\n\n- Go (000-x)\n\n## Recent Changes\n").unwrap();
        let plan = PlanData::default();
        update_agent_file(&target, &ctx(&plan, "2025-01-02")).unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "## Technology Stack\n\n- Go (000-x)\n\n## Recent Changes\n\n- 001-core: Added\n\n"
        );
    }

    #[test]
    fn update_all_creates_default_when_none_exist() {
        let dir = with_template();
        let plan = plan();
        let report = update_all(dir.path(), &ctx(&plan, "2025-01-02"), find_agent("claude").unwrap());
        assert!(report.success());
        assert_eq!(report.agents.len(), 1);
        assert_eq!(report.agents[0].outcome, SyncOutcome::Created);
        assert!(dir.path().join("CLAUDE.md").exists());
        assert!(!dir.path().join("GEMINI.md").exists());
    }

    #[test]
    fn update_all_only_touches_existing_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("GEMINI.md"), "## Recent Changes\n").unwrap();
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(
            dir.path().join(".github/copilot-instructions.md"),
            "## Recent Changes\n",
        )
        .unwrap();
        let plan = plan();
        let report = update_all(dir.path(), &ctx(&plan, "2025-01-02"), find_agent("claude").unwrap());
        assert!(report.success());
        let keys: Vec<_> = report.agents.iter().map(|a| a.agent).collect();
        assert_eq!(keys, ["gemini", "copilot"]);
        assert!(!dir.path().join("CLAUDE.md").exists());
    }

    #[test]
    fn update_all_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        // A directory where a file is expected cannot be read as text.
        std::fs::create_dir_all(dir.path().join("CLAUDE.md")).unwrap();
        std::fs::write(dir.path().join("QWEN.md"), "## Recent Changes\n").unwrap();
        let plan = plan();
        let report = update_all(dir.path(), &ctx(&plan, "2025-01-02"), find_agent("claude").unwrap());
        assert!(!report.success());
        assert!(matches!(report.agents[0].outcome, SyncOutcome::Failed(_)));
        assert_eq!(report.agents[1].agent, "qwen");
        assert_eq!(report.agents[1].outcome, SyncOutcome::Updated);
    }

    #[test]
    fn report_serializes_status() {
        let report = SyncReport {
            agents: vec![AgentSync {
                agent: "claude",
                name: "Claude Code",
                path: PathBuf::from("/r/CLAUDE.md"),
                outcome: SyncOutcome::Failed("boom".to_string()),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["agents"][0]["status"], "failed");
        assert_eq!(json["agents"][0]["error"], "boom");
    }
}
