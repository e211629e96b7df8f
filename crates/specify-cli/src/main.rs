mod cmd;
mod output;

use clap::{Parser, Subcommand};
use specify_core::SpecifyError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "specify",
    about = "Spec-driven development workspace: allocate features, gate phases, sync agent context",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: git top-level, nearest .specify/, or cwd)
    #[arg(long, global = true, env = "SPECIFY_ROOT")]
    root: Option<PathBuf>,

    /// Feature to operate on (default: current branch, or latest specs/ directory without git)
    #[arg(long, global = true, env = "SPECIFY_FEATURE")]
    feature: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a project: templates, config, specs/ and optionally a git repository
    Init {
        /// Directory to create (omit or "." for the current directory)
        name: Option<String>,

        /// Assistant to configure as the default agent
        #[arg(long)]
        ai: Option<String>,

        /// Skip git repository initialization
        #[arg(long)]
        no_git: bool,

        /// Overwrite existing templates and allow a non-empty target directory
        #[arg(long)]
        force: bool,

        /// Skip the check that the assistant's CLI is installed
        #[arg(long)]
        ignore_agent_tools: bool,
    },

    /// Report which tools are installed
    Check,

    /// Allocate the next numbered feature workspace
    CreateFeature {
        /// Feature description
        #[arg(required = true)]
        description: Vec<String>,
    },

    /// Verify the active feature has the artifacts the next phase needs
    CheckPrerequisites {
        /// Fail unless tasks.md exists
        #[arg(long)]
        require_tasks: bool,

        /// List tasks.md among the available documents
        #[arg(long)]
        include_tasks: bool,

        /// Only print the resolved feature paths
        #[arg(long)]
        paths_only: bool,
    },

    /// Seed the active feature's plan.md from the plan template
    SetupPlan {
        /// Overwrite an existing plan.md
        #[arg(long)]
        force: bool,
    },

    /// Create or update assistant context files from the active plan
    UpdateAgentContext {
        /// Only this assistant (default: every assistant whose file exists)
        agent: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = cli.root.as_deref();
    let feature = cli.feature;

    let result = match cli.command {
        Commands::Init {
            name,
            ai,
            no_git,
            force,
            ignore_agent_tools,
        } => cmd::init::run(
            root,
            cmd::init::InitOptions {
                name,
                ai,
                no_git,
                force,
                ignore_agent_tools,
            },
            cli.json,
        ),
        Commands::Check => cmd::check::run(cli.json),
        Commands::CreateFeature { description } => {
            cmd::feature::run(root, feature, &description.join(" "), cli.json)
        }
        Commands::CheckPrerequisites {
            require_tasks,
            include_tasks,
            paths_only,
        } => cmd::prerequisites::run(
            root,
            feature,
            require_tasks,
            include_tasks,
            paths_only,
            cli.json,
        ),
        Commands::SetupPlan { force } => cmd::plan::run(root, feature, force, cli.json),
        Commands::UpdateAgentContext { agent } => {
            cmd::agent_context::run(root, feature, agent.as_deref(), cli.json)
        }
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        if let Some(remedy) = e
            .chain()
            .find_map(|c| c.downcast_ref::<SpecifyError>())
            .and_then(SpecifyError::remedy)
        {
            eprintln!("hint: {remedy}");
        }
        std::process::exit(1);
    }
}
