use super::open_session;
use crate::output::print_json;
use anyhow::{bail, Context};
use specify_core::agent::{self, SyncContext, SyncOutcome, SyncReport};
use specify_core::config::Config;
use specify_core::plan::PlanData;
use specify_core::prereq;
use std::path::Path;

pub fn run(
    root: Option<&Path>,
    feature: Option<String>,
    only: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let session = open_session(root, feature)?;
    let paths = session.checked_paths()?;
    prereq::require_plan(&paths)?;

    let plan = PlanData::load(&paths.plan)
        .with_context(|| format!("failed to read {}", paths.plan.display()))?;
    let config = Config::load_or_default(session.root()).context("failed to load config.yaml")?;
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();

    let ctx = SyncContext {
        project_name: &config.project.name,
        date: &date,
        plan: &plan,
        feature: &paths.feature_id,
    };

    let report = match only {
        Some(key) => SyncReport {
            agents: vec![agent::sync_agent(
                session.root(),
                agent::lookup_agent(key)?,
                &ctx,
            )],
        },
        None => agent::update_all(session.root(), &ctx, config.default_agent()),
    };

    if json {
        print_json(&serde_json::json!({
            "FEATURE": paths.feature_id,
            "PLAN": plan,
            "AGENTS": report.agents,
            "SUCCESS": report.success(),
        }))?;
    } else {
        print_report(&paths.feature_id, &plan, &report);
    }

    if !report.success() {
        bail!("agent context update finished with errors");
    }
    Ok(())
}

fn print_report(feature: &str, plan: &PlanData, report: &SyncReport) {
    println!("Updating agent context files for {feature}");
    for sync in &report.agents {
        let path = sync.path.display();
        match &sync.outcome {
            SyncOutcome::Created => println!("  created: {path} ({})", sync.name),
            SyncOutcome::Updated => println!("  updated: {path} ({})", sync.name),
            SyncOutcome::Failed(e) => println!("  failed:  {path} ({}): {e}", sync.name),
        }
    }

    let added = [
        ("language", &plan.language),
        ("framework", &plan.framework),
        ("storage", &plan.storage),
    ];
    let mut any = false;
    for (label, value) in added {
        if let Some(value) = value {
            if !any {
                println!("\nFrom plan.md:");
                any = true;
            }
            println!("  {label}: {value}");
        }
    }
}
