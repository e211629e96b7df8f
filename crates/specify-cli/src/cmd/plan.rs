use super::open_session;
use crate::output::print_json;
use anyhow::Context;
use specify_core::plan::{self, PlanSetup};
use std::path::Path;

pub fn run(
    root: Option<&Path>,
    feature: Option<String>,
    force: bool,
    json: bool,
) -> anyhow::Result<()> {
    let session = open_session(root, feature)?;
    let feature_paths = session.checked_paths()?;

    let setup = plan::setup_plan(&feature_paths, force)
        .with_context(|| format!("failed to set up plan for {}", feature_paths.feature_id))?;

    if json {
        print_json(&serde_json::json!({
            "FEATURE_SPEC": feature_paths.spec,
            "IMPL_PLAN": feature_paths.plan,
            "SPECS_DIR": feature_paths.feature_dir,
            "BRANCH": feature_paths.feature_id,
            "HAS_GIT": feature_paths.has_vcs.to_string(),
        }))?;
    } else {
        let plan = feature_paths.plan.display();
        match setup {
            PlanSetup::FromTemplate => println!("  created: {plan} (from template)"),
            PlanSetup::Empty => println!("  created: {plan} (empty, no plan template)"),
            PlanSetup::Kept => println!("  exists:  {plan} (use --force to overwrite)"),
        }
        println!("FEATURE_SPEC: {}", feature_paths.spec.display());
        println!("IMPL_PLAN: {}", feature_paths.plan.display());
        println!("SPECS_DIR: {}", feature_paths.feature_dir.display());
        println!("BRANCH: {}", feature_paths.feature_id);
        println!("HAS_GIT: {}", feature_paths.has_vcs);
    }
    Ok(())
}
