use super::open_session;
use crate::output::{check_mark, print_json};
use specify_core::paths::FeaturePaths;
use specify_core::prereq::{self, PrereqOptions};
use std::path::Path;

pub fn run(
    root: Option<&Path>,
    feature: Option<String>,
    require_tasks: bool,
    include_tasks: bool,
    paths_only: bool,
    json: bool,
) -> anyhow::Result<()> {
    let session = open_session(root, feature)?;
    let paths = session.checked_paths()?;

    if paths_only {
        return print_paths(&paths, json);
    }

    let report = prereq::check_prerequisites(
        &paths,
        PrereqOptions {
            require_tasks,
            include_tasks,
        },
    )?;

    if json {
        print_json(&report)?;
    } else {
        println!("FEATURE_DIR:{}", report.feature_dir.display());
        println!("AVAILABLE_DOCS:");
        for doc in prereq::doc_checklist(&paths, include_tasks) {
            println!("{}", check_mark(doc.present, &doc.label));
        }
    }
    Ok(())
}

fn print_paths(paths: &FeaturePaths, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "REPO_ROOT": paths.repo_root,
            "BRANCH": paths.feature_id,
            "FEATURE_DIR": paths.feature_dir,
            "FEATURE_SPEC": paths.spec,
            "IMPL_PLAN": paths.plan,
            "TASKS": paths.tasks,
        }));
    }
    println!("REPO_ROOT: {}", paths.repo_root.display());
    println!("BRANCH: {}", paths.feature_id);
    println!("FEATURE_DIR: {}", paths.feature_dir.display());
    println!("FEATURE_SPEC: {}", paths.spec.display());
    println!("IMPL_PLAN: {}", paths.plan.display());
    println!("TASKS: {}", paths.tasks.display());
    Ok(())
}
