use super::open_session;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(
    root: Option<&Path>,
    feature: Option<String>,
    description: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(root, feature)?;
    let created = session
        .create_feature(description)
        .with_context(|| format!("failed to create feature for '{description}'"))?;

    if json {
        print_json(&created)?;
    } else {
        println!("BRANCH_NAME: {}", created.branch_name);
        println!("SPEC_FILE: {}", created.spec_file.display());
        println!("FEATURE_NUM: {}", created.feature_num);
        if !session.has_vcs() {
            println!(
                "No git repository; later commands pick the latest specs/ directory \
                 or --feature {}",
                created.branch_name
            );
        }
    }
    Ok(())
}
