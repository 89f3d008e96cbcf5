//! The `wrapper` command: synthesize pass-through wrappers

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::model::CommandTable;
use crate::wrapper;

pub fn run(output: &Output, table: &CommandTable, namespace: &str, out_dir: &Path) -> Result<()> {
    let self_bin = std::env::current_exe().context("failed to locate the corral binary")?;

    let artifact = wrapper::synthesize(namespace, table, &self_bin, out_dir)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "namespace": namespace,
            "script": artifact.script_path.display().to_string(),
            "metadata": artifact.metadata_path.display().to_string(),
        }));
        return Ok(());
    }

    output.success(&format!(
        "Wrote wrapper for '{}' to {}",
        namespace,
        artifact.script_path.display()
    ));
    println!();
    println!("Install it by placing {} early on your PATH", artifact.script_path.display());
    println!("under the name '{}' (e.g. a symlink without the .sh suffix).", namespace);

    Ok(())
}
