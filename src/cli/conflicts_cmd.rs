//! The `conflicts` command: resolution diagnostics

use anyhow::Result;

use super::output::Output;
use crate::model::CommandTable;

pub fn run(output: &Output, table: &CommandTable) -> Result<()> {
    let conflicts = table.conflicts();

    if output.is_json() {
        output.data(&conflicts);
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("No conflicts: every command path has a single source.");
        return Ok(());
    }

    println!("{} conflicting command path(s):", conflicts.len());
    for conflict in &conflicts {
        println!();
        println!("{}", conflict.command);
        println!(
            "  wins:  {} (root {}, priority {})",
            conflict.winner.script.path.display(),
            conflict.winner.root.display(),
            conflict.winner.priority
        );
        for loser in &conflict.losers {
            let origin = match &loser.aliased_from {
                Some(original) => format!("alias of '{}', ", original),
                None => String::new(),
            };
            println!(
                "  shadowed: {} ({}root {}, priority {})",
                loser.script.path.display(),
                origin,
                loser.root.display(),
                loser.priority
            );
        }
    }

    Ok(())
}
