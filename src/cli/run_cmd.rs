//! The `run` command: resolve and execute

use anyhow::{anyhow, Result};

use super::output::Output;
use crate::exec::{self, ExecError, Invocation};
use crate::model::CommandTable;

pub fn run(output: &Output, table: &CommandTable, tokens: &[String]) -> Result<()> {
    let Some((source, residual)) = table.resolve_prefix(tokens) else {
        return Err(unknown_command(table, tokens));
    };

    if source.script.is_virtual() {
        let children = table.children(source.command.segments());
        return Err(anyhow!(
            "'{}' is a command namespace. Available subcommands: {}",
            source.command,
            children.join(", ")
        ));
    }

    let decls = source
        .script
        .metadata
        .as_ref()
        .map(|m| m.options.as_slice())
        .unwrap_or(&[]);
    let parsed = exec::parse_options(decls, residual)?;

    let invocation = Invocation {
        command: source.command.clone(),
        options: parsed.values,
        args: parsed.residual,
    };

    output.verbose_ctx(
        "run",
        &format!(
            "executing {} ({})",
            source.script.path.display(),
            source.script.kind.as_str()
        ),
    );

    match exec::execute(source, &invocation) {
        Ok(()) => Ok(()),
        // The child already wrote its own output; be a faithful proxy for
        // its exit status.
        Err(ExecError::Exit(code)) => std::process::exit(code),
        Err(e) => Err(e.into()),
    }
}

fn unknown_command(table: &CommandTable, tokens: &[String]) -> anyhow::Error {
    // Find the longest namespace prefix that has anything under it and
    // suggest its children.
    for len in (0..tokens.len()).rev() {
        let children = table.children(&tokens[..len]);
        if children.is_empty() {
            continue;
        }
        return if len == 0 {
            anyhow!(
                "unknown command '{}'. Available commands: {}",
                tokens.join(" "),
                children.join(", ")
            )
        } else {
            anyhow!(
                "unknown command '{}'. Available under '{}': {}",
                tokens.join(" "),
                tokens[..len].join(" "),
                children.join(", ")
            )
        };
    }

    anyhow!("no commands discovered. Add scripts to a command root or pass --root")
}
