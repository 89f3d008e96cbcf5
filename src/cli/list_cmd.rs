//! The `list` and `info` commands

use anyhow::{anyhow, Result};

use super::output::Output;
use crate::model::{CommandPath, CommandTable};

pub fn list(output: &Output, table: &CommandTable, prefix: &[String]) -> Result<()> {
    let entries: Vec<_> = table
        .entries()
        .filter(|(path, _)| path.segments().len() >= prefix.len())
        .filter(|(path, _)| &path.segments()[..prefix.len()] == prefix)
        .collect();

    if output.is_json() {
        let items: Vec<_> = entries
            .iter()
            .map(|(path, source)| {
                serde_json::json!({
                    "command": path.to_string(),
                    "kind": source.script.kind.as_str(),
                    "script": source.script.path.display().to_string(),
                    "root": source.root.display().to_string(),
                    "description": source.script.description(),
                    "alias_of": source.aliased_from.as_ref().map(|p| p.to_string()),
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No commands found.");
        println!();
        println!("Commands are discovered from the configured root directories;");
        println!("pass --root DIR to scan another location.");
        return Ok(());
    }

    println!("{:<32} {:<8} DESCRIPTION", "COMMAND", "KIND");
    println!("{}", "-".repeat(70));
    for (path, source) in entries {
        let description = match &source.aliased_from {
            Some(original) => format!("alias of '{}'", original),
            None => source.script.description().unwrap_or("").to_string(),
        };
        println!("{:<32} {:<8} {}", path.to_string(), source.script.kind.as_str(), description);
    }

    Ok(())
}

pub fn info(output: &Output, table: &CommandTable, tokens: &[String]) -> Result<()> {
    let path = CommandPath::from_segments(tokens.iter().cloned());
    let Some(source) = table.get(&path) else {
        let children = table.children(tokens);
        if children.is_empty() {
            return Err(anyhow!("unknown command '{}'", path));
        }
        return Err(anyhow!(
            "'{}' is not a command. Commands under it: {}",
            path,
            children.join(", ")
        ));
    };

    if output.is_json() {
        output.data(source);
        return Ok(());
    }

    println!("Command:  {}", path);
    println!("Kind:     {}", source.script.kind.as_str());
    println!("Script:   {}", source.script.path.display());
    println!("Root:     {} (priority {})", source.root.display(), source.priority);
    if let Some(original) = &source.aliased_from {
        println!("Alias of: {}", original);
    }

    let Some(metadata) = &source.script.metadata else {
        return Ok(());
    };
    if let Some(description) = metadata.description() {
        println!("About:    {}", description);
    }
    if let Some(runner) = &metadata.runner {
        println!("Runner:   {}", runner);
    }
    if !metadata.aliases.is_empty() {
        println!("Aliases:  {}", metadata.aliases.join(", "));
    }
    if !metadata.options.is_empty() {
        println!();
        println!("Options:");
        for option in &metadata.options {
            let short = option
                .short
                .map(|c| format!("-{}, ", c))
                .unwrap_or_default();
            let required = if option.required { " (required)" } else { "" };
            println!(
                "  {}--{}{}  {}",
                short,
                option.name,
                required,
                option.description.as_deref().unwrap_or("")
            );
            if !option.suggestions.is_empty() {
                println!("      suggestions: {}", option.suggestions.join(", "));
            }
        }
    }

    Ok(())
}
