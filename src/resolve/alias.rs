//! Alias expansion
//!
//! A command declaring `aliases: ["ss"]` in its metadata becomes addressable
//! under a sibling path with the final segment replaced by the alias. The
//! synthesized entry shares the declaring command's script descriptor: it is
//! a pure routing alias, not a copy with independent configuration.
//!
//! Expansion runs after real paths are resolved, and synthesized paths are
//! subject to the same collision rule. At equal root priority a real script
//! shadows an alias; between two aliases the first in scan order wins. Every
//! collision is recorded as a conflict like any other.

use crate::model::{CommandTable, ExtensionSource};

/// Expands declared aliases into additional table entries
pub fn expand(table: &mut CommandTable) {
    let mut synthesized: Vec<ExtensionSource> = Vec::new();

    for (path, source) in table.entries() {
        // Entries inserted by a previous expansion are never re-expanded.
        if source.is_alias() {
            continue;
        }
        let Some(metadata) = &source.script.metadata else {
            continue;
        };

        for alias in &metadata.aliases {
            let Some(alias_path) = path.sibling(alias) else {
                continue;
            };
            let mut entry = source.clone();
            entry.command = alias_path;
            entry.aliased_from = Some(path.clone());
            synthesized.push(entry);
        }
    }

    for entry in synthesized {
        table.insert(entry);
    }
}
