//! # Extension Resolution
//!
//! Turns an ordered list of root directories into a [`CommandTable`].
//!
//! ## Pipeline
//!
//! | Stage | Purpose |
//! |-------|---------|
//! | [`scanner`] | Walk one root, yield scripts and virtual nodes |
//! | [`sidecar`] | Locate and parse per-script/per-directory metadata |
//! | merge | Flatten all roots, tie-break collisions by priority |
//! | [`alias`] | Synthesize sibling entries for declared aliases |
//!
//! Resolution is a pure function over the filesystem state: given the same
//! root list and unchanged directories, it produces the same table. Missing
//! roots and malformed metadata degrade gracefully into diagnostics rather
//! than errors.

pub mod alias;
pub mod scanner;
pub mod sidecar;

use std::path::PathBuf;

use crate::model::CommandTable;

/// Resolves the full command table for an ordered root list
///
/// Root priority is list position: index 0 wins collisions against every
/// later root. Alias expansion runs after all real paths are resolved.
pub fn resolve(roots: &[PathBuf]) -> CommandTable {
    let mut table = CommandTable::new();

    for (priority, root) in roots.iter().enumerate() {
        let outcome = scanner::scan_root(root, priority);
        table.push_diagnostics(outcome.diagnostics);
        for source in outcome.sources {
            table.insert(source);
        }
    }

    alias::expand(&mut table);
    table
}
