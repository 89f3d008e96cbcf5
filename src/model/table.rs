//! The resolved command table
//!
//! Maps each command path to exactly one winning extension source. Sources
//! displaced during merging are never dropped: they are kept as losers and
//! surfaced as [`Conflict`] records for diagnostics.

use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::path::CommandPath;
use super::source::ExtensionSource;

/// A recorded collision between sources claiming the same command path
#[derive(Debug, Clone, Serialize)]
pub struct Conflict {
    /// The contested command path
    pub command: CommandPath,

    /// The source that won the tie-break and owns the table entry
    pub winner: ExtensionSource,

    /// Every shadowed source, each still carrying its own root
    pub losers: Vec<ExtensionSource>,
}

/// Resolved mapping from command path to winning source
#[derive(Debug, Default)]
pub struct CommandTable {
    entries: BTreeMap<CommandPath, ExtensionSource>,
    losers: BTreeMap<CommandPath, Vec<ExtensionSource>>,
    diagnostics: Vec<String>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a source, applying the collision tie-break
    ///
    /// The displaced side (either the incumbent or the new source) is
    /// recorded as a loser for that path, never dropped.
    pub(crate) fn insert(&mut self, source: ExtensionSource) {
        let path = source.command.clone();
        match self.entries.entry(path.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(source);
            }
            Entry::Occupied(mut slot) => {
                let displaced = if source.beats(slot.get()) {
                    slot.insert(source)
                } else {
                    source
                };
                self.losers.entry(path).or_default().push(displaced);
            }
        }
    }

    pub(crate) fn push_diagnostics(&mut self, diagnostics: Vec<String>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Looks up the winning source for an exact command path
    pub fn get(&self, path: &CommandPath) -> Option<&ExtensionSource> {
        self.entries.get(path)
    }

    /// Iterates all winning entries in path order
    pub fn entries(&self) -> impl Iterator<Item = (&CommandPath, &ExtensionSource)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All recorded collisions, each naming the current winner
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.losers
            .iter()
            .filter_map(|(path, losers)| {
                self.entries.get(path).map(|winner| Conflict {
                    command: path.clone(),
                    winner: winner.clone(),
                    losers: losers.clone(),
                })
            })
            .collect()
    }

    /// Discovery warnings accumulated while building the table
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Resolves the longest prefix of `tokens` that names a table entry
    ///
    /// Returns the winning source and the unconsumed residual tokens.
    pub fn resolve_prefix<'a>(
        &self,
        tokens: &'a [String],
    ) -> Option<(&ExtensionSource, &'a [String])> {
        for len in (1..=tokens.len()).rev() {
            let path = CommandPath::from_segments(tokens[..len].iter().cloned());
            if let Some(source) = self.entries.get(&path) {
                return Some((source, &tokens[len..]));
            }
        }
        None
    }

    /// Immediate child segment names under a namespace prefix, sorted
    pub fn children(&self, prefix: &[String]) -> Vec<String> {
        let mut names = BTreeSet::new();
        for path in self.entries.keys() {
            let segments = path.segments();
            if segments.len() > prefix.len() && &segments[..prefix.len()] == prefix {
                names.insert(segments[prefix.len()].clone());
            }
        }
        names.into_iter().collect()
    }

    /// Top-level segment names, sorted
    pub fn namespaces(&self) -> Vec<String> {
        self.children(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScriptDescriptor, ScriptKind};
    use std::path::PathBuf;

    fn source(path: &[&str], priority: usize) -> ExtensionSource {
        ExtensionSource {
            command: CommandPath::from_segments(path.iter().copied()),
            script: ScriptDescriptor {
                path: PathBuf::from(format!("/root{}/{}.sh", priority, path.join("/"))),
                kind: ScriptKind::Shell,
                metadata: None,
            },
            root: PathBuf::from(format!("/root{}", priority)),
            priority,
            aliased_from: None,
        }
    }

    #[test]
    fn single_source_has_no_conflict() {
        let mut table = CommandTable::new();
        table.insert(source(&["x"], 0));

        assert_eq!(table.len(), 1);
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn collision_keeps_lower_priority_and_records_loser() {
        let mut table = CommandTable::new();
        table.insert(source(&["x"], 0));
        table.insert(source(&["x"], 1));

        let winner = table.get(&CommandPath::from_segments(["x"])).unwrap();
        assert_eq!(winner.priority, 0);

        let conflicts = table.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].winner.priority, 0);
        assert_eq!(conflicts[0].losers.len(), 1);
        assert_eq!(conflicts[0].losers[0].priority, 1);
    }

    #[test]
    fn later_higher_priority_source_displaces_incumbent() {
        let mut table = CommandTable::new();
        table.insert(source(&["x"], 2));
        table.insert(source(&["x"], 1));

        let winner = table.get(&CommandPath::from_segments(["x"])).unwrap();
        assert_eq!(winner.priority, 1);
        assert_eq!(table.conflicts()[0].losers[0].priority, 2);
    }

    #[test]
    fn resolve_prefix_prefers_longest_match() {
        let mut table = CommandTable::new();
        table.insert(source(&["aws"], 0));
        table.insert(source(&["aws", "s3", "sync"], 0));

        let tokens: Vec<String> = ["aws", "s3", "sync", "--force"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (found, residual) = table.resolve_prefix(&tokens).unwrap();
        assert_eq!(found.command.segments(), ["aws", "s3", "sync"]);
        assert_eq!(residual, ["--force".to_string()]);
    }

    #[test]
    fn resolve_prefix_unknown_is_none() {
        let table = CommandTable::new();
        let tokens = vec!["nope".to_string()];
        assert!(table.resolve_prefix(&tokens).is_none());
    }

    #[test]
    fn children_lists_immediate_names() {
        let mut table = CommandTable::new();
        table.insert(source(&["aws", "s3", "sync"], 0));
        table.insert(source(&["aws", "ec2"], 0));
        table.insert(source(&["gen", "uuid"], 0));

        assert_eq!(table.children(&["aws".to_string()]), ["ec2", "s3"]);
        assert_eq!(table.namespaces(), ["aws", "gen"]);
    }
}
