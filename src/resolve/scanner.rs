//! Recursive directory scanning
//!
//! Walks a single root directory and yields one [`ExtensionSource`] per
//! discovered script. A subdirectory that carries its own metadata document
//! is additionally emitted as a virtual namespace node before descending
//! into it, so `aws/aws.yaml` plus `aws/s3/sync.sh` yields both an `aws`
//! entry and an `aws s3 sync` entry.
//!
//! Children are visited in lexicographic name order: repeated scans of an
//! unchanged tree produce identical output.

use std::fs;
use std::path::Path;

use crate::model::{CommandPath, ExtensionSource, ScriptDescriptor, ScriptKind};

use super::sidecar;

/// Result of scanning one root
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Discovered sources in deterministic scan order
    pub sources: Vec<ExtensionSource>,

    /// Non-fatal discovery warnings (unreadable entries, malformed metadata)
    pub diagnostics: Vec<String>,
}

/// Scans a root directory at the given priority rank
///
/// A missing root is normal (unconfigured optional directory) and yields an
/// empty outcome.
pub fn scan_root(root: &Path, priority: usize) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    // Canonicalize so descriptors always carry absolute script paths
    let root = match root.canonicalize() {
        Ok(root) => root,
        Err(_) => return outcome,
    };
    if !root.is_dir() {
        return outcome;
    }

    scan_dir(&root, &root, priority, &CommandPath::empty(), &mut outcome);
    outcome
}

fn scan_dir(
    root: &Path,
    dir: &Path,
    priority: usize,
    prefix: &CommandPath,
    outcome: &mut ScanOutcome,
) {
    let mut entries: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(Result::ok).collect(),
        Err(e) => {
            outcome
                .diagnostics
                .push(format!("cannot read directory {}: {}", dir.display(), e));
            return;
        }
    };
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            let child_prefix = prefix.child(name);

            // A directory with its own metadata is a virtual command node
            // in addition to being a namespace for its children.
            if let Some(metadata) = sidecar::for_directory(&path, &mut outcome.diagnostics) {
                outcome.sources.push(ExtensionSource {
                    command: child_prefix.clone(),
                    script: ScriptDescriptor {
                        path: path.clone(),
                        kind: ScriptKind::Virtual,
                        metadata: Some(metadata),
                    },
                    root: root.to_path_buf(),
                    priority,
                    aliased_from: None,
                });
            }

            scan_dir(root, &path, priority, &child_prefix, outcome);
        } else if path.is_file() {
            let Some(kind) = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(ScriptKind::from_extension)
            else {
                continue;
            };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let metadata = sidecar::for_script(&path, &mut outcome.diagnostics);
            outcome.sources.push(ExtensionSource {
                command: prefix.child(stem),
                script: ScriptDescriptor {
                    path: path.clone(),
                    kind,
                    metadata,
                },
                root: root.to_path_buf(),
                priority,
                aliased_from: None,
            });
        }
    }
}
