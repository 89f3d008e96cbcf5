//! # Wrapper Synthesis
//!
//! Generates a shell script that lets a corral namespace share a name with
//! an existing system binary. Installed as `git` somewhere early on `PATH`,
//! the wrapper routes first arguments matching the namespace's custom
//! subcommands back through corral and `exec`s the real `git` for anything
//! else, excluding its own directory from the search so it never invokes
//! itself.
//!
//! The script and an adjacent metadata document are written to disk as a
//! build artifact; a later scan rediscovers the pair as an ordinary shell
//! command, which must not trigger re-synthesis (synthesis is idempotent,
//! never self-triggering).

mod template;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{CommandPath, CommandTable, Metadata};

#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("namespace '{namespace}' has no commands. Known namespaces: {}", .available.join(", "))]
    UnknownNamespace {
        namespace: String,
        available: Vec<String>,
    },

    #[error("failed to write wrapper artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize wrapper metadata: {0}")]
    Metadata(#[from] serde_yaml::Error),
}

/// The files produced by one synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperArtifact {
    pub script_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Synthesizes the wrapper script and metadata for a namespace
///
/// The namespace must resolve to at least one command in the table;
/// otherwise synthesis fails listing what does resolve. Re-running with an
/// unchanged command set rewrites byte-identical files.
pub fn synthesize(
    namespace: &str,
    table: &CommandTable,
    self_bin: &Path,
    out_dir: &Path,
) -> Result<WrapperArtifact, WrapperError> {
    let prefix = [namespace.to_string()];
    let subcommands = table.children(&prefix);
    let has_node = table
        .get(&CommandPath::from_segments([namespace]))
        .is_some();

    if subcommands.is_empty() && !has_node {
        return Err(WrapperError::UnknownNamespace {
            namespace: namespace.to_string(),
            available: table.namespaces(),
        });
    }

    let script = template::render(namespace, &subcommands, self_bin);
    let metadata = Metadata {
        description: Some(format!("Pass-through wrapper for the '{namespace}' namespace")),
        aliasable: true,
        ..Default::default()
    };

    fs::create_dir_all(out_dir)?;
    let script_path = out_dir.join(format!("{namespace}.sh"));
    let metadata_path = out_dir.join(format!("{namespace}.yaml"));

    fs::write(&script_path, script)?;
    make_executable(&script_path)?;
    fs::write(&metadata_path, serde_yaml::to_string(&metadata)?)?;

    Ok(WrapperArtifact {
        script_path,
        metadata_path,
    })
}

/// Searches `path_var` for an executable named `name`, skipping
/// `exclude_dir`
///
/// This mirrors the generated script's pass-through logic so the
/// self-exclusion behavior is testable without running bash.
pub fn find_passthrough(name: &str, path_var: &std::ffi::OsStr, exclude_dir: &Path) -> Option<PathBuf> {
    let exclude = exclude_dir
        .canonicalize()
        .unwrap_or_else(|_| exclude_dir.to_path_buf());

    for dir in std::env::split_paths(path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let canonical = dir.canonicalize().unwrap_or_else(|_| dir.clone());
        if canonical == exclude {
            continue;
        }
        let candidate = dir.join(name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }

    None
}

fn make_executable(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(path, permissions)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = path.metadata() {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }

    #[cfg(windows)]
    {
        path.extension()
            .map(|ext| ext == "exe" || ext == "bat" || ext == "cmd")
            .unwrap_or(false)
    }
}
