//! Discovered scripts and their origins

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::metadata::Metadata;
use super::path::CommandPath;

/// Interpreter family of a discovered script, inferred from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Node,
    Shell,
    Python,
    Ruby,
    Php,
    /// A directory-level namespace node with no backing script
    Virtual,
}

impl ScriptKind {
    /// Maps a recognized file extension to its kind
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "mjs" | "cjs" => Some(ScriptKind::Node),
            "sh" | "bash" => Some(ScriptKind::Shell),
            "py" => Some(ScriptKind::Python),
            "rb" => Some(ScriptKind::Ruby),
            "php" => Some(ScriptKind::Php),
            _ => None,
        }
    }

    /// Default interpreter for this kind; `None` for virtual nodes
    pub fn interpreter(&self) -> Option<&'static str> {
        match self {
            ScriptKind::Node => Some("node"),
            ScriptKind::Shell => Some("bash"),
            ScriptKind::Python => Some("python3"),
            ScriptKind::Ruby => Some("ruby"),
            ScriptKind::Php => Some("php"),
            ScriptKind::Virtual => None,
        }
    }

    /// Stable lowercase name, exported to child processes
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptKind::Node => "node",
            ScriptKind::Shell => "shell",
            ScriptKind::Python => "python",
            ScriptKind::Ruby => "ruby",
            ScriptKind::Php => "php",
            ScriptKind::Virtual => "virtual",
        }
    }
}

/// One discovered executable (or virtual directory node)
///
/// Created fresh on every scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptDescriptor {
    /// Absolute path of the script, or of the directory for virtual nodes
    pub path: PathBuf,

    /// Inferred interpreter family
    pub kind: ScriptKind,

    /// Sidecar metadata, if a document was found and parsed
    pub metadata: Option<Metadata>,
}

impl ScriptDescriptor {
    pub fn is_virtual(&self) -> bool {
        self.kind == ScriptKind::Virtual
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.description())
    }
}

/// A script descriptor paired with the root it was discovered under
///
/// `priority` is the root's index in the configured root list; lower wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionSource {
    /// The command path this source claims
    pub command: CommandPath,

    /// The discovered script
    pub script: ScriptDescriptor,

    /// Root directory the script was discovered under
    pub root: PathBuf,

    /// Priority rank of that root (0 = highest)
    pub priority: usize,

    /// Set when this entry was synthesized by alias expansion; names the
    /// command path that declared the alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliased_from: Option<CommandPath>,
}

impl ExtensionSource {
    /// True when this source is an expanded alias rather than a real node
    pub fn is_alias(&self) -> bool {
        self.aliased_from.is_some()
    }

    /// Collision tie-break: priority rank first, then real scripts over
    /// aliases; remaining ties keep the incumbent (scan order).
    pub(crate) fn beats(&self, incumbent: &ExtensionSource) -> bool {
        let rank = |s: &ExtensionSource| (s.priority, s.is_alias() as u8);
        rank(self) < rank(incumbent)
    }
}
