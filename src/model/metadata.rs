//! Sidecar metadata documents
//!
//! Scripts and directories may carry an optional metadata document (YAML or
//! JSON) describing their description, runner, options, and aliases. Every
//! field is optional; consumers must treat absence as the default behavior.

use serde::{Deserialize, Serialize};

/// Metadata document for a script or directory node
///
/// Field names follow the sidecar file convention (`passContext`, not
/// `pass_context`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Human-readable description, shown in listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Explicit runner override (e.g. "deno run"), takes precedence over
    /// the extension-inferred interpreter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner: Option<String>,

    /// Pipe a JSON execution context to the child's stdin
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pass_context: bool,

    /// Namespace may be offered for wrapper synthesis
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub aliasable: bool,

    /// Additional names this command answers to within its parent namespace
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Declared command-line options
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDecl>,
}

impl Metadata {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Looks up a declared option by name
    pub fn option(&self, name: &str) -> Option<&OptionDecl> {
        self.options.iter().find(|o| o.name == name)
    }
}

/// Value type of a declared option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    #[default]
    String,
    Boolean,
    Number,
}

/// A single declared command-line option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDecl {
    /// Long option name, unique within one metadata document
    pub name: String,

    /// Optional single-character short form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,

    /// Value type
    #[serde(rename = "type", default)]
    pub kind: OptionKind,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Fixed suggestion list for shell completion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Invocation fails if the option is absent and has no default
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Default value applied when the user does not supply one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}
