//! Core data model for command resolution
//!
//! Pure command model without any I/O concerns. Discovery, merging, and
//! execution all operate on these types.
//!
//! ## Key Types
//!
//! - [`CommandPath`] - ordered segment sequence addressing a command node
//! - [`Metadata`] - optional sidecar document describing a script
//! - [`ExtensionSource`] - a discovered script plus its root and priority
//! - [`CommandTable`] - the resolved path-to-source mapping with conflicts

mod path;
mod metadata;
mod source;
mod table;

pub use path::{CommandPath, PathError};
pub use metadata::{Metadata, OptionDecl, OptionKind};
pub use source::{ExtensionSource, ScriptDescriptor, ScriptKind};
pub use table::{CommandTable, Conflict};
