//! Corral - turn directories of loose scripts into a structured CLI
//!
//! Corral scans one or more prioritized root directories for executable
//! scripts and their optional sidecar metadata, merges them into a single
//! conflict-aware command table, expands declared aliases, and dispatches
//! invocations to the right interpreter. It can also synthesize shell
//! wrappers that route between corral commands and same-named system
//! binaries.

pub mod model;
pub mod config;
pub mod resolve;
pub mod exec;
pub mod wrapper;
pub mod cli;

pub use model::{
    CommandPath, CommandTable, Conflict, ExtensionSource, Metadata, OptionDecl, ScriptDescriptor,
    ScriptKind,
};
