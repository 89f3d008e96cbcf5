//! Sidecar metadata loading
//!
//! A script `deploy.sh` may carry metadata in `deploy.yaml` or `deploy.json`
//! (YAML preferred when both exist). A directory `aws/` carries metadata in
//! `aws/aws.yaml` or `aws/aws.json`; the file must be named after the
//! directory so an unrelated document inside it is never picked up.
//!
//! Loading never fails: a missing document is `None`, a malformed one is
//! `None` plus a diagnostic.

use std::fs;
use std::path::Path;

use crate::model::Metadata;

/// Supported serializations in priority order; the first existing file wins
const EXTENSIONS: [&str; 2] = ["yaml", "json"];

/// Locates and parses the metadata document for a script file
pub fn for_script(script: &Path, diagnostics: &mut Vec<String>) -> Option<Metadata> {
    for ext in EXTENSIONS {
        let candidate = script.with_extension(ext);
        if candidate.is_file() {
            return parse(&candidate, diagnostics);
        }
    }
    None
}

/// Locates and parses the metadata document for a directory node
pub fn for_directory(dir: &Path, diagnostics: &mut Vec<String>) -> Option<Metadata> {
    let name = dir.file_name()?.to_str()?;
    for ext in EXTENSIONS {
        let candidate = dir.join(format!("{name}.{ext}"));
        if candidate.is_file() {
            return parse(&candidate, diagnostics);
        }
    }
    None
}

fn parse(path: &Path, diagnostics: &mut Vec<String>) -> Option<Metadata> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            diagnostics.push(format!("cannot read metadata {}: {}", path.display(), e));
            return None;
        }
    };

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let parsed: Result<Metadata, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };

    match parsed {
        Ok(metadata) => Some(dedupe_options(metadata, path, diagnostics)),
        Err(e) => {
            diagnostics.push(format!("invalid metadata in {}: {}", path.display(), e));
            None
        }
    }
}

/// Option names must be unique within one document; keep the first of each
fn dedupe_options(mut metadata: Metadata, path: &Path, diagnostics: &mut Vec<String>) -> Metadata {
    let mut seen = std::collections::BTreeSet::new();
    metadata.options.retain(|option| {
        let fresh = seen.insert(option.name.clone());
        if !fresh {
            diagnostics.push(format!(
                "duplicate option '{}' in {}, keeping the first declaration",
                option.name,
                path.display()
            ));
        }
        fresh
    });
    metadata
}
