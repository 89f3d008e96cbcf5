//! Wrapper script template
//!
//! Rendering is a pure function of (namespace, subcommand list, corral
//! binary path), so synthesizing twice for an unchanged command set yields
//! byte-identical output.

use std::path::Path;

const TEMPLATE: &str = r#"#!/usr/bin/env bash
# Generated by corral. Routes known subcommands back through corral and
# hands everything else to the real __NAME__ binary found on PATH.
set -uo pipefail

CORRAL_BIN="__SELF__"
SUBCOMMANDS="__SUBCOMMANDS__"
SELF_DIR="$(cd "$(dirname "${BASH_SOURCE[0]}")" && pwd)"

if [ "$#" -eq 0 ]; then
  exec "$CORRAL_BIN" run __NAME__
fi

for sub in $SUBCOMMANDS; do
  if [ "$1" = "$sub" ]; then
    exec "$CORRAL_BIN" run __NAME__ "$@"
  fi
done

IFS=':' read -r -a path_dirs <<< "$PATH"
for dir in "${path_dirs[@]}"; do
  if [ -z "$dir" ] || [ "$dir" = "$SELF_DIR" ]; then
    continue
  fi
  candidate="$dir/__NAME__"
  if [ -f "$candidate" ] && [ -x "$candidate" ]; then
    exec "$candidate" "$@"
  fi
done

echo "__NAME__: '$1' is not a known subcommand and no __NAME__ binary was found on PATH" >&2
echo "known subcommands: $SUBCOMMANDS" >&2
exit 1
"#;

/// Renders the wrapper script for a namespace
///
/// `subcommands` must already be sorted; the list is embedded verbatim.
pub fn render(namespace: &str, subcommands: &[String], self_bin: &Path) -> String {
    TEMPLATE
        .replace("__SELF__", &self_bin.display().to_string())
        .replace("__SUBCOMMANDS__", &subcommands.join(" "))
        .replace("__NAME__", namespace)
}
