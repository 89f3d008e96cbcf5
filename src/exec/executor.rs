//! Script spawning
//!
//! Determines the interpreter for a resolved command, builds the argument
//! vector and environment overlay, and runs the script as a child process
//! with inherited stdout/stderr. When the metadata asks for it, a JSON
//! execution context is written to the child's stdin and the stream is
//! closed before waiting, so a script reading to end-of-input never blocks.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use serde::Serialize;
use thiserror::Error;

use crate::model::{CommandPath, ExtensionSource};

pub const ENV_COMMAND: &str = "CORRAL_COMMAND";
pub const ENV_SCRIPT: &str = "CORRAL_SCRIPT";
pub const ENV_SCRIPT_TYPE: &str = "CORRAL_SCRIPT_TYPE";
pub const ENV_OPTION_PREFIX: &str = "CORRAL_OPT_";

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("'{command}' is a command namespace and cannot be run directly")]
    Namespace { command: String },

    #[error("failed to spawn '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write execution context to script stdin: {0}")]
    Stdin(io::Error),

    #[error("failed waiting for script to exit: {0}")]
    Wait(io::Error),

    #[error("failed to serialize execution context: {0}")]
    Context(#[from] serde_json::Error),

    #[error("command exited with status {0}")]
    Exit(i32),

    #[error("command terminated by signal")]
    Signal,
}

/// What the user actually typed: the addressed path, parsed option values,
/// and the residual arguments passed through to the script
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The command path as invoked (an alias path stays the alias path)
    pub command: CommandPath,

    /// Parsed option values by declared name
    pub options: BTreeMap<String, String>,

    /// Unconsumed tokens, forwarded verbatim
    pub args: Vec<String>,
}

/// Execution context serialized to the child's stdin under `passContext`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecContext<'a> {
    pub command: &'a [String],
    pub options: &'a BTreeMap<String, String>,
    pub args: &'a [String],
    pub env: &'a BTreeMap<String, String>,
}

/// Derives the environment variable name for a user-supplied option
///
/// Uppercased, with every non-alphanumeric character replaced by `_`:
/// `dry-run` becomes `CORRAL_OPT_DRY_RUN`.
pub fn option_env_name(name: &str) -> String {
    let transformed: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{ENV_OPTION_PREFIX}{transformed}")
}

/// Builds the deterministic environment overlay for an invocation
pub fn env_overlay(
    source: &ExtensionSource,
    invocation: &Invocation,
) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert(ENV_COMMAND.to_string(), invocation.command.to_string());
    env.insert(ENV_SCRIPT.to_string(), source.script.path.display().to_string());
    env.insert(ENV_SCRIPT_TYPE.to_string(), source.script.kind.as_str().to_string());

    for (name, value) in &invocation.options {
        if !value.is_empty() {
            env.insert(option_env_name(name), value.clone());
        }
    }

    env
}

struct Interpreter {
    program: String,
    args: Vec<String>,
}

/// Picks the interpreter: explicit metadata `runner` wins, otherwise the
/// fixed extension table. `None` for virtual nodes.
fn interpreter_for(source: &ExtensionSource) -> Option<Interpreter> {
    if let Some(runner) = source.script.metadata.as_ref().and_then(|m| m.runner.as_deref()) {
        let mut parts = runner.split_whitespace();
        if let Some(program) = parts.next() {
            return Some(Interpreter {
                program: program.to_string(),
                args: parts.map(String::from).collect(),
            });
        }
    }

    source.script.kind.interpreter().map(|program| Interpreter {
        program: program.to_string(),
        args: Vec::new(),
    })
}

/// Spawns the resolved script and waits for it to exit
///
/// Exit code 0 is the only success signal. Non-zero exits and spawn-level
/// failures surface as [`ExecError`]; they are never retried.
pub fn execute(source: &ExtensionSource, invocation: &Invocation) -> Result<(), ExecError> {
    let Some(interpreter) = interpreter_for(source) else {
        return Err(ExecError::Namespace {
            command: invocation.command.to_string(),
        });
    };

    let pass_context = source
        .script
        .metadata
        .as_ref()
        .map(|m| m.pass_context)
        .unwrap_or(false);
    let env = env_overlay(source, invocation);

    let mut command = Command::new(&interpreter.program);
    command
        .args(&interpreter.args)
        .arg(&source.script.path)
        .args(&invocation.args)
        .envs(&env)
        .stdin(if pass_context { Stdio::piped() } else { Stdio::null() });

    let mut child = command.spawn().map_err(|e| ExecError::Spawn {
        interpreter: interpreter.program.clone(),
        source: e,
    })?;

    if pass_context {
        let context = ExecContext {
            command: invocation.command.segments(),
            options: &invocation.options,
            args: &invocation.args,
            env: &env,
        };
        let payload = serde_json::to_vec(&context)?;
        if let Some(mut stdin) = child.stdin.take() {
            // A script that exits without reading its stdin is fine.
            if let Err(e) = stdin.write_all(&payload) {
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(ExecError::Stdin(e));
                }
            }
            // Dropping the handle closes the stream before we wait.
        }
    }

    let status = child.wait().map_err(ExecError::Wait)?;
    if status.success() {
        Ok(())
    } else {
        match status.code() {
            Some(code) => Err(ExecError::Exit(code)),
            None => Err(ExecError::Signal),
        }
    }
}
