//! # Command Execution
//!
//! The only part of the engine that touches process APIs. Resolution hands
//! over a winning [`ExtensionSource`](crate::model::ExtensionSource); this
//! module parses the user's declared options out of the residual tokens,
//! builds the environment overlay, and spawns the script under its
//! interpreter.
//!
//! ## Process Boundary
//!
//! A spawned script observes:
//! - `CORRAL_COMMAND` - the invoked command path, segments joined by spaces
//! - `CORRAL_SCRIPT` - absolute path of the resolved script
//! - `CORRAL_SCRIPT_TYPE` - inferred script type (`shell`, `python`, ...)
//! - `CORRAL_OPT_<NAME>` - one variable per supplied option value
//! - stdin: a single JSON execution context when `passContext` is set,
//!   otherwise closed immediately
//! - stdout/stderr: inherited, streamed unbuffered to the user's terminal

mod executor;
mod options;

pub use executor::{
    env_overlay, execute, option_env_name, ExecContext, ExecError, Invocation, ENV_COMMAND,
    ENV_OPTION_PREFIX, ENV_SCRIPT, ENV_SCRIPT_TYPE,
};
pub use options::{parse_options, OptionError, ParsedOptions};
