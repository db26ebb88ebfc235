// Manavault CLI Library

pub mod commands;
pub mod context;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;
pub mod session_store;

pub use context::AppContext;
pub use error::{CliError, CliResult};
pub use logging::{init_logging, resolve_level};
pub use router::{Cli, CommandRouter, Commands};
pub use session_store::SessionStore;
