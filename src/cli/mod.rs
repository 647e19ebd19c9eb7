pub mod commands;
pub mod context;
pub mod list;
pub mod desc;
pub mod find;
pub mod functions;
pub mod update;

pub use commands::{Cli, Commands};
pub use context::AppContext;
