pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod output;
pub mod techniques;

pub use errors::PwnError;
pub use models::{CandidateSet, CommandRecord, ResolvedBinary, Technique};
pub use techniques::{BinaryResolver, CandidateRequest, FilterEngine, RecordStore, WhichResolver};
