pub mod loader;
pub mod catalog;
pub mod resolver;
pub mod filter;

pub use loader::{RecordStore, parse_entry};
pub use catalog::{parse_catalog, validate_functions};
pub use resolver::{BinaryResolver, WhichResolver, StaticResolver};
pub use filter::{CandidateRequest, FilterEngine};
