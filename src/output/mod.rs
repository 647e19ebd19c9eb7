pub mod renderer;
pub mod progress;

pub use renderer::*;
pub use progress::ResolutionProgress;
