mod commentary;
mod config;
mod engine;
mod phase;
mod sampler;
pub mod state;

pub use commentary::*;
pub use config::*;
pub use engine::*;
pub use phase::*;
pub use sampler::*;
pub use state::*;
