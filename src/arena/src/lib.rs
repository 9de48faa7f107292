mod analytics;
mod config;
mod error;
mod registry;
mod service;
mod settlement;
mod sink;

pub use analytics::*;
pub use config::*;
pub use error::*;
pub use registry::*;
pub use service::*;
pub use settlement::*;
pub use sink::*;
