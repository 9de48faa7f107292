mod generators;
mod loaders;
mod repository;

pub use generators::*;
pub use loaders::*;
pub use repository::*;
