pub mod builder;
pub mod player;
pub mod role;
pub mod skills;
pub mod statistics;

pub use builder::*;
pub use player::*;
pub use role::*;
pub use skills::*;
pub use statistics::*;
