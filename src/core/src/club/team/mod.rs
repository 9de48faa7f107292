pub mod builder;
pub mod chemistry;
pub mod strategy;
pub mod team;

pub use builder::*;
pub use chemistry::*;
pub use strategy::*;
pub use team::*;
