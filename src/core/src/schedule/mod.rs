pub mod ai;
pub mod bracket;
pub mod config;
pub mod generator;
pub mod persist;
pub mod round_robin;

pub use ai::*;
pub use bracket::*;
pub use config::*;
pub use generator::*;
pub use persist::*;
pub use round_robin::*;
