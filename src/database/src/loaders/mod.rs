mod cost;
mod snapshot;
mod team;
mod user;
mod venue;

pub use cost::*;
pub use snapshot::*;
pub use team::*;
pub use user::*;
pub use venue::*;
