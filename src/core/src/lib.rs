pub mod access;
pub mod data;
pub mod error;
pub mod finance;
pub mod r#match;
pub mod notification;
pub mod schedule;
pub mod shared;
pub mod standings;
pub mod suspension;
pub mod team;
pub mod user;
pub mod utils;
pub mod venue;

pub use access::{AccessScope, UserContext};
pub use data::LeagueData;
pub use error::{LeagueError, LeagueResult};
pub use shared::{Money, YearMonth};
