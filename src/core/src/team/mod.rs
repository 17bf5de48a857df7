mod team;

pub use team::*;
