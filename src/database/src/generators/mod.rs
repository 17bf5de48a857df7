mod generator;

pub use generator::*;
