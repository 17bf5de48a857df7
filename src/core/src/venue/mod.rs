mod vacation;
mod venue;

pub use vacation::*;
pub use venue::*;
