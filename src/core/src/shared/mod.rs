pub mod money;
pub mod month;

pub use money::*;
pub use month::*;
