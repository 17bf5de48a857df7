mod cost;
mod ledger;
mod report;
mod summary;
mod sync;
mod transaction;

pub use cost::*;
pub use ledger::*;
pub use report::*;
pub use summary::*;
pub use sync::*;
pub use transaction::*;
