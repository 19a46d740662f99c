mod category;
mod clock;
mod ledger;
mod money;
mod transaction;

pub use category::*;
pub use clock::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;
