pub mod crater_table;
pub mod outline;

pub use crater_table::*;
pub use outline::*;
