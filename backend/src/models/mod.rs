pub mod intervention;
pub mod time;

pub use intervention::*;
pub use time::*;
