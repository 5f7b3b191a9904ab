pub mod datasets;
pub mod ports;

pub use datasets::*;
pub use ports::*;
