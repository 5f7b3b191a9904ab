pub mod alerts;
pub mod charts;
pub mod logger;
pub mod map;
pub mod reporting;
pub mod tracking;

pub use alerts::*;
pub use charts::*;
pub use logger::*;
pub use map::*;
pub use reporting::*;
pub use tracking::*;
