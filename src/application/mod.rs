pub mod context;
pub mod controller;
pub mod hazard_report;
pub mod poller;

pub use context::*;
pub use controller::*;
pub use hazard_report::*;
pub use poller::*;
