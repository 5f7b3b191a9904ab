pub mod buffered_logger;
pub mod file_logger;
pub mod http_api;
pub mod memory_display;
pub mod multi_logger;
pub mod noop_logger;
pub mod tracing_logger;

pub use buffered_logger::*;
pub use file_logger::*;
pub use http_api::*;
pub use memory_display::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use tracing_logger::*;
