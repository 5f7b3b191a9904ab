pub mod labels;
pub mod layers;
pub mod ports;
pub mod reconciler;
pub mod registry;

pub use labels::*;
pub use layers::*;
pub use ports::*;
pub use reconciler::*;
pub use registry::*;
