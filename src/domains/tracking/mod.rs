pub mod decode;
pub mod model;
pub mod ports;
pub mod profile;

pub use decode::*;
pub use model::*;
pub use ports::*;
pub use profile::*;
