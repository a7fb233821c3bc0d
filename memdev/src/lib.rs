pub mod core;
mod errors;
pub mod params;
pub mod session;
mod watch;

pub use errors::MemdevError;

pub const BUFFER_CAPACITY: usize = core::BUFFER_CAPACITY;
