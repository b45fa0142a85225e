pub mod memory;
pub mod decoder;
pub mod channel;
pub mod computer;
pub mod program;
pub mod runner;

pub use channel::{Input, Output, channel};
pub use computer::{Computer, ExecutionError};
