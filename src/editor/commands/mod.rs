//! # Command Implementations
//!
//! Each command pairs a key binding and boundary guard with one buffer
//! operation. The registry routes every input to at most one of them.

pub mod command;
pub mod editing;
pub mod movement;
pub mod native;
pub mod registry;

pub use command::{Command, CommandContext};
pub use editing::*;
pub use movement::*;
pub use native::*;
pub use registry::CommandRegistry;
