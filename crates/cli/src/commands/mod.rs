//! Command implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect;
mod points;
mod talents;
mod validate;

pub use inspect::Inspect;
pub use points::Points;
pub use talents::Talents;
pub use validate::Validate;
