pub mod builder;
pub mod clock;
pub mod context;
pub mod error;
pub mod frame;
pub mod opcode;
pub mod quince;
pub mod quirks;
pub mod state;
pub mod timer;

pub use builder::{BuildError, Builder};
pub use context::{Context, StdContext};
pub use error::Error;
pub use frame::{Frame, FrameView};
pub use opcode::OpCode;
pub use quince::{Cycle, Quince8, Sound, Step};
pub use quirks::Quirks;

#[cfg(feature = "embedded-graphics")]
pub use embedded_graphics;
