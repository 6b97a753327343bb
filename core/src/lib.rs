pub use error::Error;
pub use interpreter::Interpreter;
pub use machine::{FrameBuffer, Machine};
pub use quirks::Quirks;

pub mod constants;
mod error;
mod interpreter;
mod machine;
mod opcode;
mod quirks;
