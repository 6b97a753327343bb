use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// Load errors leave the machine untouched. Step errors mean the instruction
/// stream cannot safely be continued; whether to halt is the caller's call.
/// Returning with an empty stack is deliberately absent from this list: ROMs
/// in the wild expect that to be a no-op.
#[derive(Debug, Error)]
pub enum Error {
    #[error("program is {size} bytes but at most 3584 fit in memory")]
    ProgramTooLarge { size: usize },

    #[error("failed to read program")]
    Io(#[from] std::io::Error),

    #[error("call stack exhausted (16 frames deep)")]
    StackOverflow,

    #[error("opcode {0:#06X} is not a Chip-8 instruction")]
    UnknownOpcode(u16),

    #[error("program counter {pc:#06X} ran past the end of memory")]
    OutOfBoundsFetch { pc: u16 },
}
