use std::path::PathBuf;

use clap::Parser;

mod keymap;
mod run;

/// A Chip-8 virtual machine.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM to load
    pub rom: PathBuf,

    /// Screen pixels per Chip-8 pixel
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Instruction clock rate in steps per second
    #[arg(short, long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(1..))]
    pub clock: u32,

    /// 8XY6/8XYE load VY into VX before shifting
    #[arg(long)]
    pub shift_quirk: bool,

    /// BNNN jumps to XNN + VX instead of NNN + V0
    #[arg(long)]
    pub jump_quirk: bool,

    /// FX55/FX65 advance the index register as they copy
    #[arg(long)]
    pub index_quirk: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run::run(Args::parse())
}
