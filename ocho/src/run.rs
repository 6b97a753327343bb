use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{debug, error};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use ocho_core::constants::TIMER_RATE;
use ocho_core::{Interpreter, Machine, Quirks};
use ocho_display::Display;

use crate::keymap::keymap;
use crate::Args;

/// One delay/sound timer tick every 1/60th of a second, regardless of how
/// fast or slow the instruction clock runs.
const TIMER_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TIMER_RATE as u64);

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut machine = Machine::new();

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let loaded = machine
        .load_program(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    debug!("loaded {} byte ROM", loaded);

    let interpreter = Interpreter::new(Quirks {
        shift: args.shift_quirk,
        jump: args.jump_quirk,
        index_increment: args.index_quirk,
    });

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display: Display = Display::new(&sdl, args.scale);
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Set initial timing
    let step_interval: Duration = Duration::from_secs(1) / args.clock;
    let mut last_step: Instant = Instant::now();
    // Elapsed time not yet converted into 60Hz timer ticks
    let mut timer_budget: Duration = Duration::ZERO;

    'event: loop {
        // If the frame buffer changed, render it
        if let Some(frame) = machine.take_frame() {
            display.render(frame);
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // A step error is fatal for the instruction stream; halt and report
        if let Err(e) = interpreter.step(&mut machine) {
            error!("halting at pc {:#06X}: {}", machine.pc, e);
            return Err(e).context("machine halted");
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_step_time = current_time - last_step;
        if step_interval > elapsed_step_time {
            std::thread::sleep(step_interval - elapsed_step_time);
        }
        last_step = current_time;

        // Convert whatever wall-clock time has passed into timer ticks
        timer_budget += elapsed_step_time;
        while timer_budget >= TIMER_INTERVAL {
            machine.tick_timers();
            timer_budget -= TIMER_INTERVAL;
        }
    }

    Ok(())
}
