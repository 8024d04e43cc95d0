// NES Emulator - CLI entry point
//
// Single positional argument: path to a `.nes` file. No flags. Exit code 0
// on clean termination, nonzero on an invalid header or I/O error.
//
// This core has no windowing or real-time pacing of its own (SPEC_FULL.md
// §1 Non-goals); the binary runs a fixed number of frames as a smoke test
// of the loaded ROM and then exits cleanly. A full frontend would replace
// the loop below with its own window-close predicate driving `run_frame`.

use nes_rs::emulator::Emulator;
use std::process::ExitCode;

const SMOKE_TEST_FRAMES: u32 = 60;

fn main() -> ExitCode {
    env_logger::init();

    let Some(rom_path) = std::env::args().nth(1) else {
        eprintln!("usage: nes-rs <path-to-rom.nes>");
        return ExitCode::FAILURE;
    };

    let mut emulator = Emulator::new();
    if let Err(err) = emulator.load_rom(&rom_path) {
        log::error!("failed to load '{rom_path}': {err}");
        eprintln!("failed to load '{rom_path}': {err}");
        return ExitCode::FAILURE;
    }

    for _ in 0..SMOKE_TEST_FRAMES {
        if let Err(err) = emulator.run_frame() {
            log::error!("{err}");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
