// NES Emulator Library
// Core library: CPU, PPU, APU register surface, bus, cartridge loading, and
// the emulator coordinator. Windowing, audio synthesis, save states,
// screenshots, and a debug UI are host-frontend concerns and live outside
// this crate.

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod interrupt;
pub mod ppu;

pub use apu::Apu;
pub use bus::{ApuBusAdapter, BusDevice, MemoryController, PpuBusAdapter};
pub use cartridge::{Cartridge, Mirroring, Region};
pub use config::CoreConfig;
pub use cpu::Cpu;
pub use emulator::Emulator;
pub use error::{CoreError, StepError};
pub use interrupt::{InterruptChannel, InterruptSource};
pub use ppu::Ppu;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_library_components_construct() {
        let _cpu = Cpu::new();
        let _apu = Apu::new();
        let _ppu = Ppu::new(MemoryController::new());
        let _channel = InterruptChannel::default();
        let _config = CoreConfig::default();
        let _emulator = Emulator::new();

        let apu = Rc::new(RefCell::new(Apu::new()));
        let _apu_adapter = ApuBusAdapter::new(apu);
    }
}
