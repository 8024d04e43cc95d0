// Emulator module - Main emulator coordinator
//
// Coordinates CPU, PPU, APU, and cartridge behind the cooperative scheduling
// model of SPEC_FULL.md §5: interleave a bounded run of CPU steps with one
// PPU frame, connected by the bounded interrupt channel. Save states,
// screenshots, and recent-ROM tracking are host-UI concerns and stay out of
// this core (SPEC_FULL.md §1 Non-goals).

use crate::apu::Apu;
use crate::bus::apu_adapter::KeyDownPredicate;
use crate::bus::MemoryController;
use crate::cartridge::Cartridge;
use crate::config::CoreConfig;
use crate::cpu::Cpu;
use crate::error::{CoreError, StepError};
use crate::interrupt::InterruptChannel;
use crate::ppu::Ppu;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Approximate CPU steps executed between PPU frames. Cycle-exact PPU/CPU
/// clock ratios are out of scope (SPEC_FULL.md §1 Non-goals); this figure
/// is close enough to the NTSC ratio (3 PPU dots per CPU cycle, ~29780.5
/// cycles per frame) to keep NMI-driven games making forward progress.
pub const CPU_STEPS_PER_FRAME: u32 = 3000;

/// Main emulator structure.
///
/// Coordinates all NES components and drives the cooperative CPU/PPU loop.
pub struct Emulator {
    cpu: Cpu,
    bus: MemoryController,
    ppu: Rc<RefCell<Ppu>>,
    #[allow(dead_code)]
    apu: Rc<RefCell<Apu>>,
    channel: InterruptChannel,
    cartridge: Option<Cartridge>,
    config: CoreConfig,
    rom_path: Option<PathBuf>,
}

impl Emulator {
    /// Create a new emulator instance with no cartridge loaded.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_rs::emulator::Emulator;
    ///
    /// let emulator = Emulator::new();
    /// ```
    pub fn new() -> Self {
        let config = CoreConfig::load_or_default();
        let apu = Rc::new(RefCell::new(Apu::new()));
        let ppu_bus = MemoryController::new();
        let ppu = Rc::new(RefCell::new(Ppu::new(ppu_bus)));
        let mut bus = MemoryController::new();
        // No cartridge yet: CPU bus starts empty except for internal RAM,
        // populated fully once `load_rom` wires the cartridge's devices in.
        let _ = bus.add_memory(
            crate::bus::BusDevice::MirroredRam(crate::bus::devices::MirroredRam::new(0x800)),
            0x0000,
            0x2000,
        );

        Emulator {
            cpu: Cpu::new(),
            bus,
            ppu,
            apu,
            channel: InterruptChannel::default(),
            cartridge: None,
            config,
            rom_path: None,
        }
    }

    /// Load a ROM file, wiring its cartridge devices onto fresh CPU and PPU
    /// buses, then reset.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nes_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.nes").expect("failed to load ROM");
    /// ```
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CoreError> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;

        let ppu_bus = cartridge.build_ppu_bus()?;
        self.ppu = Rc::new(RefCell::new(Ppu::new(ppu_bus)));
        self.bus = cartridge.build_cpu_bus(Rc::clone(&self.ppu), Rc::clone(&self.apu))?;

        self.cartridge = Some(cartridge);
        self.rom_path = Some(path.to_path_buf());

        log::info!("{}: ROM loaded", path.display());
        self.reset()?;
        Ok(())
    }

    /// Reset all components to power-on state, as if pressing the reset
    /// button.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        self.channel = InterruptChannel::default();
        self.cpu.reset(&mut self.bus)?;
        log::info!("core reset");
        Ok(())
    }

    /// Advance one CPU instruction. Errors are fatal per SPEC_FULL.md §7 and
    /// are logged with the faulting PC before being returned.
    pub fn step(&mut self) -> Result<(), StepError> {
        self.cpu.step(&mut self.bus, &mut self.channel).inspect_err(|e| {
            log::error!("{e}");
        })
    }

    /// Run `CPU_STEPS_PER_FRAME` CPU steps, then render one PPU frame,
    /// implementing the "N CPU steps, then one PPU frame" interleaving the
    /// core's design notes call out as sufficient for a single-task
    /// scheduler.
    pub fn run_frame(&mut self) -> Result<(), StepError> {
        for _ in 0..CPU_STEPS_PER_FRAME {
            self.step()?;
        }
        self.ppu
            .borrow_mut()
            .render_frame(&mut self.channel)
            .map_err(|e| StepError::new(self.cpu.pc, e))?;
        Ok(())
    }

    /// Register a predicate the core calls once per button, in a fixed
    /// order, whenever the host strobes controller 1. Returns `false` if no
    /// ROM (and therefore no ApuBusAdapter) is loaded yet.
    pub fn set_key_down_predicate(&mut self, predicate: KeyDownPredicate) -> bool {
        match self.bus.apu_adapter_mut() {
            Some(adapter) => {
                adapter.set_key_down_predicate(predicate);
                true
            }
            None => false,
        }
    }

    /// Borrow the current framebuffer (raw palette indices; RGBA conversion
    /// is a host-rendering concern, see `ppu::palette`).
    pub fn framebuffer(&self) -> std::cell::Ref<'_, [u8; crate::ppu::SCREEN_WIDTH * crate::ppu::SCREEN_HEIGHT]> {
        std::cell::Ref::map(self.ppu.borrow(), |ppu| ppu.framebuffer())
    }

    /// Get reference to CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Get mutable reference to CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    /// Get reference to configuration.
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Get the currently loaded ROM path.
    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }

    /// Get reference to the loaded cartridge, if any.
    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_nrom_bytes() -> Vec<u8> {
        let mut bytes = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut prg = vec![0xEA; 16 * 1024]; // NOP-filled
        prg[0x3FFC] = 0x00; // reset vector low -> 0x8000
        prg[0x3FFD] = 0x80; // reset vector high
        bytes.extend(prg);
        bytes.extend(vec![0u8; 8 * 1024]);
        bytes
    }

    #[test]
    fn test_load_rom_then_reset_lands_on_vector() {
        let dir = std::env::temp_dir();
        let path = dir.join("emulator_mod_test_nrom.nes");
        std::fs::write(&path, minimal_nrom_bytes()).unwrap();

        let mut emulator = Emulator::new();
        emulator.load_rom(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(emulator.cpu().pc, 0x8000);
    }

    #[test]
    fn test_step_executes_nop_and_advances_pc() {
        let dir = std::env::temp_dir();
        let path = dir.join("emulator_mod_test_step.nes");
        std::fs::write(&path, minimal_nrom_bytes()).unwrap();

        let mut emulator = Emulator::new();
        emulator.load_rom(&path).unwrap();
        std::fs::remove_file(&path).ok();

        emulator.step().unwrap();
        assert_eq!(emulator.cpu().pc, 0x8001, "a single NOP should advance PC by one");
    }
}
