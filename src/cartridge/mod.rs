// Cartridge loading: iNES header parsing and NROM (mapper 0) wiring.
//
// Only mapper 0 is in scope (SPEC_FULL.md §1 Non-goals); there is no
// `Mapper` trait here, since the set of supported mappers is exactly one.
// PRG/CHR loading and memory-map wiring are grounded on the source's
// `cartridge/mappers/mapper0.rs`.

use crate::apu::Apu;
use crate::bus::devices::{MirroredRam, MirroredRom, Ram, Rom};
use crate::bus::{ApuBusAdapter, BusDevice, MemoryController, PpuBusAdapter};
use crate::error::CoreError;
use crate::ppu::Ppu;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Nametable arrangement, from iNES header byte 2 bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Platform/region flag, from iNES header byte 5 bits 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Region {
    Ntsc,
    Pal,
    Dual,
}

/// A loaded, parsed cartridge image: PRG-ROM, CHR memory, and the header
/// fields the core cares about.
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub chr_is_ram: bool,
    pub mirroring: Mirroring,
    pub mapper: u8,
    pub prg_ram_size: usize,
    pub region: Region,
}

impl Cartridge {
    /// Parse the 12-byte argument the core receives (bytes 4..15 of the
    /// 16-byte iNES header; the 4-byte magic is validated by the caller)
    /// together with the PRG-ROM and CHR-ROM payloads that follow it in
    /// the file.
    pub fn from_ines(header: &[u8; 12], prg_rom: Vec<u8>, mut chr_rom: Vec<u8>) -> Result<Cartridge, CoreError> {
        if header[3] & 0x0C != 0 {
            return Err(CoreError::InvalidHeader(
                "only iNES 1.0 is supported (header[3] & 0x0C must be zero)".to_string(),
            ));
        }

        let prg_rom_size = header[0] as usize * 16 * 1024;
        let chr_rom_size = header[1] as usize * 8 * 1024;

        if prg_rom.len() != prg_rom_size {
            return Err(CoreError::InvalidHeader(format!(
                "PRG-ROM length {} does not match header-declared size {}",
                prg_rom.len(),
                prg_rom_size
            )));
        }

        let chr_is_ram = chr_rom_size == 0;
        if chr_is_ram {
            chr_rom = vec![0; 8 * 1024];
        } else if chr_rom.len() != chr_rom_size {
            return Err(CoreError::InvalidHeader(format!(
                "CHR-ROM length {} does not match header-declared size {}",
                chr_rom.len(),
                chr_rom_size
            )));
        }

        let mirroring = if header[2] & 0x01 != 0 { Mirroring::Horizontal } else { Mirroring::Vertical };
        let mapper_low = header[2] >> 4;
        let mapper_high = header[3] >> 4;
        let mapper = (mapper_high << 4) | mapper_low;

        let prg_ram_size = header[4] as usize * 8 * 1024;

        let region = match header[5] & 0x03 {
            0 => Region::Ntsc,
            2 => Region::Pal,
            _ => Region::Dual,
        };

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            chr_is_ram,
            mirroring,
            mapper,
            prg_ram_size,
            region,
        })
    }

    /// Read and parse a `.nes` file from disk: validate the 4-byte magic,
    /// then hand the remaining 12 header bytes and the PRG/CHR payloads to
    /// [`Cartridge::from_ines`].
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Cartridge, CoreError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        if bytes.len() < 16 || bytes[0..4] != INES_MAGIC {
            log::error!("{}: missing iNES magic bytes", path.display());
            return Err(CoreError::InvalidHeader("missing iNES magic bytes".to_string()));
        }

        let mut header = [0u8; 12];
        header.copy_from_slice(&bytes[4..16]);

        let has_trainer = header[2] & 0x04 != 0;
        let mut offset = 16;
        if has_trainer {
            offset += 512;
        }

        let prg_rom_size = header[0] as usize * 16 * 1024;
        let chr_rom_size = header[1] as usize * 8 * 1024;

        let prg_end = offset + prg_rom_size;
        let prg_rom = bytes
            .get(offset..prg_end)
            .ok_or_else(|| CoreError::InvalidHeader("file too short for declared PRG-ROM size".to_string()))?
            .to_vec();

        let chr_rom = if chr_rom_size == 0 {
            Vec::new()
        } else {
            bytes
                .get(prg_end..prg_end + chr_rom_size)
                .ok_or_else(|| CoreError::InvalidHeader("file too short for declared CHR-ROM size".to_string()))?
                .to_vec()
        };

        let cartridge = Cartridge::from_ines(&header, prg_rom, chr_rom)?;
        log::info!(
            "{}: loaded mapper {} ({} KiB PRG, {} KiB CHR{})",
            path.display(),
            cartridge.mapper,
            cartridge.prg_rom.len() / 1024,
            cartridge.chr_rom.len() / 1024,
            if cartridge.chr_is_ram { ", CHR-RAM" } else { "" }
        );
        Ok(cartridge)
    }

    /// Build the CPU-side memory controller for this cartridge's default
    /// NROM wiring (SPEC_FULL.md §6): internal RAM, the PPU/APU adapters,
    /// and the mirrored PRG-ROM image.
    pub fn build_cpu_bus(&self, ppu: Rc<RefCell<Ppu>>, apu: Rc<RefCell<Apu>>) -> Result<MemoryController, CoreError> {
        let mut bus = MemoryController::new();
        bus.add_memory(BusDevice::MirroredRam(MirroredRam::new(0x800)), 0x0000, 0x2000)?;
        bus.add_memory(BusDevice::PpuAdapter(PpuBusAdapter::new(ppu)), 0x2000, 0x4000)?;
        bus.add_memory(BusDevice::ApuAdapter(ApuBusAdapter::new(apu)), 0x4000, 0x4018)?;
        bus.add_memory(
            BusDevice::MirroredRom(MirroredRom::new(self.prg_rom.clone(), 0x8000)),
            0x8000,
            0x10000,
        )?;
        Ok(bus)
    }

    /// Build the PPU-side memory controller: CHR ROM (or RAM, for
    /// cartridges with on-board CHR-RAM), nametables, and palette RAM.
    pub fn build_ppu_bus(&self) -> Result<MemoryController, CoreError> {
        let mut bus = MemoryController::new();
        if self.chr_is_ram {
            bus.add_memory(BusDevice::Ram(Ram::new(self.chr_rom.len())), 0x0000, 0x2000)?;
        } else {
            bus.add_memory(BusDevice::Rom(Rom::new(self.chr_rom.clone())), 0x0000, 0x2000)?;
        }
        bus.add_memory(BusDevice::Ram(Ram::new(0x1000)), 0x2000, 0x3000)?;
        bus.add_memory(BusDevice::MirroredRam(MirroredRam::new(0x20)), 0x3F00, 0x4000)?;
        Ok(bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> [u8; 12] {
        let mut h = [0u8; 12];
        h[0] = prg_banks;
        h[1] = chr_banks;
        h[2] = flags6;
        h[3] = flags7;
        h
    }

    #[test]
    fn test_nrom_256_parses_cleanly() {
        let h = header(2, 1, 0, 0);
        let cart = Cartridge::from_ines(&h, vec![0; 32 * 1024], vec![0; 8 * 1024]).unwrap();
        assert_eq!(cart.prg_rom.len(), 32 * 1024);
        assert_eq!(cart.mirroring, Mirroring::Vertical);
        assert_eq!(cart.mapper, 0);
    }

    #[test]
    fn test_mapper_nybbles_combine() {
        let h = header(1, 1, 0x10, 0x20); // mapper low nybble 1, high nybble 2 -> mapper 0x21
        let cart = Cartridge::from_ines(&h, vec![0; 16 * 1024], vec![0; 8 * 1024]).unwrap();
        assert_eq!(cart.mapper, 0x21);
    }

    #[test]
    fn test_ines_2_flag_is_rejected() {
        let h = header(1, 1, 0, 0x08); // header[3] & 0x0C != 0
        let result = Cartridge::from_ines(&h, vec![0; 16 * 1024], vec![0; 8 * 1024]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_chr_banks_allocates_chr_ram() {
        let h = header(1, 0, 0, 0);
        let cart = Cartridge::from_ines(&h, vec![0; 16 * 1024], vec![]).unwrap();
        assert!(cart.chr_is_ram);
        assert_eq!(cart.chr_rom.len(), 8 * 1024);
    }

    #[test]
    fn test_mismatched_prg_length_is_invalid_header() {
        let h = header(2, 1, 0, 0);
        let result = Cartridge::from_ines(&h, vec![0; 16 * 1024], vec![0; 8 * 1024]);
        assert!(result.is_err());
    }

    #[test]
    fn test_nrom_prg_mirrors_16k_image_across_32k_window() {
        let h = header(1, 1, 0, 0);
        let cart = Cartridge::from_ines(&h, vec![0xAB; 16 * 1024], vec![0; 8 * 1024]).unwrap();
        let mut bus = cart
            .build_cpu_bus(
                Rc::new(RefCell::new(Ppu::new(cart.build_ppu_bus().unwrap()))),
                Rc::new(RefCell::new(Apu::new())),
            )
            .unwrap();
        assert_eq!(bus.read(0x8000).unwrap(), 0xAB);
        assert_eq!(bus.read(0xC000).unwrap(), 0xAB, "16K PRG image should mirror into the upper half of the window");
    }

    #[test]
    fn test_from_ines_file_parses_header_and_payload() {
        let mut file_bytes = vec![0x4E, 0x45, 0x53, 0x1A, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        file_bytes.extend(vec![0x11; 16 * 1024]);
        file_bytes.extend(vec![0x22; 8 * 1024]);

        let dir = std::env::temp_dir();
        let path = dir.join(format!("cartridge_mod_test_{:p}.nes", &file_bytes));
        std::fs::write(&path, &file_bytes).unwrap();

        let cart = Cartridge::from_ines_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cart.prg_rom.len(), 16 * 1024);
        assert_eq!(cart.chr_rom.len(), 8 * 1024);
        assert_eq!(cart.prg_rom[0], 0x11);
        assert_eq!(cart.chr_rom[0], 0x22);
    }

    #[test]
    fn test_from_ines_file_rejects_missing_magic() {
        let dir = std::env::temp_dir();
        let path = dir.join("cartridge_mod_test_bad_magic.nes");
        std::fs::write(&path, vec![0u8; 32]).unwrap();
        let result = Cartridge::from_ines_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
