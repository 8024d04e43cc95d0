// Bus layer: a memory-mapped address decoder routing reads and writes to
// interchangeable bus devices.
//
// Devices are modeled as a closed sum type (SPEC_FULL.md §9 design note:
// "a tagged enum with a match is preferable because the set is closed")
// rather than a trait object, since the CPU and PPU address spaces each
// wire up a small, fixed set of device kinds.

pub mod apu_adapter;
pub mod devices;
pub mod ppu_adapter;

pub use apu_adapter::ApuBusAdapter;
pub use devices::{MirroredRam, MirroredRom, Ram, Rom};
pub use ppu_adapter::PpuBusAdapter;

use crate::error::{AccessKind, CoreError};

/// The closed set of devices a `MemoryController` may dispatch to.
#[derive(Debug, Clone)]
pub enum BusDevice {
    Ram(Ram),
    MirroredRam(MirroredRam),
    Rom(Rom),
    MirroredRom(MirroredRom),
    PpuAdapter(PpuBusAdapter),
    ApuAdapter(ApuBusAdapter),
}

impl BusDevice {
    fn read(&mut self, offset: u16) -> Result<u8, CoreError> {
        match self {
            BusDevice::Ram(d) => d.read(offset),
            BusDevice::MirroredRam(d) => Ok(d.read(offset)),
            BusDevice::Rom(d) => d.read(offset),
            BusDevice::MirroredRom(d) => d.read(offset),
            BusDevice::PpuAdapter(d) => d.read(offset),
            BusDevice::ApuAdapter(d) => d.read(offset),
        }
    }

    fn write(&mut self, offset: u16, value: u8) -> Result<(), CoreError> {
        match self {
            BusDevice::Ram(d) => d.write(offset, value),
            BusDevice::MirroredRam(d) => {
                d.write(offset, value);
                Ok(())
            }
            BusDevice::Rom(d) => d.write(offset).map(|_| ()),
            BusDevice::MirroredRom(d) => d.write(offset).map(|_| ()),
            BusDevice::PpuAdapter(d) => d.write(offset, value),
            BusDevice::ApuAdapter(d) => d.write(offset, value),
        }
    }
}

struct MappedRange {
    device: BusDevice,
    start: u16,
    end: u32, // exclusive; u32 so 0x10000 (the full 64K window) is representable
}

/// Dispatches a 16-bit address to the owning device, subtracting the
/// region base before delegating.
///
/// Ranges are appended in the order supplied; the first matching range
/// wins. A dedicated instance exists for each of the CPU and PPU address
/// spaces; they share no state.
#[derive(Default)]
pub struct MemoryController {
    ranges: Vec<MappedRange>,
}

impl MemoryController {
    pub fn new() -> Self {
        MemoryController { ranges: Vec::new() }
    }

    /// Append a device spanning the half-open range `[start, end)`.
    /// `end` may be `0x10000` to reach the top of the address space.
    pub fn add_memory(&mut self, device: BusDevice, start: u16, end: u32) -> Result<(), CoreError> {
        assert!(end > start as u32, "range end must exceed start");
        assert!(end <= 0x10000, "range end must not exceed the 64K address space");
        self.ranges.push(MappedRange { device, start, end });
        Ok(())
    }

    fn locate(&mut self, addr: u16) -> Option<&mut MappedRange> {
        let addr32 = addr as u32;
        self.ranges
            .iter_mut()
            .find(|r| (r.start as u32) <= addr32 && addr32 < r.end)
    }

    pub fn read(&mut self, addr: u16) -> Result<u8, CoreError> {
        let Some(range) = self.locate(addr) else {
            return Err(CoreError::MemoryAccessViolation { addr, kind: AccessKind::Unmapped });
        };
        let start = range.start;
        range.device.read(addr - start)
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), CoreError> {
        let Some(range) = self.locate(addr) else {
            return Err(CoreError::MemoryAccessViolation { addr, kind: AccessKind::Unmapped });
        };
        let start = range.start;
        range.device.write(addr - start, value)
    }

    /// Locate the ApuBusAdapter mapped onto this bus, if any. Used by the
    /// host to register a controller key-down predicate after wiring.
    pub fn apu_adapter_mut(&mut self) -> Option<&mut ApuBusAdapter> {
        self.ranges.iter_mut().find_map(|r| match &mut r.device {
            BusDevice::ApuAdapter(adapter) => Some(adapter),
            _ => None,
        })
    }

    /// Read 8 consecutive bytes starting at `addr`, assembled little-endian.
    /// Used by the PPU for pattern-table tile fetch; callers only invoke
    /// this within `0x0000..0x2000`, so 64K wraparound is not handled.
    pub fn read64(&mut self, addr: u16) -> Result<u64, CoreError> {
        let mut bytes = [0u8; 8];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = self.read(addr + i as u16)?;
        }
        Ok(u64::from_le_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::devices::{MirroredRam, Ram, Rom};

    #[test]
    fn test_dispatches_to_first_matching_range() {
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(BusDevice::Ram(Ram::new(0x10)), 0, 0x10).unwrap();
        ctrl.add_memory(BusDevice::Ram(Ram::new(0x10)), 0x10, 0x20).unwrap();
        ctrl.write(0x05, 0xAA).unwrap();
        ctrl.write(0x15, 0xBB).unwrap();
        assert_eq!(ctrl.read(0x05).unwrap(), 0xAA);
        assert_eq!(ctrl.read(0x15).unwrap(), 0xBB);
    }

    #[test]
    fn test_unmapped_address_is_violation() {
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(BusDevice::Ram(Ram::new(0x10)), 0, 0x10).unwrap();
        assert!(ctrl.read(0x20).is_err());
    }

    #[test]
    fn test_rom_write_through_controller_fails() {
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(BusDevice::Rom(Rom::new(vec![0; 0x10])), 0, 0x10).unwrap();
        assert!(ctrl.write(0x05, 1).is_err());
    }

    #[test]
    fn test_region_base_is_subtracted_before_dispatch() {
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(BusDevice::MirroredRam(MirroredRam::new(0x800)), 0x2000, 0x2800).unwrap();
        ctrl.write(0x2010, 0x77).unwrap();
        assert_eq!(ctrl.read(0x2010).unwrap(), 0x77);
    }

    #[test]
    fn test_apu_adapter_mut_locates_mapped_adapter() {
        use crate::apu::Apu;
        use std::cell::RefCell;
        use std::rc::Rc;
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(
            BusDevice::ApuAdapter(ApuBusAdapter::new(Rc::new(RefCell::new(Apu::new())))),
            0x4000,
            0x4018,
        )
        .unwrap();
        assert!(ctrl.apu_adapter_mut().is_some());
    }

    #[test]
    fn test_read64_assembles_little_endian() {
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(BusDevice::Ram(Ram::new(16)), 0, 16).unwrap();
        for i in 0..8u16 {
            ctrl.write(i, i as u8 + 1).unwrap();
        }
        let v = ctrl.read64(0).unwrap();
        assert_eq!(v, 0x0807_0605_0403_0201);
    }
}
