// Translates CPU-bus reads/writes in the 0x2000..0x4000 window (mirrored
// every 8 bytes) into register-level calls on the PPU, per SPEC_FULL.md §4.5.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{AccessKind, CoreError};
use crate::ppu::Ppu;

/// A forward reference from the bus to the PPU. Not a true ownership cycle:
/// the PPU never holds a handle back to its own adapter.
#[derive(Clone)]
pub struct PpuBusAdapter {
    ppu: Rc<RefCell<Ppu>>,
}

impl std::fmt::Debug for PpuBusAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PpuBusAdapter").finish_non_exhaustive()
    }
}

impl PpuBusAdapter {
    pub fn new(ppu: Rc<RefCell<Ppu>>) -> Self {
        PpuBusAdapter { ppu }
    }

    fn write_only(&self, offset: u16) -> Result<u8, CoreError> {
        Err(CoreError::MemoryAccessViolation {
            addr: offset,
            kind: AccessKind::ReadFromWriteOnly,
        })
    }

    pub fn read(&mut self, offset: u16) -> Result<u8, CoreError> {
        match offset % 8 {
            0 => self.write_only(offset), // PpuCtrl
            1 => self.write_only(offset), // PpuMask
            2 => Ok(self.ppu.borrow_mut().read_ppu_status()),
            3 => self.write_only(offset), // OamAddr
            4 => Ok(self.ppu.borrow().read_oam_data()),
            5 => self.write_only(offset), // PpuScroll
            6 => self.write_only(offset), // PpuAddr
            7 => self.write_only(offset), // PpuData
            _ => unreachable!("offset % 8 is always in 0..8"),
        }
    }

    pub fn write(&mut self, offset: u16, value: u8) -> Result<(), CoreError> {
        let mut ppu = self.ppu.borrow_mut();
        match offset % 8 {
            0 => ppu.write_ppu_ctrl(value),
            1 => ppu.write_ppu_mask(value),
            2 => {} // PpuStatus is read-only; writes are silently ignored
            3 => ppu.write_oam_addr(value),
            4 => ppu.write_oam_data(value),
            5 => ppu.write_ppu_scroll(value),
            6 => ppu.write_ppu_addr(value),
            7 => ppu.write_ppu_data(value)?,
            _ => unreachable!("offset % 8 is always in 0..8"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::devices::{MirroredRam, Ram};
    use crate::bus::{BusDevice, MemoryController};

    fn adapter() -> PpuBusAdapter {
        let mut mem = MemoryController::new();
        mem.add_memory(BusDevice::Ram(Ram::new(0x2000)), 0x0000, 0x2000).unwrap();
        mem.add_memory(BusDevice::Ram(Ram::new(0x1000)), 0x2000, 0x3000).unwrap();
        mem.add_memory(BusDevice::MirroredRam(MirroredRam::new(0x20)), 0x3F00, 0x4000).unwrap();
        PpuBusAdapter::new(Rc::new(RefCell::new(Ppu::new(mem))))
    }

    #[test]
    fn test_reading_write_only_port_fails() {
        let mut adapter = adapter();
        assert!(adapter.read(0).is_err(), "PpuCtrl (offset 0) must fail on read");
        assert!(adapter.read(6).is_err(), "PpuAddr (offset 6) must fail on read");
        assert!(adapter.read(7).is_err(), "PpuData (offset 7) must fail on read");
    }

    #[test]
    fn test_reading_status_succeeds() {
        let mut adapter = adapter();
        assert!(adapter.read(2).is_ok());
    }

    #[test]
    fn test_offset_wraps_every_eight_bytes() {
        let mut adapter = adapter();
        adapter.write(0, 0x80).unwrap(); // PpuCtrl via offset 0
        adapter.write(8, 0x00).unwrap(); // offset 8 mod 8 == 0, also PpuCtrl
        assert_eq!(adapter.ppu.borrow().nmi_on_vblank(), false);
    }

    #[test]
    fn test_oam_data_round_trips_through_adapter() {
        let mut adapter = adapter();
        adapter.write(3, 0).unwrap(); // OamAddr = 0
        adapter.write(4, 0x99).unwrap(); // OamData
        adapter.write(3, 0).unwrap(); // rewind OamAddr
        assert_eq!(adapter.read(4).unwrap(), 0x99);
    }
}
