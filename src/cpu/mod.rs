// CPU module - 6502/65C02 processor emulation.

pub mod addressing;
pub mod decoder;
pub mod instructions;

use crate::bus::MemoryController;
use crate::error::{CoreError, StepError};
use crate::interrupt::{InterruptChannel, InterruptSource};

/// Processor Status Flags (P register)
///
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000;
    pub const BREAK: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;
}

/// Interrupt vector addresses, per SPEC_FULL.md §4.9.1.
pub mod vectors {
    /// Abort vector ($FFF8-$FFF9).
    pub const ABORT: u16 = 0xFFF8;
    /// NMI vector ($FFFA-$FFFB).
    pub const NMI: u16 = 0xFFFA;
    /// RESET vector ($FFFC-$FFFD).
    pub const RESET: u16 = 0xFFFC;
    /// IRQ/BRK vector ($FFFE-$FFFF).
    pub const IRQ: u16 = 0xFFFE;
}

fn vector_for(source: InterruptSource) -> u16 {
    match source {
        InterruptSource::Reset => vectors::RESET,
        InterruptSource::Nmi => vectors::NMI,
        InterruptSource::Irq | InterruptSource::Brk => vectors::IRQ,
        InterruptSource::Abort => vectors::ABORT,
    }
}

/// CPU register file and execution state.
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// `PC` as it was at the start of the instruction currently being
    /// serviced; used to re-point the return address when an interrupt
    /// discards a just-fetched instruction (SPEC_FULL.md §4.9.2).
    pub pc_prev: u16,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            pc_prev: 0,
            status: 0,
        };
        cpu.set_flag(flags::UNUSED);
        cpu.set_flag(flags::INTERRUPT_DISABLE);
        cpu
    }

    /// Reset is special-cased: unlike NMI/IRQ/BRK/Abort it pushes nothing
    /// to the stack. It just sets the interrupt-disable bit and loads `PC`
    /// from the reset vector.
    pub fn reset(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = 0;
        self.set_flag(flags::UNUSED);
        self.set_flag(flags::INTERRUPT_DISABLE);

        let lo = bus.read(vectors::RESET)?;
        let hi = bus.read(vectors::RESET.wrapping_add(1))?;
        self.pc = u16::from_le_bytes([lo, hi]);
        self.pc_prev = self.pc;
        Ok(())
    }

    // ========================================
    // Status flag manipulation
    // ========================================

    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    #[inline]
    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    /// Set Z/N from a freshly loaded or computed 8-bit value.
    #[inline]
    pub fn update_zn(&mut self, value: u8) {
        self.update_flag(flags::ZERO, value == 0);
        self.update_flag(flags::NEGATIVE, value >= 0x80);
    }

    pub(crate) fn register_snapshot(&self) -> addressing::RegisterSnapshot {
        addressing::RegisterSnapshot { a: self.a, x: self.x, y: self.y, pc: self.pc }
    }

    // ========================================
    // Stack (SPEC_FULL.md §4.9.5)
    // ========================================

    pub fn push(&mut self, bus: &mut MemoryController, value: u8) -> Result<(), CoreError> {
        bus.write(0x0100 + self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    pub fn pop(&mut self, bus: &mut MemoryController) -> Result<u8, CoreError> {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 + self.sp as u16)
    }

    // ========================================
    // Interrupt dispatch (SPEC_FULL.md §4.9.1)
    // ========================================

    fn service_interrupt(&mut self, bus: &mut MemoryController, source: InterruptSource) -> Result<(), CoreError> {
        if source == InterruptSource::Reset {
            return self.reset(bus);
        }

        let return_pc = self.pc_prev;
        self.push(bus, (return_pc >> 8) as u8)?;
        self.push(bus, (return_pc & 0xFF) as u8)?;
        self.push(bus, self.status)?;
        self.set_flag(flags::INTERRUPT_DISABLE);

        let vector = vector_for(source);
        let lo = bus.read(vector)?;
        let hi = bus.read(vector.wrapping_add(1))?;
        self.pc = u16::from_le_bytes([lo, hi]);
        self.pc_prev = self.pc;
        Ok(())
    }

    /// OAM DMA (SPEC_FULL.md §4.9.6): a write to $4014 copies 256 bytes
    /// from `page << 8` to the PPU's OAM via 256 synthetic $2004 writes.
    /// Atomic from the rest of the core's viewpoint; consumes no further
    /// step budget.
    fn perform_oam_dma(&mut self, bus: &mut MemoryController, page: u8) -> Result<(), CoreError> {
        let base = (page as u16) << 8;
        for i in 0..256u16 {
            let byte = bus.read(base + i)?;
            bus.write(0x2004, byte)?;
        }
        Ok(())
    }

    /// Write through the CPU bus, intercepting $4014 as an OAM DMA trigger
    /// rather than a normal device write.
    pub fn write_bus(&mut self, bus: &mut MemoryController, addr: u16, value: u8) -> Result<(), CoreError> {
        if addr == 0x4014 {
            return self.perform_oam_dma(bus, value);
        }
        bus.write(addr, value)
    }

    // ========================================
    // Step cycle (SPEC_FULL.md §4.9.2)
    // ========================================

    pub fn step(&mut self, bus: &mut MemoryController, channel: &mut InterruptChannel) -> Result<(), StepError> {
        let start_pc = self.pc;
        self.pc_prev = start_pc;

        let result = self.step_inner(bus, channel);
        result.map_err(|e| StepError::new(start_pc, e))
    }

    fn step_inner(&mut self, bus: &mut MemoryController, channel: &mut InterruptChannel) -> Result<(), CoreError> {
        let opcode = bus.read(self.pc)?;
        self.pc = self.pc.wrapping_add(1);

        let (operation, mode, operand_len) = decoder::decode(opcode)?;

        let mut b0 = 0u8;
        let mut b1 = 0u8;
        for i in 0..operand_len {
            let byte = bus.read(self.pc)?;
            self.pc = self.pc.wrapping_add(1);
            if i == 0 {
                b0 = byte;
            } else {
                b1 = byte;
            }
        }

        if let Some(source) = channel.try_recv() {
            return self.service_interrupt(bus, source);
        }

        instructions::execute(self, bus, operation, mode, b0, b1)
    }
}
