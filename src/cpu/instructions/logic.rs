// Bitwise instructions: And, Ora, Eor (in place on A) and Bit (test only).

use crate::bus::MemoryController;
use crate::cpu::addressing::resolve_read;
use crate::cpu::decoder::AddressingMode;
use crate::cpu::{flags, Cpu};
use crate::error::CoreError;

impl Cpu {
    pub(crate) fn and(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "AND", mode, b0, b1)?;
        self.a &= operand;
        self.update_zn(self.a);
        Ok(())
    }

    pub(crate) fn ora(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "ORA", mode, b0, b1)?;
        self.a |= operand;
        self.update_zn(self.a);
        Ok(())
    }

    pub(crate) fn eor(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "EOR", mode, b0, b1)?;
        self.a ^= operand;
        self.update_zn(self.a);
        Ok(())
    }

    /// BIT - test bits without modifying `A`. Z, N and V are all derived
    /// from `r = operand & A`, not from the raw operand.
    pub(crate) fn bit(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "BIT", mode, b0, b1)?;
        let r = operand & self.a;
        self.update_flag(flags::ZERO, r == 0);
        self.update_flag(flags::NEGATIVE, r & 0x80 != 0);
        self.update_flag(flags::OVERFLOW, r & 0x40 != 0);
        Ok(())
    }
}
