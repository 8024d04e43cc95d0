// Comparison instructions: subtraction without storing the result, only
// updating flags.
//
// Implements the corrected semantics from SPEC_FULL.md's Open questions:
// the source's duplicate `<` branch (it should have been `>`) is replaced
// with `N := bit7(A-op); Z := A==op; C := A>=op`.

use crate::bus::MemoryController;
use crate::cpu::addressing::resolve_read;
use crate::cpu::decoder::AddressingMode;
use crate::cpu::{flags, Cpu};
use crate::error::CoreError;

impl Cpu {
    fn compare(&mut self, register: u8, operand: u8) {
        let diff = register.wrapping_sub(operand);
        self.update_flag(flags::NEGATIVE, diff & 0x80 != 0);
        self.update_flag(flags::ZERO, register == operand);
        self.update_flag(flags::CARRY, register >= operand);
    }

    pub(crate) fn cmp(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "CMP", mode, b0, b1)?;
        self.compare(self.a, operand);
        Ok(())
    }

    pub(crate) fn cpx(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "CPX", mode, b0, b1)?;
        self.compare(self.x, operand);
        Ok(())
    }

    pub(crate) fn cpy(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let operand = resolve_read(self.register_snapshot(), bus, "CPY", mode, b0, b1)?;
        self.compare(self.y, operand);
        Ok(())
    }
}
