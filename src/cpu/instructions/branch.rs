// Branch instructions: all Relative mode, no flag effects. `Bra` (the
// 65C02 unconditional branch) is grouped here alongside the conditional
// forms since it shares the same addressing and effect.

use crate::bus::MemoryController;
use crate::cpu::addressing::resolve_address;
use crate::cpu::decoder::AddressingMode;
use crate::cpu::{flags, Cpu};
use crate::error::CoreError;

impl Cpu {
    /// Relative targets are computed from the instruction's *start* PC
    /// (`pc_prev`), not the running `pc` — by the time this runs, `step`
    /// has already advanced `pc` past the opcode and operand byte.
    fn branch_if(&mut self, bus: &mut MemoryController, op_name: &str, mode: AddressingMode, b0: u8, b1: u8, condition: bool) -> Result<(), CoreError> {
        if condition {
            let mut regs = self.register_snapshot();
            regs.pc = self.pc_prev;
            self.pc = resolve_address(regs, bus, op_name, mode, b0, b1)?;
        }
        Ok(())
    }

    pub(crate) fn bcc(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = !self.get_flag(flags::CARRY);
        self.branch_if(bus, "BCC", mode, b0, b1, cond)
    }

    pub(crate) fn bcs(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = self.get_flag(flags::CARRY);
        self.branch_if(bus, "BCS", mode, b0, b1, cond)
    }

    pub(crate) fn beq(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = self.get_flag(flags::ZERO);
        self.branch_if(bus, "BEQ", mode, b0, b1, cond)
    }

    pub(crate) fn bne(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = !self.get_flag(flags::ZERO);
        self.branch_if(bus, "BNE", mode, b0, b1, cond)
    }

    pub(crate) fn bmi(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = self.get_flag(flags::NEGATIVE);
        self.branch_if(bus, "BMI", mode, b0, b1, cond)
    }

    pub(crate) fn bpl(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = !self.get_flag(flags::NEGATIVE);
        self.branch_if(bus, "BPL", mode, b0, b1, cond)
    }

    pub(crate) fn bvc(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = !self.get_flag(flags::OVERFLOW);
        self.branch_if(bus, "BVC", mode, b0, b1, cond)
    }

    pub(crate) fn bvs(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        let cond = self.get_flag(flags::OVERFLOW);
        self.branch_if(bus, "BVS", mode, b0, b1, cond)
    }

    /// BRA - unconditional branch (65C02).
    pub(crate) fn bra(&mut self, bus: &mut MemoryController, mode: AddressingMode, b0: u8, b1: u8) -> Result<(), CoreError> {
        self.branch_if(bus, "BRA", mode, b0, b1, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::devices::Ram;
    use crate::bus::BusDevice;

    fn bus() -> MemoryController {
        let mut ctrl = MemoryController::new();
        ctrl.add_memory(BusDevice::Ram(Ram::new(0x10000)), 0, 0x10000).unwrap();
        ctrl
    }

    #[test]
    fn test_bne_taken_when_zero_clear() {
        let mut bus = bus();
        let mut cpu = Cpu::new();
        cpu.pc_prev = 0x8000;
        cpu.pc = 0x8002;
        cpu.bne(&mut bus, AddressingMode::Relative, 0x10, 0).unwrap();
        assert_eq!(cpu.pc, 0x8010);
    }

    #[test]
    fn test_beq_not_taken_when_zero_clear() {
        let mut bus = bus();
        let mut cpu = Cpu::new();
        cpu.pc_prev = 0x8000;
        cpu.pc = 0x8002;
        cpu.beq(&mut bus, AddressingMode::Relative, 0x10, 0).unwrap();
        assert_eq!(cpu.pc, 0x8002, "branch should not be taken when Z is clear");
    }

    #[test]
    fn test_bra_always_taken() {
        let mut bus = bus();
        let mut cpu = Cpu::new();
        cpu.pc_prev = 0x8000;
        cpu.pc = 0x8002;
        cpu.bra(&mut bus, AddressingMode::Relative, 0x80, 0).unwrap();
        assert_eq!(cpu.pc, 0x7F80);
    }
}
