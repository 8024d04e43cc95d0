// Stack push/pop instructions. All implied-mode; only the pull forms
// update Z/N (Plp restores the full status byte instead).

use crate::bus::MemoryController;
use crate::cpu::Cpu;
use crate::error::CoreError;

impl Cpu {
    pub(crate) fn pha(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.push(bus, self.a)
    }

    pub(crate) fn php(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.push(bus, self.status | crate::cpu::flags::BREAK)
    }

    pub(crate) fn phx(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.push(bus, self.x)
    }

    pub(crate) fn phy(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.push(bus, self.y)
    }

    pub(crate) fn pla(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.a = self.pop(bus)?;
        self.update_zn(self.a);
        Ok(())
    }

    pub(crate) fn plp(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.status = self.pop(bus)?;
        self.set_flag(crate::cpu::flags::UNUSED);
        Ok(())
    }

    pub(crate) fn plx(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.x = self.pop(bus)?;
        self.update_zn(self.x);
        Ok(())
    }

    pub(crate) fn ply(&mut self, bus: &mut MemoryController) -> Result<(), CoreError> {
        self.y = self.pop(bus)?;
        self.update_zn(self.y);
        Ok(())
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
    fn test_pha_pla_round_trip() {
        let mut bus = bus();
        let mut cpu = Cpu::new();
        cpu.a = 0x77;
        cpu.pha(&mut bus).unwrap();
        cpu.a = 0;
        cpu.pla(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x77);
    }

    #[test]
    fn test_php_plp_round_trip_modulo_reserved_bit() {
        let mut bus = bus();
        let mut cpu = Cpu::new();
        let before = cpu.status;
        cpu.php(&mut bus).unwrap();
        cpu.status = 0;
        cpu.plp(&mut bus).unwrap();
        assert_eq!(cpu.status & !crate::cpu::flags::BREAK, before & !crate::cpu::flags::BREAK);
    }
}
