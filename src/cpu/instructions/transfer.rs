// Register transfer instructions. All implied-mode, all update Z/N except
// TXS, which affects no flags.

use crate::cpu::Cpu;
use crate::error::CoreError;

impl Cpu {
    pub(crate) fn tax(&mut self) -> Result<(), CoreError> {
        self.x = self.a;
        self.update_zn(self.x);
        Ok(())
    }

    pub(crate) fn tay(&mut self) -> Result<(), CoreError> {
        self.y = self.a;
        self.update_zn(self.y);
        Ok(())
    }

    pub(crate) fn txa(&mut self) -> Result<(), CoreError> {
        self.a = self.x;
        self.update_zn(self.a);
        Ok(())
    }

    pub(crate) fn tya(&mut self) -> Result<(), CoreError> {
        self.a = self.y;
        self.update_zn(self.a);
        Ok(())
    }

    /// TXS - no flag update.
    pub(crate) fn txs(&mut self) -> Result<(), CoreError> {
        self.sp = self.x;
        Ok(())
    }

    pub(crate) fn tsx(&mut self) -> Result<(), CoreError> {
        self.x = self.sp;
        self.update_zn(self.x);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txs_does_not_touch_flags() {
        let mut cpu = Cpu::new();
        let before = cpu.status;
        cpu.x = 0x80;
        cpu.txs().unwrap();
        assert_eq!(cpu.sp, 0x80);
        assert_eq!(cpu.status, before);
    }

    #[test]
    fn test_tsx_updates_flags() {
        let mut cpu = Cpu::new();
        cpu.sp = 0;
        cpu.tsx().unwrap();
        assert!(cpu.get_flag(crate::cpu::flags::ZERO));
    }
}
