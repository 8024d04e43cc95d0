// Flag-setting instructions. All implied-mode, each touches exactly one
// named flag.

use crate::cpu::{flags, Cpu};
use crate::error::CoreError;

impl Cpu {
    pub(crate) fn clc(&mut self) -> Result<(), CoreError> {
        self.clear_flag(flags::CARRY);
        Ok(())
    }

    pub(crate) fn sec(&mut self) -> Result<(), CoreError> {
        self.set_flag(flags::CARRY);
        Ok(())
    }

    pub(crate) fn cli(&mut self) -> Result<(), CoreError> {
        self.clear_flag(flags::INTERRUPT_DISABLE);
        Ok(())
    }

    pub(crate) fn sei(&mut self) -> Result<(), CoreError> {
        self.set_flag(flags::INTERRUPT_DISABLE);
        Ok(())
    }

    pub(crate) fn cld(&mut self) -> Result<(), CoreError> {
        self.clear_flag(flags::DECIMAL);
        Ok(())
    }

    pub(crate) fn sed(&mut self) -> Result<(), CoreError> {
        self.set_flag(flags::DECIMAL);
        Ok(())
    }

    pub(crate) fn clv(&mut self) -> Result<(), CoreError> {
        self.clear_flag(flags::OVERFLOW);
        Ok(())
    }
}
