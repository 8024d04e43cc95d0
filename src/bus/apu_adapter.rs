// Translates CPU-bus reads/writes in the 0x4000..0x4018 window into APU
// register writes and the two controller-input shift registers, per
// SPEC_FULL.md §4.6.
//
// The core does not own keyboard polling; it consumes a "key-down"
// predicate supplied by the host. How the host samples keys is outside
// this core - see `KeyDownPredicate`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::apu::Apu;
use crate::error::CoreError;

/// Fixed read order for a controller's 8 buttons, per SPEC_FULL.md §4.6.
pub const BUTTON_ORDER: [Button; 8] = [
    Button::A,
    Button::B,
    Button::Select,
    Button::Start,
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

/// The host's key-down predicate: given a button, report whether it is
/// currently held. Sampled once, at the moment controller 1's strobe bit
/// clears.
pub type KeyDownPredicate = Box<dyn FnMut(Button) -> bool>;

/// A forward reference from the bus to the APU, plus the two controller
/// shift registers this window also owns.
pub struct ApuBusAdapter {
    apu: Rc<RefCell<Apu>>,
    controller1_shift: u8,
    controller2_shift: u8,
    strobe_high: bool,
    key_down: Option<KeyDownPredicate>,
}

impl std::fmt::Debug for ApuBusAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApuBusAdapter")
            .field("controller1_shift", &self.controller1_shift)
            .field("controller2_shift", &self.controller2_shift)
            .finish_non_exhaustive()
    }
}

impl Clone for ApuBusAdapter {
    fn clone(&self) -> Self {
        ApuBusAdapter {
            apu: self.apu.clone(),
            controller1_shift: self.controller1_shift,
            controller2_shift: self.controller2_shift,
            strobe_high: self.strobe_high,
            key_down: None,
        }
    }
}

impl ApuBusAdapter {
    pub fn new(apu: Rc<RefCell<Apu>>) -> Self {
        ApuBusAdapter {
            apu,
            controller1_shift: 0,
            controller2_shift: 0,
            strobe_high: false,
            key_down: None,
        }
    }

    /// Install the host's key-down predicate for controller 1. Controller 2
    /// has no input source in this core (SPEC_FULL.md §4.6).
    pub fn set_key_down_predicate(&mut self, predicate: KeyDownPredicate) {
        self.key_down = Some(predicate);
    }

    fn snapshot_controller1(&mut self) {
        let mut shift = 0u8;
        if let Some(key_down) = self.key_down.as_mut() {
            for (i, button) in BUTTON_ORDER.iter().enumerate() {
                if key_down(*button) {
                    shift |= 1 << i;
                }
            }
        }
        self.controller1_shift = shift;
    }

    pub fn read(&mut self, offset: u16) -> Result<u8, CoreError> {
        match offset {
            0x16 => {
                let bit = self.controller1_shift & 1;
                self.controller1_shift >>= 1;
                Ok(bit)
            }
            0x17 => {
                let bit = self.controller2_shift & 1;
                self.controller2_shift >>= 1;
                Ok(bit)
            }
            _ => Err(CoreError::Unimplemented(format!(
                "APU/controller read at offset 0x{offset:02X}"
            ))),
        }
    }

    pub fn write(&mut self, offset: u16, value: u8) -> Result<(), CoreError> {
        match offset {
            0x11 => {
                self.apu.borrow_mut().set_dmc_value(value);
                Ok(())
            }
            0x15 => {
                self.apu.borrow_mut().set_status(value);
                Ok(())
            }
            0x16 => {
                let low = value & 1 != 0;
                if self.strobe_high && !low {
                    self.snapshot_controller1();
                }
                self.strobe_high = low;
                Ok(())
            }
            0x17 => {
                self.apu.borrow_mut().set_frame_counter_options(value);
                Ok(())
            }
            _ => Err(CoreError::Unimplemented(format!(
                "APU register write at offset 0x{offset:02X}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> ApuBusAdapter {
        ApuBusAdapter::new(Rc::new(RefCell::new(Apu::new())))
    }

    #[test]
    fn test_dmc_write_forwards_to_apu() {
        let mut a = adapter();
        a.write(0x11, 0x7F).unwrap();
        assert_eq!(a.apu.borrow().dmc_value(), 0x7F);
    }

    #[test]
    fn test_status_write_forwards_to_apu() {
        let mut a = adapter();
        a.write(0x15, 0x1F).unwrap();
        assert_eq!(a.apu.borrow().status(), 0x1F);
    }

    #[test]
    fn test_controller1_strobe_snapshots_in_fixed_order() {
        let mut a = adapter();
        a.set_key_down_predicate(Box::new(|b| matches!(b, Button::A | Button::Start)));
        a.write(0x16, 1).unwrap(); // strobe high
        a.write(0x16, 0).unwrap(); // strobe low -> snapshot

        let mut bits = Vec::new();
        for _ in 0..8 {
            bits.push(a.read(0x16).unwrap());
        }
        assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 0, 0], "A and Start should be the only set bits, in A,B,Select,Start,Up,Down,Left,Right order");
    }

    #[test]
    fn test_controller2_has_no_input_source() {
        let mut a = adapter();
        assert_eq!(a.read(0x17).unwrap(), 0, "controller 2 has no input source in this core");
    }

    #[test]
    fn test_unmapped_offset_is_unimplemented() {
        let mut a = adapter();
        assert!(a.write(0x00, 0).is_err());
        assert!(a.read(0x00).is_err());
    }
}
