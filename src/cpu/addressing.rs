// Addressing-mode resolution.
//
// Two distinct resolvers are required because the read path yields a value
// (possibly through one or two levels of indirection) while the write path
// yields an effective address (SPEC_FULL.md §4.9.3). Both are pure functions
// of the CPU's A/X/Y/PC registers, the operand bytes, and the bus.

use crate::bus::MemoryController;
use crate::cpu::decoder::AddressingMode;
use crate::error::CoreError;

fn illegal(op_name: &str, mode: AddressingMode) -> CoreError {
    CoreError::IllegalAddressMode {
        operation: op_name.to_string(),
        mode: format!("{mode:?}"),
    }
}

/// Sign-extend an 8-bit relative-branch offset to a 16-bit value.
fn sign_extend8(b: u8) -> u16 {
    (b as i8) as i16 as u16
}

fn zp_indirect_target(bus: &mut MemoryController, zp_addr: u8) -> Result<u16, CoreError> {
    let lo = bus.read(zp_addr as u16)?;
    let hi = bus.read(zp_addr.wrapping_add(1) as u16)?;
    Ok(u16::from_le_bytes([lo, hi]))
}

/// Registers needed to resolve an addressing mode, decoupled from the rest
/// of `Cpu` so this module stays a pure function of its inputs.
#[derive(Debug, Clone, Copy)]
pub struct RegisterSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
}

/// Resolve the *value* an instruction should read, per the read-value
/// column of SPEC_FULL.md §4.9.3.
pub fn resolve_read(
    regs: RegisterSnapshot,
    bus: &mut MemoryController,
    op_name: &str,
    mode: AddressingMode,
    b0: u8,
    b1: u8,
) -> Result<u8, CoreError> {
    use AddressingMode::*;
    match mode {
        Immediate => Ok(b0),
        Accumulator => Ok(regs.a),
        Implied | Relative => Err(illegal(op_name, mode)),
        ZeroPage => bus.read(b0 as u16),
        Absolute => bus.read(u16::from_le_bytes([b0, b1])),
        IndexedZeroPageX => bus.read(b0.wrapping_add(regs.x) as u16),
        IndexedZeroPageY => bus.read(b0.wrapping_add(regs.y) as u16),
        IndexedAbsoluteX => bus.read(u16::from_le_bytes([b0, b1]).wrapping_add(regs.x as u16)),
        IndexedAbsoluteY => bus.read(u16::from_le_bytes([b0, b1]).wrapping_add(regs.y as u16)),
        IndexedIndirect => {
            let target = zp_indirect_target(bus, b0.wrapping_add(regs.x))?;
            bus.read(target)
        }
        IndirectIndexed => {
            let base = zp_indirect_target(bus, b0)?;
            bus.read(base.wrapping_add(regs.y as u16))
        }
        ZeroPageIndirect => {
            let target = zp_indirect_target(bus, b0)?;
            bus.read(target)
        }
        AbsoluteIndirect | AbsoluteIndexedIndirect => Err(illegal(op_name, mode)),
    }
}

/// Resolve the *effective address* an instruction should write to (or jump
/// to, or branch to), per the write-address column of SPEC_FULL.md §4.9.3.
pub fn resolve_address(
    regs: RegisterSnapshot,
    bus: &mut MemoryController,
    op_name: &str,
    mode: AddressingMode,
    b0: u8,
    b1: u8,
) -> Result<u16, CoreError> {
    use AddressingMode::*;
    match mode {
        Immediate | Accumulator | Implied => Err(illegal(op_name, mode)),
        ZeroPage => Ok(b0 as u16),
        Absolute => Ok(u16::from_le_bytes([b0, b1])),
        IndexedZeroPageX => Ok(b0.wrapping_add(regs.x) as u16),
        IndexedZeroPageY => Ok(b0.wrapping_add(regs.y) as u16),
        IndexedAbsoluteX => Ok(u16::from_le_bytes([b0, b1]).wrapping_add(regs.x as u16)),
        IndexedAbsoluteY => Ok(u16::from_le_bytes([b0, b1]).wrapping_add(regs.y as u16)),
        IndexedIndirect => zp_indirect_target(bus, b0.wrapping_add(regs.x)),
        IndirectIndexed => {
            let base = zp_indirect_target(bus, b0)?;
            Ok(base.wrapping_add(regs.y as u16))
        }
        ZeroPageIndirect => zp_indirect_target(bus, b0),
        Relative => Ok(regs.pc.wrapping_add(sign_extend8(b0))),
        AbsoluteIndirect => {
            let ptr = u16::from_le_bytes([b0, b1]);
            let lo = bus.read(ptr)?;
            let hi = bus.read(ptr.wrapping_add(1))?;
            Ok(u16::from_le_bytes([lo, hi]))
        }
        AbsoluteIndexedIndirect => {
            let ptr = u16::from_le_bytes([b0, b1]).wrapping_add(regs.x as u16);
            let lo = bus.read(ptr)?;
            let hi = bus.read(ptr.wrapping_add(1))?;
            Ok(u16::from_le_bytes([lo, hi]))
        }
    }
}
