// The instruction decoder: a pure, stateless mapping from an opcode byte to
// (operation, addressing mode, operand length).
//
// The opcode table is the closed 65C02-superset ISA this core targets: the
// 56 official NMOS 6502 mnemonics plus the 65C02 additions actually used
// (`Bra`, `Phx`, `Phy`, `Plx`, `Ply`, `Stz`, `Trb`, `Tsb`, and the `(zp)`
// addressing mode on several ALU ops). Undocumented/illegal opcodes are not
// mapped; `decode` fails with `IllegalOpcode` for any byte this table does
// not cover.

use crate::error::CoreError;

/// One of the 64 operation mnemonics this core executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Operation {
    Lda, Ldx, Ldy, Sta, Stx, Sty,
    Tax, Tay, Txa, Tya, Txs, Tsx,
    Adc, Sbc, Cmp, Cpx, Cpy,
    And, Ora, Eor, Bit,
    Asl, Lsr, Rol, Ror,
    Inc, Dec, Inx, Iny, Dex, Dey,
    Bcc, Bcs, Beq, Bne, Bmi, Bpl, Bvc, Bvs, Bra,
    Jmp, Jsr, Rts, Rti,
    Pha, Php, Phx, Phy, Pla, Plp, Plx, Ply,
    Clc, Sec, Cli, Sei, Cld, Sed, Clv,
    Nop, Stz, Trb, Tsb, Brk,
}

impl Operation {
    /// Mnemonic text, used for error messages and disassembly.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Lda => "LDA", Operation::Ldx => "LDX", Operation::Ldy => "LDY",
            Operation::Sta => "STA", Operation::Stx => "STX", Operation::Sty => "STY",
            Operation::Tax => "TAX", Operation::Tay => "TAY", Operation::Txa => "TXA",
            Operation::Tya => "TYA", Operation::Txs => "TXS", Operation::Tsx => "TSX",
            Operation::Adc => "ADC", Operation::Sbc => "SBC", Operation::Cmp => "CMP",
            Operation::Cpx => "CPX", Operation::Cpy => "CPY",
            Operation::And => "AND", Operation::Ora => "ORA", Operation::Eor => "EOR",
            Operation::Bit => "BIT",
            Operation::Asl => "ASL", Operation::Lsr => "LSR", Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Inc => "INC", Operation::Dec => "DEC", Operation::Inx => "INX",
            Operation::Iny => "INY", Operation::Dex => "DEX", Operation::Dey => "DEY",
            Operation::Bcc => "BCC", Operation::Bcs => "BCS", Operation::Beq => "BEQ",
            Operation::Bne => "BNE", Operation::Bmi => "BMI", Operation::Bpl => "BPL",
            Operation::Bvc => "BVC", Operation::Bvs => "BVS", Operation::Bra => "BRA",
            Operation::Jmp => "JMP", Operation::Jsr => "JSR", Operation::Rts => "RTS",
            Operation::Rti => "RTI",
            Operation::Pha => "PHA", Operation::Php => "PHP", Operation::Phx => "PHX",
            Operation::Phy => "PHY", Operation::Pla => "PLA", Operation::Plp => "PLP",
            Operation::Plx => "PLX", Operation::Ply => "PLY",
            Operation::Clc => "CLC", Operation::Sec => "SEC", Operation::Cli => "CLI",
            Operation::Sei => "SEI", Operation::Cld => "CLD", Operation::Sed => "SED",
            Operation::Clv => "CLV",
            Operation::Nop => "NOP", Operation::Stz => "STZ", Operation::Trb => "TRB",
            Operation::Tsb => "TSB", Operation::Brk => "BRK",
        }
    }
}

/// One of the 15 addressing modes this core resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    IndexedZeroPageX,
    IndexedZeroPageY,
    Absolute,
    IndexedAbsoluteX,
    IndexedAbsoluteY,
    Relative,
    IndexedIndirect,
    IndirectIndexed,
    ZeroPageIndirect,
    AbsoluteIndirect,
    AbsoluteIndexedIndirect,
}

impl AddressingMode {
    /// Number of operand bytes this mode consumes, per SPEC_FULL.md §4.1.
    pub fn operand_length(&self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed
            | AddressingMode::IndexedZeroPageX
            | AddressingMode::IndexedZeroPageY
            | AddressingMode::Relative
            | AddressingMode::ZeroPageIndirect => 1,
            AddressingMode::Absolute
            | AddressingMode::IndexedAbsoluteX
            | AddressingMode::IndexedAbsoluteY
            | AddressingMode::AbsoluteIndirect
            | AddressingMode::AbsoluteIndexedIndirect => 2,
        }
    }
}

/// Decode one opcode byte into `(operation, mode, operand_length)`.
///
/// Pure and stateless: no I/O, called exactly once per instruction fetch.
pub fn decode(opcode: u8) -> Result<(Operation, AddressingMode, u8), CoreError> {
    use AddressingMode::*;
    use Operation::*;

    let (op, mode) = match opcode {
        // LDA
        0xA9 => (Lda, Immediate), 0xA5 => (Lda, ZeroPage), 0xB5 => (Lda, IndexedZeroPageX),
        0xAD => (Lda, Absolute), 0xBD => (Lda, IndexedAbsoluteX), 0xB9 => (Lda, IndexedAbsoluteY),
        0xA1 => (Lda, IndexedIndirect), 0xB1 => (Lda, IndirectIndexed), 0xB2 => (Lda, ZeroPageIndirect),
        // LDX
        0xA2 => (Ldx, Immediate), 0xA6 => (Ldx, ZeroPage), 0xB6 => (Ldx, IndexedZeroPageY),
        0xAE => (Ldx, Absolute), 0xBE => (Ldx, IndexedAbsoluteY),
        // LDY
        0xA0 => (Ldy, Immediate), 0xA4 => (Ldy, ZeroPage), 0xB4 => (Ldy, IndexedZeroPageX),
        0xAC => (Ldy, Absolute), 0xBC => (Ldy, IndexedAbsoluteX),
        // STA
        0x85 => (Sta, ZeroPage), 0x95 => (Sta, IndexedZeroPageX), 0x8D => (Sta, Absolute),
        0x9D => (Sta, IndexedAbsoluteX), 0x99 => (Sta, IndexedAbsoluteY),
        0x81 => (Sta, IndexedIndirect), 0x91 => (Sta, IndirectIndexed), 0x92 => (Sta, ZeroPageIndirect),
        // STX / STY
        0x86 => (Stx, ZeroPage), 0x96 => (Stx, IndexedZeroPageY), 0x8E => (Stx, Absolute),
        0x84 => (Sty, ZeroPage), 0x94 => (Sty, IndexedZeroPageX), 0x8C => (Sty, Absolute),
        // Transfer
        0xAA => (Tax, Implied), 0xA8 => (Tay, Implied), 0x8A => (Txa, Implied),
        0x98 => (Tya, Implied), 0x9A => (Txs, Implied), 0xBA => (Tsx, Implied),
        // ADC
        0x69 => (Adc, Immediate), 0x65 => (Adc, ZeroPage), 0x75 => (Adc, IndexedZeroPageX),
        0x6D => (Adc, Absolute), 0x7D => (Adc, IndexedAbsoluteX), 0x79 => (Adc, IndexedAbsoluteY),
        0x61 => (Adc, IndexedIndirect), 0x71 => (Adc, IndirectIndexed), 0x72 => (Adc, ZeroPageIndirect),
        // SBC
        0xE9 => (Sbc, Immediate), 0xE5 => (Sbc, ZeroPage), 0xF5 => (Sbc, IndexedZeroPageX),
        0xED => (Sbc, Absolute), 0xFD => (Sbc, IndexedAbsoluteX), 0xF9 => (Sbc, IndexedAbsoluteY),
        0xE1 => (Sbc, IndexedIndirect), 0xF1 => (Sbc, IndirectIndexed), 0xF2 => (Sbc, ZeroPageIndirect),
        // CMP
        0xC9 => (Cmp, Immediate), 0xC5 => (Cmp, ZeroPage), 0xD5 => (Cmp, IndexedZeroPageX),
        0xCD => (Cmp, Absolute), 0xDD => (Cmp, IndexedAbsoluteX), 0xD9 => (Cmp, IndexedAbsoluteY),
        0xC1 => (Cmp, IndexedIndirect), 0xD1 => (Cmp, IndirectIndexed), 0xD2 => (Cmp, ZeroPageIndirect),
        // CPX / CPY
        0xE0 => (Cpx, Immediate), 0xE4 => (Cpx, ZeroPage), 0xEC => (Cpx, Absolute),
        0xC0 => (Cpy, Immediate), 0xC4 => (Cpy, ZeroPage), 0xCC => (Cpy, Absolute),
        // AND
        0x29 => (And, Immediate), 0x25 => (And, ZeroPage), 0x35 => (And, IndexedZeroPageX),
        0x2D => (And, Absolute), 0x3D => (And, IndexedAbsoluteX), 0x39 => (And, IndexedAbsoluteY),
        0x21 => (And, IndexedIndirect), 0x31 => (And, IndirectIndexed), 0x32 => (And, ZeroPageIndirect),
        // ORA
        0x09 => (Ora, Immediate), 0x05 => (Ora, ZeroPage), 0x15 => (Ora, IndexedZeroPageX),
        0x0D => (Ora, Absolute), 0x1D => (Ora, IndexedAbsoluteX), 0x19 => (Ora, IndexedAbsoluteY),
        0x01 => (Ora, IndexedIndirect), 0x11 => (Ora, IndirectIndexed), 0x12 => (Ora, ZeroPageIndirect),
        // EOR
        0x49 => (Eor, Immediate), 0x45 => (Eor, ZeroPage), 0x55 => (Eor, IndexedZeroPageX),
        0x4D => (Eor, Absolute), 0x5D => (Eor, IndexedAbsoluteX), 0x59 => (Eor, IndexedAbsoluteY),
        0x41 => (Eor, IndexedIndirect), 0x51 => (Eor, IndirectIndexed), 0x52 => (Eor, ZeroPageIndirect),
        // BIT
        0x89 => (Bit, Immediate), 0x24 => (Bit, ZeroPage), 0x34 => (Bit, IndexedZeroPageX),
        0x2C => (Bit, Absolute), 0x3C => (Bit, IndexedAbsoluteX),
        // ASL / LSR / ROL / ROR
        0x0A => (Asl, Accumulator), 0x06 => (Asl, ZeroPage), 0x16 => (Asl, IndexedZeroPageX),
        0x0E => (Asl, Absolute), 0x1E => (Asl, IndexedAbsoluteX),
        0x4A => (Lsr, Accumulator), 0x46 => (Lsr, ZeroPage), 0x56 => (Lsr, IndexedZeroPageX),
        0x4E => (Lsr, Absolute), 0x5E => (Lsr, IndexedAbsoluteX),
        0x2A => (Rol, Accumulator), 0x26 => (Rol, ZeroPage), 0x36 => (Rol, IndexedZeroPageX),
        0x2E => (Rol, Absolute), 0x3E => (Rol, IndexedAbsoluteX),
        0x6A => (Ror, Accumulator), 0x66 => (Ror, ZeroPage), 0x76 => (Ror, IndexedZeroPageX),
        0x6E => (Ror, Absolute), 0x7E => (Ror, IndexedAbsoluteX),
        // INC / DEC
        0xE6 => (Inc, ZeroPage), 0xF6 => (Inc, IndexedZeroPageX),
        0xEE => (Inc, Absolute), 0xFE => (Inc, IndexedAbsoluteX),
        0xC6 => (Dec, ZeroPage), 0xD6 => (Dec, IndexedZeroPageX),
        0xCE => (Dec, Absolute), 0xDE => (Dec, IndexedAbsoluteX),
        0xE8 => (Inx, Implied), 0xC8 => (Iny, Implied), 0xCA => (Dex, Implied), 0x88 => (Dey, Implied),
        // Branch
        0x90 => (Bcc, Relative), 0xB0 => (Bcs, Relative), 0xF0 => (Beq, Relative),
        0xD0 => (Bne, Relative), 0x30 => (Bmi, Relative), 0x10 => (Bpl, Relative),
        0x50 => (Bvc, Relative), 0x70 => (Bvs, Relative), 0x80 => (Bra, Relative),
        // Jump / subroutine
        0x4C => (Jmp, Absolute), 0x6C => (Jmp, AbsoluteIndirect), 0x7C => (Jmp, AbsoluteIndexedIndirect),
        0x20 => (Jsr, Absolute), 0x60 => (Rts, Implied), 0x40 => (Rti, Implied),
        // Stack
        0x48 => (Pha, Implied), 0x68 => (Pla, Implied), 0x08 => (Php, Implied), 0x28 => (Plp, Implied),
        0xDA => (Phx, Implied), 0x5A => (Phy, Implied), 0xFA => (Plx, Implied), 0x7A => (Ply, Implied),
        // Flags
        0x18 => (Clc, Implied), 0x38 => (Sec, Implied), 0x58 => (Cli, Implied), 0x78 => (Sei, Implied),
        0xD8 => (Cld, Implied), 0xF8 => (Sed, Implied), 0xB8 => (Clv, Implied),
        // Misc / 65C02 additions
        0xEA => (Nop, Implied),
        0x64 => (Stz, ZeroPage), 0x74 => (Stz, IndexedZeroPageX),
        0x9C => (Stz, Absolute), 0x9E => (Stz, IndexedAbsoluteX),
        0x14 => (Trb, ZeroPage), 0x1C => (Trb, Absolute),
        0x04 => (Tsb, ZeroPage), 0x0C => (Tsb, Absolute),
        0x00 => (Brk, Implied),

        _ => return Err(CoreError::IllegalOpcode(opcode)),
    };

    Ok((op, mode, mode.operand_length()))
}
