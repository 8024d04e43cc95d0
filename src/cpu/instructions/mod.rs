// Instructions module for the 6502/65C02 CPU.
//
// Organized by semantic grouping, following SPEC_FULL.md §4.9.4's
// classification. Each submodule adds methods to `Cpu`; `execute` below is
// the single dispatch point the step loop calls into.

pub mod arithmetic;
pub mod branch;
pub mod compare;
pub mod flags;
pub mod jump_subroutine;
pub mod load_store;
pub mod logic;
pub mod miscellaneous;
pub mod shift_rotate;
pub mod stack;
pub mod transfer;

use crate::bus::MemoryController;
use crate::cpu::decoder::{AddressingMode, Operation};
use crate::cpu::Cpu;
use crate::error::CoreError;

pub fn execute(
    cpu: &mut Cpu,
    bus: &mut MemoryController,
    operation: Operation,
    mode: AddressingMode,
    b0: u8,
    b1: u8,
) -> Result<(), CoreError> {
    use Operation::*;
    match operation {
        Lda => cpu.lda(bus, mode, b0, b1),
        Ldx => cpu.ldx(bus, mode, b0, b1),
        Ldy => cpu.ldy(bus, mode, b0, b1),
        Sta => cpu.sta(bus, mode, b0, b1),
        Stx => cpu.stx(bus, mode, b0, b1),
        Sty => cpu.sty(bus, mode, b0, b1),

        Tax => cpu.tax(),
        Tay => cpu.tay(),
        Txa => cpu.txa(),
        Tya => cpu.tya(),
        Txs => cpu.txs(),
        Tsx => cpu.tsx(),

        Adc => cpu.adc(bus, mode, b0, b1),
        Sbc => cpu.sbc(bus, mode, b0, b1),
        Inc => cpu.inc(bus, mode, b0, b1),
        Dec => cpu.dec(bus, mode, b0, b1),
        Inx => cpu.inx(),
        Iny => cpu.iny(),
        Dex => cpu.dex(),
        Dey => cpu.dey(),

        Cmp => cpu.cmp(bus, mode, b0, b1),
        Cpx => cpu.cpx(bus, mode, b0, b1),
        Cpy => cpu.cpy(bus, mode, b0, b1),

        And => cpu.and(bus, mode, b0, b1),
        Ora => cpu.ora(bus, mode, b0, b1),
        Eor => cpu.eor(bus, mode, b0, b1),
        Bit => cpu.bit(bus, mode, b0, b1),

        Asl => cpu.asl(bus, mode, b0, b1),
        Lsr => cpu.lsr(bus, mode, b0, b1),
        Rol => cpu.rol(bus, mode, b0, b1),
        Ror => cpu.ror(bus, mode, b0, b1),

        Bcc => cpu.bcc(bus, mode, b0, b1),
        Bcs => cpu.bcs(bus, mode, b0, b1),
        Beq => cpu.beq(bus, mode, b0, b1),
        Bne => cpu.bne(bus, mode, b0, b1),
        Bmi => cpu.bmi(bus, mode, b0, b1),
        Bpl => cpu.bpl(bus, mode, b0, b1),
        Bvc => cpu.bvc(bus, mode, b0, b1),
        Bvs => cpu.bvs(bus, mode, b0, b1),
        Bra => cpu.bra(bus, mode, b0, b1),

        Jmp => cpu.jmp(bus, mode, b0, b1),
        Jsr => cpu.jsr(bus, mode, b0, b1),
        Rts => cpu.rts(bus),
        Rti => cpu.rti(bus),

        Pha => cpu.pha(bus),
        Php => cpu.php(bus),
        Phx => cpu.phx(bus),
        Phy => cpu.phy(bus),
        Pla => cpu.pla(bus),
        Plp => cpu.plp(bus),
        Plx => cpu.plx(bus),
        Ply => cpu.ply(bus),

        Clc => cpu.clc(),
        Sec => cpu.sec(),
        Cli => cpu.cli(),
        Sei => cpu.sei(),
        Cld => cpu.cld(),
        Sed => cpu.sed(),
        Clv => cpu.clv(),

        Nop => Ok(()),
        Stz => cpu.stz(bus, mode, b0, b1),
        Trb => cpu.trb(bus, mode, b0, b1),
        Tsb => cpu.tsb(bus, mode, b0, b1),
        Brk => cpu.brk(bus),
    }
}
