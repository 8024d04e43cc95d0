// Error types for the emulator core
//
// Following the hand-rolled enum + manual Display/Error idiom used elsewhere
// in this crate (see the former save-state/screenshot error types), rather
// than pulling in a derive-macro error crate.

use std::fmt;

/// The kind of memory access that triggered a `MemoryAccessViolation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// No device is mapped at the address.
    Unmapped,
    /// A write was attempted against a read-only device.
    WriteToReadOnly,
    /// A read was attempted against a write-only register.
    ReadFromWriteOnly,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Unmapped => write!(f, "unmapped address"),
            AccessKind::WriteToReadOnly => write!(f, "write to read-only device"),
            AccessKind::ReadFromWriteOnly => write!(f, "read from write-only register"),
        }
    }
}

/// Fatal conditions raised by the core.
///
/// Every variant is fatal: there is no internal recovery. Errors bubble out
/// of `Cpu::step` and are wrapped with the faulting program counter by
/// `StepError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The decoder could not map an opcode byte to an operation.
    IllegalOpcode(u8),
    /// An operation was paired with an addressing mode outside its allow-list.
    IllegalAddressMode { operation: String, mode: String },
    /// A bus access hit an unmapped address or violated a device's access rules.
    MemoryAccessViolation { addr: u16, kind: AccessKind },
    /// The iNES header failed validation.
    InvalidHeader(String),
    /// Reached a register or operation this core does not implement.
    Unimplemented(String),
    /// Reading the ROM file from disk failed.
    IoError(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::IllegalOpcode(byte) => {
                write!(f, "illegal opcode: 0x{byte:02X}")
            }
            CoreError::IllegalAddressMode { operation, mode } => {
                write!(f, "illegal addressing mode {mode} for operation {operation}")
            }
            CoreError::MemoryAccessViolation { addr, kind } => {
                write!(f, "memory access violation at 0x{addr:04X}: {kind}")
            }
            CoreError::InvalidHeader(detail) => {
                write!(f, "invalid iNES header: {detail}")
            }
            CoreError::Unimplemented(detail) => {
                write!(f, "unimplemented: {detail}")
            }
            CoreError::IoError(detail) => {
                write!(f, "I/O error: {detail}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::IoError(err.to_string())
    }
}

/// A `CoreError` wrapped with the program counter of the instruction that
/// raised it, as required by the core's error propagation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    pub pc: u16,
    pub source: CoreError,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at PC=0x{:04X}: {}", self.pc, self.source)
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl StepError {
    pub fn new(pc: u16, source: CoreError) -> Self {
        StepError { pc, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_opcode_display() {
        let err = CoreError::IllegalOpcode(0xFF);
        assert_eq!(err.to_string(), "illegal opcode: 0xFF", "byte should render as uppercase hex");
    }

    #[test]
    fn test_memory_access_violation_display() {
        let err = CoreError::MemoryAccessViolation {
            addr: 0x1234,
            kind: AccessKind::Unmapped,
        };
        assert!(err.to_string().contains("0x1234"), "address should appear in message");
    }

    #[test]
    fn test_step_error_wraps_pc() {
        let err = StepError::new(0xC000, CoreError::IllegalOpcode(0x02));
        let msg = err.to_string();
        assert!(msg.contains("0xC000"), "PC should appear in the wrapped message");
        assert!(msg.contains("0x02"), "offending opcode byte should appear in the wrapped message");
    }
}
