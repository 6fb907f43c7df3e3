//! The NWScript virtual machine's instruction set.
//!
//! Numeric values match the byte code emitted by the BioWare Aurora NWScript
//! compiler; decoding raw bytes into this enum is the decode layer's job
//! (out of scope here, see the crate's top-level docs), but the discriminants
//! are kept faithful so a caller handed raw opcode bytes can still recover
//! this enum with `Opcode::try_from`.
use num_enum::TryFromPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
#[non_exhaustive]
pub enum Opcode {
    Cpdownsp = 0x01,
    Rsadd = 0x02,
    Cptopsp = 0x03,
    Const = 0x04,
    Action = 0x05,
    Logand = 0x06,
    Logor = 0x07,
    Incor = 0x08,
    Excor = 0x09,
    Bootand = 0x0A,
    Eq = 0x0B,
    Neq = 0x0C,
    Geq = 0x0D,
    Gt = 0x0E,
    Lt = 0x0F,
    Leq = 0x10,
    Shleft = 0x11,
    Shright = 0x12,
    Ushright = 0x13,
    Add = 0x14,
    Sub = 0x15,
    Mul = 0x16,
    Div = 0x17,
    Mod = 0x18,
    Neg = 0x19,
    Comp = 0x1A,
    Movsp = 0x1B,
    /// Store-state: capture the local stack into a closure for a later call.
    Storestate = 0x1C,
    Jmp = 0x1D,
    Jsr = 0x1E,
    Jz = 0x1F,
    Retn = 0x20,
    Destruct = 0x21,
    Not = 0x22,
    Decisp = 0x23,
    Incisp = 0x24,
    Jnz = 0x25,
    Cpdownbp = 0x26,
    Cptopbp = 0x27,
    Decibp = 0x28,
    Incibp = 0x29,
    Savebp = 0x2A,
    Restorebp = 0x2B,
    /// No-op emitted by some compiler versions around debug line markers.
    Nop = 0x2C,
    Writearray = 0x2D,
    Readarray = 0x2E,
}
