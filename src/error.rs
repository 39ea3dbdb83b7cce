//! Error taxonomy for the virtual machine core.
//!
//! Every fallible operation in this crate returns a [`VmError`]. A `VmError`
//! returned from [`crate::cpu::Cpu::step`] is fatal: the caller stops
//! stepping the machine. Operations that the instruction set defines as
//! "returned" (surfaced to the guest as the `0xFFFF_FFFF` sentinel, e.g.
//! `MALLOC` or `READ` failures) are represented as `Ok(None)` or a sentinel
//! value at the call site, not as a `VmError` — see the individual opcode
//! modules under `isa::ops`.

use std::io;

use thiserror::Error;

/// A virtual address, used throughout error variants for diagnostics.
pub type VirtAddr = u32;

#[derive(Debug, Error)]
pub enum VmError {
    #[error("unmapped access at {0:#010x}")]
    UnmappedAccess(VirtAddr),

    #[error("write to read-only ROM at {0:#010x}")]
    RomWrite(VirtAddr),

    #[error("illegal wide write to VRAM at {0:#010x}")]
    VramWideWrite(VirtAddr),

    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack and heap collided while growing the {0}")]
    StackHeapCollision(&'static str),

    #[error("division by zero")]
    DivideByZero,

    #[error("unknown opcode {0:#04x} at {1:#010x}")]
    UnknownOpcode(u8, VirtAddr),

    #[error("invalid operand encoding at {0:#010x}")]
    InvalidOperand(VirtAddr),

    #[error("malformed binary image: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("vfs error: {0}")]
    Vfs(#[from] io::Error),

    #[error("invalid file descriptor {0:#010x}")]
    BadFd(u32),
}

pub type VmResult<T> = Result<T, VmError>;

/// Sentinel written into a result register or file descriptor slot to
/// signal a "returned" (non-fatal) failure to the guest.
pub const FAILURE_SENTINEL: u32 = 0xFFFF_FFFF;
