//! Records describing a loaded program, used to rebase jumps inside
//! position-independent code after it has been relocated into the heap.

use crate::error::VirtAddr;

/// One contiguous region of a decoded image, prior to placement.
#[derive(Debug, Clone)]
pub struct Sector {
    /// Fixed placement address, or 0 for "relocate me".
    pub base: VirtAddr,
    pub bytes: Vec<u8>,
}

/// Bookkeeping for one loaded position-independent program, so that
/// `execute_jump` can rebase a bytecode-embedded target against the
/// address the program actually landed at.
#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub start_address: VirtAddr,
    pub size: u32,
    pub sectors: Vec<Sector>,
}

impl ProgramInfo {
    pub fn contains(&self, addr: VirtAddr) -> bool {
        addr >= self.start_address && addr < self.start_address + self.size
    }
}
