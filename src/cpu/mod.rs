//! The fetch-decode-execute loop, register file, interrupt entry/return,
//! and the file descriptor table the opcodes operate through.

pub mod fd_table;
pub mod interrupt;
pub mod regs;

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::cpu::fd_table::FdTable;
use crate::cpu::interrupt::InterruptController;
use crate::cpu::regs::Regs;
use crate::error::VmResult;
use crate::image::Image;
use crate::isa::decode::decode_instruction;
use crate::isa::ops;
use crate::memory::manager::{HEAP_BOTTOM, STACK_TOP};
use crate::memory::program::Sector;
use crate::memory::MemoryManager;
use crate::vfs::Vfs;

/// The virtual machine: registers, memory, file table, and the interrupt
/// rendezvous, generic over whichever [`Vfs`] backs guest file I/O.
pub struct Cpu<V: Vfs> {
    pub regs: Regs,
    pub mm: MemoryManager,
    pub fds: FdTable<V::Handle>,
    pub vfs: V,
    pub halted: bool,
    pub interrupts: Arc<InterruptController>,
    in_progress: Option<InProgress>,
}

struct InProgress {
    original_pc: u32,
}

impl<V: Vfs> Cpu<V> {
    pub fn new(vfs: V) -> Self {
        Self::with_interrupts(vfs, Arc::new(InterruptController::new()))
    }

    pub fn with_interrupts(vfs: V, interrupts: Arc<InterruptController>) -> Self {
        Self {
            regs: Regs::new(),
            mm: MemoryManager::new(),
            fds: FdTable::new(),
            vfs,
            halted: false,
            interrupts,
            in_progress: None,
        }
    }

    /// Loads a decoded image and sets the instruction pointer to its
    /// (possibly rebased) entry address.
    pub fn load_image(&mut self, image: Image) -> VmResult<()> {
        let sectors: Vec<Sector> = image.sectors;
        let mut sp = self.regs.sp();
        if sp == 0 {
            sp = STACK_TOP;
            self.regs.set_sp(sp);
        }
        let mut hp = self.regs.hp();
        let entry = self.mm.load_program(&mut hp, sp, sectors, image.start_address)?;
        self.regs.set_hp(hp);
        self.regs.set_pc(entry);
        debug!("loaded image, entry at {entry:#010x}");
        Ok(())
    }

    /// Runs one fetch-decode-execute cycle, including interrupt entry.
    pub fn step(&mut self) -> VmResult<()> {
        if self.halted {
            return Ok(());
        }

        if self.in_progress.is_none() {
            if let Some(event) = self.interrupts.take_pending() {
                self.enter_interrupt(event.vector, event.payload)?;
            } else {
                self.interrupts.signal_free();
            }
        }

        let pc = self.regs.pc();
        let decoded = decode_instruction(&self.mm, pc)?;
        self.regs.set_pc(decoded.next_pc);
        trace!("{:#010x}: {}", pc, decoded.opcode.name());
        ops::execute(self, decoded.opcode, &decoded.operands)?;

        if let Some(InProgress { original_pc }) = self.in_progress {
            if self.regs.pc() == original_pc {
                self.in_progress = None;
                self.interrupts.signal_free();
            }
        }

        Ok(())
    }

    fn enter_interrupt(&mut self, vector: u8, payload: u32) -> VmResult<()> {
        let handler = self.mm.read_dword(crate::memory::phys::IVT_BASE + vector as u32 * 4)?;
        if handler == 0 {
            warn!("interrupt on unhandled vector {vector}");
            return Ok(());
        }
        let original_pc = self.regs.pc();
        let mut sp = self.regs.sp();
        let hp = self.regs.hp();
        self.mm.push(&mut sp, hp, original_pc)?;
        self.regs.set_sp(sp);
        self.regs.set_r15(payload);
        self.regs.set_pc(handler);
        self.in_progress = Some(InProgress { original_pc });
        Ok(())
    }

    /// Closes every open file descriptor, reinitializes memory and
    /// registers, and rewinds the descriptor counter.
    pub fn reset(&mut self) {
        for handle in self.fds.drain() {
            let _ = self.vfs.close(handle);
        }
        self.mm.reset();
        self.regs.reset();
        self.regs.set_sp(STACK_TOP);
        self.regs.set_hp(HEAP_BOTTOM);
        self.halted = false;
        self.in_progress = None;
    }
}
