//! `CLOSE fd` — closes and forgets the descriptor.

use log::warn;

use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let fd = match &operands[0] {
        Operand::Reg { index, .. } => cpu.regs.get(*index),
        _ => unreachable!("CLOSE's only operand is always a register"),
    };
    if let Ok(handle) = cpu.fds.remove(fd) {
        if let Err(e) = cpu.vfs.close(handle) {
            warn!("CLOSE fd {fd}: {e}");
        }
    }
    Ok(())
}
