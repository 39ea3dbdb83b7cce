//! `OPEN dst, path` — opens a C-string path through the VFS. `dst`
//! receives the new descriptor, or the failure sentinel.

use log::warn;

use crate::cpu::Cpu;
use crate::error::{VmResult, FAILURE_SENTINEL};
use crate::isa::eval::mem_address;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let dst = match &operands[0] {
        Operand::Reg { index, .. } => *index,
        _ => unreachable!("OPEN's first operand is always a register"),
    };
    let path_addr = mem_address(cpu, &operands[1])?;
    let path_bytes = cpu.mm.read_string(path_addr)?;
    let path = String::from_utf8_lossy(&path_bytes).into_owned();

    let fd = match cpu.vfs.open(&path) {
        Ok(handle) => cpu.fds.insert(handle),
        Err(e) => {
            warn!("OPEN {path}: {e}");
            FAILURE_SENTINEL
        }
    };
    cpu.regs.set(dst, fd);
    Ok(())
}
