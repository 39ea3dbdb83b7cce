//! `SEEK fd, offset, whence` — repositions the file cursor. `whence` is
//! 0 = start, 1 = current, 2 = end, matching the usual file-seek idiom.
//! The resulting offset (or the failure sentinel) lands in R15.

use log::warn;

use crate::cpu::regs::{Width, R15};
use crate::cpu::Cpu;
use crate::error::{VmError, VmResult, FAILURE_SENTINEL};
use crate::isa::eval::read_value;
use crate::isa::operand::Operand;
use crate::vfs::{SeekFrom, Vfs};

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let fd = match &operands[0] {
        Operand::Reg { index, .. } => cpu.regs.get(*index),
        _ => unreachable!("SEEK's first operand is always a register"),
    };
    let offset = read_value(cpu, &operands[1], Width::Dword)? as i64;
    let whence = match &operands[2] {
        Operand::Imm(v) => *v,
        _ => unreachable!("SEEK's whence operand is always an immediate"),
    };

    let pos = match whence {
        0 => SeekFrom::Start(offset as u64),
        1 => SeekFrom::Current(offset),
        2 => SeekFrom::End(offset),
        _ => return Err(VmError::InvalidOperand(cpu.regs.pc())),
    };

    let result = match cpu.fds.get_mut(fd) {
        Ok(h) => cpu.vfs.seek(h, pos),
        Err(e) => Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())),
    };
    match result {
        Ok(new_off) => cpu.regs.set(R15, new_off as u32),
        Err(e) => {
            warn!("SEEK fd {fd}: {e}");
            cpu.regs.set(R15, FAILURE_SENTINEL);
        }
    }
    Ok(())
}
