//! `READ fd, buf, len` — reads up to `len` bytes from `fd` into `buf`.
//!
//! `buf` as a register is special-cased: a register can only hold one
//! byte, so `len` must be 1 for a register destination. `R15` always
//! carries the byte count (or the failure sentinel), never the byte
//! itself, whether `buf` is a register or a memory operand.

use log::warn;

use crate::cpu::regs::{Width, R15};
use crate::cpu::Cpu;
use crate::error::{VmResult, FAILURE_SENTINEL};
use crate::isa::eval::{mem_address, read_value};
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let fd = match &operands[0] {
        Operand::Reg { index, .. } => cpu.regs.get(*index),
        _ => unreachable!("READ's first operand is always a register"),
    };
    let len = read_value(cpu, &operands[2], Width::Dword)?;

    if len == 0 {
        cpu.regs.set(R15, FAILURE_SENTINEL);
        return Ok(());
    }

    if let Operand::Reg { index, width } = &operands[1] {
        if len != 1 {
            cpu.regs.set(R15, FAILURE_SENTINEL);
            return Ok(());
        }
        let mut byte = [0u8; 1];
        let n = match cpu.fds.get_mut(fd) {
            Ok(h) => cpu.vfs.read(h, &mut byte).ok(),
            Err(_) => None,
        };
        match n {
            Some(1) => {
                cpu.regs.set(*index, width.narrow(byte[0] as u32));
                cpu.regs.set(R15, 1);
            }
            _ => cpu.regs.set(R15, FAILURE_SENTINEL),
        }
        return Ok(());
    }

    let addr = mem_address(cpu, &operands[1])?;
    let mut buf = vec![0u8; len as usize];
    let handle = cpu.fds.get_mut(fd);
    let read_result = match handle {
        Ok(h) => cpu.vfs.read(h, &mut buf),
        Err(e) => Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())),
    };
    match read_result {
        Ok(n) => {
            cpu.mm.write_n(addr, &buf[..n])?;
            cpu.regs.set(R15, n as u32);
        }
        Err(e) => {
            warn!("READ fd {fd}: {e}");
            cpu.regs.set(R15, FAILURE_SENTINEL);
        }
    }
    Ok(())
}
