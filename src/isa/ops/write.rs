//! `WRITE fd, buf, len` — writes up to `len` bytes from `buf` to `fd`.
//! Symmetric with `READ`.

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
        _ => unreachable!("WRITE's first operand is always a register"),
    };
    let len = read_value(cpu, &operands[2], Width::Dword)?;

    if len == 0 {
        cpu.regs.set(R15, FAILURE_SENTINEL);
        return Ok(());
    }

    let buf = if let Operand::Reg { index, width } = &operands[1] {
        if len != 1 {
            cpu.regs.set(R15, FAILURE_SENTINEL);
            return Ok(());
        }
        vec![width.narrow(cpu.regs.get(*index)) as u8]
    } else {
        let addr = mem_address(cpu, &operands[1])?;
        cpu.mm.read_n(addr, len)?
    };

    let result = match cpu.fds.get_mut(fd) {
        Ok(h) => cpu.vfs.write(h, &buf),
        Err(e) => Err(std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string())),
    };
    match result {
        Ok(n) => cpu.regs.set(R15, n as u32),
        Err(e) => {
            warn!("WRITE fd {fd}: {e}");
            cpu.regs.set(R15, FAILURE_SENTINEL);
        }
    }
    Ok(())
}
