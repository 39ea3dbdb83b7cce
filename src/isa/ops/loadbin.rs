//! `LOADBIN fd, dst` — reads the file behind `fd`, decodes it as a binary
//! image, loads its sectors, and leaves the entry address in `dst`.

use log::warn;

use crate::cpu::Cpu;
use crate::error::{VmResult, FAILURE_SENTINEL};
use crate::image;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let fd = match &operands[0] {
        Operand::Reg { index, .. } => cpu.regs.get(*index),
        _ => unreachable!("LOADBIN's first operand is always a register"),
    };
    let dst = match &operands[1] {
        Operand::Reg { index, .. } => *index,
        _ => unreachable!("LOADBIN's second operand is always a register"),
    };

    let entry = load(cpu, fd);
    let entry = match entry {
        Ok(addr) => addr,
        Err(e) => {
            warn!("LOADBIN fd {fd}: {e}");
            FAILURE_SENTINEL
        }
    };
    cpu.regs.set(dst, entry);
    Ok(())
}

fn load<V: Vfs>(cpu: &mut Cpu<V>, fd: u32) -> VmResult<u32> {
    let handle = cpu.fds.get_mut(fd)?;
    let bytes = cpu.vfs.read_whole(handle)?;
    let decoded = image::decode(&bytes)?;

    let mut hp = cpu.regs.hp();
    let sp = cpu.regs.sp();
    let entry = cpu
        .mm
        .load_program(&mut hp, sp, decoded.sectors, decoded.start_address)?;
    cpu.regs.set_hp(hp);
    Ok(entry)
}
