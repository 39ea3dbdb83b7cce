//! `RET` — pops the return address and jumps to it via `execute_jump`.

use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, _operands: &[Operand]) -> VmResult<()> {
    let mut sp = cpu.regs.sp();
    let target = cpu.mm.pop(&mut sp)?;
    cpu.regs.set_sp(sp);
    let pc = cpu.regs.pc();
    let dest = cpu.mm.execute_jump(pc, target)?;
    cpu.regs.set_pc(dest);
    Ok(())
}
