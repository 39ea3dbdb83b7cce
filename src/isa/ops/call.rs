//! `CALL target` — pushes the return address, then jumps via
//! `execute_jump`.

use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::read_value;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let return_pc = cpu.regs.pc();
    let target = read_value(cpu, &operands[0], crate::cpu::regs::Width::Dword)?;
    let dest = cpu.mm.execute_jump(return_pc, target)?;

    let mut sp = cpu.regs.sp();
    let hp = cpu.regs.hp();
    cpu.mm.push(&mut sp, hp, return_pc)?;
    cpu.regs.set_sp(sp);
    cpu.regs.set_pc(dest);
    Ok(())
}
