//! `JMP target` — unconditional jump, rebased through `execute_jump`.
//! Also snapshots the pre-jump PC into R15.

use crate::cpu::regs::R15;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::read_value;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let old_pc = cpu.regs.pc();
    let target = read_value(cpu, &operands[0], crate::cpu::regs::Width::Dword)?;
    let dest = cpu.mm.execute_jump(old_pc, target)?;
    cpu.regs.set(R15, old_pc);
    cpu.regs.set_pc(dest);
    Ok(())
}
