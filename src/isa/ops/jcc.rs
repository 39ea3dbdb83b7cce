//! The conditional jumps `JEQ`/`JNE`/`JGT`/`JLT`/`JGE`/`JLE`, all reading
//! the same R15 comparison result `CMP` leaves behind. Grouped in one
//! module since they share everything but the predicate.

use crate::cpu::regs::R15;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::read_value;
use crate::isa::opcode::Opcode;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

fn taken(opcode: Opcode, cmp: u32) -> bool {
    match opcode {
        Opcode::Jeq => cmp == 0,
        Opcode::Jne => cmp != 0,
        Opcode::Jgt => cmp == 1,
        Opcode::Jlt => cmp == 2,
        Opcode::Jge => cmp == 0 || cmp == 1,
        Opcode::Jle => cmp == 0 || cmp == 2,
        _ => unreachable!("jcc::execute dispatched for a non-conditional-jump opcode"),
    }
}

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, opcode: Opcode, operands: &[Operand]) -> VmResult<()> {
    if !taken(opcode, cpu.regs.r15()) {
        return Ok(());
    }
    let old_pc = cpu.regs.pc();
    let target = read_value(cpu, &operands[0], crate::cpu::regs::Width::Dword)?;
    let dest = cpu.mm.execute_jump(old_pc, target)?;
    cpu.regs.set_pc(dest);
    Ok(())
}
