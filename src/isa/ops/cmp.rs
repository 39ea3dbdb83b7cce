//! `CMP a, b` — writes the comparison result into R15: 0 = equal,
//! 1 = greater, 2 = less.

use crate::cpu::regs::R15;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::{instruction_width, read_value};
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let width = instruction_width(operands);
    let a = read_value(cpu, &operands[0], width)?;
    let b = read_value(cpu, &operands[1], width)?;
    let result = if a == b {
        0
    } else if a > b {
        1
    } else {
        2
    };
    cpu.regs.set(R15, result);
    Ok(())
}
