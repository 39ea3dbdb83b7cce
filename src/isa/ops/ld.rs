//! `LD dst, src` — dst (always a register) receives src narrowed to the
//! destination register's width.

use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::{instruction_width, read_value, write_value};
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let width = instruction_width(operands);
    let value = read_value(cpu, &operands[1], width)?;
    write_value(cpu, &operands[0], width, value)
}
