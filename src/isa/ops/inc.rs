use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::{read_value, write_value};
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let width = match &operands[0] {
        Operand::Reg { width, .. } => *width,
        _ => unreachable!("INC's only operand is always a register"),
    };
    let v = read_value(cpu, &operands[0], width)?;
    write_value(cpu, &operands[0], width, v.wrapping_add(1))
}
