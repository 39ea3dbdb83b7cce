use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::binary_op;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    binary_op(cpu, operands, |a, b| Ok(a.wrapping_mul(b)))
}
