use crate::cpu::Cpu;
use crate::error::{VmError, VmResult};
use crate::isa::eval::binary_op;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    binary_op(cpu, operands, |a, b| {
        if b == 0 {
            Err(VmError::DivideByZero)
        } else {
            Ok(a / b)
        }
    })
}
