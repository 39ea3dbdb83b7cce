use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(_cpu: &mut Cpu<V>, _operands: &[Operand]) -> VmResult<()> {
    Ok(())
}
