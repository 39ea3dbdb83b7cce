use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, _operands: &[Operand]) -> VmResult<()> {
    cpu.halted = true;
    Ok(())
}
