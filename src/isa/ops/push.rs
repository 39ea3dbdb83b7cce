//! `PUSH src` — pushes a 32-bit value onto the stack.

use crate::cpu::regs::Width;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::{instruction_width, read_value};
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let width = instruction_width(operands);
    let value = read_value(cpu, &operands[0], width)?;

    let mut sp = cpu.regs.sp();
    let hp = cpu.regs.hp();
    cpu.mm.push(&mut sp, hp, value)?;
    cpu.regs.set_sp(sp);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::manager::STACK_TOP;
    use crate::vfs::FsVfs;

    #[test]
    fn pushes_full_dword() {
        let dir = tempfile::tempdir().unwrap();
        let mut cpu = Cpu::new(FsVfs::new(dir.path().to_path_buf()));
        cpu.regs.set_sp(STACK_TOP);
        let ops = [Operand::Imm(0x1122_3344)];
        execute(&mut cpu, &ops).unwrap();
        assert_eq!(cpu.regs.sp(), STACK_TOP - 4);
        assert_eq!(cpu.mm.read_dword(STACK_TOP - 4).unwrap(), 0x1122_3344);
    }

    #[test]
    fn width_unused_here_is_dword_default() {
        assert_eq!(instruction_width(&[Operand::Imm(0)]), Width::Dword);
    }
}
