//! `FREE addr, size` — frees every page fully contained in the range.

use crate::cpu::regs::Width;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::read_value;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let addr = read_value(cpu, &operands[0], Width::Dword)?;
    let size = read_value(cpu, &operands[1], Width::Dword)?;

    let mut hp = cpu.regs.hp();
    cpu.mm.free(&mut hp, addr, size)?;
    cpu.regs.set_hp(hp);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::manager::{HEAP_BOTTOM, STACK_TOP};
    use crate::vfs::FsVfs;

    #[test]
    fn malloc_free_roundtrip_restores_heap_pointer() {
        let dir = tempfile::tempdir().unwrap();
        let mut cpu = Cpu::new(FsVfs::new(dir.path().to_path_buf()));
        cpu.regs.set_hp(HEAP_BOTTOM);
        cpu.regs.set_sp(STACK_TOP);

        let mut hp = cpu.regs.hp();
        let addr = cpu.mm.malloc(&mut hp, STACK_TOP, 4096).unwrap();
        cpu.regs.set_hp(hp);

        let free_ops = [Operand::Imm(addr), Operand::Imm(4096)];
        execute(&mut cpu, &free_ops).unwrap();
        assert_eq!(cpu.regs.hp(), HEAP_BOTTOM);
    }
}
