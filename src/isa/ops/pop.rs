//! `POP dst` — pops a 32-bit value into dst.
//!
//! A full dword is written for every destination kind, matching `PUSH`:
//! an indirect memory destination does not get a narrower write just
//! because it goes through one extra dereference.

use crate::cpu::regs::Width;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::write_value;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let mut sp = cpu.regs.sp();
    let value = cpu.mm.pop(&mut sp)?;
    cpu.regs.set_sp(sp);
    write_value(cpu, &operands[0], Width::Dword, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::manager::{HEAP_BOTTOM, STACK_TOP};
    use crate::vfs::FsVfs;

    #[test]
    fn pop_into_indirect_memory_writes_full_dword() {
        let dir = tempfile::tempdir().unwrap();
        let mut cpu = Cpu::new(FsVfs::new(dir.path().to_path_buf()));
        cpu.regs.set_sp(STACK_TOP);
        let mut hp = HEAP_BOTTOM;
        let ptr_cell = cpu.mm.malloc(&mut hp, STACK_TOP, 4).unwrap();
        let dest = cpu.mm.malloc(&mut hp, STACK_TOP, 4).unwrap();
        cpu.mm.write_dword(ptr_cell, dest).unwrap();
        cpu.regs.set_hp(hp);

        let mut sp = cpu.regs.sp();
        cpu.mm.push(&mut sp, hp, 0xFEED_FACE).unwrap();
        cpu.regs.set_sp(sp);

        let ops = [Operand::IMem(crate::isa::operand::MemRef::Address(ptr_cell))];
        execute(&mut cpu, &ops).unwrap();
        assert_eq!(cpu.mm.read_dword(dest).unwrap(), 0xFEED_FACE);
    }
}
