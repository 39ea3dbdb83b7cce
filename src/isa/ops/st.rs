//! `ST dst, src` — src (always a register) is narrowed to its own width
//! and written to the memory operand.

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::regs::Width;
    use crate::memory::manager::HEAP_BOTTOM;
    use crate::vfs::FsVfs;

    #[test]
    fn stores_register_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut cpu = Cpu::new(FsVfs::new(dir.path().to_path_buf()));
        let mut hp = HEAP_BOTTOM;
        let addr = cpu.mm.malloc(&mut hp, 0x8000_0000, 4).unwrap();
        cpu.regs.set_hp(hp);
        cpu.regs.set(0, 0xCAFEBABE);

        let ops = [
            Operand::DMem(crate::isa::operand::MemRef::Address(addr)),
            Operand::Reg { index: 0, width: Width::Dword },
        ];
        execute(&mut cpu, &ops).unwrap();
        assert_eq!(cpu.mm.read_dword(addr).unwrap(), 0xCAFEBABE);
    }
}
