//! `MALLOC size, dst` — allocates from the heap; `dst` receives the new
//! address, or the failure sentinel if the stack and heap would collide.

use crate::cpu::regs::Width;
use crate::cpu::Cpu;
use crate::error::{VmResult, FAILURE_SENTINEL};
use crate::isa::eval::read_value;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    let size = read_value(cpu, &operands[0], Width::Dword)?;
    let dst = match &operands[1] {
        Operand::Reg { index, .. } => *index,
        _ => unreachable!("MALLOC's destination is always a register"),
    };

    let mut hp = cpu.regs.hp();
    let sp = cpu.regs.sp();
    let result = match cpu.mm.malloc(&mut hp, sp, size) {
        Ok(addr) => {
            cpu.regs.set_hp(hp);
            addr
        }
        Err(_) => FAILURE_SENTINEL,
    };
    cpu.regs.set(dst, result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::manager::{HEAP_BOTTOM, STACK_TOP};
    use crate::vfs::FsVfs;

    #[test]
    fn malloc_fills_dst_with_address() {
        let dir = tempfile::tempdir().unwrap();
        let mut cpu = Cpu::new(FsVfs::new(dir.path().to_path_buf()));
        cpu.regs.set_hp(HEAP_BOTTOM);
        cpu.regs.set_sp(STACK_TOP);
        let ops = [Operand::Imm(16), Operand::Reg { index: 0, width: Width::Dword }];
        execute(&mut cpu, &ops).unwrap();
        assert_eq!(cpu.regs.get(0), 0);
        assert_eq!(cpu.regs.hp(), 16);
    }
}
