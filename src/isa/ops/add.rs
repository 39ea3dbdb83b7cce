use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::eval::binary_op;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, operands: &[Operand]) -> VmResult<()> {
    binary_op(cpu, operands, |a, b| Ok(a.wrapping_add(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::regs::Width;
    use crate::vfs::FsVfs;

    #[test]
    fn wraps_on_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let mut cpu = Cpu::new(FsVfs::new(dir.path().to_path_buf()));
        cpu.regs.set(0, u32::MAX);
        let ops = [
            Operand::Reg { index: 0, width: Width::Dword },
            Operand::Imm(1),
        ];
        execute(&mut cpu, &ops).unwrap();
        assert_eq!(cpu.regs.get(0), 0);
    }
}
