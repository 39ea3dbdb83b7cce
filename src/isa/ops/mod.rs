//! One module per opcode, mirroring the rest of this codebase's
//! one-file-per-feature convention. [`execute`] is the single dispatch
//! point `Cpu::step` calls into.

mod add;
mod and;
mod call;
mod close;
mod cmp;
mod dec;
mod div;
mod free;
mod hlt;
mod inc;
mod jcc;
mod jmp;
mod ld;
mod loadbin;
mod malloc;
mod modu;
mod mul;
mod nop;
mod not;
mod open;
mod or;
mod pop;
mod push;
mod read;
mod ret;
mod seek;
mod shl;
mod shr;
mod st;
mod sub;
mod write;
mod xor;

use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::opcode::Opcode;
use crate::isa::operand::Operand;
use crate::vfs::Vfs;

pub fn execute<V: Vfs>(cpu: &mut Cpu<V>, opcode: Opcode, operands: &[Operand]) -> VmResult<()> {
    match opcode {
        Opcode::Nop => nop::execute(cpu, operands),
        Opcode::Ld => ld::execute(cpu, operands),
        Opcode::St => st::execute(cpu, operands),
        Opcode::Add => add::execute(cpu, operands),
        Opcode::Sub => sub::execute(cpu, operands),
        Opcode::Mul => mul::execute(cpu, operands),
        Opcode::Div => div::execute(cpu, operands),
        Opcode::Mod => modu::execute(cpu, operands),
        Opcode::And => and::execute(cpu, operands),
        Opcode::Or => or::execute(cpu, operands),
        Opcode::Xor => xor::execute(cpu, operands),
        Opcode::Not => not::execute(cpu, operands),
        Opcode::Shl => shl::execute(cpu, operands),
        Opcode::Shr => shr::execute(cpu, operands),
        Opcode::Cmp => cmp::execute(cpu, operands),
        Opcode::Jmp => jmp::execute(cpu, operands),
        Opcode::Jeq | Opcode::Jne | Opcode::Jgt | Opcode::Jlt | Opcode::Jge | Opcode::Jle => {
            jcc::execute(cpu, opcode, operands)
        }
        Opcode::Call => call::execute(cpu, operands),
        Opcode::Ret => ret::execute(cpu, operands),
        Opcode::Push => push::execute(cpu, operands),
        Opcode::Pop => pop::execute(cpu, operands),
        Opcode::Hlt => hlt::execute(cpu, operands),
        Opcode::Inc => inc::execute(cpu, operands),
        Opcode::Dec => dec::execute(cpu, operands),
        Opcode::Open => open::execute(cpu, operands),
        Opcode::Read => read::execute(cpu, operands),
        Opcode::Write => write::execute(cpu, operands),
        Opcode::Seek => seek::execute(cpu, operands),
        Opcode::Loadbin => loadbin::execute(cpu, operands),
        Opcode::Close => close::execute(cpu, operands),
        Opcode::Malloc => malloc::execute(cpu, operands),
        Opcode::Free => free::execute(cpu, operands),
    }
}
