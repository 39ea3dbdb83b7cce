//! Shared operand resolution used by every opcode's execute function:
//! turning a decoded [`Operand`] into a value or an address against the
//! current CPU state.

use crate::cpu::regs::Width;
use crate::cpu::Cpu;
use crate::error::VmResult;
use crate::isa::operand::{MemRef, Operand};
use crate::vfs::Vfs;

/// The width an instruction operates at: taken from whichever operand is
/// a `Reg`, defaulting to dword when none of them is (e.g. `RET`, jump
/// targets, which carry no width of their own).
pub fn instruction_width(operands: &[Operand]) -> Width {
    operands
        .iter()
        .find_map(|o| match o {
            Operand::Reg { width, .. } => Some(*width),
            _ => None,
        })
        .unwrap_or(Width::Dword)
}

fn dmem_addr<V: Vfs>(cpu: &Cpu<V>, mr: &MemRef) -> u32 {
    match mr {
        MemRef::Address(a) => *a,
        MemRef::Register(r) => cpu.regs.get(*r),
        MemRef::Offset { reg, addr } => cpu.regs.get(*reg).wrapping_add(*addr),
    }
}

fn imem_addr<V: Vfs>(cpu: &Cpu<V>, mr: &MemRef) -> VmResult<u32> {
    let base = dmem_addr(cpu, mr);
    cpu.mm.read_dword(base)
}

fn read_mem(cpu: &Cpu<impl Vfs>, addr: u32, width: Width) -> VmResult<u32> {
    Ok(match width {
        Width::Byte => cpu.mm.read_byte(addr)? as u32,
        Width::Word => cpu.mm.read_word(addr)? as u32,
        Width::Dword => cpu.mm.read_dword(addr)?,
    })
}

fn write_mem(cpu: &mut Cpu<impl Vfs>, addr: u32, width: Width, value: u32) -> VmResult<()> {
    match width {
        Width::Byte => cpu.mm.write_byte(addr, value as u8),
        Width::Word => cpu.mm.write_word(addr, value as u16),
        Width::Dword => cpu.mm.write_dword(addr, value),
    }
}

/// Resolves any source operand (`Reg`/`DMem`/`IMem`/`Imm`) to a value,
/// narrowed to `width`.
pub fn read_value<V: Vfs>(cpu: &mut Cpu<V>, op: &Operand, width: Width) -> VmResult<u32> {
    match op {
        Operand::Reg { index, width: w } => Ok(w.narrow(cpu.regs.get(*index))),
        Operand::Imm(v) => Ok(width.narrow(*v)),
        Operand::DMem(mr) => {
            let addr = dmem_addr(cpu, mr);
            read_mem(cpu, addr, width)
        }
        Operand::IMem(mr) => {
            let addr = imem_addr(cpu, mr)?;
            read_mem(cpu, addr, width)
        }
    }
}

/// Resolves the final virtual address a `DMem`/`IMem` operand names.
/// Panics if given a `Reg`/`Imm` operand — callers must only use this on
/// operands known to be memory operands (typically `ST`/`PUSH`/`POP`
/// handle the `Reg` case separately).
pub fn mem_address<V: Vfs>(cpu: &Cpu<V>, op: &Operand) -> VmResult<u32> {
    match op {
        Operand::DMem(mr) => Ok(dmem_addr(cpu, mr)),
        Operand::IMem(mr) => imem_addr(cpu, mr),
        _ => unreachable!("mem_address called on a non-memory operand"),
    }
}

/// Writes a value into any destination operand (`Reg`/`DMem`/`IMem`),
/// narrowed to `width`.
pub fn write_value<V: Vfs>(cpu: &mut Cpu<V>, op: &Operand, width: Width, value: u32) -> VmResult<()> {
    match op {
        Operand::Reg { index, width: w } => {
            cpu.regs.set(*index, w.narrow(value));
            Ok(())
        }
        Operand::DMem(mr) => {
            let addr = dmem_addr(cpu, mr);
            write_mem(cpu, addr, width, value)
        }
        Operand::IMem(mr) => {
            let addr = imem_addr(cpu, mr)?;
            write_mem(cpu, addr, width, value)
        }
        Operand::Imm(_) => unreachable!("an immediate cannot be a destination"),
    }
}

/// Applies a two-operand arithmetic/logical op: `dst = f(dst, src)`,
/// narrowed to the instruction's width on both read and write. Shared by
/// `ADD`/`SUB`/`MUL`/`DIV`/`MOD`/`AND`/`OR`/`XOR`/`SHL`/`SHR`.
pub fn binary_op<V: Vfs>(
    cpu: &mut Cpu<V>,
    operands: &[Operand],
    f: impl FnOnce(u32, u32) -> VmResult<u32>,
) -> VmResult<()> {
    let width = instruction_width(operands);
    let a = read_value(cpu, &operands[0], width)?;
    let b = read_value(cpu, &operands[1], width)?;
    let result = width.narrow(f(a, b)?);
    write_value(cpu, &operands[0], width, result)
}
