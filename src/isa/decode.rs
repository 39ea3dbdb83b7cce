//! Decodes one instruction from the memory manager at a given address.
//!
//! Instruction fetch goes through the same memory manager as any other
//! read: there is no separate instruction cache or fetch path.

use crate::cpu::regs::Width;
use crate::error::{VmError, VmResult, VirtAddr};
use crate::isa::operand::{Kind, MemRef, MemSubtype, Operand};
use crate::isa::opcode::Opcode;
use crate::memory::MemoryManager;

pub struct Decoded {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    pub next_pc: VirtAddr,
}

struct Cursor<'a> {
    mm: &'a MemoryManager,
    pc: VirtAddr,
}

impl<'a> Cursor<'a> {
    fn byte(&mut self) -> VmResult<u8> {
        let b = self.mm.read_byte(self.pc)?;
        self.pc += 1;
        Ok(b)
    }

    fn dword(&mut self) -> VmResult<u32> {
        let v = self.mm.read_dword(self.pc)?;
        self.pc += 4;
        Ok(v)
    }
}

pub fn decode_instruction(mm: &MemoryManager, pc: VirtAddr) -> VmResult<Decoded> {
    let mut cur = Cursor { mm, pc };
    let opcode_byte = cur.byte()?;
    let opcode = Opcode::from_byte(opcode_byte).ok_or(VmError::UnknownOpcode(opcode_byte, pc))?;

    let mut operands = Vec::new();
    for slot in opcode.schema() {
        let kind = if slot.is_tagged() {
            let tag = cur.byte()?;
            let k = Kind::from_tag(tag).ok_or(VmError::InvalidOperand(cur.pc))?;
            if !slot.allowed.contains(&k) {
                return Err(VmError::InvalidOperand(cur.pc));
            }
            k
        } else {
            slot.allowed[0]
        };
        operands.push(decode_operand(&mut cur, kind)?);
    }

    Ok(Decoded { opcode, operands, next_pc: cur.pc })
}

fn decode_operand(cur: &mut Cursor, kind: Kind) -> VmResult<Operand> {
    Ok(match kind {
        Kind::Reg => {
            let b = cur.byte()?;
            let index = (b & 0x0F) as usize;
            let width = Width::from_nibble(b >> 4).ok_or(VmError::InvalidOperand(cur.pc))?;
            Operand::Reg { index, width }
        }
        Kind::Imm => Operand::Imm(cur.dword()?),
        Kind::DMem => Operand::DMem(decode_mem_ref(cur)?),
        Kind::IMem => Operand::IMem(decode_mem_ref(cur)?),
    })
}

fn decode_mem_ref(cur: &mut Cursor) -> VmResult<MemRef> {
    let tag = cur.byte()?;
    let subtype = MemSubtype::from_tag(tag).ok_or(VmError::InvalidOperand(cur.pc))?;
    Ok(match subtype {
        MemSubtype::Address => MemRef::Address(cur.dword()?),
        MemSubtype::Register => {
            let b = cur.byte()?;
            MemRef::Register((b & 0x0F) as usize)
        }
        MemSubtype::Offset => {
            let b = cur.byte()?;
            let reg = (b & 0x0F) as usize;
            let addr = cur.dword()?;
            MemRef::Offset { reg, addr }
        }
    })
}
