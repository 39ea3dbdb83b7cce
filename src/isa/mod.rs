//! The instruction set: operand model, opcode schemas, decoding, and the
//! per-opcode execute functions under [`ops`].

pub mod decode;
pub mod eval;
pub mod opcode;
pub mod operand;
pub mod ops;
