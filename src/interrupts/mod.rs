//! The asynchronous side of the interrupt model: an input producer that
//! raises events against the CPU's [`crate::cpu::interrupt::InterruptController`].

pub mod input;
