//! The asynchronous input producer: translates raw key events into the
//! payload encoding vector 1 expects and raises them through the CPU's
//! [`InterruptController`].

use std::sync::Arc;

use crate::cpu::interrupt::InterruptController;

pub const KEYBOARD_VECTOR: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    KeyDown = 0x01,
    KeyPress = 0x02,
    KeyUp = 0x03,
}

/// Packs `(event_type << 24) | ascii`, the payload layout vector 1's
/// handler expects in R15.
pub fn encode_payload(kind: KeyEventKind, ascii: u8) -> u32 {
    ((kind as u32) << 24) | ascii as u32
}

/// Raises one keyboard event on `controller`. Exists as its own function
/// so a host frontend (terminal, GUI) only needs to translate its native
/// key events into `(KeyEventKind, u8)` pairs and call this.
pub fn raise_key_event(controller: &Arc<InterruptController>, kind: KeyEventKind, ascii: u8) {
    controller.raise(KEYBOARD_VECTOR, encode_payload(kind, ascii));
}
