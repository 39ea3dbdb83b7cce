//! The one-slot rendezvous between the CPU's fetch-decode-execute loop and
//! the asynchronous input producer thread.
//!
//! The guest never misses an event: a raised interrupt either lands
//! directly in the pending slot (if the CPU has just signalled it's
//! free to accept one) or is buffered; buffered events are collapsed to
//! the freshest one the next time the CPU signals.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy)]
pub struct RaisedEvent {
    pub vector: u8,
    pub payload: u32,
}

struct Inner {
    free: bool,
    queue: Vec<RaisedEvent>,
    pending: Option<RaisedEvent>,
}

pub struct InterruptController {
    inner: Mutex<Inner>,
}

impl Default for InterruptController {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                free: true,
                queue: Vec::new(),
                pending: None,
            }),
        }
    }
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the input thread with a freshly observed event. Delivers
    /// immediately if the CPU is free to accept it, else buffers it.
    pub fn raise(&self, vector: u8, payload: u32) {
        let mut inner = self.inner.lock().unwrap();
        let event = RaisedEvent { vector, payload };
        if inner.free && inner.pending.is_none() {
            inner.pending = Some(event);
            inner.free = false;
        } else {
            inner.queue.push(event);
        }
    }

    /// Called by the CPU after a step that did not just return from an
    /// interrupt. Drains the buffer, keeping only the freshest event, and
    /// marks the controller ready to accept the next one directly.
    pub fn signal_free(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(freshest) = inner.queue.pop() {
            inner.queue.clear();
            inner.pending = Some(freshest);
            inner.free = false;
        } else {
            inner.free = true;
        }
    }

    /// Takes the pending event, if any, clearing it.
    pub fn take_pending(&self) -> Option<RaisedEvent> {
        self.inner.lock().unwrap().pending.take()
    }
}
