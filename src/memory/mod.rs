//! Virtual memory: physical backing stores, address translation, and the
//! manager that ties them together with the stack/heap allocator.

pub mod manager;
pub mod phys;
pub mod program;
pub mod translate;

pub use manager::MemoryManager;
pub use phys::{IVT_BASE, PAGE_SIZE, ROM_BASE, VRAM_BASE};
