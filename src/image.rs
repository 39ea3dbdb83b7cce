//! Decoding of the binary image container consumed by `LOADBIN` and by
//! the host binary's initial program load.
//!
//! Only decoding lives here: constructing an image is the assembler's
//! concern and is out of scope for this crate.

use crate::error::{VmError, VmResult};
use crate::memory::program::Sector;

const MAGIC: u32 = 0x736F_6265;

pub struct Image {
    pub start_address: u32,
    pub sectors: Vec<Sector>,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> VmResult<&'a [u8]> {
        if self.pos + n > self.bytes.len() {
            return Err(VmError::Decode(format!(
                "unexpected end of image at byte {} (need {n} more)",
                self.pos
            )));
        }
        let s = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(s)
    }

    fn u8(&mut self) -> VmResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> VmResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parses the fixed little-endian container: magic, sector count, start
/// address, then `count` sectors of `(base, length, bytes)`.
pub fn decode(bytes: &[u8]) -> VmResult<Image> {
    let mut r = Reader::new(bytes);
    let magic = r.u32()?;
    if magic != MAGIC {
        return Err(VmError::Decode(format!("bad magic {magic:#010x}")));
    }
    let count = r.u8()?;
    let start_address = r.u32()?;

    let mut sectors = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let base = r.u32()?;
        let len = r.u32()?;
        let data = r.take(len as usize)?.to_vec();
        sectors.push(Sector { base, bytes: data });
    }

    Ok(Image { start_address, sectors })
}
