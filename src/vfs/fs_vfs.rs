//! A `Vfs` backed by the host filesystem, rooted at a configurable
//! directory. Stands in for "the host filesystem adapter" the VFS
//! contract names but does not itself define.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::vfs::{FileStat, SeekFrom, Vfs};

pub struct FsVfs {
    root: PathBuf,
}

impl FsVfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = path.trim_start_matches('/');
        self.root.join(path)
    }
}

impl Vfs for FsVfs {
    type Handle = File;

    fn open(&mut self, path: &str) -> io::Result<Self::Handle> {
        OpenOptions::new().read(true).write(true).open(self.resolve(path))
    }

    fn close(&mut self, handle: Self::Handle) -> io::Result<()> {
        drop(handle);
        Ok(())
    }

    fn create(&mut self, path: &str) -> io::Result<()> {
        File::create(self.resolve(path)).map(|_| ())
    }

    fn remove(&mut self, path: &str) -> io::Result<()> {
        let p = self.resolve(path);
        if p.is_dir() {
            fs::remove_dir(p)
        } else {
            fs::remove_file(p)
        }
    }

    fn stat(&mut self, path: &str) -> io::Result<FileStat> {
        let meta = fs::metadata(self.resolve(path))?;
        Ok(FileStat {
            size: meta.len(),
            is_dir: meta.is_dir(),
        })
    }

    fn read_dir(&mut self, path: &str) -> io::Result<Vec<String>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            out.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(out)
    }

    fn read(&mut self, handle: &mut Self::Handle, buf: &mut [u8]) -> io::Result<usize> {
        handle.read(buf)
    }

    fn write(&mut self, handle: &mut Self::Handle, buf: &[u8]) -> io::Result<usize> {
        handle.write(buf)
    }

    fn read_at(&mut self, handle: &mut Self::Handle, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        handle.seek(io::SeekFrom::Start(offset))?;
        handle.read(buf)
    }

    fn write_at(&mut self, handle: &mut Self::Handle, buf: &[u8], offset: u64) -> io::Result<usize> {
        handle.seek(io::SeekFrom::Start(offset))?;
        handle.write(buf)
    }

    fn seek(&mut self, handle: &mut Self::Handle, pos: SeekFrom) -> io::Result<u64> {
        let pos = match pos {
            SeekFrom::Start(n) => io::SeekFrom::Start(n),
            SeekFrom::Current(n) => io::SeekFrom::Current(n),
            SeekFrom::End(n) => io::SeekFrom::End(n),
        };
        handle.seek(pos)
    }

    fn read_whole(&mut self, handle: &mut Self::Handle) -> io::Result<Vec<u8>> {
        handle.seek(io::SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        handle.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut vfs = FsVfs::new(dir.path());
        vfs.create("hello.txt").unwrap();
        let mut h = vfs.open("hello.txt").unwrap();
        vfs.write(&mut h, b"hi").unwrap();
        let contents = vfs.read_whole(&mut h).unwrap();
        assert_eq!(contents, b"hi");
    }

    #[test]
    fn stat_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut vfs = FsVfs::new(dir.path());
        vfs.create("f").unwrap();
        let mut h = vfs.open("f").unwrap();
        vfs.write(&mut h, b"abcd").unwrap();
        drop(h);
        let st = vfs.stat("f").unwrap();
        assert_eq!(st.size, 4);
    }
}
