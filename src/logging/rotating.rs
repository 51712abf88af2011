use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only log file that rolls over before a write would bring it
/// to `max_bytes` or beyond.
///
/// On rollover `website.log` becomes `website.log.1`, `.1` becomes
/// `.2` and so on; anything beyond `backup_count` is dropped. With
/// `backup_count == 0` the file is truncated instead. A `max_bytes`
/// of zero disables rotation.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    pub fn open(path: impl AsRef<Path>, max_bytes: u64, backup_count: u32) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            backup_count,
            file,
            written,
        })
    }

    /// Path of the `n`th backup, e.g. `website.log.2`.
    pub fn backup_path(&self, n: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0 && self.written > 0 && self.written + incoming as u64 >= self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backup_count > 0 {
            for n in (1..self.backup_count).rev() {
                let src = self.backup_path(n);
                if src.exists() {
                    std::fs::rename(&src, self.backup_path(n + 1))?;
                }
            }
            std::fs::rename(&self.path, self.backup_path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate(buf.len()) {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
