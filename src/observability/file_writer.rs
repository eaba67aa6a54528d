//! Rotating file writer with size-based rotation and backup retention.
//!
//! Used as the `tracing-subscriber` writer when a log file is configured, so that a
//! long-running console tool cannot fill the disk.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Maximum file size before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// Before each write the current file size is checked. Past the limit the file is
/// renamed to `<name>.<unix_millis>` and a fresh file is started; only the newest
/// backups are kept.
///
/// `&RotatingFile` implements [`Write`], so an `Arc<RotatingFile>` can be handed to
/// `tracing_subscriber::fmt::layer().with_writer(..)` directly.
pub struct RotatingFile {
    file_path: PathBuf,
    max_bytes: u64,
    writer: Mutex<Option<fs::File>>,
}

impl RotatingFile {
    /// Creates a writer for `file_path`. The file is opened on first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, MAX_FILE_SIZE_BYTES)
    }

    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            writer: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, Option<fs::File>>> {
        self.writer
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))
    }

    fn check_and_rotate(&self, writer: &mut Option<fs::File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let backup_path = PathBuf::from(format!("{}.{timestamp}", self.file_path.display()));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = match self.file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| name.strip_prefix(prefix.as_str()))
                    .is_some_and(|suffix| suffix.chars().all(|c| c.is_ascii_digit()))
            })
            .collect();

        // newest first; suffixes are same-width millisecond timestamps
        backups.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut writer = self.lock()?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.lock()?.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");
        let writer = RotatingFile::new(path.clone());

        (&writer).write_all(b"one\n").unwrap();
        (&writer).write_all(b"two\n").unwrap();
        (&writer).flush().unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_past_limit_and_keeps_three_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");
        let writer = RotatingFile::with_limit(path.clone(), 8);

        for i in 0..6 {
            (&writer).write_all(format!("line {i} is long\n").as_bytes()).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("console.log."))
            .count();
        assert_eq!(backups, MAX_BACKUP_FILES);
        assert_eq!(fs::read_to_string(path).unwrap(), "line 5 is long\n");
    }
}
