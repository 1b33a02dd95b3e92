use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use tracing::debug;

use crate::{Error, Result};

/// Permission bits for newly created generated files.
#[cfg(unix)]
const FILE_MODE: u32 = 0o660;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Commit the rendered content through the given gate
    fn write(&self, base: &Path, gate: &WriteGate) -> Result<WriteResult> {
        gate.commit(&self.path(base), self.render().as_bytes())
    }
}

/// Result of a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// Content differed and the file was written
    Written,
    /// Content matched the existing file, nothing was touched
    Unchanged,
    /// Content differs from the file on disk (check mode only)
    Stale,
    /// Content was sent to the shared stream
    Streamed,
}

impl WriteResult {
    /// Whether the target on disk did not match the rendered content.
    pub fn is_change(&self) -> bool {
        matches!(self, WriteResult::Written | WriteResult::Stale)
    }
}

/// Output stream shared by every package in streaming mode.
///
/// Appends are serialized behind a mutex so concurrent packages never
/// interleave their output.
#[derive(Clone)]
pub struct SharedStream(Arc<Mutex<Box<dyn Write + Send>>>);

impl SharedStream {
    /// Wrap an arbitrary writer.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(writer))))
    }

    /// Stream to the process standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    fn write_all(&self, content: &[u8]) -> io::Result<()> {
        let mut writer = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(content)?;
        writer.flush()
    }
}

impl fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedStream")
    }
}

/// Where committed content goes
#[derive(Debug, Clone, Default)]
pub enum WriteMode {
    /// Write each target file when its content changed
    #[default]
    Files,
    /// Compare only, never write
    Check,
    /// Send everything to one stream, bypassing the comparison
    Stream(SharedStream),
}

/// Writes generated content only when it differs from what is on disk.
#[derive(Debug, Clone, Default)]
pub struct WriteGate {
    mode: WriteMode,
}

impl WriteGate {
    pub fn new(mode: WriteMode) -> Self {
        Self { mode }
    }

    /// Commit `content` to `path` according to the gate's mode.
    ///
    /// A missing target counts as empty content.
    pub fn commit(&self, path: &Path, content: &[u8]) -> Result<WriteResult> {
        if let WriteMode::Stream(stream) = &self.mode {
            stream.write_all(content).map_err(|source| Error::Stream {
                path: path.to_path_buf(),
                source,
            })?;
            return Ok(WriteResult::Streamed);
        }

        let existing = read_existing(path)?;
        if existing == content {
            debug!(path = %path.display(), "unchanged");
            return Ok(WriteResult::Unchanged);
        }

        if matches!(self.mode, WriteMode::Check) {
            debug!(path = %path.display(), "stale");
            return Ok(WriteResult::Stale);
        }

        write_file(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "written");
        Ok(WriteResult::Written)
    }
}

fn read_existing(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let to_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(to_error)?;
    file.write_all(content).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use std::{fs, time::Duration};

    use tempfile::TempDir;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_commit_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");

        let result = WriteGate::default().commit(&path, b"package a\n").unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package a\n");
    }

    #[test]
    fn test_commit_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        fs::write(&path, "package a\n").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        std::thread::sleep(Duration::from_millis(20));
        let result = WriteGate::default().commit(&path, b"package a\n").unwrap();

        assert_eq!(result, WriteResult::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_commit_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        fs::write(&path, "package old\n").unwrap();

        let result = WriteGate::default().commit(&path, b"package a\n").unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package a\n");
    }

    #[test]
    fn test_commit_truncates_longer_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        fs::write(&path, "package something_much_longer\n").unwrap();

        WriteGate::default().commit(&path, b"package a\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package a\n");
    }

    #[test]
    fn test_check_mode_never_writes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");

        let gate = WriteGate::new(WriteMode::Check);
        assert_eq!(gate.commit(&path, b"x").unwrap(), WriteResult::Stale);
        assert!(!path.exists());

        fs::write(&path, "x").unwrap();
        assert_eq!(gate.commit(&path, b"x").unwrap(), WriteResult::Unchanged);
    }

    #[test]
    fn test_stream_mode_bypasses_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        fs::write(&path, "same").unwrap();
        let capture = Capture::default();

        let gate = WriteGate::new(WriteMode::Stream(SharedStream::new(capture.clone())));
        assert_eq!(gate.commit(&path, b"same").unwrap(), WriteResult::Streamed);
        assert_eq!(gate.commit(&path, b"more").unwrap(), WriteResult::Streamed);

        assert_eq!(capture.0.lock().unwrap().as_slice(), b"samemore");
        assert_eq!(fs::read_to_string(&path).unwrap(), "same");
    }

    #[test]
    fn test_commit_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.go");

        let err = WriteGate::default().commit(&path, b"x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.go");
        WriteGate::default().commit(&path, b"x").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask may only clear bits
        assert_eq!(mode & !FILE_MODE, 0);
    }

    #[test]
    fn test_is_change() {
        assert!(WriteResult::Written.is_change());
        assert!(WriteResult::Stale.is_change());
        assert!(!WriteResult::Unchanged.is_change());
        assert!(!WriteResult::Streamed.is_change());
    }
}
