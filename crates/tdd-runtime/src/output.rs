//! Replaceable output sink for the report
//!
//! The report goes to stdout unless a different writer is installed with
//! [`set_output`] before the run.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

struct Sink {
    writer: Box<dyn Write + Send>,
    is_stdout: bool,
}

static OUTPUT: OnceLock<Mutex<Sink>> = OnceLock::new();

fn sink() -> MutexGuard<'static, Sink> {
    OUTPUT
        .get_or_init(|| {
            Mutex::new(Sink {
                writer: Box::new(io::stdout()),
                is_stdout: true,
            })
        })
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Send every subsequent report to `writer`
pub fn set_output(writer: Box<dyn Write + Send>) {
    let mut sink = sink();
    sink.writer = writer;
    sink.is_stdout = false;
}

/// Restore the default stdout sink
pub fn reset_output() {
    let mut sink = sink();
    sink.writer = Box::new(io::stdout());
    sink.is_stdout = true;
}

/// Run `f` with the current sink. The flag says whether it is still stdout.
pub(crate) fn with_output<R>(f: impl FnOnce(&mut dyn Write, bool) -> R) -> R {
    let mut sink = sink();
    let is_stdout = sink.is_stdout;
    f(sink.writer.as_mut(), is_stdout)
}

/// In-memory writer whose clones share one buffer.
///
/// Useful for capturing a report:
///
/// ```
/// use std::io::Write;
/// use tdd_runtime::output::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// writeln!(writer, "Passed").unwrap();
/// assert_eq!(buffer.contents(), "Passed\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
