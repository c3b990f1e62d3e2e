//! Log sinks that keep tracing output off the drawn frame.
//!
//! Stderr is the same terminal the viewer draws on, so stderr logging is
//! muted while the alternate screen is up. `--log-file` keeps everything.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::Metadata;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter, MakeWriterExt, WithFilter};

static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

type ScreenFilter = fn(&Metadata<'_>) -> bool;

/// Whether the viewer currently owns the terminal.
pub fn screen_active() -> bool {
    SCREEN_ACTIVE.load(Ordering::Relaxed)
}

/// Marks the terminal as owned by the viewer until dropped.
pub(crate) struct ScreenGuard;

impl ScreenGuard {
    pub(crate) fn enter() -> Self {
        SCREEN_ACTIVE.store(true, Ordering::Relaxed);
        ScreenGuard
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        SCREEN_ACTIVE.store(false, Ordering::Relaxed);
    }
}

/// Wrap `make` so it writes nothing while the viewer owns the terminal.
pub fn off_screen<M>(make: M) -> WithFilter<M, ScreenFilter>
where
    M: for<'a> MakeWriter<'a>,
{
    make.with_filter(outside_screen as ScreenFilter)
}

fn outside_screen(_: &Metadata<'_>) -> bool {
    !screen_active()
}

/// Writer for the tracing subscriber: appends to `path` when given,
/// otherwise stderr muted while the viewer is drawing.
pub fn log_writer(path: Option<&Path>) -> io::Result<BoxMakeWriter> {
    match path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(off_screen(io::stderr))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_muted_while_screen_active() {
        let buffer = Buffer::default();
        let sink = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(off_screen(move || sink.clone()))
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("before drawing");
            let guard = ScreenGuard::enter();
            assert!(screen_active());
            tracing::warn!("while drawing");
            drop(guard);
            tracing::warn!("after drawing");
        });

        assert!(!screen_active());
        let text = buffer.text();
        assert!(text.contains("before drawing"));
        assert!(text.contains("after drawing"));
        assert!(!text.contains("while drawing"));
    }

    #[test]
    fn test_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsurf.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let subscriber = tracing_subscriber::fmt()
            .with_writer(log_writer(Some(&path)).unwrap())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(rows = 5, "logged to file");
        });

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("earlier run\n"));
        assert!(text.contains("logged to file"));
        assert!(text.contains("rows=5"));
    }

    #[test]
    fn test_log_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("fsurf.log");
        assert!(log_writer(Some(&path)).is_err());
    }
}
