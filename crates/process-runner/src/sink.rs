//! Destinations for forwarded child-process output.

use parking_lot::Mutex;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

/// Boxed writer handed to a forwarding task.
pub type OutputWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Supplies the writers a child's stdout and stderr are copied into.
pub trait OutputSink: Send + Sync {
    fn stdout(&self) -> OutputWriter;
    fn stderr(&self) -> OutputWriter;
}

/// Forwards to the current process's own stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioSink;

impl OutputSink for StdioSink {
    fn stdout(&self) -> OutputWriter {
        Box::new(tokio::io::stdout())
    }

    fn stderr(&self) -> OutputWriter {
        Box::new(tokio::io::stderr())
    }
}

/// Buffers forwarded output in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    stdout: Arc<Mutex<Vec<u8>>>,
    stderr: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout.lock()).into_owned()
    }

    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr.lock()).into_owned()
    }
}

impl OutputSink for MemorySink {
    fn stdout(&self) -> OutputWriter {
        Box::new(MemoryWriter {
            buffer: Arc::clone(&self.stdout),
        })
    }

    fn stderr(&self) -> OutputWriter {
        Box::new(MemoryWriter {
            buffer: Arc::clone(&self.stderr),
        })
    }
}

/// Async writer appending into a shared buffer.
#[derive(Debug, Clone)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl AsyncWrite for MemoryWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.buffer.lock().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
