use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Console sink for user-facing output lines.
///
/// Wraps a shared async writer so the poller, the flow, and the helpers
/// can all append to the same stream; tests swap in an in-memory buffer.
pub struct ConsoleSink(Arc<Mutex<Box<dyn AsyncWrite + Unpin + Sync + Send>>>);

impl Clone for ConsoleSink {
    fn clone(&self) -> Self {
        ConsoleSink(self.0.clone())
    }
}

impl ConsoleSink {
    pub fn new(t: Box<dyn AsyncWrite + Unpin + Sync + Send>) -> ConsoleSink {
        ConsoleSink(Arc::new(Mutex::new(t)))
    }

    /// Sink writing to the process's standard output
    pub fn stdout() -> ConsoleSink {
        ConsoleSink::new(Box::new(tokio::io::stdout()))
    }

    /// Sink writing into a shared in-memory buffer, for capture in tests
    pub fn buffered() -> (ConsoleSink, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (ConsoleSink::new(Box::new(buffer.clone())), buffer)
    }

    pub async fn print(&self, message: &str) {
        let mut lock = self.0.lock().await;
        let _ = lock.write_all(message.as_bytes()).await;
        let _ = lock.flush().await;
    }

    pub async fn write_line(&self, message: &str) {
        let mut lock = self.0.lock().await;
        let _ = lock.write_all(message.as_bytes()).await;
        let _ = lock.write_all(b"\n").await;
        let _ = lock.flush().await;
    }
}

/// In-memory writer behind [`ConsoleSink::buffered`]
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl AsyncWrite for SharedBuffer {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.lock().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_line_appends_newline() {
        let (sink, buffer) = ConsoleSink::buffered();
        sink.write_line("✅ Docker is installed").await;
        sink.write_line("❌ Git is not installed").await;

        assert_eq!(
            buffer.lines(),
            vec![
                "✅ Docker is installed".to_string(),
                "❌ Git is not installed".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_print_writes_verbatim() {
        let (sink, buffer) = ConsoleSink::buffered();
        sink.print("no newline").await;
        assert_eq!(buffer.contents(), "no newline");
    }

    #[tokio::test]
    async fn test_clones_share_the_stream() {
        let (sink, buffer) = ConsoleSink::buffered();
        let clone = sink.clone();
        sink.write_line("one").await;
        clone.write_line("two").await;
        assert_eq!(buffer.lines(), vec!["one".to_string(), "two".to_string()]);
    }
}
