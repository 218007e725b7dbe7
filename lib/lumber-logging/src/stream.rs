/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

static PROCESS_STDOUT: Lazy<SharedStream> = Lazy::new(|| SharedStream::new(io::stdout()));
static PROCESS_STDERR: Lazy<SharedStream> = Lazy::new(|| SharedStream::new(io::stderr()));

/// The process-wide standard output binding point. Every call returns the
/// same stream identity, so restoration can be verified with
/// [`SharedStream::same_stream`].
pub fn process_stdout() -> SharedStream {
    PROCESS_STDOUT.clone()
}

/// The process-wide standard error binding point.
pub fn process_stderr() -> SharedStream {
    PROCESS_STDERR.clone()
}

/// Cloneable handle to a caller-owned byte output destination. The owner
/// keeps the destination alive, this handle never closes it.
#[derive(Clone)]
pub struct SharedStream {
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl SharedStream {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        SharedStream {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Identity comparison: two handles are the same stream only if they
    /// share the same underlying destination, not if they merely write to
    /// equivalent places.
    pub fn same_stream(&self, other: &SharedStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.inner.lock().unwrap();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

/// In-memory sink for inspecting what a [`SharedStream`] received.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    pub fn stream(&self) -> SharedStream {
        SharedStream::new(BufferWriter(Arc::clone(&self.inner)))
    }

    pub fn contents(&self) -> String {
        let data = self.inner.lock().unwrap();
        String::from_utf8_lossy(&data).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_collects_lines() {
        let buffer = SharedBuffer::new();
        let stream = buffer.stream();
        assert!(buffer.is_empty());
        stream.write_line("first").unwrap();
        stream.write_line("second").unwrap();
        assert_eq!(buffer.contents(), "first\nsecond\n");
    }

    #[test]
    fn process_streams_keep_identity() {
        assert!(process_stdout().same_stream(&process_stdout()));
        assert!(process_stderr().same_stream(&process_stderr()));
        assert!(!process_stdout().same_stream(&process_stderr()));
    }

    #[test]
    fn distinct_buffers_are_distinct_streams() {
        let a = SharedBuffer::new();
        let b = SharedBuffer::new();
        assert!(!a.stream().same_stream(&b.stream()));
        let s = a.stream();
        assert!(s.same_stream(&s.clone()));
    }
}
