/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use flume::Receiver;
use slog::Level;

use lumber_types::log::{AsyncLogConfig, AsyncLogger, LogStats};

mod format;
use format::FileLogFormatter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Destination config for a file appender. Lives here so that the core
/// crate carries no filesystem knowledge of its own.
#[derive(Clone, Debug)]
pub struct FileLogConfig {
    path: PathBuf,
    archive: bool,
}

impl FileLogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLogConfig {
            path: path.into(),
            archive: false,
        }
    }

    pub fn set_archive(&mut self, archive: bool) {
        self.archive = archive;
    }

    pub fn archive(&self) -> bool {
        self.archive
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the destination for append, creating it if missing. This is
    /// the writability check: a directory the process may not write to, or
    /// a path routed through a non-directory, fails right here with the
    /// operating system's error.
    fn open(&self) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

pub fn new_async_logger(
    async_conf: &AsyncLogConfig,
    config: &FileLogConfig,
) -> io::Result<AsyncLogger<FileLogValue, FileLogFormatter>> {
    let file = config.open()?;

    let (sender, receiver) = flume::bounded::<FileLogValue>(async_conf.channel_capacity);

    let stats = Arc::new(LogStats::default());

    let io_thread = AsyncIoThread {
        receiver,
        stats: Arc::clone(&stats),
    };

    let _detached_thread = std::thread::Builder::new()
        .name(async_conf.thread_name.clone())
        .spawn(move || io_thread.run(file));

    Ok(AsyncLogger::new(sender, FileLogFormatter::new(), stats))
}

pub struct FileLogValue {
    level: Level,
    message: String,
    kv_pairs: Vec<(String, String)>,
}

impl FileLogValue {
    fn message_str(&self) -> &str {
        if self.message.is_empty() {
            "()"
        } else {
            &self.message
        }
    }
}

struct AsyncIoThread {
    receiver: Receiver<FileLogValue>,
    stats: Arc<LogStats>,
}

impl AsyncIoThread {
    fn run(self, file: File) {
        let mut io = BufWriter::new(file);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Ok(v) = self.receiver.recv() {
            buf.clear();
            let _ = self.write_line(&mut buf, v);
            self.write_buf(&mut io, &buf);

            while let Ok(v) = self.receiver.try_recv() {
                buf.clear();
                let _ = self.write_line(&mut buf, v);
                self.write_buf(&mut io, &buf);
            }

            let _ = io.flush();
        }
        let _ = io.flush();
    }

    fn write_line<IO: Write>(&self, io: &mut IO, v: FileLogValue) -> io::Result<()> {
        let datetime = Local::now();
        write!(io, "{}", datetime.format(TIME_FORMAT))?;
        write!(io, " {}", v.level)?;
        for (k, val) in &v.kv_pairs {
            write!(io, " {k}: {val},")?;
        }
        write!(io, " {}", v.message_str())?;
        writeln!(io)?;
        Ok(())
    }

    fn write_buf<IO: Write>(&self, io: &mut IO, buf: &[u8]) {
        match io.write_all(buf) {
            Ok(_) => {
                self.stats.io.add_written();
                self.stats.io.add_size(buf.len());
            }
            Err(_) => self.stats.drop.add_sink_unreachable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileLogConfig::new(dir.path().join("app.log"));
        assert!(config.open().is_ok());
        assert!(config.path().exists());
    }

    #[test]
    fn open_fails_through_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let config = FileLogConfig::new(blocker.join("app.log"));
        assert!(config.open().is_err());
    }
}
