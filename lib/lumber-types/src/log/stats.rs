/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct LogSnapshot {
    pub io: LogIoSnapshot,
    pub drop: LogDropSnapshot,
}

#[derive(Default, Debug, Eq, PartialEq)]
pub struct LogIoSnapshot {
    pub total: u64,
    pub written: u64,
    pub size: u64,
}

#[derive(Default, Debug, Eq, PartialEq)]
pub struct LogDropSnapshot {
    pub format_failed: u64,
    pub channel_closed: u64,
    pub channel_overflow: u64,
    pub sink_unreachable: u64,
}

impl LogDropSnapshot {
    pub fn total(&self) -> u64 {
        self.format_failed + self.channel_closed + self.channel_overflow + self.sink_unreachable
    }
}

#[derive(Default)]
pub struct LogStats {
    pub io: LogIoStats,
    pub drop: LogDropStats,
}

impl LogStats {
    pub fn snapshot(&self) -> LogSnapshot {
        LogSnapshot {
            io: self.io.snapshot(),
            drop: self.drop.snapshot(),
        }
    }
}

#[derive(Default)]
pub struct LogIoStats {
    total: AtomicU64,
    written: AtomicU64,
    size: AtomicU64,
}

impl LogIoStats {
    pub fn snapshot(&self) -> LogIoSnapshot {
        LogIoSnapshot {
            total: self.total.load(Ordering::Relaxed),
            written: self.written.load(Ordering::Relaxed),
            size: self.size.load(Ordering::Relaxed),
        }
    }

    pub fn add_total(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_size(&self, size: usize) {
        self.size.fetch_add(size as u64, Ordering::Relaxed);
    }
}

#[derive(Default)]
pub struct LogDropStats {
    format_failed: AtomicU64,
    channel_closed: AtomicU64,
    channel_overflow: AtomicU64,
    sink_unreachable: AtomicU64,
}

impl LogDropStats {
    pub fn snapshot(&self) -> LogDropSnapshot {
        LogDropSnapshot {
            format_failed: self.format_failed.load(Ordering::Relaxed),
            channel_closed: self.channel_closed.load(Ordering::Relaxed),
            channel_overflow: self.channel_overflow.load(Ordering::Relaxed),
            sink_unreachable: self.sink_unreachable.load(Ordering::Relaxed),
        }
    }

    pub fn add_format_failed(&self) {
        self.format_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_channel_closed(&self) {
        self.channel_closed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_channel_overflow(&self) {
        self.channel_overflow.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_sink_unreachable(&self) {
        self.sink_unreachable.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_drop_stats() {
        let stats = LogDropStats::default();
        stats.add_format_failed();
        stats.add_channel_closed();
        stats.add_channel_overflow();
        stats.add_sink_unreachable();
        let snap = stats.snapshot();
        assert_eq!(
            snap,
            LogDropSnapshot {
                format_failed: 1,
                channel_closed: 1,
                channel_overflow: 1,
                sink_unreachable: 1
            }
        );
        assert_eq!(snap.total(), 4);
    }

    #[test]
    fn t_io_stats() {
        let stats = LogIoStats::default();
        stats.add_total();
        stats.add_written();
        stats.add_size(512);
        assert_eq!(
            stats.snapshot(),
            LogIoSnapshot {
                total: 1,
                written: 1,
                size: 512
            }
        )
    }
}
