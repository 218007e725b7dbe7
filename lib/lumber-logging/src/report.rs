/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{info, warn};
use slog::{Drain, Level, Never, OwnedKVList, Record};

/// Report appender io errors to the process log, sampled so a dead sink
/// cannot flood it. Terminal drain: errors stop here.
pub struct ReportIoError<D: Drain<Err = slog::Error, Ok = ()>> {
    appender_id: String,
    error_count: AtomicUsize,
    report_mask: usize,
    inner: D,
}

impl<D: Drain<Err = slog::Error, Ok = ()>> ReportIoError<D> {
    pub fn new(drain: D, appender_name: &str, error_report_mask: usize) -> Self {
        ReportIoError {
            appender_id: appender_name.to_string(),
            error_count: AtomicUsize::new(0),
            report_mask: error_report_mask,
            inner: drain,
        }
    }
}

impl<D: Drain<Err = slog::Error, Ok = ()>> Drain for ReportIoError<D> {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<(), Never> {
        match self.inner.log(record, logger_values) {
            Ok(_) => {
                let error_count = self.error_count.swap(0, Ordering::Relaxed);
                if error_count != 0 {
                    info!(
                        "appender {} back to work, lost {error_count} messages",
                        self.appender_id
                    );
                }
            }
            Err(e) => {
                let old_count = self.error_count.fetch_add(1, Ordering::Relaxed);
                match old_count {
                    0 | 1 => warn!("appender {} got io error: {e:?}", self.appender_id),
                    _ => {
                        if (old_count & self.report_mask) == 0 {
                            warn!(
                                "appender {} has seen {old_count} errors, latest io error: {e:?}",
                                self.appender_id
                            );
                        }
                    }
                }
            }
        }
        Ok(())
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        self.inner.is_enabled(level)
    }
}
