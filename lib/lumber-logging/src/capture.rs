/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::sync::Arc;

use thiserror::Error;

use lumber_types::log::StatusEvent;

use super::runtime::LogRuntime;

#[derive(Debug, Error)]
pub enum StatusCaptureError {
    #[error("a status capture is already active on this runtime handle")]
    AlreadyActive,
}

/// Scoped redirection of a runtime handle's status channel into an
/// internal buffer. `finish` hands the buffered events back; dropping the
/// guard without finishing restores the channel and discards the buffer,
/// so the redirection cannot outlive an error path.
pub struct StatusCapture {
    runtime: Arc<LogRuntime>,
    finished: bool,
}

impl StatusCapture {
    pub fn begin(runtime: &Arc<LogRuntime>) -> Result<StatusCapture, StatusCaptureError> {
        runtime.status().begin_capture()?;
        Ok(StatusCapture {
            runtime: Arc::clone(runtime),
            finished: false,
        })
    }

    pub fn finish(mut self) -> Vec<StatusEvent> {
        self.finished = true;
        self.runtime.status().end_capture()
    }
}

impl Drop for StatusCapture {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.runtime.status().end_capture();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::process_stdout;
    use lumber_types::log::StatusLevel;

    #[test]
    fn captures_are_per_handle() {
        let one = Arc::new(LogRuntime::new());
        let two = Arc::new(LogRuntime::new());
        let guard_one = StatusCapture::begin(&one).unwrap();
        let guard_two = StatusCapture::begin(&two).unwrap();
        assert!(guard_one.finish().is_empty());
        assert!(guard_two.finish().is_empty());
    }

    #[test]
    fn second_begin_on_same_handle_fails() {
        let runtime = Arc::new(LogRuntime::new());
        let _guard = StatusCapture::begin(&runtime).unwrap();
        assert!(matches!(
            StatusCapture::begin(&runtime),
            Err(StatusCaptureError::AlreadyActive)
        ));
    }

    #[test]
    fn drop_restores_without_finish() {
        let runtime = Arc::new(LogRuntime::new());
        {
            let _guard = StatusCapture::begin(&runtime).unwrap();
            runtime
                .status()
                .emit(StatusLevel::Error, "discarded".to_string());
        }
        assert!(runtime.status_target().same_stream(&process_stdout()));
        // the handle is capturable again
        let guard = StatusCapture::begin(&runtime).unwrap();
        assert!(guard.finish().is_empty());
    }
}
