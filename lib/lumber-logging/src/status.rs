/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::mem;
use std::sync::Mutex;

use lumber_types::log::{StatusEvent, StatusLevel};

use super::capture::StatusCaptureError;
use super::stream::{SharedStream, process_stdout};

pub(crate) fn format_status_line(event: &StatusEvent) -> String {
    format!(
        "{} {} {}",
        event.time.format("%Y-%m-%d %H:%M:%S%.3f"),
        event.level,
        event.message
    )
}

/// Default receiver of status events: prints Warning and Error events as
/// lines to a swappable target stream. Info events are startup noise and
/// are suppressed.
struct StatusPrinter {
    target: SharedStream,
}

impl StatusPrinter {
    fn new() -> Self {
        StatusPrinter {
            target: process_stdout(),
        }
    }

    fn print(&self, event: &StatusEvent) {
        if event.level >= StatusLevel::Warning {
            let _ = self.target.write_line(&format_status_line(event));
        }
    }
}

enum StatusReceiver {
    Printer(StatusPrinter),
    Capture(Vec<StatusEvent>),
}

struct StatusState {
    receiver: StatusReceiver,
    // receiver saved at begin_capture, present exactly while capturing
    saved: Option<StatusReceiver>,
}

/// Per-runtime-handle status channel. All transitions run under one lock
/// so concurrent captures on the same handle cannot interleave swap and
/// restore.
pub(crate) struct StatusChannel {
    state: Mutex<StatusState>,
}

impl StatusChannel {
    pub(crate) fn new() -> Self {
        StatusChannel {
            state: Mutex::new(StatusState {
                receiver: StatusReceiver::Printer(StatusPrinter::new()),
                saved: None,
            }),
        }
    }

    pub(crate) fn emit(&self, level: StatusLevel, message: String) {
        let event = StatusEvent::new(level, message);
        let mut state = self.state.lock().unwrap();
        match &mut state.receiver {
            StatusReceiver::Printer(printer) => printer.print(&event),
            StatusReceiver::Capture(buffer) => buffer.push(event),
        }
    }

    pub(crate) fn begin_capture(&self) -> Result<(), StatusCaptureError> {
        let mut state = self.state.lock().unwrap();
        if state.saved.is_some() {
            return Err(StatusCaptureError::AlreadyActive);
        }
        state.saved = Some(mem::replace(
            &mut state.receiver,
            StatusReceiver::Capture(Vec::new()),
        ));
        Ok(())
    }

    /// Restore the saved receiver and hand back everything captured since
    /// `begin_capture`, in emission order. The printer target is reset to
    /// the process standard output, captured status must never keep a
    /// stale redirection alive. Returns an empty sequence when no capture
    /// is active.
    pub(crate) fn end_capture(&self) -> Vec<StatusEvent> {
        let mut state = self.state.lock().unwrap();
        let Some(saved) = state.saved.take() else {
            return Vec::new();
        };
        let captured = mem::replace(&mut state.receiver, saved);
        if let StatusReceiver::Printer(printer) = &mut state.receiver {
            printer.target = process_stdout();
        }
        match captured {
            StatusReceiver::Capture(events) => events,
            StatusReceiver::Printer(_) => Vec::new(),
        }
    }

    pub(crate) fn target(&self) -> SharedStream {
        let state = self.state.lock().unwrap();
        match (&state.receiver, &state.saved) {
            (StatusReceiver::Printer(printer), _) => printer.target.clone(),
            (_, Some(StatusReceiver::Printer(printer))) => printer.target.clone(),
            _ => process_stdout(),
        }
    }

    pub(crate) fn set_target(&self, target: SharedStream) {
        let mut state = self.state.lock().unwrap();
        let state = &mut *state;
        match (&mut state.receiver, &mut state.saved) {
            (StatusReceiver::Printer(printer), _) => printer.target = target,
            (_, Some(StatusReceiver::Printer(printer))) => printer.target = target,
            _ => {}
        }
    }
}
