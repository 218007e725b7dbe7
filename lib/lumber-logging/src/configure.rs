/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::sync::{Arc, Mutex};

use anyhow::Context;
use log::warn;

use lumber_types::log::{StatusEvent, StatusLevel};

use super::capture::StatusCapture;
use super::config::AppenderConfig;
use super::registry::StatsRegistry;
use super::runtime::LogRuntime;
use super::status::format_status_line;
use super::stream::{SharedStream, process_stderr};

/// Applies a declarative appender set to a runtime handle, routing
/// configuration-time status errors to a caller-supplied stream instead
/// of the runtime's own status printer.
///
/// A broken appender is not a broken configuration: the destination of a
/// file appender the process cannot write to is reported as a line on the
/// errors stream and the appender is left non-functional, while
/// `configure` itself completes.
pub struct LoggingConfigurator {
    runtime: Arc<LogRuntime>,
    errors_stream: SharedStream,
    appenders: Vec<AppenderConfig>,
    // configure/stop are serialized per instance
    op_lock: Mutex<()>,
}

impl Default for LoggingConfigurator {
    fn default() -> Self {
        LoggingConfigurator::new()
    }
}

impl LoggingConfigurator {
    /// Bind the process-wide default runtime handle and the process
    /// standard error stream.
    pub fn new() -> Self {
        LoggingConfigurator::with_runtime(
            Arc::clone(LogRuntime::process_default()),
            process_stderr(),
        )
    }

    pub fn with_runtime(runtime: Arc<LogRuntime>, errors_stream: SharedStream) -> Self {
        LoggingConfigurator {
            runtime,
            errors_stream,
            appenders: Vec::new(),
            op_lock: Mutex::new(()),
        }
    }

    pub fn runtime(&self) -> &Arc<LogRuntime> {
        &self.runtime
    }

    pub fn errors_stream(&self) -> SharedStream {
        self.errors_stream.clone()
    }

    /// Replace the pending appender sequence. No effect on the runtime
    /// until `configure` is called.
    pub fn set_appenders(&mut self, appenders: Vec<AppenderConfig>) {
        self.appenders = appenders;
    }

    pub fn appenders(&self) -> &[AppenderConfig] {
        &self.appenders
    }

    /// Apply the pending appenders to the bound runtime handle, scoped
    /// under `logger_name`, with the handle's status channel captured for
    /// the duration. Once the runtime is done, every captured Error event
    /// becomes one line on the errors stream; lower levels are discarded.
    ///
    /// Appender-level problems never surface as `Err`: the only error is
    /// the attempt to capture a status channel that is already captured.
    pub fn configure(&self, registry: &StatsRegistry, logger_name: &str) -> anyhow::Result<()> {
        let _op = self.op_lock.lock().unwrap();

        let capture = StatusCapture::begin(&self.runtime)
            .context("failed to capture the runtime status channel")?;
        self.runtime
            .apply_appenders(&self.appenders, logger_name, registry);
        let events = capture.finish();

        self.report_errors(&events);
        Ok(())
    }

    fn report_errors(&self, events: &[StatusEvent]) {
        for event in events.iter().filter(|ev| ev.level >= StatusLevel::Error) {
            if let Err(e) = self.errors_stream.write_line(&format_status_line(event)) {
                warn!("failed to report a configuration error: {e}");
            }
        }
    }

    /// Detach the configured appenders from the bound runtime handle.
    /// Safe to call repeatedly, and before `configure`.
    pub fn stop(&self) {
        let _op = self.op_lock.lock().unwrap();
        self.runtime.detach_appenders();
    }
}
