/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::sync::{Arc, Mutex};

use log::warn;
use once_cell::sync::Lazy;
use slog::{Logger, slog_o};

use lumber_types::log::{AsyncLogConfig, LogStats, StatusLevel};

use super::config::{AppenderConfig, AppenderDriver};
use super::registry::{LoggerStats, StatsRegistry};
use super::report::ReportIoError;
use super::status::StatusChannel;
use super::stream::SharedStream;

static PROCESS_RUNTIME: Lazy<Arc<LogRuntime>> = Lazy::new(|| Arc::new(LogRuntime::new()));

struct AttachedAppender {
    name: String,
    logger: Logger,
    stats: Option<Arc<LogStats>>,
}

/// A logging runtime instance: the set of currently attached appenders
/// plus the status channel that reports on their wiring. One process-wide
/// default instance exists, explicit instances can be created freely and
/// never touch the default one.
pub struct LogRuntime {
    appenders: Mutex<Vec<AttachedAppender>>,
    status: StatusChannel,
}

impl Default for LogRuntime {
    fn default() -> Self {
        LogRuntime::new()
    }
}

impl LogRuntime {
    pub fn new() -> Self {
        LogRuntime {
            appenders: Mutex::new(Vec::new()),
            status: StatusChannel::new(),
        }
    }

    /// The process-wide default runtime handle. Initialized on first use,
    /// the identity never changes afterwards.
    pub fn process_default() -> &'static Arc<LogRuntime> {
        Lazy::force(&PROCESS_RUNTIME)
    }

    pub(crate) fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Current target stream of the default status printer.
    pub fn status_target(&self) -> SharedStream {
        self.status.target()
    }

    pub fn set_status_target(&self, target: SharedStream) {
        self.status.set_target(target)
    }

    /// Replace the attached appender set with one built from `configs`,
    /// scoped under `logger_name`. Never fails: an appender whose
    /// destination cannot be opened is reported on the status channel and
    /// skipped, the remaining appenders still attach. Stats of each
    /// attached appender are registered in `registry`.
    pub fn apply_appenders(
        &self,
        configs: &[AppenderConfig],
        logger_name: &str,
        registry: &StatsRegistry,
    ) {
        self.detach_appenders();

        let mut attached = Vec::with_capacity(configs.len());
        for (index, config) in configs.iter().enumerate() {
            let name = format!("{logger_name}.{}.{index}", config.driver_name());
            if let Some(appender) = self.build_appender(config, &name, logger_name) {
                if let Some(stats) = &appender.stats {
                    let logger_stats = Arc::new(LoggerStats::new(&name, Arc::clone(stats)));
                    registry.add(name.clone(), logger_stats);
                }
                self.status.emit(
                    StatusLevel::Info,
                    format!("attached {} appender {name}", config.driver_name()),
                );
                attached.push(appender);
            }
        }

        let mut appenders = self.appenders.lock().unwrap();
        *appenders = attached;
    }

    fn build_appender(
        &self,
        config: &AppenderConfig,
        name: &str,
        logger_name: &str,
    ) -> Option<AttachedAppender> {
        let async_conf = AsyncLogConfig {
            channel_capacity: config.async_channel_size,
            thread_number: config.async_thread_number,
            thread_name: name.to_string(),
        };
        let common_values = slog_o!(
            "logger" => logger_name.to_string(),
            "pid" => std::process::id(),
        );

        match &config.driver {
            AppenderDriver::Discard => Some(AttachedAppender {
                name: name.to_string(),
                logger: Logger::root(slog::Discard, common_values),
                stats: None,
            }),
            AppenderDriver::Stdout | AppenderDriver::Stderr => {
                let use_stdout = matches!(config.driver, AppenderDriver::Stdout);
                let drain = lumber_stdlog::new_async_logger(&async_conf, false, use_stdout);
                let stats = drain.get_stats();
                let drain = ReportIoError::new(drain, name, config.io_err_sampling_mask);
                Some(AttachedAppender {
                    name: name.to_string(),
                    logger: Logger::root(drain, common_values),
                    stats: Some(stats),
                })
            }
            AppenderDriver::File(file_config) => {
                if file_config.archive() {
                    self.status.emit(
                        StatusLevel::Warning,
                        format!(
                            "archive is not supported for log file {}, writing in place",
                            file_config.path().display()
                        ),
                    );
                }
                match lumber_filelog::new_async_logger(&async_conf, file_config) {
                    Ok(drain) => {
                        let stats = drain.get_stats();
                        let drain = ReportIoError::new(drain, name, config.io_err_sampling_mask);
                        Some(AttachedAppender {
                            name: name.to_string(),
                            logger: Logger::root(drain, common_values),
                            stats: Some(stats),
                        })
                    }
                    Err(e) => {
                        self.status.emit(
                            StatusLevel::Error,
                            format!(
                                "failed to open log file {}: {e}",
                                file_config.path().display()
                            ),
                        );
                        None
                    }
                }
            }
        }
    }

    /// Drop every attached appender. The drains close their channels and
    /// the detached io threads exit on their own. Problems found on the
    /// way out are reported to the process log, they never abort the
    /// remaining cleanup.
    pub fn detach_appenders(&self) {
        let mut appenders = self.appenders.lock().unwrap();
        for appender in appenders.drain(..) {
            if let Some(stats) = &appender.stats {
                let dropped = stats.snapshot().drop.total();
                if dropped > 0 {
                    warn!(
                        "appender {} dropped {dropped} messages before detach",
                        appender.name
                    );
                }
            }
        }
    }

    /// Record logger of one attached appender.
    pub fn logger(&self, name: &str) -> Option<Logger> {
        let appenders = self.appenders.lock().unwrap();
        appenders
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.logger.clone())
    }

    pub fn appender_names(&self) -> Vec<String> {
        let appenders = self.appenders.lock().unwrap();
        appenders.iter().map(|a| a.name.clone()).collect()
    }
}
