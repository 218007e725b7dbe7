/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

mod stream;
pub use stream::{SharedBuffer, SharedStream, process_stderr, process_stdout};

mod status;

mod capture;
pub use capture::{StatusCapture, StatusCaptureError};

mod runtime;
pub use runtime::LogRuntime;

mod config;
pub use config::{AppenderConfig, AppenderDriver};
pub use lumber_filelog::FileLogConfig;

mod report;
pub use report::ReportIoError;

mod registry;
pub use registry::{LoggerStats, StatsRegistry};

mod configure;
pub use configure::LoggingConfigurator;
