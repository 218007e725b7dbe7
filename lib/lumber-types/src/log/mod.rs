/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

mod stats;
pub use stats::{LogDropSnapshot, LogDropStats, LogIoSnapshot, LogIoStats, LogSnapshot, LogStats};

mod async_log;
pub use async_log::{AsyncLogConfig, AsyncLogFormatter, AsyncLogger};

mod status;
pub use status::{StatusEvent, StatusLevel};
