/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

mod primary;
pub use primary::{as_bool, as_string, as_usize};

mod fs;
pub use fs::as_dst_file_path;
