/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}
