/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

/// Parse a single yaml document from a string literal, for use in tests.
#[macro_export]
macro_rules! yaml_doc {
    ($content:expr) => {{
        let mut docs = yaml_rust::YamlLoader::load_from_str($content).unwrap();
        docs.pop().unwrap()
    }};
}
