/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::fmt::Arguments;

use slog::{KV, Key, OwnedKVList, Record};

use lumber_types::log::AsyncLogFormatter;

use super::FileLogValue;

#[derive(Default)]
pub struct FileLogFormatter {}

impl FileLogFormatter {
    pub(crate) fn new() -> Self {
        FileLogFormatter {}
    }
}

impl AsyncLogFormatter<FileLogValue> for FileLogFormatter {
    fn format_slog(
        &self,
        record: &Record,
        logger_values: &OwnedKVList,
    ) -> Result<FileLogValue, slog::Error> {
        let mut kv_formatter = KvFormatter { pairs: Vec::new() };

        logger_values.serialize(record, &mut kv_formatter)?;
        record.kv().serialize(record, &mut kv_formatter)?;

        Ok(FileLogValue {
            level: record.level(),
            message: record.msg().to_string(),
            kv_pairs: kv_formatter.pairs,
        })
    }
}

struct KvFormatter {
    pairs: Vec<(String, String)>,
}

impl KvFormatter {
    fn append(&mut self, key: Key, value: String) {
        self.pairs.push((key.to_string(), value));
    }
}

impl slog::Serializer for KvFormatter {
    fn emit_arguments(&mut self, key: Key, value: &Arguments) -> slog::Result {
        self.append(key, std::fmt::format(*value));
        Ok(())
    }

    fn emit_str(&mut self, key: Key, value: &str) -> slog::Result {
        self.append(key, value.to_string());
        Ok(())
    }

    fn emit_usize(&mut self, key: Key, value: usize) -> slog::Result {
        let mut buffer = itoa::Buffer::new();
        self.append(key, buffer.format(value).to_string());
        Ok(())
    }

    fn emit_u64(&mut self, key: Key, value: u64) -> slog::Result {
        let mut buffer = itoa::Buffer::new();
        self.append(key, buffer.format(value).to_string());
        Ok(())
    }

    fn emit_i64(&mut self, key: Key, value: i64) -> slog::Result {
        let mut buffer = itoa::Buffer::new();
        self.append(key, buffer.format(value).to_string());
        Ok(())
    }

    fn emit_f64(&mut self, key: Key, value: f64) -> slog::Result {
        let mut buffer = ryu::Buffer::new();
        self.append(key, buffer.format(value).to_string());
        Ok(())
    }

    fn emit_bool(&mut self, key: Key, value: bool) -> slog::Result {
        self.append(key, if value { "true" } else { "false" }.to_string());
        Ok(())
    }
}
