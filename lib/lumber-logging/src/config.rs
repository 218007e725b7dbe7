/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::path::Path;

use anyhow::{Context, anyhow};
use yaml_rust::Yaml;

use lumber_filelog::FileLogConfig;

const DEFAULT_CHANNEL_SIZE: usize = 4096;
const IO_ERROR_SAMPLING_OFFSET_MAX: usize = 16;
const IO_ERROR_SAMPLING_OFFSET_DEFAULT: usize = 10;

#[derive(Clone)]
pub enum AppenderDriver {
    Discard,
    Stdout,
    Stderr,
    File(FileLogConfig),
}

/// Declarative description of one log sink. Pure data: nothing happens
/// until a runtime handle is asked to apply a sequence of these.
#[derive(Clone)]
pub struct AppenderConfig {
    pub(crate) driver: AppenderDriver,
    pub(crate) async_channel_size: usize,
    pub(crate) async_thread_number: usize,
    pub(crate) io_err_sampling_mask: usize,
}

impl AppenderConfig {
    fn with_driver(driver: AppenderDriver) -> Self {
        AppenderConfig {
            driver,
            async_channel_size: DEFAULT_CHANNEL_SIZE,
            async_thread_number: 1,
            io_err_sampling_mask: (1 << IO_ERROR_SAMPLING_OFFSET_DEFAULT) - 1,
        }
    }

    pub fn new_discard() -> Self {
        Self::with_driver(AppenderDriver::Discard)
    }

    pub fn new_stdout() -> Self {
        Self::with_driver(AppenderDriver::Stdout)
    }

    pub fn new_stderr() -> Self {
        Self::with_driver(AppenderDriver::Stderr)
    }

    pub fn new_file(config: FileLogConfig) -> Self {
        Self::with_driver(AppenderDriver::File(config))
    }

    pub fn driver_name(&self) -> &'static str {
        match &self.driver {
            AppenderDriver::Discard => "discard",
            AppenderDriver::Stdout => "stdout",
            AppenderDriver::Stderr => "stderr",
            AppenderDriver::File(_) => "file",
        }
    }

    pub fn parse(v: &Yaml, conf_dir: &Path) -> anyhow::Result<AppenderConfig> {
        match v {
            Yaml::String(s) => match s.as_str() {
                "discard" => Ok(AppenderConfig::new_discard()),
                "stdout" => Ok(AppenderConfig::new_stdout()),
                "stderr" => Ok(AppenderConfig::new_stderr()),
                _ => Err(anyhow!("invalid appender config")),
            },
            Yaml::Hash(map) => {
                let mut config = AppenderConfig::new_discard();
                lumber_yaml::foreach_kv(map, |k, v| match lumber_yaml::key::normalize(k).as_str() {
                    "discard" => {
                        config.driver = AppenderDriver::Discard;
                        Ok(())
                    }
                    "stdout" => {
                        config.driver = AppenderDriver::Stdout;
                        Ok(())
                    }
                    "stderr" => {
                        config.driver = AppenderDriver::Stderr;
                        Ok(())
                    }
                    "file" => {
                        let file_config = as_file_log_config(v, conf_dir)
                            .context("invalid file appender config")?;
                        config.driver = AppenderDriver::File(file_config);
                        Ok(())
                    }
                    "async_channel_size" | "channel_size" => {
                        let channel_size = lumber_yaml::value::as_usize(v)
                            .context(format!("invalid usize value for key {k}"))?;
                        config.async_channel_size = channel_size;
                        Ok(())
                    }
                    "async_thread_number" | "thread_number" => {
                        let thread_number = lumber_yaml::value::as_usize(v)
                            .context(format!("invalid usize value for key {k}"))?;
                        config.async_thread_number = thread_number;
                        Ok(())
                    }
                    "io_error_sampling_offset" => {
                        let offset = lumber_yaml::value::as_usize(v)
                            .context(format!("invalid value for key {k}"))?;
                        if offset > IO_ERROR_SAMPLING_OFFSET_MAX {
                            Err(anyhow!(
                                "value for {k} should be less than {IO_ERROR_SAMPLING_OFFSET_MAX}"
                            ))
                        } else {
                            config.io_err_sampling_mask = (1 << offset) - 1;
                            Ok(())
                        }
                    }
                    _ => Err(anyhow!("invalid key {k}")),
                })?;
                Ok(config)
            }
            _ => Err(anyhow!("invalid value type")),
        }
    }

    /// Parse an ordered appender sequence. A single string or hash is
    /// accepted as a one-element sequence, a missing value as an empty
    /// one.
    pub fn parse_list(v: &Yaml, conf_dir: &Path) -> anyhow::Result<Vec<AppenderConfig>> {
        match v {
            Yaml::Array(seq) => {
                let mut configs = Vec::with_capacity(seq.len());
                for (i, v) in seq.iter().enumerate() {
                    let config = AppenderConfig::parse(v, conf_dir)
                        .context(format!("invalid appender config at position {i}"))?;
                    configs.push(config);
                }
                Ok(configs)
            }
            Yaml::Null => Ok(Vec::new()),
            _ => Ok(vec![AppenderConfig::parse(v, conf_dir)?]),
        }
    }
}

fn as_file_log_config(v: &Yaml, conf_dir: &Path) -> anyhow::Result<FileLogConfig> {
    match v {
        Yaml::String(_) => {
            let path = lumber_yaml::value::as_dst_file_path(v, conf_dir)?;
            Ok(FileLogConfig::new(path))
        }
        Yaml::Hash(map) => {
            let path_v = lumber_yaml::hash_get_required(map, "path")?;
            let path = lumber_yaml::value::as_dst_file_path(path_v, conf_dir)
                .context("invalid value for key path")?;
            let mut config = FileLogConfig::new(path);
            lumber_yaml::foreach_kv(map, |k, v| match lumber_yaml::key::normalize(k).as_str() {
                "path" => Ok(()),
                "archive" => {
                    let archive = lumber_yaml::value::as_bool(v)
                        .context(format!("invalid bool value for key {k}"))?;
                    config.set_archive(archive);
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        }
        _ => Err(anyhow!("invalid value type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumber_yaml::yaml_doc;

    #[test]
    fn parse_string_shortcuts() {
        let conf_dir = Path::new("/etc/app");
        let config = AppenderConfig::parse(&yaml_doc!("discard"), conf_dir).unwrap();
        assert_eq!(config.driver_name(), "discard");
        let config = AppenderConfig::parse(&yaml_doc!("stdout"), conf_dir).unwrap();
        assert_eq!(config.driver_name(), "stdout");
        let config = AppenderConfig::parse(&yaml_doc!("stderr"), conf_dir).unwrap();
        assert_eq!(config.driver_name(), "stderr");
        assert!(AppenderConfig::parse(&yaml_doc!("pigeon"), conf_dir).is_err());
    }

    #[test]
    fn parse_file_hash() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("file:\n  path: /var/log/app.log\n  archive: true");
        let config = AppenderConfig::parse(&v, conf_dir).unwrap();
        assert_eq!(config.driver_name(), "file");
        match &config.driver {
            AppenderDriver::File(f) => {
                assert_eq!(f.path(), Path::new("/var/log/app.log"));
                assert!(f.archive());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_file_relative_path() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("file: logs/app.log");
        let config = AppenderConfig::parse(&v, conf_dir).unwrap();
        match &config.driver {
            AppenderDriver::File(f) => {
                assert_eq!(f.path(), Path::new("/etc/app/logs/app.log"));
                assert!(!f.archive());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_file_requires_path() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("file:\n  archive: true");
        assert!(AppenderConfig::parse(&v, conf_dir).is_err());
    }

    #[test]
    fn parse_channel_keys() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("stdout: {}\nchannel_size: 128\nthread_number: 2");
        let config = AppenderConfig::parse(&v, conf_dir).unwrap();
        assert_eq!(config.driver_name(), "stdout");
        assert_eq!(config.async_channel_size, 128);
        assert_eq!(config.async_thread_number, 2);
    }

    #[test]
    fn parse_sampling_offset_bound() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("stdout: {}\nio_error_sampling_offset: 4");
        let config = AppenderConfig::parse(&v, conf_dir).unwrap();
        assert_eq!(config.io_err_sampling_mask, (1 << 4) - 1);

        let v = yaml_doc!("stdout: {}\nio_error_sampling_offset: 64");
        assert!(AppenderConfig::parse(&v, conf_dir).is_err());
    }

    #[test]
    fn parse_invalid_key() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("carrier: pigeon");
        assert!(AppenderConfig::parse(&v, conf_dir).is_err());
    }

    #[test]
    fn parse_list_keeps_order() {
        let conf_dir = Path::new("/etc/app");
        let v = yaml_doc!("- stdout\n- file: /var/log/app.log\n- discard");
        let configs = AppenderConfig::parse_list(&v, conf_dir).unwrap();
        let names: Vec<&str> = configs.iter().map(|c| c.driver_name()).collect();
        assert_eq!(names, vec!["stdout", "file", "discard"]);
    }

    #[test]
    fn parse_list_single_value() {
        let conf_dir = Path::new("/etc/app");
        let configs = AppenderConfig::parse_list(&yaml_doc!("stderr"), conf_dir).unwrap();
        assert_eq!(configs.len(), 1);
        let configs = AppenderConfig::parse_list(&yaml_doc!("~"), conf_dir).unwrap();
        assert!(configs.is_empty());
    }
}
