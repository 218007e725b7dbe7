/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::anyhow;
use yaml_rust::Yaml;

/// Parse a destination file path. Relative paths are resolved against
/// `lookup_dir`. The path is not required to exist: whether it can be
/// created is for the writer that opens it to find out.
pub fn as_dst_file_path(v: &Yaml, lookup_dir: &Path) -> anyhow::Result<PathBuf> {
    if let Yaml::String(path) = v {
        let path = PathBuf::from_str(path).map_err(|e| anyhow!("invalid path: {e:?}"))?;
        if path.as_os_str().is_empty() {
            return Err(anyhow!("empty path value"));
        }
        if path.is_absolute() {
            Ok(path)
        } else {
            let mut abs_path = lookup_dir.to_path_buf();
            abs_path.push(path);
            Ok(abs_path)
        }
    } else {
        Err(anyhow!("yaml value type for path should be 'string'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_kept() {
        let v = yaml_doc!("/var/log/app.log");
        let path = as_dst_file_path(&v, Path::new("/etc/app")).unwrap();
        assert_eq!(path, PathBuf::from("/var/log/app.log"));
    }

    #[test]
    fn relative_resolved() {
        let v = yaml_doc!("logs/app.log");
        let path = as_dst_file_path(&v, Path::new("/etc/app")).unwrap();
        assert_eq!(path, PathBuf::from("/etc/app/logs/app.log"));
    }

    #[test]
    fn invalid_value() {
        assert!(as_dst_file_path(&yaml_doc!("[]"), Path::new("/")).is_err());
        assert!(as_dst_file_path(&yaml_doc!("''"), Path::new("/")).is_err());
    }
}
