/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use anyhow::{Context, anyhow};
use yaml_rust::{Yaml, yaml};

pub fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

pub fn get_required<'a>(map: &'a yaml::Hash, k: &str) -> anyhow::Result<&'a Yaml> {
    let key = Yaml::String(k.to_owned());
    match map.get(&key) {
        Some(v) => Ok(v),
        None => Err(anyhow!("no required key {k} found in this map")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreach_kv_ok() {
        let yaml = yaml_doc!("path: /tmp/a.log\narchive: false");
        let hash = yaml.as_hash().unwrap();
        let mut keys = Vec::new();
        let res = foreach_kv(hash, |k, _| {
            keys.push(k.to_owned());
            Ok(())
        });
        assert!(res.is_ok());
        assert_eq!(keys, vec!["path".to_string(), "archive".to_string()]);
    }

    #[test]
    fn foreach_kv_err() {
        let yaml = yaml_doc!("123: 1");
        let hash = yaml.as_hash().unwrap();
        assert!(foreach_kv(hash, |_, _| Ok(())).is_err());

        let yaml = yaml_doc!("a: 1");
        let hash = yaml.as_hash().unwrap();
        assert!(foreach_kv(hash, |k, _| Err(anyhow!("error at {k}"))).is_err());
    }

    #[test]
    fn get_required_ok() {
        let yaml = yaml_doc!("path: /tmp/a.log");
        let hash = yaml.as_hash().unwrap();
        assert_eq!(
            get_required(hash, "path").unwrap(),
            &Yaml::String("/tmp/a.log".to_string())
        );
    }

    #[test]
    fn get_required_err() {
        let yaml = yaml_doc!("path: /tmp/a.log");
        let hash = yaml.as_hash().unwrap();
        assert!(get_required(hash, "missing").is_err());
    }
}
