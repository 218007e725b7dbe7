/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::str::FromStr;

use anyhow::anyhow;
use yaml_rust::Yaml;

pub fn as_bool(v: &Yaml) -> anyhow::Result<bool> {
    match v {
        Yaml::String(s) => match s.to_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(true),
            "off" | "false" | "no" | "0" => Ok(false),
            _ => Err(anyhow!("invalid yaml string value for 'bool': {s}")),
        },
        Yaml::Boolean(value) => Ok(*value),
        Yaml::Integer(i) => Ok(*i != 0),
        _ => Err(anyhow!(
            "yaml value type for 'bool' should be 'boolean' / 'string' / 'integer'"
        )),
    }
}

pub fn as_usize(v: &Yaml) -> anyhow::Result<usize> {
    match v {
        Yaml::String(s) => Ok(usize::from_str(s)?),
        Yaml::Integer(i) => Ok(usize::try_from(*i)?),
        _ => Err(anyhow!(
            "yaml value type for 'usize' should be 'string' or 'integer'"
        )),
    }
}

pub fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!(
            "yaml value type for string should be 'string' / 'integer' / 'real'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_bool() {
        assert!(as_bool(&yaml_doc!("on")).unwrap());
        assert!(as_bool(&yaml_doc!("true")).unwrap());
        assert!(!as_bool(&yaml_doc!("false")).unwrap());
        assert!(!as_bool(&yaml_doc!("0")).unwrap());
        assert!(as_bool(&yaml_doc!("[]")).is_err());
        assert!(as_bool(&yaml_doc!("maybe")).is_err());
    }

    #[test]
    fn t_usize() {
        assert_eq!(as_usize(&yaml_doc!("4096")).unwrap(), 4096);
        assert!(as_usize(&yaml_doc!("-1")).is_err());
        assert!(as_usize(&yaml_doc!("[]")).is_err());
    }

    #[test]
    fn t_string() {
        assert_eq!(as_string(&yaml_doc!("abc")).unwrap(), "abc");
        assert_eq!(as_string(&yaml_doc!("42")).unwrap(), "42");
        assert!(as_string(&yaml_doc!("[a, b]")).is_err());
    }
}
