/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use foldhash::fast::FixedState;

use lumber_types::log::LogStats;
use lumber_types::stats::StatId;

pub struct LoggerStats {
    id: StatId,
    name: String,
    inner: Arc<LogStats>,
}

impl LoggerStats {
    pub fn new(name: &str, inner: Arc<LogStats>) -> Self {
        LoggerStats {
            id: StatId::new_unique(),
            name: name.to_string(),
            inner,
        }
    }

    pub fn stat_id(&self) -> StatId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &Arc<LogStats> {
        &self.inner
    }
}

/// Caller-owned registry of appender stats. Passed through `configure`
/// into the runtime, which records each attached appender here; the
/// configurator itself never looks inside.
#[derive(Default)]
pub struct StatsRegistry {
    inner: Mutex<HashMap<String, Arc<LoggerStats>, FixedState>>,
}

impl StatsRegistry {
    pub fn new() -> Self {
        StatsRegistry {
            inner: Mutex::new(HashMap::with_hasher(FixedState::with_seed(0))),
        }
    }

    pub fn add(&self, name: String, stats: Arc<LoggerStats>) {
        let mut ht = self.inner.lock().unwrap();
        let _ = ht.insert(name, stats);
    }

    pub fn get(&self, name: &str) -> Option<Arc<LoggerStats>> {
        let ht = self.inner.lock().unwrap();
        ht.get(name).cloned()
    }

    pub fn foreach_stats<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Arc<LoggerStats>),
    {
        let ht = self.inner.lock().unwrap();
        for (name, stats) in ht.iter() {
            f(name, stats)
        }
    }

    /// Drop entries whose appender is gone. The registry keeps the last
    /// reference alive until callers had a chance to read the final
    /// counters, so eviction is explicit.
    pub fn retain_active(&self) {
        let mut ht = self.inner.lock().unwrap();
        ht.retain(|_, stats| Arc::strong_count(stats.inner()) > 1);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_get() {
        let registry = StatsRegistry::new();
        assert!(registry.is_empty());

        let stats = Arc::new(LogStats::default());
        registry.add(
            "app.file.0".to_string(),
            Arc::new(LoggerStats::new("app.file.0", stats)),
        );
        assert_eq!(registry.len(), 1);

        let found = registry.get("app.file.0").unwrap();
        assert_eq!(found.name(), "app.file.0");
        assert!(registry.get("app.file.1").is_none());
    }

    #[test]
    fn retain_active_drops_detached() {
        let registry = StatsRegistry::new();

        let live = Arc::new(LogStats::default());
        registry.add(
            "app.live".to_string(),
            Arc::new(LoggerStats::new("app.live", Arc::clone(&live))),
        );
        registry.add(
            "app.gone".to_string(),
            Arc::new(LoggerStats::new("app.gone", Arc::new(LogStats::default()))),
        );

        registry.retain_active();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("app.live").is_some());
    }

    #[test]
    fn foreach_visits_all() {
        let registry = StatsRegistry::new();
        let keep_a = Arc::new(LogStats::default());
        let keep_b = Arc::new(LogStats::default());
        registry.add(
            "a".to_string(),
            Arc::new(LoggerStats::new("a", Arc::clone(&keep_a))),
        );
        registry.add(
            "b".to_string(),
            Arc::new(LoggerStats::new("b", Arc::clone(&keep_b))),
        );

        let mut seen = Vec::new();
        registry.foreach_stats(|name, _| seen.push(name.to_string()));
        seen.sort();
        assert_eq!(seen, vec!["a".to_string(), "b".to_string()]);
    }
}
