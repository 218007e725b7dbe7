/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 lumber project authors
 */

use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_STAT_SEQ: AtomicU32 = AtomicU32::new(1); // 0 is reserved

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct StatId {
    pid: u32,
    seq: u32,
}

impl StatId {
    /// Create a StatId that is unique in the current process
    pub fn new_unique() -> Self {
        StatId {
            pid: std::process::id(),
            seq: NEXT_STAT_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn as_u64(&self) -> u64 {
        ((self.pid as u64) << 32) | (self.seq as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_in_process() {
        let id1 = StatId::new_unique();
        let id2 = StatId::new_unique();
        assert_ne!(id1, id2);
        assert_ne!(id1.as_u64(), id2.as_u64());
    }
}
