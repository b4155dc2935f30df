//! Node identifiers for topics, tasks and todos
//!
//! ID Format: `{millis}{9-char-hash}` (e.g., `1718000000000a3f9c2e1b`)
//!
//! The millisecond prefix is the moment the generator was created. The
//! suffix is derived from a per-generator random seed and a sequence
//! counter, so IDs issued by one generator never repeat. Two generators
//! may in principle collide; nothing relies on uniqueness across calls.
//!
//! IDs supplied by callers (e.g. loaded from JSON) are kept verbatim.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the hash suffix
const SUFFIX_LEN: usize = 9;

/// Identifier of a topic, task or todo
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an existing identifier string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Call-scoped ID source
///
/// Create one per parse (or per batch of programmatic inserts). It owns its
/// random seed and the set of IDs it has issued; no state is shared between
/// generators.
#[derive(Debug)]
pub struct IdGenerator {
    created_at: DateTime<Utc>,
    seed: u64,
    counter: u64,
    issued: HashSet<String>,
}

impl IdGenerator {
    /// Creates a generator with a random seed, timestamped now
    pub fn new() -> Self {
        Self::with_seed(Utc::now(), rand::random::<u64>())
    }

    /// Creates a generator with an explicit time and seed
    pub fn with_seed(created_at: DateTime<Utc>, seed: u64) -> Self {
        Self {
            created_at,
            seed,
            counter: 0,
            issued: HashSet::new(),
        }
    }

    /// Returns the creation time of this generator
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Issues the next identifier
    pub fn next_id(&mut self) -> NodeId {
        let prefix = self.created_at.timestamp_millis();

        loop {
            self.counter += 1;
            let candidate = format!("{}{}", prefix, self.suffix(self.counter));
            if self.issued.insert(candidate.clone()) {
                return NodeId(candidate);
            }
        }
    }

    /// Derives a hash suffix for a sequence number
    fn suffix(&self, counter: u64) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&counter.to_le_bytes());
        let hex = hasher.finalize().to_hex();
        hex[..SUFFIX_LEN].to_string()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
