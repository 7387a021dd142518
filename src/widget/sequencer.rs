//! Reply sequencing
//!
//! Exchanges may resolve in any order. Each one is tagged with a sequence
//! number at submission, and results are released strictly in that order so
//! bot replies never overtake each other in the log.

use std::collections::BTreeMap;

/// Sequence number of one exchange
pub type Seq = u64;

/// Buffers out-of-order results until every earlier one has resolved
#[derive(Debug)]
pub struct ReplySequencer<T> {
    /// Next sequence number handed out
    next_issue: Seq,
    /// Oldest sequence number not yet released
    next_release: Seq,
    /// Resolved results waiting for an earlier exchange
    parked: BTreeMap<Seq, T>,
}

impl<T> Default for ReplySequencer<T> {
    fn default() -> Self {
        Self {
            next_issue: 0,
            next_release: 0,
            parked: BTreeMap::new(),
        }
    }
}

impl<T> ReplySequencer<T> {
    /// Create an empty sequencer
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the sequence number for a new exchange
    pub fn issue(&mut self) -> Seq {
        let seq = self.next_issue;
        self.next_issue += 1;
        seq
    }

    /// Record a result and release everything now in order
    ///
    /// Unknown or already released sequence numbers are ignored.
    pub fn resolve(&mut self, seq: Seq, item: T) -> Vec<T> {
        if seq < self.next_release || seq >= self.next_issue {
            tracing::debug!(seq, "Ignoring result for unknown exchange");
            return Vec::new();
        }
        self.parked.insert(seq, item);

        let mut released = Vec::new();
        while let Some(item) = self.parked.remove(&self.next_release) {
            released.push(item);
            self.next_release += 1;
        }
        released
    }

    /// Number of exchanges issued but not yet released
    pub fn outstanding(&self) -> usize {
        (self.next_issue - self.next_release) as usize
    }

    /// Whether every issued exchange has been released
    pub fn is_idle(&self) -> bool {
        self.next_issue == self.next_release
    }
}
