//! Deferred actions on the clock's millisecond timeline
//!
//! Actions fire on the first fireworks tick at or after their due time, in
//! due order; ties keep scheduling order.

use super::state::LaunchOrigin;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Launch toward a random point in the top half
    LaunchRandom(LaunchOrigin),
    /// Emit the intro chord cue
    IntroCue,
    /// Close the intro auto-spawn window
    EndIntro,
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_ms: f64,
    seq: u64,
    action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pending: Vec<Scheduled>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, action: Action) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms,
            seq,
            action,
        });
    }

    /// Remove and return every action due at `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<Action> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.due_ms <= now_ms);
        self.pending = pending;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
