//! `InFlightQueue` — commands travelling between agents.
//!
//! Keyed by arrival tick in a `BTreeMap`, so draining everything due by
//! `now` is a range split rather than a scan over all pending traffic.
//! Within a drain the order is causal: earlier arrival first, then earlier
//! send, then sender id, then the sender's own emission order.

use std::collections::BTreeMap;

use st_core::{AgentId, Int4D, Tick};

use crate::{Command, CommandHooks};

/// A command plus the facts the receiver needs about its origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InFlightCommand {
    pub command:         Command,
    pub from_id:         AgentId,
    /// Sender's position when the command left.  Never updated.
    pub from_coordinate: Int4D,
    pub sent_tick:       Tick,
    pub arrival_tick:    Tick,
    /// Index in the sender's batch for `sent_tick`.
    pub sequence:        u32,
}

impl InFlightCommand {
    #[inline]
    pub fn to_id(&self) -> AgentId {
        self.command.to_id()
    }

    fn causal_key(&self) -> (Tick, Tick, AgentId, u32) {
        (self.arrival_tick, self.sent_tick, self.from_id, self.sequence)
    }
}

#[derive(Default)]
pub struct InFlightQueue {
    inner: BTreeMap<Tick, Vec<InFlightCommand>>,
    total: usize,
}

impl InFlightQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: InFlightCommand) {
        self.inner.entry(command.arrival_tick).or_default().push(command);
        self.total += 1;
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = InFlightCommand>) {
        for c in commands {
            self.push(c);
        }
    }

    /// Remove and return every command arriving at or before `now`, in
    /// causal order.
    pub fn drain_until(&mut self, now: Tick) -> Vec<InFlightCommand> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let mut out: Vec<InFlightCommand> = due.into_values().flatten().collect();
        self.total -= out.len();
        out.sort_by_key(InFlightCommand::causal_key);
        out
    }

    /// Earliest pending arrival, if any.
    pub fn next_arrival(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &InFlightCommand> + '_ {
        self.inner.values().flatten()
    }
}
