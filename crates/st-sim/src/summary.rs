//! Per-tick counters.

use st_command::{CommandPhase, CommandRecord};
use st_core::Tick;

/// What happened to commands during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:                Tick,
    /// In-flight commands that reached their target this tick.
    pub delivered:           usize,
    /// Delivered commands that passed `can_execute` and executed cleanly.
    pub applied:             usize,
    pub rejected_at_receive: usize,
    /// `execute` faults, whether at receive or during a local apply.
    pub faults:              usize,
    /// Commands emitted by decision models.
    pub emitted:             usize,
    /// Remote commands put in flight.
    pub sent:                usize,
    /// Self-targeted commands applied during the send phase.
    pub local:               usize,
    /// Failed send-phase validation or failed local apply.
    pub rejected_at_send:    usize,
    /// Queue length once the tick is over.
    pub in_flight:           usize,
}

impl TickSummary {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// Fold one record into the counters.
    pub fn record(&mut self, r: &CommandRecord) {
        if r.faulted {
            self.faults += 1;
        }
        match (r.phase, r.outcome.success) {
            (CommandPhase::Receive, ok) => {
                self.delivered += 1;
                if ok {
                    self.applied += 1;
                } else if !r.faulted {
                    self.rejected_at_receive += 1;
                }
            }
            (CommandPhase::Send, true) => self.sent += 1,
            (CommandPhase::Local, true) => self.local += 1,
            (CommandPhase::Send | CommandPhase::Local, false) => {
                if !r.faulted {
                    self.rejected_at_send += 1;
                }
            }
        }
    }
}
