//! Plain data row types written by output backends.

use st_agent::AgentState;
use st_command::CommandRecord;
use st_core::Tick;
use st_sim::TickSummary;

/// Counters for one tick.  Mirrors [`TickSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:                u64,
    pub delivered:           u64,
    pub applied:             u64,
    pub rejected_at_receive: u64,
    pub faults:              u64,
    pub emitted:             u64,
    pub sent:                u64,
    pub local:               u64,
    pub rejected_at_send:    u64,
    pub in_flight:           u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:                s.tick.0,
            delivered:           s.delivered as u64,
            applied:             s.applied as u64,
            rejected_at_receive: s.rejected_at_receive as u64,
            faults:              s.faults as u64,
            emitted:             s.emitted as u64,
            sent:                s.sent as u64,
            local:               s.local as u64,
            rejected_at_send:    s.rejected_at_send as u64,
            in_flight:           s.in_flight as u64,
        }
    }
}

/// One command at one lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLogRow {
    pub tick:    u64,
    pub phase:   &'static str,
    pub from_id: u32,
    pub to_id:   u32,
    pub kind:    &'static str,
    pub success: bool,
    /// Rendered rejection reason; empty on success.
    pub reason:  String,
}

impl CommandLogRow {
    pub fn new(tick: Tick, record: &CommandRecord) -> Self {
        Self {
            tick:    tick.0,
            phase:   record.phase.as_str(),
            from_id: record.from_id.0,
            to_id:   record.to_id.0,
            kind:    record.kind,
            success: record.outcome.success,
            reason:  record.outcome.reason.to_string(),
        }
    }
}

/// Headline numbers for one agent at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:      u32,
    pub tick:          u64,
    pub x:             i64,
    pub y:             i64,
    pub z:             i64,
    /// `u32::MAX` for top leaders.
    pub direct_leader: u32,
    pub storage_fuel:  f64,
    pub total_fuel:    f64,
    pub population:    f64,
    pub enemies:       u32,
    pub factories:     u32,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, state: &AgentState) -> Self {
        Self {
            agent_id:      state.id.0,
            tick:          tick.0,
            x:             state.coordinate.x,
            y:             state.coordinate.y,
            z:             state.coordinate.z,
            direct_leader: state.authority.direct_leader_id.map_or(u32::MAX, |id| id.0),
            storage_fuel:  state.fuel.storage,
            total_fuel:    state.fuel.total(),
            population:    state.total_population(),
            enemies:       state.diplomacy.enemies.len() as u32,
            factories:     state.factories.len() as u32,
        }
    }
}
