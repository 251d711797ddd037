//! small — three rival factions on a 10×10×3 grid.
//!
//! Each faction is a two-level hierarchy: one top leader and a handful of
//! subordinates scattered around it.  Subordinates ship surplus fuel to their
//! leader; the two leaders that start at war negotiate peace.  Every command
//! travels at the speed of light, so the far-flung members take longer to
//! deliver and lose more on the way.
//!
//! ```text
//! cargo run -p small                      # built-in settings
//! cargo run -p small -- run.json          # {"config": {...}, "settings": {...}}
//! RUST_LOG=st_command=debug cargo run -p small
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use st_agent::{AgentStoreBuilder, Carrier};
use st_ai::{ReasonerModel, default_reasoner};
use st_core::{AgentId, Int3D, SimConfig, Tick, UniverseSettings};
use st_output::{CsvWriter, OutputWriter, SimOutputObserver};
use st_sim::{SimBuilder, SimObserver, TickSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const TOTAL_TICKS: u64 = 60;
const OUTPUT_DIR:  &str = "output/small";

/// `(leader, members)` per faction, as grid positions.
const FACTIONS: [(Int3D, &[Int3D]); 3] = [
    (Int3D::new(1, 1, 0), &[Int3D::new(2, 1, 0), Int3D::new(1, 3, 0), Int3D::new(4, 4, 1)]),
    (Int3D::new(8, 8, 2), &[Int3D::new(7, 8, 2), Int3D::new(8, 5, 1), Int3D::new(9, 9, 0)]),
    (Int3D::new(1, 8, 1), &[Int3D::new(0, 9, 1), Int3D::new(3, 7, 2)]),
];

// ── Application components ────────────────────────────────────────────────────

#[derive(Default, Clone, Copy)]
struct Faction(u8);

// ── Run file ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RunFile {
    config:   SimConfig,
    settings: UniverseSettings,
}

fn load_run(path: Option<&str>) -> Result<(SimConfig, UniverseSettings)> {
    let Some(path) = path else {
        let config = SimConfig {
            total_ticks:           TOTAL_TICKS,
            seed:                  SEED,
            num_threads:           None,
            output_interval_ticks: 10,
        };
        return Ok((config, UniverseSettings::default()));
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let run: RunFile = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok((run.config, run.settings))
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:    SimOutputObserver<W>,
    totals:   TickSummary,
    commands: usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, totals: TickSummary::default(), commands: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_command(&mut self, tick: Tick, record: &st_command::CommandRecord) {
        self.commands += 1;
        self.inner.on_command(tick, record);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.totals.delivered += summary.delivered;
        self.totals.applied += summary.applied;
        self.totals.faults += summary.faults;
        self.totals.sent += summary.sent;
        self.totals.rejected_at_send += summary.rejected_at_send;
        self.totals.rejected_at_receive += summary.rejected_at_receive;
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &st_agent::AgentStore) {
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let arg = std::env::args().nth(1);
    let (config, settings) = load_run(arg.as_deref())?;

    // 1. Lay out the factions: leaders first, then members.
    let leaders: Vec<Int3D> = FACTIONS.iter().map(|(l, _)| *l).collect();
    let mut positions = leaders.clone();
    let mut membership: Vec<(usize, usize)> = Vec::new(); // (agent, faction)
    for (f, (_, members)) in FACTIONS.iter().enumerate() {
        for &m in *members {
            membership.push((positions.len(), f));
            positions.push(m);
        }
    }
    let agent_count = positions.len();
    info!(agents = agent_count, factions = FACTIONS.len(), "building universe");

    // 2. Agents: every member reports to its faction leader; factions 0 and 1
    //    start at war.
    let mut builder = AgentStoreBuilder::new(agent_count, config.seed)
        .positions(positions)
        .configure(|s| {
            s.fuel.storage = 500.0;
            s.physics.fuel_loss_rate_per_distance = 0.05;
            s.carriers.insert(Carrier { population: 100.0, salary: 1.0 });
        })
        .configure(|s| match s.id {
            AgentId(0) => {
                s.diplomacy.enemies.insert(AgentId(1));
            }
            AgentId(1) => {
                s.diplomacy.enemies.insert(AgentId(0));
            }
            _ => {}
        })
        .register_component::<Faction>();
    for &(agent, faction) in &membership {
        builder = builder.leader(AgentId(agent as u32), AgentId(faction as u32));
    }
    let (mut store, rngs) = builder.build()?;

    if let Some(factions) = store.component_mut::<Faction>() {
        for (f, slot) in factions.iter_mut().enumerate().take(FACTIONS.len()) {
            *slot = Faction(f as u8);
        }
        for &(agent, faction) in &membership {
            factions[agent] = Faction(faction as u8);
        }
    }

    // 3. Sim.
    let model = ReasonerModel::new(default_reasoner())?;
    let mut sim = SimBuilder::new(config.clone(), settings, store, rngs, model).build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    let t = obs.totals;
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), config.total_ticks);
    println!(
        "  commands: {} records | sent {} | delivered {} | applied {} | rejected {}+{} | faults {}",
        obs.commands,
        t.sent,
        t.delivered,
        t.applied,
        t.rejected_at_send,
        t.rejected_at_receive,
        t.faults,
    );
    println!("  still in flight: {}", sim.queue.len());
    println!("  output written to {OUTPUT_DIR}/");
    println!();

    println!("{:<7} {:<8} {:<12} {:>12} {:<10}", "Agent", "Faction", "Position", "Fuel", "At war");
    println!("{}", "-".repeat(53));
    let factions = sim.agents.component::<Faction>().unwrap_or(&[]);
    for state in &sim.agents.states {
        let faction = factions.get(state.id.index()).map_or(u8::MAX, |f| f.0);
        let enemies: Vec<String> = state.diplomacy.enemies.iter().map(|e| e.0.to_string()).collect();
        println!(
            "{:<7} {:<8} {:<12} {:>12.2} {:<10}",
            state.id.0,
            faction,
            state.coordinate.to_int3d().to_string(),
            state.fuel.storage,
            enemies.join(","),
        );
    }

    Ok(())
}
