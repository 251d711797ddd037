//! Integration tests for st-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, CommandLogRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            delivered:           4,
            applied:             3,
            rejected_at_receive: 1,
            faults:              0,
            emitted:             6,
            sent:                5,
            local:               0,
            rejected_at_send:    1,
            in_flight:           9,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("command_log.csv").exists());
        assert!(dir.path().join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "tick_summaries.csv"),
            [
                "tick",
                "delivered",
                "applied",
                "rejected_at_receive",
                "faults",
                "emitted",
                "sent",
                "local",
                "rejected_at_send",
                "in_flight",
            ]
        );
        assert_eq!(
            headers(&dir, "command_log.csv"),
            ["tick", "phase", "from", "to", "kind", "success", "reason"]
        );
        assert_eq!(headers(&dir, "agent_snapshots.csv")[..2], ["agent_id", "tick"]);
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "4");
        assert_eq!(&rows[0][9], "9");
    }

    #[test]
    fn csv_command_reason_is_quoted_safely() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_commands(&[CommandLogRow {
            tick:    2,
            phase:   "receive",
            from_id: 1,
            to_id:   0,
            kind:    "declare_war",
            success: false,
            reason:  "not allowed: target, is a leader".to_owned(),
        }])
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "command_log.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "receive");
        assert_eq!(&rows[0][5], "0");
        assert_eq!(&rows[0][6], "not allowed: target, is a leader");
    }

    #[test]
    fn csv_snapshot_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = AgentSnapshotRow {
            agent_id:      7,
            tick:          5,
            x:             1,
            y:             2,
            z:             0,
            direct_leader: u32::MAX,
            storage_fuel:  12.5,
            total_fuel:    20.0,
            population:    0.0,
            enemies:       1,
            factories:     0,
        };
        w.write_snapshots(&[row]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "agent_snapshots.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "7");
        assert_eq!(&rows[0][5], u32::MAX.to_string().as_str());
        assert_eq!(&rows[0][6], "12.5");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_commands(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

#[cfg(test)]
mod row_tests {
    use st_agent::{AgentStoreBuilder, Carrier};
    use st_command::{CommandOutcome, CommandPhase, CommandRecord, LocalizableMessage};
    use st_core::{AgentId, Int3D, Tick};

    use crate::row::{AgentSnapshotRow, CommandLogRow, TickSummaryRow};

    #[test]
    fn command_row_renders_reason() {
        let record = CommandRecord {
            phase:   CommandPhase::Send,
            from_id: AgentId(3),
            to_id:   AgentId(4),
            kind:    "send_fuel",
            outcome: CommandOutcome::fail(LocalizableMessage::text("not enough").with_value(5)),
            faulted: false,
        };
        let row = CommandLogRow::new(Tick(8), &record);
        assert_eq!(row.tick, 8);
        assert_eq!(row.phase, "send");
        assert_eq!((row.from_id, row.to_id), (3, 4));
        assert!(!row.success);
        assert_eq!(row.reason, "not enough 5");
    }

    #[test]
    fn snapshot_row_reads_state() {
        let (store, _) = AgentStoreBuilder::new(2, 1)
            .positions(vec![Int3D::new(0, 0, 0), Int3D::new(4, 5, 1)])
            .leader(AgentId(1), AgentId(0))
            .configure(|s| {
                s.fuel.storage = 10.0;
                s.fuel.trade = 5.0;
                s.carriers.insert(Carrier { population: 3.0, salary: 1.0 });
            })
            .build()
            .unwrap();
        let row = AgentSnapshotRow::new(Tick(2), &store.states[1]);
        assert_eq!((row.x, row.y, row.z), (4, 5, 1));
        assert_eq!(row.direct_leader, 0);
        assert_eq!(row.total_fuel, 15.0);
        assert_eq!(row.population, 3.0);
        assert_eq!(AgentSnapshotRow::new(Tick(2), &store.states[0]).direct_leader, u32::MAX);
    }

    #[test]
    fn summary_row_mirrors_counters() {
        let summary = st_sim::TickSummary { sent: 2, faults: 1, ..st_sim::TickSummary::new(Tick(4)) };
        let row = TickSummaryRow::from(&summary);
        assert_eq!((row.tick, row.sent, row.faults, row.applied), (4, 2, 1, 0));
    }
}

#[cfg(test)]
mod observer_tests {
    use st_agent::AgentStoreBuilder;
    use st_ai::{DecisionContext, DecisionModel, NoopModel};
    use st_command::{Command, SendFuel};
    use st_core::{AgentId, AgentRng, SimConfig, UniverseSettings};
    use st_sim::SimBuilder;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config(total_ticks: u64, output_interval_ticks: u64) -> SimConfig {
        SimConfig { total_ticks, seed: 1, num_threads: Some(1), output_interval_ticks }
    }

    fn count_rows(dir: &TempDir, file: &str) -> usize {
        csv::Reader::from_path(dir.path().join(file)).unwrap().records().count()
    }

    /// Agent 0 sends 10 fuel to agent 1 every tick.
    struct Drip;

    impl DecisionModel for Drip {
        fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut AgentRng) -> Vec<Command> {
            if ctx.agent == AgentId(0) {
                vec![SendFuel::new(ctx.own(), AgentId(1), 10.0).into()]
            } else {
                vec![]
            }
        }
    }

    #[test]
    fn integration_csv() {
        let (store, rngs) = AgentStoreBuilder::new(3, 1).build().unwrap();
        let mut sim = SimBuilder::new(config(6, 2), UniverseSettings::default(), store, rngs, NoopModel)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        assert_eq!(count_rows(&dir, "tick_summaries.csv"), 6);
        // output_interval = 2 → ticks 0, 2, 4 × 3 agents.
        assert_eq!(count_rows(&dir, "agent_snapshots.csv"), 9);
        assert_eq!(count_rows(&dir, "command_log.csv"), 0);
    }

    #[test]
    fn command_log_has_send_and_receive_rows() {
        let (store, rngs) = AgentStoreBuilder::new(2, 1)
            .configure(|s| s.fuel.storage = 100.0)
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config(3, 0), UniverseSettings::default(), store, rngs, Drip)
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        // Sends at ticks 0, 1, 2; receives at ticks 1, 2.
        let mut rdr = csv::Reader::from_path(dir.path().join("command_log.csv")).unwrap();
        let phases: Vec<(String, String)> = rdr
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_owned(), r[1].to_owned())
            })
            .collect();
        let expected: Vec<(String, String)> =
            [("0", "send"), ("1", "receive"), ("1", "send"), ("2", "receive"), ("2", "send")]
                .iter()
                .map(|(t, p)| (t.to_string(), p.to_string()))
                .collect();
        assert_eq!(phases, expected);
        assert_eq!(count_rows(&dir, "agent_snapshots.csv"), 0, "interval 0 disables snapshots");
    }

    #[test]
    fn command_log_can_be_disabled() {
        let (store, rngs) = AgentStoreBuilder::new(2, 1)
            .configure(|s| s.fuel.storage = 100.0)
            .build()
            .unwrap();
        let mut sim = SimBuilder::new(config(3, 0), UniverseSettings::default(), store, rngs, Drip)
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap()).without_command_log();
        sim.run(&mut obs).unwrap();
        assert_eq!(count_rows(&dir, "command_log.csv"), 0);
        assert_eq!(count_rows(&dir, "tick_summaries.csv"), 3);
    }
}
