//! Unit tests for st-ai.

#[cfg(test)]
mod fixtures {
    use st_agent::{AgentState, AgentStore, AgentStoreBuilder};
    use st_command::Dummy;
    use st_core::{AgentId, UniverseSettings};

    use crate::builtin::ConstantScore;
    use crate::{CommandSink, Consideration, DecisionContext, DualUtilityScore, PlanState, UtilityOption};

    pub fn settings() -> UniverseSettings {
        UniverseSettings::default()
    }

    /// Three co-located agents, 1 reporting to 0, each holding 1000 storage
    /// fuel.  `tweak` runs on every state after that.
    pub fn world(tweak: impl FnMut(&mut AgentState) + 'static) -> AgentStore {
        AgentStoreBuilder::new(3, 7)
            .leader(AgentId(1), AgentId(0))
            .configure(|s| s.fuel.storage = 1000.0)
            .configure(tweak)
            .build()
            .unwrap()
            .0
    }

    /// Fixed scores; commits a `Dummy` addressed to `marker`.
    pub struct Scripted {
        pub name:   &'static str,
        pub scores: Vec<DualUtilityScore>,
        pub marker: u32,
    }

    impl Scripted {
        pub fn new(marker: u32, scores: &[DualUtilityScore]) -> Self {
            Self { name: "scripted", scores: scores.to_vec(), marker }
        }

        /// A single consideration at `rank` with weight `weight`.
        pub fn weighted(marker: u32, rank: i32, weight: f64) -> Self {
            Self::new(marker, &[DualUtilityScore::new(rank, 1.0, weight)])
        }
    }

    impl UtilityOption for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn considerations(&self, _: &DecisionContext<'_>, _: &mut PlanState) -> Vec<Box<dyn Consideration>> {
            self.scores
                .iter()
                .map(|&s| Box::new(ConstantScore(s)) as Box<dyn Consideration>)
                .collect()
        }

        fn commit(&self, _: &DecisionContext<'_>, _: &mut PlanState, sink: &mut CommandSink) {
            sink.push(Dummy { to_id: AgentId(self.marker) });
        }
    }

    /// `to_id` of every command, in order.
    pub fn targets(commands: &[st_command::Command]) -> Vec<u32> {
        use st_command::CommandHooks;

        commands.iter().map(|c| c.to_id().0).collect()
    }
}

#[cfg(test)]
mod score {
    use crate::{DualUtilityScore, OptionScore};

    #[test]
    fn empty_aggregate_is_rank_zero_weight_zero() {
        let s = OptionScore::aggregate(&[]);
        assert_eq!(s, OptionScore { rank: 0, weight: 0.0 });
        assert!(!s.is_eligible());
    }

    #[test]
    fn aggregate_is_max_rank_and_product_times_sum() {
        let s = OptionScore::aggregate(&[
            DualUtilityScore::new(1, 0.5, 2.0),
            DualUtilityScore::new(3, 4.0, 1.0),
            DualUtilityScore::no_impact(),
        ]);
        assert_eq!(s.rank, 3);
        assert_eq!(s.weight, 0.5 * 4.0 * (2.0 + 1.0));
    }

    #[test]
    fn veto_zeroes_weight() {
        let s = OptionScore::aggregate(&[DualUtilityScore::bonus(10.0), DualUtilityScore::veto()]);
        assert_eq!(s.weight, 0.0);
        assert!(!s.is_eligible());
    }

    #[test]
    fn multiplier_is_clamped_non_negative() {
        assert_eq!(DualUtilityScore::new(0, -3.0, 1.0).multiplier, 0.0);
        assert_eq!(DualUtilityScore::multiplier(f64::NAN).multiplier, 0.0);
        assert_eq!(DualUtilityScore::multiplier(2.5).multiplier, 2.5);
    }

    #[test]
    fn no_impact_alone_is_ineligible() {
        // No bonus anywhere means Σ bonus = 0.
        let s = OptionScore::aggregate(&[DualUtilityScore::no_impact(), DualUtilityScore::rank_only(5)]);
        assert_eq!(s.rank, 5);
        assert!(!s.is_eligible());
    }
}

#[cfg(test)]
mod sampler {
    use st_core::AgentRng;

    use crate::a_res;

    #[test]
    fn k_zero_is_empty() {
        let mut rng = AgentRng::from_seed(1);
        assert!(a_res(0, [1.0, 2.0], &mut rng, |w| *w).is_empty());
    }

    #[test]
    fn k_larger_than_eligible_returns_every_eligible_item() {
        let mut rng = AgentRng::from_seed(1);
        let mut got = a_res(10, ["a", "b", "c"], &mut rng, |_| 1.0);
        got.sort_unstable();
        assert_eq!(got, ["a", "b", "c"]);
    }

    #[test]
    fn non_positive_and_non_finite_weights_are_skipped() {
        let items = [(0, 0.0), (1, -1.0), (2, f64::NAN), (3, f64::INFINITY), (4, 2.0)];
        let mut rng = AgentRng::from_seed(5);
        let got = a_res(5, items, &mut rng, |(_, w)| *w);
        assert_eq!(got.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn skipped_items_consume_no_randomness() {
        let mut a = AgentRng::from_seed(9);
        let mut b = AgentRng::from_seed(9);
        let _ = a_res(1, [0.0, -2.0, 1.0], &mut a, |w| *w);
        let _ = a_res(1, [1.0], &mut b, |w| *w);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn single_draw_frequency_matches_weights() {
        let mut rng = AgentRng::from_seed(2024);
        let draws = 10_000;
        let heavy = (0..draws)
            .filter(|_| a_res(1, [("light", 1.0), ("heavy", 3.0)], &mut rng, |(_, w)| *w)[0].0 == "heavy")
            .count();
        let share = heavy as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.75 * 0.05, "heavy share {share}");
    }

    #[test]
    fn same_seed_same_sample() {
        let items: Vec<(usize, f64)> = (0..50).map(|i| (i, 1.0 + i as f64)).collect();
        let pick = |seed| {
            let mut rng = AgentRng::from_seed(seed);
            a_res(5, items.clone(), &mut rng, |(_, w)| *w)
        };
        assert_eq!(pick(77), pick(77));
    }
}

#[cfg(test)]
mod plan {
    use st_core::{AgentId, Tick};

    use super::fixtures::{settings, world};
    use crate::{DecisionContext, PlanState};

    #[test]
    fn values_are_computed_once_per_key() {
        let settings = settings();
        let store = world(|s| {
            s.carriers.insert(st_agent::Carrier { population: 10.0, salary: 2.0 });
        });
        let ctx = DecisionContext::new(Tick(0), AgentId(1), &settings, &store).unwrap();
        let mut plan = PlanState::new();

        assert_eq!(plan.population(&ctx, AgentId(0)), Some(10.0));
        assert_eq!(plan.population(&ctx, AgentId(0)), Some(10.0));
        assert_eq!(plan.cache_misses(), 1);

        assert_eq!(plan.average_salary(&ctx, AgentId(0)), Some(2.0));
        assert_eq!(plan.fuel_remaining_fraction(&ctx, AgentId(1), AgentId(0)), Some(1.0));
        assert_eq!(plan.fuel_remaining_fraction(&ctx, AgentId(1), AgentId(0)), Some(1.0));
        assert_eq!(plan.causal_distance(&ctx, AgentId(1), AgentId(2)), Some(0));
        assert_eq!(plan.cache_misses(), 4);
    }

    #[test]
    fn unknown_agents_are_not_cached() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let mut plan = PlanState::new();
        assert_eq!(plan.population(&ctx, AgentId(99)), None);
        assert_eq!(plan.fuel_remaining_fraction(&ctx, AgentId(0), AgentId(99)), None);
        assert_eq!(plan.cache_misses(), 0);
    }

    #[test]
    fn reservations_reduce_available_fuel() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let mut plan = PlanState::new();
        plan.reserve_fuel(300.0);
        plan.reserve_fuel(-50.0);
        assert_eq!(plan.reserved_fuel(), 300.0);
        assert_eq!(plan.available_storage_fuel(&ctx), 700.0);
        plan.reserve_fuel(5000.0);
        assert_eq!(plan.available_storage_fuel(&ctx), 0.0);
    }

    #[test]
    fn context_rejects_unknown_agent() {
        let settings = settings();
        let store = world(|_| {});
        let err = DecisionContext::new(Tick(0), AgentId(9), &settings, &store).err();
        assert!(matches!(err, Some(crate::AiError::UnknownAgent(AgentId(9)))));
    }
}

#[cfg(test)]
mod reasoner {
    use st_core::{AgentId, AgentRng, Tick};

    use super::fixtures::{Scripted, settings, targets, world};
    use crate::{
        AiError, CommandSink, DecisionContext, DecisionModel, DualUtilityScore, PlanState, ReasonerModel,
        SequenceReasoner, WeightedChoiceReasoner,
    };

    fn run(choice: WeightedChoiceReasoner, seed: u64) -> Vec<u32> {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let model = ReasonerModel::new(choice).unwrap();
        targets(&model.decide(&ctx, &mut AgentRng::from_seed(seed)))
    }

    #[test]
    fn sequence_runs_every_child_in_order() {
        let root = SequenceReasoner::new("root")
            .with_option(Scripted::weighted(1, 0, 1.0))
            .with_reasoner(WeightedChoiceReasoner::new("only").with_option(Scripted::weighted(2, 0, 1.0)))
            .with_option(Scripted::new(3, &[DualUtilityScore::veto()]));
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let model = ReasonerModel::new(root).unwrap();
        // Sequence children commit unconditionally, even vetoed ones.
        assert_eq!(targets(&model.decide(&ctx, &mut AgentRng::from_seed(0))), vec![1, 2, 3]);
    }

    #[test]
    fn higher_rank_wins_regardless_of_weight() {
        for seed in 0..50 {
            let choice = WeightedChoiceReasoner::new("c")
                .with_option(Scripted::weighted(1, 0, 1e9))
                .with_option(Scripted::weighted(2, 1, 1e-9));
            assert_eq!(run(choice, seed), vec![2]);
        }
    }

    #[test]
    fn ineligible_options_fall_through_to_fallback() {
        let choice = WeightedChoiceReasoner::new("c")
            .with_option(Scripted::weighted(1, 5, 0.0))
            .with_option(Scripted::weighted(2, 5, -4.0))
            .with_option(Scripted::new(3, &[DualUtilityScore::bonus(2.0), DualUtilityScore::veto()]))
            .with_fallback(Scripted::weighted(99, 0, 0.0));
        assert_eq!(run(choice, 1), vec![99]);
    }

    #[test]
    fn default_fallback_emits_nothing() {
        let choice = WeightedChoiceReasoner::new("c").with_option(Scripted::weighted(1, 0, 0.0));
        assert!(run(choice, 1).is_empty());
    }

    #[test]
    fn option_without_considerations_is_never_chosen() {
        let choice = WeightedChoiceReasoner::new("c")
            .with_option(Scripted::new(1, &[]))
            .with_option(Scripted::weighted(2, -10, 0.1));
        assert_eq!(run(choice, 3), vec![2]);
    }

    #[test]
    fn choose_frequency_tracks_weight_within_top_rank() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let choice = WeightedChoiceReasoner::new("c")
            .with_option(Scripted::weighted(1, 0, 1.0))
            .with_option(Scripted::weighted(2, 0, 3.0))
            .with_option(Scripted::weighted(3, -1, 100.0));
        let mut rng = AgentRng::from_seed(11);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            let mut plan = PlanState::new();
            let i = choice.choose(&ctx, &mut plan, &mut rng).unwrap();
            counts[i] += 1;
        }
        assert_eq!(counts[2], 0);
        let share = counts[1] as f64 / 10_000.0;
        assert!((share - 0.75).abs() < 0.0375, "share {share}");
    }

    #[test]
    fn same_seed_same_decision() {
        let mk = || {
            WeightedChoiceReasoner::new("c")
                .with_option(Scripted::weighted(1, 0, 1.0))
                .with_option(Scripted::weighted(2, 0, 1.0))
                .with_option(Scripted::weighted(3, 0, 1.0))
        };
        for seed in 0..20 {
            assert_eq!(run(mk(), seed), run(mk(), seed));
        }
    }

    #[test]
    fn empty_reasoners_are_rejected() {
        let err = ReasonerModel::new(SequenceReasoner::new("root")).err();
        assert!(matches!(err, Some(AiError::EmptyReasoner(name)) if name == "root"));

        let nested = SequenceReasoner::new("root")
            .with_option(Scripted::weighted(1, 0, 1.0))
            .with_reasoner(WeightedChoiceReasoner::new("hollow"));
        let err = ReasonerModel::new(nested).err();
        assert!(matches!(err, Some(AiError::EmptyReasoner(name)) if name == "hollow"));
    }

    #[test]
    fn sink_preserves_commit_order() {
        let mut sink = CommandSink::new();
        assert!(sink.is_empty());
        sink.push(st_command::Dummy { to_id: AgentId(4) });
        sink.push(st_command::Dummy { to_id: AgentId(2) });
        assert_eq!(sink.len(), 2);
        assert_eq!(targets(sink.commands()), vec![4, 2]);
    }

    mod props {
        use proptest::prelude::*;
        use st_core::{AgentId, AgentRng, Tick};

        use super::super::fixtures::{Scripted, settings, targets, world};
        use crate::{DecisionContext, DecisionModel, ReasonerModel, WeightedChoiceReasoner};

        proptest! {
            #[test]
            fn rank_dominates_weight(
                seed in any::<u64>(),
                low_weight in 1e-6f64..1e6,
                high_weight in 1e-6f64..1e6,
                low_rank in -5i32..5,
                gap in 1i32..5,
            ) {
                let settings = settings();
                let store = world(|_| {});
                let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
                let model = ReasonerModel::new(
                    WeightedChoiceReasoner::new("c")
                        .with_option(Scripted::weighted(1, low_rank, low_weight))
                        .with_option(Scripted::weighted(2, low_rank + gap, high_weight)),
                ).unwrap();
                let got = targets(&model.decide(&ctx, &mut AgentRng::from_seed(seed)));
                prop_assert_eq!(got, vec![2]);
            }
        }
    }
}

#[cfg(test)]
mod builtin {
    use st_command::{AcceptPeace, Command, ProposePeace};
    use st_core::{AgentId, AgentRng, Int3D, Tick};

    use super::fixtures::{settings, world};
    use crate::builtin::{AcceptPeaceOption, ProposePeaceOption, SendFuelToLeaderOption};
    use crate::{DecisionContext, DecisionModel, PlanState, ReasonerModel, UtilityOption, default_reasoner};

    #[test]
    fn subordinate_ships_surplus_fuel_to_leader() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(1), &settings, &store).unwrap();
        let model = ReasonerModel::new(default_reasoner()).unwrap();
        let commands = model.decide(&ctx, &mut AgentRng::from_seed(0));
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            Command::SendFuel(c) => {
                assert_eq!(c.to_id, AgentId(0));
                assert!((c.amount - 90.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn top_leader_sends_nothing() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let model = ReasonerModel::new(default_reasoner()).unwrap();
        assert!(model.decide(&ctx, &mut AgentRng::from_seed(0)).is_empty());
    }

    #[test]
    fn send_fuel_vetoed_at_or_below_reserve() {
        let settings = settings();
        let store = world(|s| s.fuel.storage = 100.0);
        let ctx = DecisionContext::new(Tick(0), AgentId(1), &settings, &store).unwrap();
        let option = SendFuelToLeaderOption { fraction: 0.5, keep: 100.0, rank: 0 };
        assert_eq!(option.weight(&ctx, &mut PlanState::new()), 0.0);
    }

    #[test]
    fn send_fuel_weight_shrinks_with_distance() {
        let settings = settings();
        let near = world(|s| s.physics.fuel_loss_rate_per_distance = 0.1);
        let far = st_agent::AgentStoreBuilder::new(2, 7)
            .positions(vec![Int3D::new(0, 0, 0), Int3D::new(6, 8, 0)])
            .leader(AgentId(1), AgentId(0))
            .configure(|s| {
                s.fuel.storage = 1000.0;
                s.physics.fuel_loss_rate_per_distance = 0.1;
            })
            .build()
            .unwrap()
            .0;
        let option = SendFuelToLeaderOption { fraction: 0.1, keep: 100.0, rank: 0 };
        let w_near = option.weight(
            &DecisionContext::new(Tick(0), AgentId(1), &settings, &near).unwrap(),
            &mut PlanState::new(),
        );
        let w_far = option.weight(
            &DecisionContext::new(Tick(0), AgentId(1), &settings, &far).unwrap(),
            &mut PlanState::new(),
        );
        assert!(w_far > 0.0 && w_far < w_near, "near {w_near}, far {w_far}");
    }

    #[test]
    fn commit_reserves_fuel_and_blocks_repeat() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(1), &settings, &store).unwrap();
        let option = SendFuelToLeaderOption { fraction: 0.5, keep: 0.0, rank: 0 };
        let mut plan = PlanState::new();
        let mut sink = crate::CommandSink::new();
        option.commit(&ctx, &mut plan, &mut sink);
        assert_eq!(plan.reserved_fuel(), 500.0);
        assert!(plan.was_contacted(AgentId(0)));
        assert_eq!(option.weight(&ctx, &mut plan), 0.0);
    }

    #[test]
    fn pending_offer_is_accepted_before_proposing() {
        let settings = settings();
        let store = world(|s| {
            if s.id == AgentId(0) {
                s.diplomacy.enemies.extend([AgentId(1), AgentId(2)]);
                s.diplomacy.peace_offers.insert(AgentId(2));
            }
        });
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let model = ReasonerModel::new(default_reasoner()).unwrap();
        let commands = model.decide(&ctx, &mut AgentRng::from_seed(4));
        assert_eq!(commands, vec![Command::AcceptPeace(AcceptPeace { to_id: AgentId(2) })]);
    }

    #[test]
    fn at_war_without_offers_proposes_peace() {
        let settings = settings();
        let store = world(|s| {
            if s.id == AgentId(0) {
                s.diplomacy.enemies.insert(AgentId(2));
            }
        });
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let model = ReasonerModel::new(default_reasoner()).unwrap();
        let commands = model.decide(&ctx, &mut AgentRng::from_seed(4));
        assert_eq!(commands, vec![Command::ProposePeace(ProposePeace { to_id: AgentId(2) })]);
    }

    #[test]
    fn peace_options_are_vetoed_in_peacetime() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(0), &settings, &store).unwrap();
        let mut plan = PlanState::new();
        assert_eq!(AcceptPeaceOption { rank: 2 }.weight(&ctx, &mut plan), 0.0);
        assert_eq!(ProposePeaceOption { rank: 1, bonus_per_enemy: 1.0 }.weight(&ctx, &mut plan), 0.0);
    }

    #[test]
    fn diplomacy_and_logistics_both_fire() {
        let settings = settings();
        let store = world(|s| {
            if s.id == AgentId(1) {
                s.diplomacy.enemies.insert(AgentId(2));
            }
        });
        let ctx = DecisionContext::new(Tick(0), AgentId(1), &settings, &store).unwrap();
        let model = ReasonerModel::new(default_reasoner()).unwrap();
        let kinds: Vec<&str> = model
            .decide(&ctx, &mut AgentRng::from_seed(0))
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(kinds, vec!["propose_peace", "send_fuel"]);
    }

    #[test]
    fn noop_model_is_silent() {
        let settings = settings();
        let store = world(|_| {});
        let ctx = DecisionContext::new(Tick(0), AgentId(1), &settings, &store).unwrap();
        assert!(crate::NoopModel.decide(&ctx, &mut AgentRng::from_seed(0)).is_empty());
    }
}
