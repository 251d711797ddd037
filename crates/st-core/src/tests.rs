//! Unit tests for st-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn oversized_index_is_rejected() {
        assert!(AgentId::try_from(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn orders_numerically() {
        let mut ids = vec![AgentId(10), AgentId(2), AgentId(7)];
        ids.sort();
        assert_eq!(ids, [AgentId(2), AgentId(7), AgentId(10)]);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod coord {
    use crate::{Int3D, Int4D};

    #[test]
    fn orders_by_time_first() {
        let early_far = Int4D::new(1, 100, 100, 100);
        let late_near = Int4D::new(2, 0, 0, 0);
        assert!(early_far < late_near);
        assert!(Int4D::new(2, 0, 0, 1) > Int4D::new(2, 0, 0, 0));
    }

    #[test]
    fn projection_drops_time() {
        let p = Int4D::new(9, 1, 2, 3);
        assert_eq!(p.to_int3d(), Int3D::new(1, 2, 3));
        assert_eq!(p.with_time(4), Int4D::new(4, 1, 2, 3));
        assert_eq!(Int3D::new(1, 2, 3).at(9), p);
    }

    #[test]
    fn distance_squared_handles_negative_axes() {
        let a = Int3D::new(-2, 0, 0);
        let b = Int3D::new(1, 4, 0);
        assert_eq!(a.distance_squared(b), 25);
    }
}

#[cfg(test)]
mod metric {
    use crate::{Int3D, Int4D, SpacetimeMetric, UniverseSettings, average_loss_rate, causal_distance};

    fn metric() -> SpacetimeMetric {
        SpacetimeMetric::new(1.0, 1)
    }

    #[test]
    fn distance_is_ceiling_of_euclidean() {
        let o = Int3D::new(0, 0, 0);
        assert_eq!(causal_distance(o, o), 0);
        assert_eq!(causal_distance(o, Int3D::new(3, 4, 0)), 5);
        // √2 rounds up to 2.
        assert_eq!(causal_distance(o, Int3D::new(1, 1, 0)), 2);
        assert_eq!(causal_distance(o, Int3D::new(0, 0, 1)), 1);
    }

    #[test]
    fn distance_ignores_time() {
        let m = metric();
        let a = Int4D::new(0, 0, 0, 0);
        let b = Int4D::new(50, 3, 4, 0);
        assert_eq!(m.distance(a, b), 5);
    }

    #[test]
    fn delay_rounds_up() {
        let m = SpacetimeMetric::new(2.0, 1);
        assert_eq!(m.delay_ticks(0), 0);
        assert_eq!(m.delay_ticks(4), 2);
        assert_eq!(m.delay_ticks(5), 3);
        assert_eq!(metric().delay_ticks(5), 5);
    }

    #[test]
    fn reachability_respects_light_cone() {
        let m = metric();
        let from = Int4D::new(0, 0, 0, 0);
        assert!(m.is_causally_reachable(from, Int4D::new(5, 3, 4, 0)));
        assert!(!m.is_causally_reachable(from, Int4D::new(4, 3, 4, 0)));
        assert!(!m.is_causally_reachable(from, Int4D::new(-1, 0, 0, 0)));
    }

    #[test]
    fn same_locality_is_lossless() {
        let m = metric();
        assert_eq!(m.remaining_fraction(0, 0.5), 1.0);
        assert_eq!(m.remaining_fraction(1, 0.5), 1.0);
        assert!(m.remaining_fraction(2, 0.5) < 1.0);
    }

    #[test]
    fn scenario_mixed_rates_over_five_cells() {
        // Sender declares 0.1, receiver 0.2 → shared 0.15; 0.85^5 ≈ 0.4437.
        let m = metric();
        let from = Int4D::new(0, 0, 0, 0);
        let to = Int4D::new(5, 3, 4, 0);
        let fraction = m.transfer_fraction(from, to, 0.1, 0.2);
        assert!((fraction - 0.443_705_312_5).abs() < 1e-9, "got {fraction}");
        assert!((1000.0 * fraction - 443.705_312_5).abs() < 1e-6);
    }

    #[test]
    fn average_rate_is_clamped() {
        assert_eq!(average_loss_rate(-1.0, 3.0), 0.5);
        assert!((average_loss_rate(0.2, 0.4) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn settings_build_metric() {
        let s = UniverseSettings { speed_of_light: 3.0, same_locality_distance: 2, ..Default::default() };
        let m = s.metric();
        assert_eq!(m.speed_of_light, 3.0);
        assert_eq!(m.same_locality_distance, 2);
    }

    mod props {
        use proptest::prelude::*;

        use crate::{Int4D, SpacetimeMetric, average_loss_rate};

        proptest! {
            #[test]
            fn loss_rate_average_is_symmetric(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
                prop_assert_eq!(average_loss_rate(a, b), average_loss_rate(b, a));
            }

            #[test]
            fn transfer_decay_is_symmetric_in_roles(
                ax in -20i64..20, ay in -20i64..20, az in -3i64..3,
                bx in -20i64..20, by in -20i64..20, bz in -3i64..3,
                ra in 0.0f64..=1.0, rb in 0.0f64..=1.0,
            ) {
                let m = SpacetimeMetric::new(1.0, 1);
                let a = Int4D::new(0, ax, ay, az);
                let b = Int4D::new(0, bx, by, bz);
                prop_assert_eq!(
                    m.transfer_fraction(a, b, ra, rb),
                    m.transfer_fraction(b, a, rb, ra),
                );
            }

            #[test]
            fn decay_matches_closed_form(d in 0u64..60, r in 0.0f64..=1.0) {
                let m = SpacetimeMetric::new(1.0, 1);
                let f = m.remaining_fraction(d, r);
                if d <= 1 {
                    prop_assert_eq!(f, 1.0);
                } else {
                    prop_assert!((f - (1.0 - r).powf(d as f64)).abs() < 1e-12);
                    prop_assert!((0.0..=1.0).contains(&f));
                }
            }
        }
    }
}

#[cfg(test)]
mod settings {
    use crate::{Int3D, UniverseSettings};

    #[test]
    fn default_is_valid() {
        assert!(UniverseSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_speed() {
        let s = UniverseSettings { speed_of_light: 0.0, ..Default::default() };
        assert!(s.validate().is_err());
        let s = UniverseSettings { speed_of_light: f64::NAN, ..Default::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_empty_grid() {
        let s = UniverseSettings { z_dim: 0, ..Default::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn contains_checks_bounds() {
        let s = UniverseSettings::default();
        assert!(s.contains(Int3D::new(0, 0, 0)));
        assert!(s.contains(Int3D::new(9, 9, 2)));
        assert!(!s.contains(Int3D::new(10, 0, 0)));
        assert!(!s.contains(Int3D::new(0, -1, 0)));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(7).as_time(), 7);
    }

    #[test]
    fn offset_saturates_instead_of_wrapping() {
        assert_eq!(Tick(u64::MAX - 1).offset(5), Tick(u64::MAX));
        assert_eq!(Tick(3) + u64::MAX, Tick(u64::MAX));
        assert_eq!(Tick(u64::MAX).as_time(), i64::MAX);
    }

    #[test]
    fn clock_advances() {
        let mut clock = SimClock::new();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.to_string(), "T2");
    }

    #[test]
    fn config_end_tick_and_validation() {
        let cfg = SimConfig { total_ticks: 8, ..Default::default() };
        assert_eq!(cfg.end_tick(), Tick(8));
        assert!(cfg.validate().is_ok());
        let bad = SimConfig { num_threads: Some(0), ..Default::default() };
        assert!(bad.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn open_unit_excludes_zero() {
        let mut rng = AgentRng::from_seed(3);
        for _ in 0..10_000 {
            let u = rng.open_unit();
            assert!(u > 0.0 && u < 1.0);
        }
    }

    #[test]
    fn global_seed_changes_stream() {
        let a: u64 = AgentRng::new(1, AgentId(3)).random();
        let b: u64 = AgentRng::new(2, AgentId(3)).random();
        assert_ne!(a, b);
    }
}

#[cfg(test)]
mod resource {
    use crate::{FuelCategory, QualityClass, ResourceType};

    #[test]
    fn indices_are_dense() {
        for (i, c) in QualityClass::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        for (i, c) in FuelCategory::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn display() {
        assert_eq!(ResourceType::Metal.to_string(), "metal");
        assert_eq!(FuelCategory::Storage.to_string(), "storage");
        assert_eq!(QualityClass::Second.to_string(), "second");
    }
}
