//! Unit tests for rc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarId, SpecId, TrackId};

    #[test]
    fn ordering() {
        assert!(CarId(0) < CarId(1));
        assert!(TrackId(100) > TrackId(99));
    }

    #[test]
    fn display() {
        assert_eq!(CarId(7).to_string(), "car#7");
        assert_eq!(TrackId(2).to_string(), "track#2");
        assert_eq!(SpecId(11).to_string(), "spec#11");
    }

    #[test]
    fn from_raw() {
        assert_eq!(CarId::from(3u32), CarId(3));
        assert_eq!(SpecId(9).raw(), 9u64);
    }
}

#[cfg(test)]
mod vec2 {
    use crate::Vec2;

    #[test]
    fn perp_dot_is_left_positive() {
        let heading = Vec2::X;
        assert!(heading.perp_dot(Vec2::new(1.0, 1.0)) > 0.0, "left of +x");
        assert!(heading.perp_dot(Vec2::new(1.0, -1.0)) < 0.0, "right of +x");
    }

    #[test]
    fn negated_perp_points_right() {
        assert_eq!(-Vec2::X.perp(), Vec2::new(0.0, -1.0));
        assert_eq!(-Vec2::Y.perp(), Vec2::new(1.0, 0.0));
        assert_eq!(Vec2::X.perp(), Vec2::Y);
    }

    #[test]
    fn normalize_zero_falls_back() {
        assert!(Vec2::ZERO.try_normalize().is_none());
        assert_eq!(Vec2::ZERO.normalize_or(Vec2::Y), Vec2::Y);
        let n = Vec2::new(3.0, 4.0).normalize_or(Vec2::X);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_and_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.25), Vec2::new(2.5, 0.0));
        assert!((a.distance(b) - 10.0).abs() < 1e-6);
        assert!((a.distance_squared(b) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn from_angle_round_trips() {
        let v = Vec2::from_angle(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6);
        assert!((v.to_angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick::ZERO.to_string(), "T0");
    }
}

#[cfg(test)]
mod rng {
    use crate::{CarId, DriverRng, RandomSource, SequenceRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = DriverRng::new(12345, CarId(0));
        let mut r2 = DriverRng::new(12345, CarId(0));
        for _ in 0..100 {
            assert_eq!(r1.next_f32(), r2.next_f32());
        }
    }

    #[test]
    fn different_cars_differ() {
        let mut r0 = DriverRng::new(1, CarId(0));
        let mut r1 = DriverRng::new(1, CarId(1));
        let a: Vec<f32> = (0..4).map(|_| r0.next_f32()).collect();
        let b: Vec<f32> = (0..4).map(|_| r1.next_f32()).collect();
        assert_ne!(a, b, "streams for adjacent cars should diverge");
    }

    #[test]
    fn draws_in_unit_interval() {
        let mut rng = DriverRng::new(0, CarId(0));
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = DriverRng::new(0, CarId(0));
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn sequence_cycles_and_clamps() {
        let mut rng = SequenceRng::new([0.1, 2.0, -1.0]);
        assert_eq!(rng.next_f32(), 0.1);
        assert!(rng.next_f32() < 1.0);
        assert_eq!(rng.next_f32(), 0.0);
        assert_eq!(rng.next_f32(), 0.1);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn sequence_helpers() {
        let mut low = SequenceRng::constant(0.0);
        assert!(low.chance(0.01));
        assert_eq!(low.sign(), -1.0);
        assert_eq!(low.range(2.0, 4.0), 2.0);

        let mut high = SequenceRng::constant(0.75);
        assert!(!high.chance(0.5));
        assert_eq!(high.sign(), 1.0);
        assert_eq!(high.range(0.0, 4.0), 3.0);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut rng = SequenceRng::default();
        assert_eq!(rng.next_f32(), 0.0);
    }
}
