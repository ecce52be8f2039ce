mod tests {
    use embassy_time::Duration;
    use gasworks_neurones::energy::{
        BRIGHTNESS, COOLDOWN, COOLDOWN_LOWER_LE, COOLDOWN_UPPER_LE, DURATION, DURATION_LOWER_HE,
        DURATION_LOWER_LE, DURATION_UPPER_HE, DURATION_UPPER_LE, EnergyBounds, RandomSource,
        WARM_UP_BRIGHTNESS, WARM_UP_COOLDOWN, clamp_energy,
    };

    struct FixedUnit(f32);

    impl RandomSource for FixedUnit {
        fn unit(&mut self) -> f32 {
            self.0
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn millis(value: u32) -> f32 {
        value as f32
    }

    #[test]
    fn test_range_at_energy_extremes() {
        assert_eq!(
            DURATION.range(0.0),
            (millis(DURATION_LOWER_LE), millis(DURATION_UPPER_LE))
        );
        assert_eq!(
            DURATION.range(1.0),
            (millis(DURATION_LOWER_HE), millis(DURATION_UPPER_HE))
        );
        assert_eq!(BRIGHTNESS.range(0.0), (5.0, 20.0));
        assert_eq!(BRIGHTNESS.range(1.0), (105.0, 255.0));
    }

    #[test]
    fn test_range_interpolates_linearly() {
        assert_eq!(DURATION.range(0.5), (1575.0, 3175.0));

        let bounds = EnergyBounds::new(100.0, 200.0, 0.0, 0.0);
        assert_eq!(bounds.range(0.25), (25.0, 50.0));
        assert_eq!(bounds.range(0.75), (75.0, 150.0));
    }

    #[test]
    fn test_range_clamps_energy() {
        assert_eq!(DURATION.range(2.0), DURATION.range(1.0));
        assert_eq!(DURATION.range(-1.0), DURATION.range(0.0));
        assert_eq!(DURATION.range(f32::NAN), DURATION.range(0.0));
        assert_eq!(clamp_energy(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_draw_stays_within_range() {
        for energy in [0.0, 0.3, 1.0] {
            let (lower, upper) = COOLDOWN.range(energy);
            for unit in [0.0, 0.25, 0.5, 0.75, 0.999] {
                let value = COOLDOWN.draw(energy, &mut FixedUnit(unit));
                assert!(value >= lower && value <= upper, "{value} outside {lower}..{upper}");
            }
        }

        assert_eq!(COOLDOWN.draw(0.0, &mut FixedUnit(0.0)), millis(COOLDOWN_LOWER_LE));
        assert_eq!(COOLDOWN.draw(0.0, &mut FixedUnit(7.0)), millis(COOLDOWN_UPPER_LE));
        assert_eq!(
            COOLDOWN.draw(0.0, &mut FixedUnit(f32::NAN)),
            millis(COOLDOWN_LOWER_LE)
        );
    }

    #[test]
    fn test_draw_with_fastrand() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let value = DURATION.draw(0.0, &mut rng);
            assert!((3000.0..=6000.0).contains(&value));
        }
    }

    #[test]
    fn test_draw_millis_and_intensity() {
        assert_eq!(
            DURATION.draw_millis(0.0, &mut FixedUnit(0.5)),
            Duration::from_millis(4500)
        );
        assert_eq!(BRIGHTNESS.draw_intensity(1.0, &mut FixedUnit(1.0)), 255);
        assert_eq!(BRIGHTNESS.draw_intensity(0.0, &mut FixedUnit(0.0)), 5);

        let overflowing = EnergyBounds::new(300.0, 400.0, 300.0, 400.0);
        assert_eq!(overflowing.draw_intensity(0.0, &mut FixedUnit(0.5)), 255);
    }

    #[test]
    fn test_warm_up_constants() {
        assert_eq!(
            WARM_UP_COOLDOWN.draw_millis(1.0, &mut FixedUnit(0.9)),
            Duration::from_millis(0)
        );
        assert_eq!(
            WARM_UP_COOLDOWN.draw_millis(0.0, &mut FixedUnit(0.1)),
            Duration::from_millis(6000)
        );
        assert_eq!(WARM_UP_BRIGHTNESS.draw_intensity(0.0, &mut FixedUnit(0.4)), 255);
        assert_eq!(WARM_UP_BRIGHTNESS.draw_intensity(1.0, &mut FixedUnit(0.4)), 5);
    }
}
