mod tests {
    use embassy_time::{Duration, Instant};
    use gasworks_neurones::envelope::{Envelope, KeyFrame, PulseShape};

    fn pulse() -> Envelope {
        // rise 1000..1100, hold until 1200, fall until 1400
        Envelope::pulse(
            Instant::from_millis(1000),
            Duration::from_millis(400),
            200,
            PulseShape::DEFAULT,
        )
    }

    fn at(envelope: &Envelope, t_ms: u64) -> u8 {
        envelope.intensity_at(Instant::from_millis(t_ms))
    }

    #[test]
    fn test_pulse_keyframes() {
        let envelope = pulse();
        assert_eq!(envelope.start_low, KeyFrame::new(0, 1000));
        assert_eq!(envelope.start_high, KeyFrame::new(200, 1100));
        assert_eq!(envelope.end_high, KeyFrame::new(200, 1200));
        assert_eq!(envelope.end_low, KeyFrame::new(0, 1400));
        assert_eq!(envelope.duration(), Duration::from_millis(400));
    }

    #[test]
    fn test_outside_window_is_baseline() {
        let envelope = pulse();
        assert_eq!(at(&envelope, 0), 0);
        assert_eq!(at(&envelope, 999), 0);
        assert_eq!(at(&envelope, 1401), 0);
        assert_eq!(at(&envelope, 60_000), 0);

        let lifted = Envelope::new(
            KeyFrame::new(10, 100),
            KeyFrame::new(90, 200),
            KeyFrame::new(90, 300),
            KeyFrame::new(30, 400),
        );
        assert_eq!(at(&lifted, 50), 10);
        assert_eq!(at(&lifted, 401), 10);
    }

    #[test]
    fn test_edges_interpolate_linearly() {
        let envelope = pulse();
        assert_eq!(at(&envelope, 1000), 0);
        assert_eq!(at(&envelope, 1050), 100);
        assert_eq!(at(&envelope, 1100), 200);
        assert_eq!(at(&envelope, 1150), 200);
        assert_eq!(at(&envelope, 1200), 200);
        assert_eq!(at(&envelope, 1300), 100);
        assert_eq!(at(&envelope, 1400), 0);
    }

    #[test]
    fn test_envelope_shape_is_trapezoid() {
        let envelope = pulse();

        let mut previous = at(&envelope, 1000);
        for t in 1001..=1100 {
            let current = at(&envelope, t);
            assert!(current >= previous, "rising edge dipped at {t}");
            previous = current;
        }
        for t in 1100..=1200 {
            assert_eq!(at(&envelope, t), 200);
        }
        for t in 1201..=1400 {
            let current = at(&envelope, t);
            assert!(current <= previous, "falling edge rose at {t}");
            previous = current;
        }
    }

    #[test]
    fn test_zero_length_edges_step() {
        let envelope = Envelope::new(
            KeyFrame::new(0, 10),
            KeyFrame::new(180, 10),
            KeyFrame::new(180, 20),
            KeyFrame::new(0, 20),
        );
        assert_eq!(at(&envelope, 9), 0);
        assert_eq!(at(&envelope, 10), 180);
        assert_eq!(at(&envelope, 20), 180);
        assert_eq!(at(&envelope, 21), 0);

        let instant = Envelope::pulse(
            Instant::from_millis(500),
            Duration::from_millis(0),
            255,
            PulseShape::DEFAULT,
        );
        assert_eq!(at(&instant, 500), 255);
        assert_eq!(at(&instant, 501), 0);
        assert!(instant.is_elapsed(Instant::from_millis(500)));
    }

    #[test]
    fn test_idle_envelope_is_dark() {
        let envelope = Envelope::IDLE;
        assert_eq!(at(&envelope, 0), 0);
        assert_eq!(at(&envelope, 12_345), 0);
        assert!(envelope.is_elapsed(Instant::from_millis(0)));
    }

    #[test]
    fn test_pulse_shape_split_covers_duration() {
        for millis in [0, 1, 7, 3001, 29_999] {
            let envelope = Envelope::pulse(
                Instant::from_millis(0),
                Duration::from_millis(millis),
                100,
                PulseShape::DEFAULT,
            );
            assert_eq!(envelope.duration(), Duration::from_millis(millis));
        }

        let greedy = PulseShape {
            rise: 0.9,
            hold: 0.9,
        };
        let (rise, hold, fall) = greedy.split(Duration::from_millis(1000));
        assert_eq!(rise, Duration::from_millis(900));
        assert_eq!(hold, Duration::from_millis(100));
        assert_eq!(fall, Duration::from_millis(0));

        let broken = PulseShape {
            rise: f32::NAN,
            hold: -1.0,
        };
        let (rise, hold, fall) = broken.split(Duration::from_millis(1000));
        assert_eq!(rise, Duration::from_millis(0));
        assert_eq!(hold, Duration::from_millis(0));
        assert_eq!(fall, Duration::from_millis(1000));
    }

    #[test]
    fn test_is_elapsed() {
        let envelope = pulse();
        assert!(!envelope.is_elapsed(Instant::from_millis(1399)));
        assert!(envelope.is_elapsed(Instant::from_millis(1400)));
    }
}
