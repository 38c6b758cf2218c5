const PULSE_RATE: f64 = 0.002;
const PULSE_AMPLITUDE: f64 = 0.2;

/// Scale of marker `index` at wall-clock `time_ms`.
///
/// Each marker is phase-shifted by its index so neighbours do not beat in
/// unison. Purely decorative.
pub fn marker_pulse(time_ms: f64, index: usize) -> f32 {
    (1.0 + (time_ms * PULSE_RATE + index as f64).sin() * PULSE_AMPLITUDE) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_range() {
        for t in [0.0, 123.0, 9_999.5, 1.7e12] {
            for i in 0..10 {
                let s = marker_pulse(t, i);
                assert!((0.8 - 1e-6..=1.2 + 1e-6).contains(&s), "scale {s} at t={t}");
            }
        }
    }

    #[test]
    fn test_first_marker_starts_at_rest() {
        assert!((marker_pulse(0.0, 0) - 1.0).abs() < 1e-6);
    }
}
