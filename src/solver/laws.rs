//! Single-RC update laws and capacitor energy relations.
//!
//! Both voltage updates are exact solutions of the first-order RC equation
//! over one step `dt`, so they are stable for any step size.

/// Leakage/load decay over one step: `v * exp(-dt / (R C))`.
pub fn decay(v: f64, dt: f64, r: f64, c: f64) -> f64 {
    v * (-dt / (r * c)).exp()
}

/// Exponential approach toward `target` over one step through resistance `r`:
/// `v + (target - v) * (1 - exp(-dt / (R C)))`.
pub fn charge_toward(v: f64, target: f64, dt: f64, r: f64, c: f64) -> f64 {
    v + (target - v) * (1.0 - (-dt / (r * c)).exp())
}

/// Energy stored in capacitance `c` at voltage `v`: `C V^2 / 2`.
pub fn stored_energy(c: f64, v: f64) -> f64 {
    0.5 * c * v * v
}

/// Voltage at which the remaining energy above `v_cutoff` equals exactly
/// one checkpoint write:
/// `sqrt(2 (E_checkpoint + C V_cutoff^2 / 2) / C)`.
pub fn checkpoint_threshold(c: f64, v_cutoff: f64, checkpoint_energy: f64) -> f64 {
    (2.0 * (checkpoint_energy + stored_energy(c, v_cutoff)) / c).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_decay_one_time_constant() {
        // dt == RC
        let v = decay(2.0, 1e-3, 10.0, 1e-4);
        assert_relative_eq!(v, 2.0 * (-1.0f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_charge_toward_fraction() {
        // 1 - e^-1 of the gap is closed in one time constant
        let v = charge_toward(1.0, 3.0, 1e-3, 10.0, 1e-4);
        assert_relative_eq!(v, 1.0 + 2.0 * (1.0 - (-1.0f64).exp()), max_relative = 1e-12);

        // already at target
        assert_abs_diff_eq!(charge_toward(3.0, 3.0, 1e-3, 10.0, 1e-4), 3.0);
    }

    #[test]
    fn test_charge_toward_lower_target_discharges() {
        let v = charge_toward(3.0, 0.0, 1e-3, 1000.0, 220e-6);
        assert!(v < 3.0);
        assert_relative_eq!(v, decay(3.0, 1e-3, 1000.0, 220e-6), max_relative = 1e-12);
    }

    #[test]
    fn test_stored_energy() {
        assert_relative_eq!(stored_energy(220e-6, 3.3), 1.19790e-3, max_relative = 1e-5);
    }

    #[test]
    fn test_checkpoint_threshold_hand_computed() {
        // 2 * 3.8e-4 / 1e-3 = 0.76; 0.76 + 1.8^2 = 4.0; sqrt = 2.0
        let v = checkpoint_threshold(1e-3, 1.8, 3.8e-4);
        assert_relative_eq!(v, 2.0, max_relative = 1e-12);

        // 128 B at 1e-9 J/B on 220 uF: sqrt(3.24 + 2.56e-7 / 2.2e-4)
        let v = checkpoint_threshold(220e-6, 1.8, 1.28e-7);
        assert_relative_eq!(v, (3.24f64 + 1.28e-7 * 2.0 / 220e-6).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_checkpoint_threshold_between_cutoff_and_start() {
        for &c in &[47e-6, 100e-6, 220e-6, 470e-6, 1e-3] {
            let v = checkpoint_threshold(c, 1.8, 1e-6);
            assert!(v > 1.8 && v < 3.3, "threshold {v} out of range for C = {c}");
        }
    }

    #[test]
    fn test_checkpoint_threshold_without_checkpoint_cost() {
        assert_relative_eq!(checkpoint_threshold(220e-6, 1.8, 0.0), 1.8, max_relative = 1e-12);
    }
}
