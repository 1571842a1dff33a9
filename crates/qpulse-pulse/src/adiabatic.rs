//! Adiabatic flux pulses for controlled-phase gates.
//!
//! The trajectory follows Martinis & Geller, "Fast adiabatic qubit gates using
//! only σz control", PRA 90, 022307 (2014). The mixing angle θ on the
//! |11⟩-|02⟩ Bloch sphere is a truncated Fourier series in a normalized time
//! τ ∈ [0, 1]; integrating sin θ(τ) maps τ to physical time.

use serde::{Deserialize, Serialize};

use crate::error::{PulseError, PulseResult};
use crate::interp::{cumulative_trapz, interp, linspace, trapz};
use crate::pulse::Pulse;
use crate::transmon::Transmon;

/// Number of τ samples used for the numerical integration.
pub const TRAJECTORY_POINTS: usize = 1000;

/// Parameters that only apply to adiabatic flux shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdiabaticParams {
    /// Fourier coefficients λ₁, λ₂, ... of θ(τ). λ₁ is renormalized so the
    /// trajectory reaches the final angle at τ = 1/2.
    pub fourier_coefficients: Vec<f64>,
    /// Coupling strength between |11⟩ and |02⟩, in Hz.
    pub coupling: f64,
    /// Detuning of |11⟩ from |02⟩ at the idle point, in Hz.
    pub offset: f64,
    /// Detuning at the interaction point, in Hz.
    pub target_detuning: f64,
    /// Linear frequency-to-voltage slope, used when no qubit model is given.
    pub df_dv: f64,
    /// Nonlinear frequency model; replaces `df_dv` when present.
    pub qubit: Option<Transmon>,
    /// Flip the sign of the output.
    pub negative_amplitude: bool,
}

impl Default for AdiabaticParams {
    fn default() -> Self {
        Self {
            fourier_coefficients: vec![0.3],
            coupling: 20e6,
            offset: 300e6,
            target_detuning: 0.0,
            df_dv: 500e6,
            qubit: None,
            negative_amplitude: false,
        }
    }
}

/// Precomputed θ(t) lookup for one pulse width.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Initial mixing angle.
    pub theta_i: f64,
    /// Final mixing angle.
    pub theta_f: f64,
    t_tau: Vec<f64>,
    theta_tau: Vec<f64>,
}

impl Trajectory {
    /// Build the trajectory for a pulse rising over `width` seconds.
    pub fn new(params: &AdiabaticParams, width: f64) -> PulseResult<Self> {
        if params.coupling == 0.0 || !params.coupling.is_finite() {
            return Err(PulseError::DegenerateCoupling {
                coupling: params.coupling,
                offset: params.offset,
                target: params.target_detuning,
            });
        }
        let theta_i = (2.0 * params.coupling / params.offset).atan();
        let theta_f = (2.0 * params.coupling / params.target_detuning).atan();
        if theta_i.tan() == 0.0 || !theta_i.is_finite() || !theta_f.is_finite() {
            return Err(PulseError::DegenerateCoupling {
                coupling: params.coupling,
                offset: params.offset,
                target: params.target_detuning,
            });
        }

        let mut lambda = if params.fourier_coefficients.is_empty() {
            vec![0.0]
        } else {
            params.fourier_coefficients.clone()
        };
        let odd_tail: f64 = lambda.iter().skip(2).step_by(2).sum();
        lambda[0] = (theta_f - theta_i) / 2.0 - odd_tail;

        let tau = linspace(0.0, 1.0, TRAJECTORY_POINTS);
        let theta_tau: Vec<f64> = tau
            .iter()
            .map(|&x| {
                lambda
                    .iter()
                    .enumerate()
                    .map(|(k, l)| {
                        let n = (k + 1) as f64;
                        l * (1.0 - (2.0 * std::f64::consts::PI * n * x).cos())
                    })
                    .sum::<f64>()
                    + theta_i
            })
            .collect();

        let sin_theta: Vec<f64> = theta_tau.iter().map(|th| th.sin()).collect();
        let t_tau_total = trapz(&sin_theta, &tau);
        if t_tau_total <= 0.0 {
            return Err(PulseError::InvalidParameter {
                name: "fourier_coefficients",
                reason: "trajectory has non-positive duration in τ".to_string(),
            });
        }
        let width_tau = width / t_tau_total;
        let tau_scaled = linspace(0.0, width_tau, TRAJECTORY_POINTS);
        let t_tau = cumulative_trapz(&sin_theta, &tau_scaled);

        Ok(Self {
            theta_i,
            theta_f,
            t_tau,
            theta_tau,
        })
    }

    /// Mixing angle `elapsed` seconds into the (plateau-free) trajectory.
    pub fn theta_at(&self, elapsed: f64) -> f64 {
        interp(elapsed, &self.t_tau, &self.theta_tau)
    }
}

/// Flux envelope of a single adiabatic controlled-phase pulse.
pub fn adiabatic_flux(pulse: &Pulse, t0: f64, t: &[f64]) -> PulseResult<Vec<f64>> {
    let params = &pulse.adiabatic;
    let trajectory = Trajectory::new(params, pulse.width)?;
    let (theta_i, theta_f) = (trajectory.theta_i, trajectory.theta_f);
    let width = pulse.width;
    let plateau = pulse.plateau;
    let cot_i = 1.0 / theta_i.tan();

    if params.qubit.is_none() && params.df_dv == 0.0 {
        return Err(PulseError::InvalidParameter {
            name: "df_dv",
            reason: "linear flux slope must be non-zero".to_string(),
        });
    }

    let mut values = Vec::with_capacity(t.len());
    for &ti in t {
        let in_plateau = ti - t0 + plateau / 2.0;
        let elapsed = ti - t0 + width / 2.0 + plateau / 2.0;
        let theta = if 0.0 < in_plateau && in_plateau < plateau {
            theta_f
        } else if 0.0 < elapsed && elapsed < (width + plateau) / 2.0 {
            trajectory.theta_at(elapsed)
        } else if 0.0 < elapsed && elapsed < width + plateau {
            trajectory.theta_at(elapsed - plateau)
        } else {
            theta_i
        };
        let theta = theta.max(theta_i);
        let df = 2.0 * params.coupling * (1.0 / theta.tan() - cot_i);
        let value = match &params.qubit {
            Some(qubit) => qubit.df_to_dv(df)?,
            None => df / params.df_dv,
        };
        values.push(if params.negative_amplitude { -value } else { value });
    }
    Ok(values)
}

/// Flux envelope of a net-zero pulse: two half-length adiabatic pulses of
/// opposite sign, centered a quarter of the total duration either side of `t0`.
pub fn net_zero(pulse: &Pulse, t0: f64, t: &[f64]) -> PulseResult<Vec<f64>> {
    let half = pulse.net_zero_half();
    let quarter = pulse.total_duration() / 4.0;
    let first = adiabatic_flux(&half, t0 - quarter, t)?;
    let second = adiabatic_flux(&half, t0 + quarter, t)?;
    Ok(first.iter().zip(&second).map(|(a, b)| a - b).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{PulseKind, PulseShape};

    fn cz_pulse() -> Pulse {
        Pulse::new(PulseShape::AdiabaticFlux)
            .with_kind(PulseKind::Z)
            .with_width(40e-9)
    }

    #[test]
    fn test_trajectory_reaches_final_angle() {
        let params = AdiabaticParams::default();
        let traj = Trajectory::new(&params, 40e-9).unwrap();
        // Half way through the rise the angle is at its maximum.
        let mid = traj.theta_at(20e-9);
        assert!((mid - traj.theta_f).abs() < 1e-2, "mid={mid} θf={}", traj.theta_f);
        assert!((traj.theta_at(0.0) - traj.theta_i).abs() < 1e-12);
    }

    #[test]
    fn test_zero_coupling_is_degenerate() {
        let params = AdiabaticParams {
            coupling: 0.0,
            ..AdiabaticParams::default()
        };
        assert!(matches!(
            Trajectory::new(&params, 40e-9),
            Err(PulseError::DegenerateCoupling { .. })
        ));
    }

    #[test]
    fn test_flux_is_zero_at_edges_and_dips_in_middle() {
        let pulse = cz_pulse();
        let t = linspace(-20e-9, 20e-9, 401);
        let v = adiabatic_flux(&pulse, 0.0, &t).unwrap();
        assert!(v[0].abs() < 1e-12);
        assert!(v[400].abs() < 1e-12);
        // Pulling |11⟩ towards |02⟩ lowers the frequency.
        let min = v.iter().copied().fold(f64::INFINITY, f64::min);
        let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(min < 0.0);
        assert!(max <= 1e-12);
        assert!((v[200] - min).abs() < 1e-3 * min.abs());
        // At the interaction point df = target - offset.
        assert!((v[200] + 0.6).abs() < 1e-3, "v[200]={}", v[200]);
    }

    #[test]
    fn test_target_detuning_sets_interaction_point() {
        let mut pulse = cz_pulse();
        pulse.adiabatic.target_detuning = 100e6;
        let traj = Trajectory::new(&pulse.adiabatic, pulse.width).unwrap();
        assert!((traj.theta_f - (0.4f64).atan()).abs() < 1e-12);
        assert!(traj.theta_f < std::f64::consts::FRAC_PI_2);

        let t = linspace(-20e-9, 20e-9, 401);
        let v = adiabatic_flux(&pulse, 0.0, &t).unwrap();
        assert!(v[0].abs() < 1e-12);
        assert!(v[400].abs() < 1e-12);
        // (100 MHz - 300 MHz) / 500 MHz/V
        assert!((v[200] + 0.4).abs() < 1e-3, "v[200]={}", v[200]);
    }

    #[test]
    fn test_negative_amplitude_flips_sign() {
        let mut pulse = cz_pulse();
        let t = linspace(-20e-9, 20e-9, 41);
        let pos = adiabatic_flux(&pulse, 0.0, &t).unwrap();
        pulse.adiabatic.negative_amplitude = true;
        let neg = adiabatic_flux(&pulse, 0.0, &t).unwrap();
        for (a, b) in pos.iter().zip(&neg) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn test_plateau_holds_final_angle() {
        let pulse = cz_pulse().with_plateau(20e-9);
        let t = linspace(-5e-9, 5e-9, 11);
        let v = adiabatic_flux(&pulse, 0.0, &t).unwrap();
        for w in v.windows(2) {
            assert!((w[0] - w[1]).abs() < 1e-12);
        }
    }
}
