//! Readout trigger waveform.

use num_complex::Complex64;

use crate::config::ReadoutTrigger;

/// Trigger starting at the first non-zero readout sample.
///
/// Returns all zeros if the readout waveform is silent.
pub fn readout_trigger(readout_iq: &[Complex64], trigger: &ReadoutTrigger, sample_rate: f64) -> Vec<f64> {
    let n = readout_iq.len();
    let mut trig = vec![0.0; n];
    let Some(start) = readout_iq.iter().position(|c| c.norm() > 0.0) else {
        return trig;
    };
    let len = (trigger.duration * sample_rate).max(0.0) as usize;
    let end = (start + len).min(n);
    trig[start..end].fill(trigger.amplitude);
    trig[0] = 0.0;
    trig[n - 1] = 0.0;
    trig
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_follows_readout() {
        let mut iq = vec![Complex64::new(0.0, 0.0); 50];
        for s in &mut iq[12..40] {
            *s = Complex64::new(0.0, 0.1);
        }
        let trig = readout_trigger(
            &iq,
            &ReadoutTrigger {
                amplitude: 0.8,
                duration: 10.0,
            },
            1.0,
        );
        assert_eq!(trig[11], 0.0);
        assert_eq!(trig[12], 0.8);
        assert_eq!(trig[21], 0.8);
        assert_eq!(trig[22], 0.0);
    }

    #[test]
    fn test_trigger_ends_closed() {
        let iq = vec![Complex64::new(1.0, 0.0); 8];
        let trigger = ReadoutTrigger {
            amplitude: 1.0,
            duration: 100.0,
        };
        let trig = readout_trigger(&iq, &trigger, 1.0);
        assert_eq!(trig, vec![0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        assert!(readout_trigger(&[Complex64::new(0.0, 0.0); 4], &trigger, 1.0)
            .iter()
            .all(|&v| v == 0.0));
    }
}
