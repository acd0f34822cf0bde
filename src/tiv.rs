/*

Tiv.rs computes the Tonal Interval Vector of a chroma profile.

The chroma is run through a 12-point forward FFT, and the magnitudes of
harmonics 1 to 6 form a fingerprint of the harmonic content: diatonic and
consonant profiles cluster together, unrelated profiles sit far apart. Being
magnitudes, the fingerprint ignores transposition.

*/

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::chroma::Chroma;
use crate::notes::PITCH_CLASS_COUNT;

pub const TIV_SIZE: usize = 6;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tiv(pub [f64; TIV_SIZE]);

impl Tiv {
    pub fn components(&self) -> &[f64; TIV_SIZE] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Tiv) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn euclidean_distance(&self, other: &Tiv) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Angle in radians between two fingerprints.
    ///
    /// `None` when either vector has zero norm (a silent chroma): the angle is
    /// undefined there and must not be read as 0.
    pub fn angle_between(&self, other: &Tiv) -> Option<f64> {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            return None;
        }
        // Rounding can push identical directions just past 1
        Some((self.dot(other) / norms).clamp(-1.0, 1.0).acos())
    }
}

impl fmt::Display for Tiv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| format!("{:.3}", c)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

// Holds a planned FFT so every transform runs the same plan
#[derive(Clone)]
pub struct TivTransform {
    fft: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for TivTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TivTransform").finish_non_exhaustive()
    }
}

impl Default for TivTransform {
    fn default() -> Self {
        TivTransform::new()
    }
}

impl TivTransform {
    pub fn new() -> TivTransform {
        let mut planner = FftPlanner::<f64>::new();
        TivTransform {
            fft: planner.plan_fft_forward(PITCH_CLASS_COUNT),
        }
    }

    pub fn transform(&self, chroma: &Chroma) -> Tiv {
        let mut buffer: Vec<Complex<f64>> = chroma
            .bins()
            .iter()
            .map(|&bin| Complex {
                re: if bin { 1.0 } else { 0.0 },
                im: 0.0,
            })
            .collect();
        self.fft.process(&mut buffer);

        // Skip the DC bin, keep harmonics 1..=6
        let mut tiv = [0f64; TIV_SIZE];
        for (slot, coefficient) in tiv.iter_mut().zip(buffer.iter().skip(1)) {
            *slot = coefficient.norm();
        }
        Tiv(tiv)
    }
}

pub fn chroma_to_tiv(chroma: &Chroma) -> Tiv {
    TivTransform::new().transform(chroma)
}
