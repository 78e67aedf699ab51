use std::sync::atomic::{AtomicBool, Ordering};

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{Error, Result};

/// Frame length giving enough frequency resolution to separate the first
/// four formants at the given rate. 50% overlap between frames.
pub fn frame_len_for(sample_rate: u32) -> usize {
    if sample_rate >= 32_000 {
        4096
    } else {
        2048
    }
}

/// Energy-weighted mean magnitude spectrum over a whole clip.
///
/// Louder frames count for more, so silence between phrases does not wash
/// out the voiced spectrum.
#[derive(Debug, Clone)]
pub struct AggregateSpectrum {
    mags: Vec<f32>,
    bin_hz: f32,
}

impl AggregateSpectrum {
    /// Width of one FFT bin in Hz.
    pub fn bin_hz(&self) -> f32 {
        self.bin_hz
    }

    /// Mean magnitudes, DC up to Nyquist.
    pub fn magnitudes(&self) -> &[f32] {
        &self.mags
    }

    /// Energy-weighted mean frequency; 0.0 for an all-silent spectrum.
    pub fn centroid_hz(&self) -> f32 {
        let total: f32 = self.mags.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f32 = self
            .mags
            .iter()
            .enumerate()
            .map(|(i, &m)| i as f32 * self.bin_hz * m)
            .sum();
        weighted / total
    }

    /// Summed magnitude energy in `[lo_hz, hi_hz)`.
    pub fn band_energy(&self, lo_hz: f32, hi_hz: f32) -> f32 {
        self.mags
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let f = *i as f32 * self.bin_hz;
                f >= lo_hz && f < hi_hz
            })
            .map(|(_, &m)| m * m)
            .sum()
    }
}

/// Aggregate a clip into one spectrum, checking `cancel` between frames.
///
/// Frames are Hann-windowed with 50% overlap; a clip shorter than one frame
/// is analyzed as a single zero-padded frame. Fails with
/// [`Error::Cancelled`] when the flag flips mid-clip (partial sums are
/// discarded with the function's stack).
pub fn aggregate(
    samples: &[f32],
    sample_rate: u32,
    cancel: Option<&AtomicBool>,
) -> Result<AggregateSpectrum> {
    let frame_len = frame_len_for(sample_rate);
    let hop = frame_len / 2;
    let half = frame_len / 2;
    let bin_hz = sample_rate as f32 / frame_len as f32;

    // Hann window, same shape the realtime spectrum view uses.
    let window: Vec<f32> = (0..frame_len)
        .map(|i| {
            let denom = (frame_len - 1) as f32;
            0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_len);

    let mut scratch = vec![Complex::new(0.0f32, 0.0f32); frame_len];
    let mut sums = vec![0.0f32; half];
    let mut total_weight = 0.0f32;
    let mut frames = 0usize;

    let mut start = 0usize;
    loop {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
        }

        let frame = &samples[start..samples.len().min(start + frame_len)];
        if frame.is_empty() && frames > 0 {
            break;
        }

        let mut energy = 0.0f32;
        for (i, slot) in scratch.iter_mut().enumerate() {
            let s = frame.get(i).copied().unwrap_or(0.0) * window[i];
            energy += s * s;
            *slot = Complex::new(s, 0.0);
        }
        fft.process(&mut scratch);

        let weight = energy.max(1e-12);
        for (sum, bin) in sums.iter_mut().zip(scratch.iter().take(half)) {
            *sum += bin.norm() * weight;
        }
        total_weight += weight;
        frames += 1;

        start += hop;
        if start + frame_len > samples.len() {
            break;
        }
    }

    for sum in &mut sums {
        *sum /= total_weight;
    }

    Ok(AggregateSpectrum {
        mags: sums,
        bin_hz,
    })
}
