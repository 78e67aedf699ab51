use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// A decoded mono clip: normalized f32 samples plus the rate they were
/// recorded at.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Clip {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Read a mono PCM WAV file from disk.
pub fn read_mono_wav(path: impl AsRef<Path>) -> Result<Clip> {
    let file = std::fs::File::open(path.as_ref()).map_err(hound::Error::IoError)?;
    decode_mono(hound::WavReader::new(BufReader::new(file))?)
}

/// Decode an already-open WAV stream.
///
/// Fails with [`Error::UnsupportedFormat`] for anything but a single
/// channel — the fingerprint is defined over one voice signal, and
/// downmixing is the recorder's job, not ours.
pub fn decode_mono<R: Read>(mut reader: hound::WavReader<R>) -> Result<Clip> {
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(Error::UnsupportedFormat(format!(
            "{} channels (need mono)",
            spec.channels
        )));
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<Vec<f32>, _>>()?
        }
    };

    Ok(Clip {
        samples,
        sample_rate: spec.sample_rate,
    })
}
