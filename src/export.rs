//! WAV export of a generated sample sequence.

use std::path::Path;

use anyhow::Context;

use crate::gen::SAMPLE_RATE;

/// Write `samples` to `path` as mono, 16-bit signed PCM at 44100 Hz.
///
/// Samples are expected in [-1.0, 1.0] (the synthesizer clips before handing
/// them over); conversion is `round(sample * 32767)`.
pub fn write_wav(path: &Path, samples: &[f32]) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for &sample in samples {
        writer.write_sample((sample * 32767.0).round() as i16)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finish writing {}", path.display()))?;
    log::info!("wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
