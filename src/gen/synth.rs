use std::f32::consts::TAU;
use std::fmt;

use super::waveform::Waveform;

/// Fixed output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Length of the linear fade-in and fade-out, in seconds.
pub const FADE_SECONDS: f32 = 0.05;

/// A frequency or duration field failed to parse as a finite positive number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInput(String);

impl InvalidInput {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl std::error::Error for InvalidInput {}

/// Validated parameters for one synthesis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisRequest {
    pub frequency: f32,
    pub duration: f32,
    pub waveform: Waveform,
    pub volume: f32,
}

impl SynthesisRequest {
    /// Build a request from numeric values. Frequency and duration must be
    /// finite and strictly positive; volume is clamped to [0.0, 1.0].
    pub fn new(
        frequency: f32,
        duration: f32,
        waveform: Waveform,
        volume: f32,
    ) -> Result<Self, InvalidInput> {
        check_positive(frequency, "frequency")?;
        check_positive(duration, "duration")?;
        Ok(Self {
            frequency,
            duration,
            waveform,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Build a request from the text fields the UI collects.
    pub fn parse(
        frequency: &str,
        duration: &str,
        waveform: Waveform,
        volume: f32,
    ) -> Result<Self, InvalidInput> {
        let frequency = parse_field(frequency, "frequency")?;
        let duration = parse_field(duration, "duration")?;
        Self::new(frequency, duration, waveform, volume)
    }
}

fn parse_field(text: &str, field: &'static str) -> Result<f32, InvalidInput> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| InvalidInput::new(format!("{} is not a number: {:?}", field, text)))
}

fn check_positive(value: f32, field: &'static str) -> Result<(), InvalidInput> {
    if !value.is_finite() || value <= 0.0 {
        return Err(InvalidInput::new(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// One generated signal: a time axis and the matching sample sequence, both
/// `floor(44100 * duration)` long. Samples lie in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub time: Vec<f32>,
    pub samples: Vec<f32>,
}

impl Synthesis {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Render a validated request into a time axis and sample sequence.
///
/// Time values are evenly spaced over [0, duration), right endpoint excluded.
/// A linear fade-in and fade-out of [`FADE_SECONDS`] each (clamped to half the
/// sequence for short signals) remove onset and offset clicks, and every
/// sample is clipped to [-1.0, 1.0] as a final safety net.
pub fn synthesize(request: &SynthesisRequest) -> Synthesis {
    let n = (SAMPLE_RATE as f64 * request.duration as f64).floor() as usize;
    if n == 0 {
        return Synthesis {
            time: Vec::new(),
            samples: Vec::new(),
        };
    }

    let step = request.duration / n as f32;
    let mut time = Vec::with_capacity(n);
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f32 * step;
        let theta = TAU * request.frequency * t;
        time.push(t);
        samples.push(request.volume * request.waveform.value(theta));
    }

    apply_fades(&mut samples);
    for sample in &mut samples {
        *sample = sample.clamp(-1.0, 1.0);
    }

    Synthesis { time, samples }
}

/// Ramp the head of the buffer from 0 to 1 and the tail from 1 to 0. The fade
/// length is clamped to half the buffer so the two regions never overlap.
fn apply_fades(samples: &mut [f32]) {
    let n = samples.len();
    let fade = ((FADE_SECONDS * SAMPLE_RATE as f32) as usize).min(n / 2);
    if fade == 0 {
        return;
    }
    let denom = fade.saturating_sub(1).max(1) as f32;
    for i in 0..fade {
        let ramp = i as f32 / denom;
        samples[i] *= ramp;
        samples[n - 1 - i] *= ramp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(frequency: f32, duration: f32, waveform: Waveform, volume: f32) -> SynthesisRequest {
        SynthesisRequest::new(frequency, duration, waveform, volume).unwrap()
    }

    #[test]
    fn time_axis_and_samples_have_equal_length() {
        let synthesis = synthesize(&request(440.0, 0.25, Waveform::Sine, 1.0));
        let expected = (SAMPLE_RATE as f64 * 0.25) as usize;
        assert_eq!(synthesis.time.len(), expected);
        assert_eq!(synthesis.samples.len(), expected);
    }

    #[test]
    fn time_axis_excludes_right_endpoint() {
        let synthesis = synthesize(&request(100.0, 0.5, Waveform::Sine, 1.0));
        assert_eq!(synthesis.time[0], 0.0);
        let last = *synthesis.time.last().unwrap();
        assert!(last < 0.5, "last time value {} should be below duration", last);
        // Even spacing.
        let step = synthesis.time[1] - synthesis.time[0];
        let mid = synthesis.time[1001] - synthesis.time[1000];
        assert!((step - mid).abs() < 1e-6);
    }

    #[test]
    fn fades_start_and_end_at_zero() {
        let synthesis = synthesize(&request(440.0, 1.0, Waveform::Square, 1.0));
        let fade = (FADE_SECONDS * SAMPLE_RATE as f32) as usize;
        assert_eq!(synthesis.samples[0], 0.0);
        assert_eq!(*synthesis.samples.last().unwrap(), 0.0);
        // The fade ramp scales monotonically in magnitude relative to the
        // unfaded square wave, so early samples are strictly below volume.
        assert!(synthesis.samples[fade / 2].abs() <= 0.5 + 1e-6);
        // Past the fade region the square wave reaches full volume.
        let peak = synthesis.samples[fade..fade + 200]
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!((peak - 1.0).abs() < 1e-6);
    }

    #[test]
    fn short_sequences_clamp_fade_to_half() {
        // 10 ms at 44100 Hz is 441 samples, well under two full fades.
        let synthesis = synthesize(&request(440.0, 0.01, Waveform::Sawtooth, 1.0));
        assert_eq!(synthesis.len(), 441);
        assert_eq!(synthesis.samples[0], 0.0);
        for sample in &synthesis.samples {
            assert!((-1.0..=1.0).contains(sample));
        }
    }

    #[test]
    fn all_shapes_stay_in_range_at_full_volume() {
        for waveform in Waveform::ALL {
            for &volume in &[0.1, 0.5, 1.0] {
                let synthesis = synthesize(&request(733.0, 0.2, waveform, volume));
                for sample in &synthesis.samples {
                    assert!(
                        (-1.0..=1.0).contains(sample),
                        "{:?} at volume {} produced {}",
                        waveform,
                        volume,
                        sample
                    );
                }
            }
        }
    }

    #[test]
    fn reference_sine_scenario() {
        // 440 Hz, 1 s, sine, volume 0.5.
        let synthesis = synthesize(&request(440.0, 1.0, Waveform::Sine, 0.5));
        assert_eq!(synthesis.len(), 44_100);
        assert_eq!(synthesis.samples[0], 0.0);
        let peak = synthesis
            .samples
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= 0.5 + 1e-6, "peak {} exceeds volume", peak);
        assert!(peak > 0.45, "peak {} suspiciously low", peak);
    }

    #[test]
    fn volume_scales_amplitude() {
        let loud = synthesize(&request(440.0, 0.3, Waveform::Triangle, 1.0));
        let quiet = synthesize(&request(440.0, 0.3, Waveform::Triangle, 0.25));
        let mid = loud.len() / 2;
        assert!((loud.samples[mid] * 0.25 - quiet.samples[mid]).abs() < 1e-6);
    }

    #[test]
    fn rejects_nonpositive_and_nonnumeric_input() {
        assert!(SynthesisRequest::new(0.0, 1.0, Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::new(-10.0, 1.0, Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::new(440.0, 0.0, Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::new(440.0, f32::NAN, Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::new(f32::INFINITY, 1.0, Waveform::Sine, 0.5).is_err());

        assert!(SynthesisRequest::parse("abc", "1.0", Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::parse("440", "", Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::parse("440", "-1", Waveform::Sine, 0.5).is_err());
        assert!(SynthesisRequest::parse(" 440 ", " 1.0 ", Waveform::Sine, 0.5).is_ok());
    }

    #[test]
    fn error_message_names_the_field() {
        let err = SynthesisRequest::parse("nope", "1.0", Waveform::Sine, 0.5).unwrap_err();
        assert!(err.to_string().contains("frequency"));
        let err = SynthesisRequest::parse("440", "0", Waveform::Sine, 0.5).unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn volume_is_clamped() {
        let req = SynthesisRequest::new(440.0, 0.1, Waveform::Sine, 2.0).unwrap();
        assert_eq!(req.volume, 1.0);
    }
}
