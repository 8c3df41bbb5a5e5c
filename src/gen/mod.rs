//! Waveform synthesis: shape functions and the sample-sequence generator.

pub mod synth;
pub mod waveform;

pub use synth::{synthesize, InvalidInput, Synthesis, SynthesisRequest, FADE_SECONDS, SAMPLE_RATE};
pub use waveform::Waveform;
