// Exported WAV files must decode back to the original floats within one
// 16-bit quantization step.

use std::env;
use std::fs;
use std::path::PathBuf;

use tonegen::export::write_wav;
use tonegen::gen::{synthesize, SynthesisRequest, Waveform, SAMPLE_RATE};

fn temp_wav(name: &str) -> PathBuf {
    env::temp_dir().join(format!("tonegen_{}_{}.wav", name, std::process::id()))
}

#[test]
fn roundtrip_preserves_samples_within_one_step() {
    let request = SynthesisRequest::new(440.0, 0.5, Waveform::Triangle, 0.8)
        .expect("valid test parameters");
    let synthesis = synthesize(&request);

    let path = temp_wav("roundtrip");
    write_wav(&path, &synthesis.samples).expect("export should succeed");

    let mut reader = hound::WavReader::open(&path).expect("open exported file");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let decoded: Vec<i16> = reader
        .samples::<i16>()
        .map(|s| s.expect("decode sample"))
        .collect();
    assert_eq!(decoded.len(), synthesis.samples.len());

    let step = 1.0 / 32767.0;
    for (i, (&original, &quantized)) in synthesis.samples.iter().zip(&decoded).enumerate() {
        let restored = quantized as f32 / 32767.0;
        assert!(
            (original - restored).abs() <= step,
            "sample {} drifted: {} vs {}",
            i,
            original,
            restored
        );
    }

    fs::remove_file(&path).ok();
}

#[test]
fn extreme_amplitudes_stay_in_i16_range() {
    let samples = vec![1.0f32, -1.0, 0.0, 0.999_97, -0.999_97];
    let path = temp_wav("extremes");
    write_wav(&path, &samples).expect("export should succeed");

    let mut reader = hound::WavReader::open(&path).expect("open exported file");
    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded[0], 32767);
    assert_eq!(decoded[1], -32767);
    assert_eq!(decoded[2], 0);

    fs::remove_file(&path).ok();
}
