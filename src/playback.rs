//! Playback of a finished sample buffer through the default output device.

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SizedSample, Stream, StreamConfig};

use crate::gen::SAMPLE_RATE;

/// Where the audio callback currently is within the buffer.
struct Cursor {
    samples: Arc<[f32]>,
    position: f64,
    finished: bool,
}

/// Plays one mono buffer at a time. Each `play` replaces whatever was playing
/// before, like restarting a one-shot sampler.
pub struct Player {
    stream: Option<Stream>,
    device: Option<Device>,
    config: Option<StreamConfig>,
    cursor: Option<Arc<Mutex<Cursor>>>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            stream: None,
            device: None,
            config: None,
            cursor: None,
        }
    }

    /// Lazily open the default host and output device. Called on first play so
    /// constructing a `Player` never touches audio hardware.
    fn setup_host_device(&mut self) -> anyhow::Result<()> {
        if self.device.is_some() {
            return Ok(());
        }
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("default output device is not available"))?;
        log::info!("output device: {}", device.name()?);
        let config = device.default_output_config()?;
        log::debug!("default output config: {:?}", config);
        self.config = Some(config.into());
        self.device = Some(device);
        Ok(())
    }

    /// Start playing `samples` from the beginning, replacing any stream that
    /// is still running.
    pub fn play(&mut self, samples: Arc<[f32]>) -> anyhow::Result<()> {
        self.stop();
        self.setup_host_device()?;
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| anyhow!("device not initialized"))?;
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| anyhow!("config not initialized"))?;

        let cursor = Arc::new(Mutex::new(Cursor {
            samples,
            position: 0.0,
            finished: false,
        }));

        let supported_config = device.default_output_config()?;
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::I8 => Self::make_stream::<i8>(device, config, cursor.clone())?,
            cpal::SampleFormat::I16 => Self::make_stream::<i16>(device, config, cursor.clone())?,
            cpal::SampleFormat::I32 => Self::make_stream::<i32>(device, config, cursor.clone())?,
            cpal::SampleFormat::I64 => Self::make_stream::<i64>(device, config, cursor.clone())?,
            cpal::SampleFormat::U8 => Self::make_stream::<u8>(device, config, cursor.clone())?,
            cpal::SampleFormat::U16 => Self::make_stream::<u16>(device, config, cursor.clone())?,
            cpal::SampleFormat::U32 => Self::make_stream::<u32>(device, config, cursor.clone())?,
            cpal::SampleFormat::U64 => Self::make_stream::<u64>(device, config, cursor.clone())?,
            cpal::SampleFormat::F32 => Self::make_stream::<f32>(device, config, cursor.clone())?,
            cpal::SampleFormat::F64 => Self::make_stream::<f64>(device, config, cursor.clone())?,
            sample_format => return Err(anyhow!("unsupported sample format '{}'", sample_format)),
        };

        stream.play()?;
        self.cursor = Some(cursor);
        self.stream = Some(stream);
        Ok(())
    }

    /// Halt playback. Safe to call whether or not anything is playing.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                log::warn!("failed to pause output stream: {}", err);
            }
        }
        self.cursor = None;
    }

    /// True while the current buffer still has samples left to play.
    pub fn is_playing(&self) -> bool {
        match (&self.stream, &self.cursor) {
            (Some(_), Some(cursor)) => !cursor.lock().unwrap().finished,
            _ => false,
        }
    }

    /// Build a typed output stream that walks the cursor through the buffer.
    fn make_stream<T>(
        device: &Device,
        config: &StreamConfig,
        cursor: Arc<Mutex<Cursor>>,
    ) -> anyhow::Result<Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let num_channels = config.channels as usize;
        // The buffer is authored at 44.1 kHz; step through it at the ratio of
        // source rate to device rate so pitch and duration survive a device
        // running at a different rate.
        let step = SAMPLE_RATE as f64 / config.sample_rate.0 as f64;

        let err_fn = |err| log::error!("output stream error: {}", err);

        let stream = device.build_output_stream(
            config,
            move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut cursor = cursor.lock().unwrap();
                for frame in output.chunks_mut(num_channels) {
                    let index = cursor.position as usize;
                    let value = if index < cursor.samples.len() {
                        cursor.position += step;
                        cursor.samples[index]
                    } else {
                        cursor.finished = true;
                        0.0
                    };
                    let value: T = T::from_sample(value);
                    // Duplicate the mono sample across all channels.
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                }
            },
            err_fn,
            None,
        )?;

        Ok(stream)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
