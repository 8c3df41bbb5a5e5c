//! Periodic waveform generator: a pure synthesis core plus the terminal
//! front end, playback, preview, and WAV export around it.

pub mod app;
pub mod export;
pub mod gen;
pub mod logging;
pub mod playback;
pub mod plot;
