//! Interactive terminal front end: a form for the four synthesis parameters,
//! an ASCII waveform preview, and start/stop/save controls.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};

use crate::export;
use crate::gen::{synthesize, Synthesis, SynthesisRequest, Waveform};
use crate::playback::Player;
use crate::plot;

const VOLUME_MIN: f32 = 0.1;
const VOLUME_MAX: f32 = 1.0;
const VOLUME_STEP: f32 = 0.05;
const PLOT_COLUMNS: usize = 64;
const PLOT_ROWS: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Frequency,
    Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Form,
    SavePrompt,
}

/// All application state. Replaced wholesale on each generation; `current` is
/// read-only for export.
pub struct App {
    freq_text: String,
    duration_text: String,
    waveform: Waveform,
    volume: f32,
    current: Option<Synthesis>,
    player: Player,
    focus: Field,
    mode: Mode,
    save_path: String,
    status: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            freq_text: String::from("440"),
            duration_text: String::from("1.0"),
            waveform: Waveform::Sine,
            volume: 0.5,
            current: None,
            player: Player::new(),
            focus: Field::Frequency,
            mode: Mode::Form,
            save_path: String::new(),
            status: String::from("enter parameters and press ENTER"),
        }
    }

    /// Run the key loop until the user quits, restoring the terminal on the
    /// way out even when the loop errors.
    pub fn run(&mut self) -> anyhow::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::Hide)?;
        enable_raw_mode()?;

        let result = self.event_loop();

        // Re-enable line wrapping and leave raw mode.
        print!("\x1b[?7h");
        execute!(io::stdout(), cursor::Show)?;
        disable_raw_mode()?;
        println!();
        result
    }

    fn event_loop(&mut self) -> anyhow::Result<()> {
        let mut needs_redraw = true;
        let mut was_playing = false;

        loop {
            // Redraw when the buffer runs out so the playing indicator clears.
            let playing = self.player.is_playing();
            if playing != was_playing {
                was_playing = playing;
                needs_redraw = true;
            }

            if needs_redraw {
                self.render(playing)?;
                needs_redraw = false;
            }

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    match self.mode {
                        Mode::Form => {
                            if self.handle_form_key(code) {
                                return Ok(());
                            }
                        }
                        Mode::SavePrompt => self.handle_save_key(code),
                    }
                    needs_redraw = true;
                }
            }
        }
    }

    /// Handle one key in form mode. Returns true on quit.
    fn handle_form_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                self.focused_field_mut().push(c);
            }
            KeyCode::Backspace => {
                self.focused_field_mut().pop();
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Field::Frequency => Field::Duration,
                    Field::Duration => Field::Frequency,
                };
            }
            KeyCode::Up => self.waveform = self.waveform.prev(),
            KeyCode::Down => self.waveform = self.waveform.next(),
            KeyCode::Left => self.nudge_volume(-VOLUME_STEP),
            KeyCode::Right => self.nudge_volume(VOLUME_STEP),
            KeyCode::Enter => self.start(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.stop(),
            KeyCode::Char('w') | KeyCode::Char('W') => self.request_save(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_save_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Form;
                self.status = String::from("save cancelled");
            }
            KeyCode::Enter => {
                self.mode = Mode::Form;
                match normalize_path(&self.save_path) {
                    Some(path) => self.save_to(&path),
                    None => self.status = String::from("save cancelled: empty path"),
                }
            }
            KeyCode::Backspace => {
                self.save_path.pop();
            }
            KeyCode::Char(c) => self.save_path.push(c),
            _ => {}
        }
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Frequency => &mut self.freq_text,
            Field::Duration => &mut self.duration_text,
        }
    }

    fn nudge_volume(&mut self, delta: f32) {
        self.volume = (self.volume + delta).clamp(VOLUME_MIN, VOLUME_MAX);
    }

    /// Parse the form and regenerate the current signal. Returns true when a
    /// new signal replaced the old one; on invalid input the previous signal
    /// and plot stay untouched.
    fn generate(&mut self) -> bool {
        match SynthesisRequest::parse(
            &self.freq_text,
            &self.duration_text,
            self.waveform,
            self.volume,
        ) {
            Ok(request) => {
                self.current = Some(synthesize(&request));
                self.status = format!(
                    "generated {} at {} Hz for {} s",
                    self.waveform.label(),
                    request.frequency,
                    request.duration
                );
                true
            }
            Err(err) => {
                log::warn!("{}", err);
                self.status = err.to_string();
                false
            }
        }
    }

    /// Start: generate, update the plot, and play the new signal from the
    /// beginning, replacing any playback in progress.
    fn start(&mut self) {
        if !self.generate() {
            return;
        }
        let Some(current) = &self.current else {
            return;
        };
        // Hand the callback its own snapshot so a later regeneration can
        // never touch a buffer mid-playback.
        let buffer: Arc<[f32]> = Arc::from(current.samples.as_slice());
        match self.player.play(buffer) {
            Ok(()) => {
                self.status = format!("playing {}", self.waveform.label());
            }
            Err(err) => {
                log::error!("playback failed: {:#}", err);
                self.status = format!("playback failed: {:#}", err);
            }
        }
    }

    /// Stop playback. Idempotent.
    fn stop(&mut self) {
        self.player.stop();
        self.status = String::from("stopped");
    }

    fn request_save(&mut self) {
        if self.current.is_none() {
            log::warn!("save requested with no generated signal");
            self.status = String::from("warning: there is no audio data to save");
            return;
        }
        self.save_path = String::from("tone.wav");
        self.mode = Mode::SavePrompt;
    }

    fn save_to(&mut self, path: &Path) {
        let Some(current) = &self.current else {
            self.status = String::from("warning: there is no audio data to save");
            return;
        };
        match export::write_wav(path, &current.samples) {
            Ok(()) => self.status = format!("saved {}", path.display()),
            Err(err) => {
                log::error!("save failed: {:#}", err);
                self.status = format!("save failed: {:#}", err);
            }
        }
    }

    fn render(&self, playing: bool) -> anyhow::Result<()> {
        // Clear screen, home the cursor, and disable line wrapping.
        print!("\x1b[2J\x1b[H\x1b[?7l");

        print!("=== Tone Generator ===\r\n");
        print!("TAB=field  ENTER=start  S=stop  W=save  ↑↓=wave  ←→=volume  Q=quit\r\n");
        print!("\r\n");

        let freq_focused = self.focus == Field::Frequency;
        print!(
            "{} Frequency (Hz):    {}\r\n",
            marker(freq_focused),
            entry_text(&self.freq_text, freq_focused)
        );
        print!(
            "{} Duration (s):      {}\r\n",
            marker(!freq_focused),
            entry_text(&self.duration_text, !freq_focused)
        );
        print!("  Wave type:         {}\r\n", self.waveform.label());
        let normalized = (self.volume - VOLUME_MIN) / (VOLUME_MAX - VOLUME_MIN);
        print!(
            "  Volume:            [{}] {:.2}\r\n",
            make_bar(normalized, 10),
            self.volume
        );
        print!("\r\n");

        if let Some(current) = &self.current {
            for line in plot::render(&current.time, &current.samples, PLOT_COLUMNS, PLOT_ROWS) {
                print!("{}\r\n", line);
            }
        } else {
            print!("(no signal generated yet)\r\n");
        }
        print!("\r\n");

        print!("{}\r\n", if playing { "[playing]" } else { "[idle]" });
        match self.mode {
            Mode::SavePrompt => {
                print!("Save to: {}_  (ENTER=write, ESC=cancel)\r\n", self.save_path)
            }
            Mode::Form => print!("{}\r\n", self.status),
        }

        io::stdout().flush()?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn marker(focused: bool) -> &'static str {
    if focused {
        ">"
    } else {
        " "
    }
}

fn entry_text(text: &str, focused: bool) -> String {
    if focused {
        format!("{}_", text)
    } else {
        text.to_string()
    }
}

/// Visual bar for a normalized value.
fn make_bar(normalized: f32, width: usize) -> String {
    let filled = (normalized * width as f32).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Append a .wav extension when the user typed a bare name.
fn normalize_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut path = PathBuf::from(trimmed);
    if path.extension().is_none() {
        path.set_extension("wav");
    }
    Some(path)
}
