use std::f32::consts::TAU;

/// The four classic periodic wave shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine Wave",
            Waveform::Square => "Square Wave",
            Waveform::Triangle => "Triangle Wave",
            Waveform::Sawtooth => "Sawtooth Wave",
        }
    }

    /// The next shape in display order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Waveform::Sine => Waveform::Square,
            Waveform::Square => Waveform::Triangle,
            Waveform::Triangle => Waveform::Sawtooth,
            Waveform::Sawtooth => Waveform::Sine,
        }
    }

    /// The previous shape in display order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            Waveform::Sine => Waveform::Sawtooth,
            Waveform::Square => Waveform::Sine,
            Waveform::Triangle => Waveform::Square,
            Waveform::Sawtooth => Waveform::Triangle,
        }
    }

    /// Evaluate the shape at phase angle `theta` in radians. Output is in
    /// [-1.0, 1.0] for every shape.
    ///
    /// The square wave is sign(sin(theta)) with sign(0) defined as 0, so an
    /// exact zero crossing of the underlying sine yields 0 rather than ±1.
    /// The triangle starts at +1 at theta = 0 and reaches -1 at theta = pi.
    pub fn value(self, theta: f32) -> f32 {
        match self {
            Waveform::Sine => theta.sin(),
            Waveform::Square => {
                let s = theta.sin();
                if s == 0.0 {
                    0.0
                } else {
                    s.signum()
                }
            }
            Waveform::Triangle => {
                let cycle = (theta / TAU).rem_euclid(1.0);
                2.0 * (2.0 * cycle - 1.0).abs() - 1.0
            }
            Waveform::Sawtooth => {
                let cycle = (theta / TAU).rem_euclid(1.0);
                2.0 * cycle - 1.0
            }
        }
    }
}
