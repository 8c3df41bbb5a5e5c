//! ASCII preview of the head of a generated signal.

/// How many samples the preview considers. Rendering the full sequence would
/// be wasted work at terminal resolution.
pub const PREVIEW_SAMPLES: usize = 1000;

/// Render the first [`PREVIEW_SAMPLES`] of the signal into `rows` text lines
/// of `columns` characters each, plus a time-axis caption as the final line.
///
/// Each column covers a slice of the prefix and draws the vertical span
/// between that slice's minimum and maximum amplitude, so dense waveforms
/// show their envelope rather than aliasing into noise. Amplitude +1 maps to
/// the top row, -1 to the bottom, with a dotted zero line through the middle.
pub fn render(time: &[f32], samples: &[f32], columns: usize, rows: usize) -> Vec<String> {
    debug_assert_eq!(time.len(), samples.len());
    let prefix_len = samples.len().min(PREVIEW_SAMPLES);
    let prefix = &samples[..prefix_len];

    let zero_row = amplitude_to_row(0.0, rows);
    let mut grid = vec![vec![' '; columns]; rows];
    for cell in &mut grid[zero_row] {
        *cell = '·';
    }

    for column in 0..columns {
        let start = column * prefix_len / columns;
        let end = (((column + 1) * prefix_len) / columns).max(start + 1);
        if start >= prefix_len {
            break;
        }
        let slice = &prefix[start..end.min(prefix_len)];
        let low = slice.iter().fold(f32::INFINITY, |acc, s| acc.min(*s));
        let high = slice.iter().fold(f32::NEG_INFINITY, |acc, s| acc.max(*s));
        let top = amplitude_to_row(high, rows);
        let bottom = amplitude_to_row(low, rows);
        for row in grid.iter_mut().take(bottom + 1).skip(top) {
            row[column] = '█';
        }
    }

    let mut lines: Vec<String> = grid.into_iter().map(|row| row.into_iter().collect()).collect();
    let end_time = if prefix_len > 0 {
        time[prefix_len - 1]
    } else {
        0.0
    };
    lines.push(format!(
        "0.000 s … {:.3} s  ({} of {} samples)",
        end_time,
        prefix_len,
        samples.len()
    ));
    lines
}

fn amplitude_to_row(value: f32, rows: usize) -> usize {
    let clamped = value.clamp(-1.0, 1.0);
    let row = ((1.0 - clamped) / 2.0 * (rows - 1) as f32).round() as usize;
    row.min(rows - 1)
}
