//! Waveform trace sampling for oscilloscope-style visualizers.
//!
//! Turns an arbitrary-length channel of samples into a fixed-width pixel
//! trace by nearest-neighbor decimation: a phase accumulator starts at 0
//! and advances by `num_samples / width` per pixel column, sampling the
//! source at `floor(phase)`. No box filtering is applied; undersampling
//! artifacts are expected and accepted.

use crate::scope::Snapshot;

/// Phase increment per pixel column for a channel of `num_samples` rendered
/// `width` columns wide.
#[inline]
pub fn sample_step(num_samples: usize, width: usize) -> f32 {
    if width == 0 {
        return 0.0;
    }
    num_samples as f32 / width as f32
}

/// Map a sample value to a vertical pixel coordinate.
///
/// NaN reads as 0, values are clamped to [-1, 1], then
/// `y = (1 - (v + 1) / 2) * height`, clamped onto the raster: +1.0 maps to
/// the top row and -1.0 to the bottom row.
#[inline]
pub fn vertical_position(value: f32, height: usize) -> usize {
    let v = if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    };
    let y = (1.0 - (v + 1.0) * 0.5) * height as f32;
    (y as usize).min(height.saturating_sub(1))
}

/// Source sample indices visited for each pixel column.
pub fn trace_indices(num_samples: usize, width: usize) -> impl Iterator<Item = usize> {
    let step = sample_step(num_samples, width);
    let last = num_samples.saturating_sub(1);
    let mut phase = 0.0f32;
    (0..width).map(move |_| {
        let index = (phase as usize).min(last);
        phase += step;
        index
    })
}

/// Render a channel of samples as one (x, y) plot per pixel column.
///
/// Does nothing when the channel is empty or either dimension is zero.
pub fn trace(samples: &[f32], width: usize, height: usize, mut plot: impl FnMut(usize, usize)) {
    if samples.is_empty() || height == 0 {
        return;
    }
    for (x, index) in trace_indices(samples.len(), width).enumerate() {
        plot(x, vertical_position(samples[index], height));
    }
}

/// Render one snapshot channel. An out-of-range channel index draws
/// nothing; the index space is host-defined and this is not an error.
pub fn trace_channel(
    snapshot: &Snapshot,
    channel: usize,
    width: usize,
    height: usize,
    plot: impl FnMut(usize, usize),
) {
    let Some(samples) = snapshot.channel(channel) else {
        return;
    };
    trace(samples, width, height, plot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_sample_count_over_width() {
        assert_eq!(sample_step(1000, 100), 10.0);
        assert_eq!(sample_step(999, 100), 9.99);
        assert_eq!(sample_step(100, 0), 0.0);
    }

    #[test]
    fn even_division_samples_every_tenth_index() {
        let indices: Vec<usize> = trace_indices(1000, 100).collect();
        for (i, &index) in indices.iter().enumerate() {
            assert_eq!(index, i * 10);
        }
    }

    #[test]
    fn uneven_division_floors_the_accumulated_phase() {
        let indices: Vec<usize> = trace_indices(999, 100).collect();
        let mut phase = 0.0f32;
        for &index in &indices {
            assert_eq!(index, phase as usize);
            phase += 9.99;
        }
        assert_eq!(indices[0], 0);
        assert_eq!(*indices.last().unwrap(), (99.0f32 * 9.99) as usize);
    }

    #[test]
    fn vertical_mapping_extremes() {
        assert_eq!(vertical_position(1.0, 100), 0);
        assert_eq!(vertical_position(-1.0, 100), 99);
        assert_eq!(vertical_position(0.0, 100), 50);
        // clamped, not wrapped
        assert_eq!(vertical_position(5.0, 100), 0);
        assert_eq!(vertical_position(-5.0, 100), 99);
    }

    #[test]
    fn nan_reads_as_midline() {
        assert_eq!(vertical_position(f32::NAN, 100), vertical_position(0.0, 100));
    }

    #[test]
    fn out_of_range_channel_draws_nothing() {
        let mut snapshot = Snapshot::new();
        snapshot.resize(2, 16);
        let mut plots = 0;
        trace_channel(&snapshot, 2, 10, 10, |_, _| plots += 1);
        assert_eq!(plots, 0);
        trace_channel(&snapshot, 0, 10, 10, |_, _| plots += 1);
        assert_eq!(plots, 10);
    }

    #[test]
    fn empty_input_draws_nothing() {
        let mut plots = 0;
        trace(&[], 10, 10, |_, _| plots += 1);
        trace(&[0.0; 4], 0, 10, |_, _| plots += 1);
        trace(&[0.0; 4], 10, 0, |_, _| plots += 1);
        assert_eq!(plots, 0);
    }
}
