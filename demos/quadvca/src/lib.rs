//! Quad VCA demo module for the Strata workstation.
//!
//! Four voltage controlled amplifiers: each amplifier multiplies a
//! side-by-side pair of input channels, scales the product by an
//! encoder-driven gain and writes the result to the even output channel
//! of the pair, with its inversion on the odd one. The editor draws live
//! oscilloscope traces of all sixteen signals from two [`ScopeBuffer`]s
//! the audio thread publishes into.
//!
//! Panel mapping:
//! - Encoders 1-4 adjust the four gains (hold either Shift for fine steps)
//! - Soft keys 1-4 reset the corresponding gain to unity

use std::sync::Arc;

use strata::prelude::*;

// =============================================================================
// Module Configuration
// =============================================================================

const NAME: &str = "QVCA";

/// Preset records carry the crate version as their format tag; bump the
/// crate version whenever the parameter layout changes.
const STATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of amplifier pairs, one per panel encoder.
pub const NUM_VCAS: usize = ENCODER_COUNT;

/// Channels per side: two inputs and two outputs per amplifier.
pub const NUM_CHANNELS: usize = 2 * NUM_VCAS;

const GAIN_MIN: f32 = 0.0;
const GAIN_MAX: f32 = 2.0;
const GAIN_DEFAULT: f32 = 1.0;

/// Gain change per encoder pulse, and the finer step while Shift is held.
const GAIN_STEP: f32 = 0.01;
const GAIN_STEP_FINE: f32 = 0.001;

/// Identity record handed to the host's factory symbol.
pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new(NAME, four_cc(*b"QVCA"))
        .with_description("Quad voltage controlled amplifier with oscilloscopes")
        .with_manufacturer("Strata")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_input_names((1..=NUM_CHANNELS).map(|i| format!("In {i}")))
        .with_output_names((1..=NUM_CHANNELS).map(|i| format!("Out {i}")))
}

// =============================================================================
// Processor
// =============================================================================

/// One quad VCA instance.
pub struct QuadVca {
    gains: [f32; NUM_VCAS],
    fine: bool,
    input_scope: Arc<ScopeBuffer>,
    output_scope: Arc<ScopeBuffer>,
}

impl Default for QuadVca {
    fn default() -> Self {
        Self {
            gains: [GAIN_DEFAULT; NUM_VCAS],
            fine: false,
            input_scope: Arc::new(ScopeBuffer::new()),
            output_scope: Arc::new(ScopeBuffer::new()),
        }
    }
}

impl QuadVca {
    /// Current gain of one amplifier.
    pub fn gain(&self, vca: usize) -> f32 {
        self.gains.get(vca).copied().unwrap_or(GAIN_DEFAULT)
    }

    fn adjust_gain(&mut self, vca: usize, delta: i32) {
        let step = if self.fine { GAIN_STEP_FINE } else { GAIN_STEP };
        let gain = &mut self.gains[vca];
        // saturates at the ends rather than wrapping or rejecting
        *gain = (*gain + delta as f32 * step).clamp(GAIN_MIN, GAIN_MAX);
    }
}

impl Processor for QuadVca {
    fn prepare(&mut self, sample_rate: f64, block_size: usize) {
        self.input_scope.prepare(NUM_CHANNELS, block_size);
        self.output_scope.prepare(NUM_CHANNELS, block_size);
        log::debug!("quadvca prepared: {sample_rate} Hz, {block_size} samples per block");
    }

    fn process(&mut self, block: &mut Block) {
        // snapshot the inputs before they are overwritten in place
        self.input_scope.publish(block);

        for vca in 0..NUM_VCAS {
            let even = 2 * vca;
            let odd = even + 1;
            let gain = self.gains[vca];
            for i in 0..block.num_samples() {
                let product = block.sample(even, i) * block.sample(odd, i) * gain;
                block.set_sample(even, i, product);
                block.set_sample(odd, i, -product);
            }
        }

        self.output_scope.publish(block);
    }

    fn release(&mut self) {
        log::debug!("quadvca released");
    }

    fn create_editor(&mut self) -> Option<Box<dyn Editor>> {
        Some(Box::new(QuadVcaEditor::new(
            Arc::clone(&self.input_scope),
            Arc::clone(&self.output_scope),
        )))
    }

    fn button_pressed(&mut self, button: Button, down: bool) {
        match button {
            Button::ShiftL | Button::ShiftR => self.fine = down,
            _ => {
                if let Some(key) = button.soft_key() {
                    if down && key < NUM_VCAS {
                        self.gains[key] = GAIN_DEFAULT;
                    }
                }
            }
        }
    }

    fn encoder_turned(&mut self, encoder: Encoder, delta: i32) {
        self.adjust_gain(encoder.index() as usize, delta);
    }

    fn save_state(&self) -> Result<Vec<u8>, StateError> {
        Ok(state::encode(NAME, STATE_VERSION, &self.gains))
    }

    fn load_state(&mut self, data: &[u8]) -> Result<(), StateError> {
        // decode fully before applying anything
        let params = state::decode(NAME, STATE_VERSION, NUM_VCAS, data)?;
        for (gain, value) in self.gains.iter_mut().zip(params) {
            // a non-finite gain would poison every block it touches
            *gain = if value.is_finite() {
                value.clamp(GAIN_MIN, GAIN_MAX)
            } else {
                GAIN_DEFAULT
            };
        }
        Ok(())
    }
}

// =============================================================================
// Editor
// =============================================================================

const COLOUR_BACKGROUND: u32 = 0xFF00_0000;
const COLOUR_GRID: u32 = 0xFF28_2828;
const COLOUR_INPUT: u32 = 0xFFFF_FFFF;
const COLOUR_OUTPUT: u32 = 0xFFFF_4040;

/// Oscilloscope grid: input traces in the left column, output traces in
/// the right, one row per channel.
pub struct QuadVcaEditor {
    input_scope: Arc<ScopeBuffer>,
    output_scope: Arc<ScopeBuffer>,
    input_snapshot: Snapshot,
    output_snapshot: Snapshot,
    visible: bool,
}

impl QuadVcaEditor {
    fn new(input_scope: Arc<ScopeBuffer>, output_scope: Arc<ScopeBuffer>) -> Self {
        Self {
            input_scope,
            output_scope,
            input_snapshot: Snapshot::new(),
            output_snapshot: Snapshot::new(),
            visible: false,
        }
    }

    fn draw_column(
        frame: &mut ImageFrame,
        snapshot: &Snapshot,
        x0: usize,
        cell_width: usize,
        cell_height: usize,
        colour: u32,
    ) {
        for channel in 0..NUM_CHANNELS {
            let y0 = channel * cell_height;
            // midline as a visual anchor even while the channel is silent
            let mid = y0 + cell_height / 2;
            for x in x0..x0 + cell_width {
                frame.put_pixel(x, mid, COLOUR_GRID);
            }
            trace::trace_channel(snapshot, channel, cell_width, cell_height, |x, y| {
                frame.put_pixel(x0 + x, y0 + y, colour);
            });
        }
    }
}

impl Editor for QuadVcaEditor {
    fn visibility_changed(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn render_to_image(&mut self, frame: &mut ImageFrame) {
        if !self.visible {
            return;
        }
        self.input_scope.copy_to(&mut self.input_snapshot);
        self.output_scope.copy_to(&mut self.output_snapshot);

        frame.fill(COLOUR_BACKGROUND);
        let cell_width = frame.width() / 2;
        let cell_height = frame.height() / NUM_CHANNELS;
        if cell_width == 0 || cell_height == 0 {
            return;
        }
        Self::draw_column(
            frame,
            &self.input_snapshot,
            0,
            cell_width,
            cell_height,
            COLOUR_INPUT,
        );
        Self::draw_column(
            frame,
            &self.output_snapshot,
            cell_width,
            cell_width,
            cell_height,
            COLOUR_OUTPUT,
        );
    }
}

// =============================================================================
// Export
// =============================================================================

export_module!(descriptor, QuadVca);

#[cfg(test)]
mod tests {
    use super::*;

    fn block_over(data: &mut [Vec<f32>]) -> Block<'_> {
        let num_samples = data.first().map(|c| c.len()).unwrap_or(0);
        Block::new(data.iter_mut().map(|c| c.as_mut_slice()), num_samples)
    }

    fn prepared() -> QuadVca {
        let mut vca = QuadVca::default();
        vca.prepare(48_000.0, 4);
        vca
    }

    #[test]
    fn multiplies_pairs_and_inverts_odd_outputs() {
        let mut vca = prepared();
        let mut data = vec![vec![0.5f32; 4]; NUM_CHANNELS];
        data[1].fill(0.25);
        let mut block = block_over(&mut data);
        vca.process(&mut block);
        drop(block);
        assert_eq!(data[0], vec![0.125; 4]);
        assert_eq!(data[1], vec![-0.125; 4]);
        // remaining pairs at 0.5 * 0.5
        assert_eq!(data[2], vec![0.25; 4]);
        assert_eq!(data[3], vec![-0.25; 4]);
    }

    #[test]
    fn gain_scales_the_product() {
        let mut vca = prepared();
        vca.encoder_turned(Encoder::E1, 200); // saturates at 2.0
        assert_eq!(vca.gain(0), 2.0);
        let mut data = vec![vec![0.5f32; 2]; NUM_CHANNELS];
        let mut block = block_over(&mut data);
        vca.process(&mut block);
        drop(block);
        assert_eq!(data[0], vec![0.5; 2]);
        assert_eq!(data[2], vec![0.25; 2]); // untouched gain
    }

    #[test]
    fn encoder_accumulation_saturates_at_both_ends() {
        let mut vca = prepared();
        vca.encoder_turned(Encoder::E2, 1_000_000);
        assert_eq!(vca.gain(1), GAIN_MAX);
        vca.encoder_turned(Encoder::E2, -5_000_000);
        assert_eq!(vca.gain(1), GAIN_MIN);
        // recovers normally once back in range
        vca.encoder_turned(Encoder::E2, 1);
        assert!((vca.gain(1) - GAIN_STEP).abs() < 1e-6);
    }

    #[test]
    fn shift_switches_to_fine_steps() {
        let mut vca = prepared();
        vca.button_pressed(Button::ShiftL, true);
        vca.encoder_turned(Encoder::E1, 1);
        assert!((vca.gain(0) - (GAIN_DEFAULT + GAIN_STEP_FINE)).abs() < 1e-6);
        vca.button_pressed(Button::ShiftL, false);
        vca.encoder_turned(Encoder::E1, 1);
        let expected = GAIN_DEFAULT + GAIN_STEP_FINE + GAIN_STEP;
        assert!((vca.gain(0) - expected).abs() < 1e-6);
    }

    #[test]
    fn soft_key_resets_its_gain() {
        let mut vca = prepared();
        vca.encoder_turned(Encoder::E3, 40);
        assert!((vca.gain(2) - 1.4).abs() < 1e-6);
        vca.button_pressed(Button::SoftKey3, true);
        assert_eq!(vca.gain(2), GAIN_DEFAULT);
        // key release and unmapped keys change nothing
        vca.button_pressed(Button::SoftKey3, false);
        vca.button_pressed(Button::SoftKey8, true);
        assert_eq!(vca.gain(2), GAIN_DEFAULT);
    }

    #[test]
    fn state_round_trips_through_the_codec() {
        let mut vca = prepared();
        vca.encoder_turned(Encoder::E1, -30);
        vca.encoder_turned(Encoder::E4, 25);
        let blob = vca.save_state().unwrap();

        let mut restored = QuadVca::default();
        restored.load_state(&blob).unwrap();
        for i in 0..NUM_VCAS {
            assert_eq!(restored.gain(i), vca.gain(i));
        }
    }

    #[test]
    fn corrupt_state_leaves_gains_untouched() {
        let mut vca = prepared();
        vca.encoder_turned(Encoder::E1, 10);
        let before: Vec<f32> = (0..NUM_VCAS).map(|i| vca.gain(i)).collect();

        let mut blob = vca.save_state().unwrap();
        blob[0] ^= 0x01;
        assert!(vca.load_state(&blob).is_err());
        assert!(vca.load_state(&blob[..3]).is_err());
        let after: Vec<f32> = (0..NUM_VCAS).map(|i| vca.gain(i)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn loaded_gains_are_clamped_to_range() {
        let blob = state::encode(NAME, STATE_VERSION, &[9.0, -3.0, 1.5, f32::NAN]);
        let mut vca = QuadVca::default();
        vca.load_state(&blob).unwrap();
        assert_eq!(vca.gain(0), GAIN_MAX);
        assert_eq!(vca.gain(1), GAIN_MIN);
        assert_eq!(vca.gain(2), 1.5);
        assert_eq!(vca.gain(3), GAIN_DEFAULT);
    }

    #[test]
    fn non_finite_preset_gains_never_reach_the_output() {
        // a tag-valid record carrying NaN and infinities must load without
        // installing them as gains
        let blob = state::encode(
            NAME,
            STATE_VERSION,
            &[f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 1.0],
        );
        let mut vca = prepared();
        vca.load_state(&blob).unwrap();
        for i in 0..NUM_VCAS {
            assert!(vca.gain(i).is_finite());
        }

        let mut data = vec![vec![0.5f32; 4]; NUM_CHANNELS];
        let mut block = block_over(&mut data);
        vca.process(&mut block);
        drop(block);
        for ch in &data {
            assert!(ch.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn editor_draws_traces_when_visible() {
        let mut vca = prepared();
        let mut data = vec![vec![0.5f32; 4]; NUM_CHANNELS];
        let mut block = block_over(&mut data);
        vca.process(&mut block);
        drop(block);

        let mut editor = vca.create_editor().unwrap();
        let width = 64;
        let height = 16 * NUM_CHANNELS;
        let mut pixels = vec![0u8; width * height * BYTES_PER_PIXEL];

        // hidden editors leave the frame alone
        let mut frame = ImageFrame::new(&mut pixels, width, height);
        editor.render_to_image(&mut frame);
        assert!(pixels.iter().all(|&b| b == 0));

        editor.visibility_changed(true);
        let mut frame = ImageFrame::new(&mut pixels, width, height);
        editor.render_to_image(&mut frame);
        let has = |colour: u32| {
            pixels.chunks_exact(BYTES_PER_PIXEL).any(|px| {
                px == [colour as u8, (colour >> 8) as u8, (colour >> 16) as u8, (colour >> 24) as u8]
            })
        };
        assert!(has(COLOUR_INPUT));
        assert!(has(COLOUR_OUTPUT));
        assert!(has(COLOUR_BACKGROUND));
    }

    #[test]
    fn descriptor_names_eight_channels_each_way() {
        let desc = descriptor();
        assert_eq!(desc.uid, four_cc(*b"QVCA"));
        assert_eq!(desc.num_inputs(), 8);
        assert_eq!(desc.num_outputs(), 8);
        assert_eq!(desc.input_names[0], "In 1");
        assert_eq!(desc.output_names[7], "Out 8");
    }
}
