//! Core processor trait.

use crate::block::Block;
use crate::controls::{Button, Encoder};
use crate::editor::Editor;
use crate::error::StateError;

/// One live processing unit of a module type.
///
/// The host drives an instance through a fixed lifecycle:
///
/// ```text
/// Unprepared --prepare--> Prepared --process per block--> Prepared
///                 ^                                          |
///                 +------------------release-----------------+
/// ```
///
/// `prepare` is re-entrant between playback sessions and is the only point
/// where audio-path-sized allocation is permitted. `process` is called from
/// the audio callback on a hard deadline and must complete without
/// blocking, without heap allocation and without touching UI-owned state
/// except through [`ScopeBuffer::publish`]. The host never calls `process`
/// on an unprepared instance; that sequencing is enforced on the host side
/// of the boundary, not here.
///
/// # Threads
///
/// All control-plane callbacks arrive on the UI thread except
/// [`encoder_turned`], which may also arrive from the audio callback;
/// encoder handling must be safe to call from either thread. Parameter
/// values written by one thread and read by the other are scalar and
/// tolerate stale-by-one-block reads; implementations may strengthen this
/// with atomics without changing observable behavior.
///
/// [`ScopeBuffer::publish`]: crate::scope::ScopeBuffer::publish
/// [`encoder_turned`]: Processor::encoder_turned
pub trait Processor: Send {
    /// Called before the host starts (or restarts) calling [`process`].
    ///
    /// Allocate everything the processing path needs for the new block
    /// size here, including scope snapshot storage.
    ///
    /// [`process`]: Processor::process
    fn prepare(&mut self, sample_rate: f64, block_size: usize);

    /// Process the next audio block in place. Real-time path.
    fn process(&mut self, block: &mut Block);

    /// Called when playback stops; free spare DSP resources. Never called
    /// concurrently with [`process`](Processor::process).
    fn release(&mut self) {}

    /// Create the editor for this instance.
    ///
    /// Called at most once per instance by the framework shim, which caches
    /// the result so that the host's repeated editor queries always return
    /// the identical object. Return `None` for a headless module. The
    /// editor is owned by the instance and destroyed with it, never by the
    /// host.
    fn create_editor(&mut self) -> Option<Box<dyn Editor>> {
        None
    }

    /// A panel button was pressed (`down = true`) or released.
    fn button_pressed(&mut self, _button: Button, _down: bool) {}

    /// An encoder was pressed or released.
    fn encoder_pressed(&mut self, _encoder: Encoder, _down: bool) {}

    /// An encoder was turned. Positive deltas turn right, negative left;
    /// one call per detected pulse group. May arrive from the audio
    /// callback - see the trait-level thread notes.
    fn encoder_turned(&mut self, _encoder: Encoder, _delta: i32) {}

    /// A patch-matrix input was connected or disconnected.
    fn input_enabled(&mut self, _input: usize, _on: bool) {}

    /// A patch-matrix output was connected or disconnected.
    fn output_enabled(&mut self, _output: usize, _on: bool) {}

    /// Serialize persistent state for the host's preset files.
    ///
    /// The default is an empty record for stateless modules. Stateful
    /// modules typically encode with [`state::encode`].
    ///
    /// [`state::encode`]: crate::state::encode
    fn save_state(&self) -> Result<Vec<u8>, StateError> {
        Ok(Vec::new())
    }

    /// Restore persistent state from a preset record.
    ///
    /// On a decode error the implementation must leave all parameters at
    /// their prior values and return the error; a corrupt preset never
    /// partially applies.
    fn load_state(&mut self, _data: &[u8]) -> Result<(), StateError> {
        Ok(())
    }
}
