//! Cross-thread snapshot buffer feeding live audio to visualizers.
//!
//! The audio thread publishes a copy of each processed block; the UI thread
//! reads the most recent copy to draw oscilloscope traces. The audio thread
//! must never block or allocate, so publication goes through a
//! `parking_lot` try-lock: if the UI thread happens to be reading, the
//! publish is silently skipped and the visualizer shows data one cycle
//! stale. Contention here is expected and harmless, not an error.
//!
//! Snapshot storage is sized once in [`ScopeBuffer::prepare`] (called from
//! the module's own `prepare`) and never resized on the audio path.

use parking_lot::Mutex;

use crate::block::Block;

/// A frozen copy of one audio block, safe to read off the audio thread.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    channels: Vec<Vec<f32>>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to hold `num_channels` channels of `num_samples` each,
    /// zero-filled. Not audio-thread safe; call only at prepare time.
    pub fn resize(&mut self, num_channels: usize, num_samples: usize) {
        self.channels.resize(num_channels, Vec::new());
        for ch in &mut self.channels {
            ch.clear();
            ch.resize(num_samples, 0.0);
        }
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn num_samples(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Borrow one channel. `None` when out of range.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|c| c.as_slice())
    }

    fn copy_from_block(&mut self, block: &Block) {
        for (index, dst) in self.channels.iter_mut().enumerate() {
            if let Some(src) = block.channel(index) {
                let n = dst.len().min(src.len());
                dst[..n].copy_from_slice(&src[..n]);
            }
        }
    }

    fn copy_from(&mut self, other: &Snapshot) {
        self.channels.resize(other.channels.len(), Vec::new());
        for (dst, src) in self.channels.iter_mut().zip(&other.channels) {
            dst.clear();
            dst.extend_from_slice(src);
        }
    }
}

/// Shared, fixed-capacity snapshot buffer with a non-blocking publish path.
///
/// One instance is shared (via `Arc`) between a module's processor and its
/// editor. Typical modules keep two: one for input blocks, one for output
/// blocks.
///
/// # Invariants
///
/// - [`publish`] never blocks, never allocates and never writes past the
///   sizes established by the last [`prepare`].
/// - An observer only ever sees fully-formed copies of a completed block:
///   the per-channel copy happens entirely under the lock.
///
/// [`publish`]: ScopeBuffer::publish
/// [`prepare`]: ScopeBuffer::prepare
#[derive(Debug, Default)]
pub struct ScopeBuffer {
    snapshot: Mutex<Snapshot>,
}

impl ScopeBuffer {
    /// Create an empty scope buffer. Publishes are no-ops until
    /// [`prepare`](ScopeBuffer::prepare) sizes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)allocate snapshot storage for the coming prepare epoch.
    ///
    /// This is the only point where the snapshot may grow. Takes the lock
    /// blocking; `prepare` is never called concurrently with `process`.
    pub fn prepare(&self, num_channels: usize, num_samples: usize) {
        self.snapshot.lock().resize(num_channels, num_samples);
    }

    /// Publish a just-processed block from the audio thread.
    ///
    /// Best effort: returns `false` without touching the snapshot when the
    /// UI thread currently holds the lock. Channels the block does not have
    /// keep their previous contents; copies are bounded by the prepared
    /// sizes on both sides.
    #[inline]
    pub fn publish(&self, block: &Block) -> bool {
        let Some(mut snapshot) = self.snapshot.try_lock() else {
            return false;
        };
        snapshot.copy_from_block(block);
        true
    }

    /// Read the current snapshot from the UI thread.
    ///
    /// Takes the lock blocking; the UI thread is not real-time constrained
    /// and the audio thread only ever holds this lock for one bounded copy.
    pub fn read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&self.snapshot.lock())
    }

    /// Non-blocking read variant. Returns `None` when the audio thread is
    /// mid-publish; the caller keeps its stale data for this frame.
    pub fn try_read<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> Option<R> {
        self.snapshot.try_lock().map(|snapshot| f(&snapshot))
    }

    /// Copy the current snapshot into caller-owned storage, resizing it as
    /// needed. Blocking; UI-thread use only.
    pub fn copy_to(&self, out: &mut Snapshot) {
        out.copy_from(&self.snapshot.lock());
    }
}
