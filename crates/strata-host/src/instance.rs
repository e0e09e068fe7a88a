//! Owned handles for module instances and editors.

use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::Arc;

use libloading::Library;

use strata_abi::{RawEditor, RawInstance};
use strata_core::{ApiVersion, BYTES_PER_PIXEL, MAX_CHANNELS};

use crate::error::HostError;
use crate::lifecycle::{Lifecycle, LifecycleTracker};

/// One live processing instance, owned by the host.
///
/// Wraps the raw function table in an owned handle: dropping the instance
/// invokes the module's `destroy` hook, and the shared `Library` keeps the
/// binary mapped until the last instance is gone. Call sequencing is
/// enforced here ([`LifecycleTracker`]) so that a bad sequence never
/// crosses the boundary.
pub struct ModuleInstance {
    raw: NonNull<RawInstance>,
    lifecycle: LifecycleTracker,
    api_version: ApiVersion,
    _library: Arc<Library>,
}

// The boundary contract makes the instance callable from the host's audio
// and UI threads; `&mut self` on every passthrough keeps calls exclusive.
unsafe impl Send for ModuleInstance {}

impl ModuleInstance {
    pub(crate) fn new(raw: *mut RawInstance, library: Arc<Library>, api_version: ApiVersion) -> Self {
        debug_assert!(!raw.is_null());
        Self {
            // checked by the caller
            raw: unsafe { NonNull::new_unchecked(raw) },
            lifecycle: LifecycleTracker::new(),
            api_version,
            _library: library,
        }
    }

    fn table(&self) -> &RawInstance {
        unsafe { self.raw.as_ref() }
    }

    /// The API version of the module this instance came from.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.state()
    }

    /// Prepare the instance for a playback session. Re-entrant between
    /// sessions; this is the module's one chance to allocate for the new
    /// block size.
    pub fn prepare(&mut self, sample_rate: f64, block_size: usize) -> Result<(), HostError> {
        self.lifecycle.on_prepare()?;
        let block_size = block_size.min(i32::MAX as usize) as i32;
        let t = self.table();
        unsafe { (t.prepare)(t.data, sample_rate, block_size) };
        Ok(())
    }

    /// Process one block in place. Audio-callback path: builds the channel
    /// pointer array on the stack, no allocation. All channel slices must
    /// be the same length.
    pub fn process(&mut self, channels: &mut [&mut [f32]]) -> Result<(), HostError> {
        self.lifecycle.on_process()?;
        let num_samples = channels.first().map(|c| c.len()).unwrap_or(0);
        debug_assert!(channels.iter().all(|c| c.len() == num_samples));

        let mut ptrs = [std::ptr::null_mut::<f32>(); MAX_CHANNELS];
        let num_channels = channels.len().min(MAX_CHANNELS);
        for (ptr, ch) in ptrs.iter_mut().zip(channels.iter_mut()) {
            *ptr = ch.as_mut_ptr();
        }

        let t = self.table();
        unsafe {
            (t.process)(
                t.data,
                ptrs.as_mut_ptr(),
                num_channels as i32,
                num_samples as i32,
            )
        };
        Ok(())
    }

    /// End the playback session and let the module free spare resources.
    pub fn release(&mut self) -> Result<(), HostError> {
        self.lifecycle.on_release()?;
        let t = self.table();
        unsafe { (t.release)(t.data) };
        Ok(())
    }

    /// Get the instance's editor, or `None` for headless modules.
    ///
    /// Idempotent: the module returns the identical editor on every call,
    /// and keeps owning it - the handle borrows the instance and never
    /// frees anything.
    pub fn editor(&mut self) -> Option<EditorHandle<'_>> {
        let t = self.table();
        let raw = unsafe { (t.get_editor)(t.data) };
        NonNull::new(raw).map(|raw| EditorHandle {
            raw,
            supports_gl_draw: self.api_version.supports_gl_draw(),
            _instance: PhantomData,
        })
    }

    /// Snapshot the module's persistent state for a preset file.
    ///
    /// The module-allocated buffer is copied out and immediately released
    /// through the table's `state_free` hook.
    pub fn get_state(&mut self) -> Result<Vec<u8>, HostError> {
        let t = self.table();
        let mut buffer: *mut u8 = std::ptr::null_mut();
        let mut size: usize = 0;
        unsafe { (t.get_state)(t.data, &mut buffer, &mut size) };
        if buffer.is_null() {
            return Ok(Vec::new());
        }
        let state = unsafe { std::slice::from_raw_parts(buffer, size) }.to_vec();
        unsafe { (t.state_free)(buffer, size) };
        Ok(state)
    }

    /// Restore persistent state from a preset record. A rejected record
    /// leaves the module's parameters untouched.
    pub fn set_state(&mut self, state: &[u8]) -> Result<(), HostError> {
        let t = self.table();
        let accepted = unsafe { (t.set_state)(t.data, state.as_ptr(), state.len()) };
        if accepted {
            Ok(())
        } else {
            Err(HostError::StateRestore)
        }
    }

    /// Forward a panel button event. Out-of-range indices are dropped by
    /// the module shim.
    pub fn button_pressed(&mut self, index: i32, down: bool) {
        let t = self.table();
        unsafe { (t.button_pressed)(t.data, index, down) };
    }

    /// Forward an encoder press event.
    pub fn encoder_pressed(&mut self, index: i32, down: bool) {
        let t = self.table();
        unsafe { (t.encoder_pressed)(t.data, index, down) };
    }

    /// Forward an encoder turn. May be called from the audio callback.
    pub fn encoder_turned(&mut self, index: i32, delta: i32) {
        let t = self.table();
        unsafe { (t.encoder_turned)(t.data, index, delta) };
    }

    /// Forward a patch-matrix input connection change.
    pub fn input_enabled(&mut self, index: i32, on: bool) {
        let t = self.table();
        unsafe { (t.input_enabled)(t.data, index, on) };
    }

    /// Forward a patch-matrix output connection change.
    pub fn output_enabled(&mut self, index: i32, on: bool) {
        let t = self.table();
        unsafe { (t.output_enabled)(t.data, index, on) };
    }
}

impl Drop for ModuleInstance {
    fn drop(&mut self) {
        self.lifecycle.retire();
        let raw = self.raw.as_ptr();
        unsafe { ((*raw).destroy)(raw) };
    }
}

/// Borrowed handle to a module's editor.
///
/// The editor belongs to its instance; this handle only forwards calls and
/// cannot outlive or free it.
pub struct EditorHandle<'a> {
    raw: NonNull<RawEditor>,
    supports_gl_draw: bool,
    _instance: PhantomData<&'a mut ModuleInstance>,
}

impl EditorHandle<'_> {
    fn table(&self) -> &RawEditor {
        unsafe { self.raw.as_ref() }
    }

    /// Start-of-frame hook; call once per UI frame regardless of
    /// visibility.
    pub fn frame_start(&mut self) {
        let t = self.table();
        unsafe { (t.frame_start)(t.data) };
    }

    /// Tell the editor it became visible or hidden.
    pub fn visibility_changed(&mut self, visible: bool) {
        let t = self.table();
        unsafe { (t.visibility_changed)(t.data, visible) };
    }

    /// Let the editor paint into the shared BGRA buffer. The buffer is not
    /// cleared between editors; drawing is additive.
    pub fn render_to_image(
        &mut self,
        pixels: &mut [u8],
        width: usize,
        height: usize,
    ) -> Result<(), HostError> {
        let needed = width * height * BYTES_PER_PIXEL;
        if pixels.len() < needed {
            return Err(HostError::ImageBufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        let t = self.table();
        unsafe {
            (t.render_to_image)(
                t.data,
                pixels.as_mut_ptr(),
                width.min(i32::MAX as usize) as i32,
                height.min(i32::MAX as usize) as i32,
            )
        };
        Ok(())
    }

    /// Whether the module's API minor version includes the GL draw hook.
    pub fn supports_gl_draw(&self) -> bool {
        self.supports_gl_draw
    }

    /// Invoke the GL draw hook. Returns `false` without calling when the
    /// module's API version predates it.
    pub fn draw(&mut self, width: usize, height: usize) -> bool {
        if !self.supports_gl_draw {
            return false;
        }
        let t = self.table();
        unsafe {
            (t.draw)(
                t.data,
                width.min(i32::MAX as usize) as i32,
                height.min(i32::MAX as usize) as i32,
            )
        };
        true
    }
}
