//! `#[repr(C)]` records crossing the host/module boundary.

use std::ffi::{c_char, c_void};

/// Symbol name of the descriptor factory.
pub const CREATE_DESCRIPTOR_SYMBOL: &[u8] = b"createDescriptor\0";

/// Symbol name of the instance factory.
pub const CREATE_INSTANCE_SYMBOL: &[u8] = b"createInstance\0";

/// Symbol name of the version query.
pub const GET_API_VERSION_SYMBOL: &[u8] = b"getApiVersion\0";

/// Signature of `createDescriptor`.
pub type DescriptorFn = unsafe extern "C" fn() -> *mut RawDescriptor;

/// Signature of `createInstance`.
pub type InstanceFn = unsafe extern "C" fn() -> *mut RawInstance;

/// Signature of `getApiVersion`. Writes major and minor through the
/// out-pointers.
pub type VersionFn = unsafe extern "C" fn(*mut u32, *mut u32);

/// Wire form of a module descriptor.
///
/// Returned freshly allocated by `createDescriptor`; ownership transfers to
/// the caller, who releases it by invoking `destroy` exactly once. All
/// strings are NUL-terminated and allocated by the module.
#[repr(C)]
pub struct RawDescriptor {
    pub name: *mut c_char,
    pub description: *mut c_char,
    pub manufacturer: *mut c_char,
    pub version: *mut c_char,
    pub file_or_identifier: *mut c_char,
    pub uid: u32,
    pub colour: u32,
    pub input_names: *mut *mut c_char,
    pub num_inputs: u32,
    pub output_names: *mut *mut c_char,
    pub num_outputs: u32,
    /// Release hook. Frees the record and every string it owns.
    pub destroy: unsafe extern "C" fn(*mut RawDescriptor),
}

/// Wire form of a live module instance: an opaque data pointer plus the
/// function table the host calls through.
///
/// Returned freshly allocated by `createInstance`; ownership transfers to
/// the caller, who releases it by invoking `destroy` exactly once. The
/// editor returned by `get_editor` stays owned by the instance.
#[repr(C)]
pub struct RawInstance {
    pub data: *mut c_void,
    /// `prepare(data, sample_rate, block_size)`. UI thread.
    pub prepare: unsafe extern "C" fn(*mut c_void, f64, i32),
    /// `process(data, channel_data, num_channels, num_samples)`. Audio
    /// callback; must not block or allocate.
    pub process: unsafe extern "C" fn(*mut c_void, *mut *mut f32, i32, i32),
    /// `release(data)`. UI thread, never concurrent with `process`.
    pub release: unsafe extern "C" fn(*mut c_void),
    /// Idempotent editor query; returns the same pointer on every call, or
    /// null for headless modules. UI thread.
    pub get_editor: unsafe extern "C" fn(*mut c_void) -> *mut RawEditor,
    /// `button_pressed(data, index, down)`. UI thread.
    pub button_pressed: unsafe extern "C" fn(*mut c_void, i32, bool),
    /// `encoder_pressed(data, index, down)`. UI thread.
    pub encoder_pressed: unsafe extern "C" fn(*mut c_void, i32, bool),
    /// `encoder_turned(data, index, delta)`. UI thread or audio callback.
    pub encoder_turned: unsafe extern "C" fn(*mut c_void, i32, i32),
    /// `input_enabled(data, index, on)`. UI thread.
    pub input_enabled: unsafe extern "C" fn(*mut c_void, i32, bool),
    /// `output_enabled(data, index, on)`. UI thread.
    pub output_enabled: unsafe extern "C" fn(*mut c_void, i32, bool),
    /// `get_state(data, out_buffer, out_size)`. The buffer is allocated by
    /// the module; the caller copies it out and releases it through
    /// `state_free`. UI thread.
    pub get_state: unsafe extern "C" fn(*mut c_void, *mut *mut u8, *mut usize),
    /// Release hook for buffers returned by `get_state`.
    pub state_free: unsafe extern "C" fn(*mut u8, usize),
    /// `set_state(data, buffer, size)`. Returns `false` on a rejected
    /// record, in which case no parameter was touched. UI thread.
    pub set_state: unsafe extern "C" fn(*mut c_void, *const u8, usize) -> bool,
    /// Release hook. Frees the instance and its editor.
    pub destroy: unsafe extern "C" fn(*mut RawInstance),
}

/// Wire form of a module editor.
///
/// Owned by its instance; the host must never destroy it.
#[repr(C)]
pub struct RawEditor {
    pub data: *mut c_void,
    /// Start-of-frame hook, called regardless of visibility. UI thread.
    pub frame_start: unsafe extern "C" fn(*mut c_void),
    /// Visibility bracket around the paint period. UI thread.
    pub visibility_changed: unsafe extern "C" fn(*mut c_void, bool),
    /// `render_to_image(data, bgra_pixels, width, height)`. UI thread,
    /// visible editors only. The pixel buffer is shared and not cleared.
    pub render_to_image: unsafe extern "C" fn(*mut c_void, *mut u8, i32, i32),
    /// GL hook with the viewport size. Only meaningful when the module's
    /// minor version advertises it.
    pub draw: unsafe extern "C" fn(*mut c_void, i32, i32),
}
