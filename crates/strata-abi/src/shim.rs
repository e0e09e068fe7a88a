//! Generic adapters between `strata-core` traits and the raw C records.
//!
//! The module side of the boundary. [`instance_into_raw`] boxes a
//! [`Processor`] behind a [`RawInstance`] function table;
//! [`descriptor_into_raw`] flattens a [`ModuleDescriptor`] into C strings.
//! Everything allocated here is freed by the matching `destroy` /
//! `state_free` hooks and nowhere else.

use std::ffi::{c_char, c_void, CStr, CString};
use std::ptr;

use strata_core::{
    Block, Button, Editor, Encoder, ImageFrame, ModuleDescriptor, Processor, API_MAJOR_VERSION,
    API_MINOR_VERSION,
};

use crate::raw::{RawDescriptor, RawEditor, RawInstance};

// =============================================================================
// Version query
// =============================================================================

/// Write the SDK's API version through the query's out-pointers.
///
/// # Safety
///
/// Each non-null pointer must reference writable `u32` storage.
pub unsafe fn write_api_version(major: *mut u32, minor: *mut u32) {
    if !major.is_null() {
        *major = API_MAJOR_VERSION;
    }
    if !minor.is_null() {
        *minor = API_MINOR_VERSION;
    }
}

// =============================================================================
// Descriptor flattening
// =============================================================================

fn c_string(s: &str) -> *mut c_char {
    let bytes: Vec<u8> = s.bytes().filter(|&b| b != 0).collect();
    match CString::new(bytes) {
        Ok(c) => c.into_raw(),
        // unreachable: interior NULs were stripped above
        Err(_) => CString::default().into_raw(),
    }
}

fn c_string_array(names: &[String]) -> (*mut *mut c_char, u32) {
    let ptrs: Box<[*mut c_char]> = names.iter().map(|n| c_string(n)).collect();
    let len = ptrs.len() as u32;
    (Box::into_raw(ptrs) as *mut *mut c_char, len)
}

unsafe fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

unsafe fn free_c_string_array(ptr: *mut *mut c_char, len: u32) {
    if ptr.is_null() {
        return;
    }
    let slice = Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len as usize));
    for &name in slice.iter() {
        free_c_string(name);
    }
}

unsafe extern "C" fn destroy_descriptor(raw: *mut RawDescriptor) {
    if raw.is_null() {
        return;
    }
    let desc = Box::from_raw(raw);
    free_c_string(desc.name);
    free_c_string(desc.description);
    free_c_string(desc.manufacturer);
    free_c_string(desc.version);
    free_c_string(desc.file_or_identifier);
    free_c_string_array(desc.input_names, desc.num_inputs);
    free_c_string_array(desc.output_names, desc.num_outputs);
}

/// Flatten a descriptor into its wire form. Ownership of the returned
/// record transfers to the caller, who releases it via its `destroy` hook.
pub fn descriptor_into_raw(descriptor: &ModuleDescriptor) -> *mut RawDescriptor {
    let (input_names, num_inputs) = c_string_array(&descriptor.input_names);
    let (output_names, num_outputs) = c_string_array(&descriptor.output_names);
    Box::into_raw(Box::new(RawDescriptor {
        name: c_string(&descriptor.name),
        description: c_string(&descriptor.description),
        manufacturer: c_string(&descriptor.manufacturer),
        version: c_string(&descriptor.version),
        file_or_identifier: c_string(&descriptor.file_or_identifier),
        uid: descriptor.uid,
        colour: descriptor.colour,
        input_names,
        num_inputs,
        output_names,
        num_outputs,
        destroy: destroy_descriptor,
    }))
}

unsafe fn owned_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

unsafe fn owned_string_vec(ptr: *const *mut c_char, len: u32) -> Vec<String> {
    if ptr.is_null() {
        return Vec::new();
    }
    (0..len as usize)
        .map(|i| owned_string(*ptr.add(i)))
        .collect()
}

/// Copy a wire descriptor into an owned [`ModuleDescriptor`]. Does not
/// release the raw record; the caller still owns it.
///
/// # Safety
///
/// `raw` must point to a live record produced by a module's
/// `createDescriptor`.
pub unsafe fn descriptor_from_raw(raw: *const RawDescriptor) -> ModuleDescriptor {
    let raw = &*raw;
    ModuleDescriptor {
        name: owned_string(raw.name),
        description: owned_string(raw.description),
        manufacturer: owned_string(raw.manufacturer),
        version: owned_string(raw.version),
        file_or_identifier: owned_string(raw.file_or_identifier),
        uid: raw.uid,
        colour: raw.colour,
        input_names: owned_string_vec(raw.input_names, raw.num_inputs),
        output_names: owned_string_vec(raw.output_names, raw.num_outputs),
    }
}

// =============================================================================
// Editor shim
// =============================================================================

/// Keeps the boxed editor alive for exactly as long as its wire record.
struct EditorSlot {
    raw: Box<RawEditor>,
    _editor: Box<Box<dyn Editor>>,
}

impl EditorSlot {
    fn new(editor: Box<dyn Editor>) -> Self {
        let mut editor = Box::new(editor);
        let data = &mut *editor as *mut Box<dyn Editor> as *mut c_void;
        Self {
            raw: Box::new(RawEditor {
                data,
                frame_start: editor_frame_start,
                visibility_changed: editor_visibility_changed,
                render_to_image: editor_render_to_image,
                draw: editor_draw,
            }),
            _editor: editor,
        }
    }
}

unsafe fn editor_mut<'a>(data: *mut c_void) -> &'a mut dyn Editor {
    &mut **(data as *mut Box<dyn Editor>)
}

unsafe extern "C" fn editor_frame_start(data: *mut c_void) {
    editor_mut(data).frame_start();
}

unsafe extern "C" fn editor_visibility_changed(data: *mut c_void, visible: bool) {
    editor_mut(data).visibility_changed(visible);
}

unsafe extern "C" fn editor_render_to_image(
    data: *mut c_void,
    pixels: *mut u8,
    width: i32,
    height: i32,
) {
    if pixels.is_null() || width <= 0 || height <= 0 {
        return;
    }
    let mut frame = ImageFrame::from_raw(pixels, width as usize, height as usize);
    editor_mut(data).render_to_image(&mut frame);
}

unsafe extern "C" fn editor_draw(data: *mut c_void, width: i32, height: i32) {
    if width <= 0 || height <= 0 {
        return;
    }
    editor_mut(data).draw(width as usize, height as usize);
}

// =============================================================================
// Instance shim
// =============================================================================

struct InstanceShim<P: Processor> {
    processor: P,
    editor: Option<EditorSlot>,
}

unsafe fn instance_mut<'a, P: Processor>(data: *mut c_void) -> &'a mut InstanceShim<P> {
    &mut *(data as *mut InstanceShim<P>)
}

unsafe extern "C" fn prepare_shim<P: Processor>(
    data: *mut c_void,
    sample_rate: f64,
    block_size: i32,
) {
    if block_size <= 0 {
        return;
    }
    instance_mut::<P>(data)
        .processor
        .prepare(sample_rate, block_size as usize);
}

unsafe extern "C" fn process_shim<P: Processor>(
    data: *mut c_void,
    channel_data: *mut *mut f32,
    num_channels: i32,
    num_samples: i32,
) {
    if channel_data.is_null() || num_channels < 0 || num_samples < 0 {
        return;
    }
    let mut block = Block::from_raw(channel_data, num_channels as usize, num_samples as usize);
    instance_mut::<P>(data).processor.process(&mut block);
}

unsafe extern "C" fn release_shim<P: Processor>(data: *mut c_void) {
    instance_mut::<P>(data).processor.release();
}

unsafe extern "C" fn get_editor_shim<P: Processor>(data: *mut c_void) -> *mut RawEditor {
    let shim = instance_mut::<P>(data);
    // create at most once; every later call returns the cached record
    if shim.editor.is_none() {
        if let Some(editor) = shim.processor.create_editor() {
            shim.editor = Some(EditorSlot::new(editor));
        }
    }
    match &mut shim.editor {
        Some(slot) => &mut *slot.raw,
        None => ptr::null_mut(),
    }
}

unsafe extern "C" fn button_pressed_shim<P: Processor>(data: *mut c_void, index: i32, down: bool) {
    // out-of-range indices are dropped; the host's index space may grow
    if let Some(button) = Button::from_index(index) {
        instance_mut::<P>(data).processor.button_pressed(button, down);
    }
}

unsafe extern "C" fn encoder_pressed_shim<P: Processor>(data: *mut c_void, index: i32, down: bool) {
    if let Some(encoder) = Encoder::from_index(index) {
        instance_mut::<P>(data)
            .processor
            .encoder_pressed(encoder, down);
    }
}

unsafe extern "C" fn encoder_turned_shim<P: Processor>(data: *mut c_void, index: i32, delta: i32) {
    if let Some(encoder) = Encoder::from_index(index) {
        instance_mut::<P>(data)
            .processor
            .encoder_turned(encoder, delta);
    }
}

unsafe extern "C" fn input_enabled_shim<P: Processor>(data: *mut c_void, index: i32, on: bool) {
    if index >= 0 {
        instance_mut::<P>(data)
            .processor
            .input_enabled(index as usize, on);
    }
}

unsafe extern "C" fn output_enabled_shim<P: Processor>(data: *mut c_void, index: i32, on: bool) {
    if index >= 0 {
        instance_mut::<P>(data)
            .processor
            .output_enabled(index as usize, on);
    }
}

unsafe extern "C" fn get_state_shim<P: Processor>(
    data: *mut c_void,
    out_buffer: *mut *mut u8,
    out_size: *mut usize,
) {
    if out_buffer.is_null() || out_size.is_null() {
        return;
    }
    match instance_mut::<P>(data).processor.save_state() {
        Ok(state) => {
            let boxed = state.into_boxed_slice();
            *out_size = boxed.len();
            *out_buffer = Box::into_raw(boxed) as *mut u8;
        }
        Err(err) => {
            log::warn!("module state save failed: {}", err);
            *out_buffer = ptr::null_mut();
            *out_size = 0;
        }
    }
}

unsafe extern "C" fn state_free_shim(buffer: *mut u8, size: usize) {
    if !buffer.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buffer, size)));
    }
}

unsafe extern "C" fn set_state_shim<P: Processor>(
    data: *mut c_void,
    buffer: *const u8,
    size: usize,
) -> bool {
    let record = if buffer.is_null() {
        &[][..]
    } else {
        std::slice::from_raw_parts(buffer, size)
    };
    match instance_mut::<P>(data).processor.load_state(record) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("module state restore rejected: {}", err);
            false
        }
    }
}

unsafe extern "C" fn destroy_shim<P: Processor>(raw: *mut RawInstance) {
    if raw.is_null() {
        return;
    }
    let instance = Box::from_raw(raw);
    // the editor slot inside the shim dies with it
    drop(Box::from_raw(instance.data as *mut InstanceShim<P>));
}

/// Box a processor behind a [`RawInstance`] function table. Ownership of
/// the returned record transfers to the caller, who releases it via its
/// `destroy` hook.
pub fn instance_into_raw<P: Processor>(processor: P) -> *mut RawInstance {
    let shim = Box::new(InstanceShim {
        processor,
        editor: None,
    });
    Box::into_raw(Box::new(RawInstance {
        data: Box::into_raw(shim) as *mut c_void,
        prepare: prepare_shim::<P>,
        process: process_shim::<P>,
        release: release_shim::<P>,
        get_editor: get_editor_shim::<P>,
        button_pressed: button_pressed_shim::<P>,
        encoder_pressed: encoder_pressed_shim::<P>,
        encoder_turned: encoder_turned_shim::<P>,
        input_enabled: input_enabled_shim::<P>,
        output_enabled: output_enabled_shim::<P>,
        get_state: get_state_shim::<P>,
        state_free: state_free_shim,
        set_state: set_state_shim::<P>,
        destroy: destroy_shim::<P>,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use strata_core::four_cc;

    #[derive(Default, Clone)]
    struct CallLog {
        buttons: Arc<Mutex<Vec<(Button, bool)>>>,
        encoders: Arc<Mutex<Vec<(Encoder, i32)>>>,
    }

    #[derive(Default)]
    struct Probe {
        log: CallLog,
        params: Vec<f32>,
        prepared: Option<(f64, usize)>,
        editors_created: usize,
    }

    struct ProbeEditor;
    impl Editor for ProbeEditor {}

    impl Processor for Probe {
        fn prepare(&mut self, sample_rate: f64, block_size: usize) {
            self.prepared = Some((sample_rate, block_size));
        }

        fn process(&mut self, block: &mut Block) {
            for i in 0..block.num_samples() {
                let v = block.sample(0, i);
                block.set_sample(0, i, v * 2.0);
            }
        }

        fn create_editor(&mut self) -> Option<Box<dyn Editor>> {
            self.editors_created += 1;
            Some(Box::new(ProbeEditor))
        }

        fn button_pressed(&mut self, button: Button, down: bool) {
            self.log.buttons.lock().unwrap().push((button, down));
        }

        fn encoder_turned(&mut self, encoder: Encoder, delta: i32) {
            self.log.encoders.lock().unwrap().push((encoder, delta));
        }

        fn save_state(&self) -> Result<Vec<u8>, strata_core::StateError> {
            Ok(strata_core::state::encode("PRBE", "1.0.0", &self.params))
        }

        fn load_state(&mut self, data: &[u8]) -> Result<(), strata_core::StateError> {
            self.params = strata_core::state::decode("PRBE", "1.0.0", 2, data)?;
            Ok(())
        }
    }

    struct RawHandle(*mut RawInstance);
    impl Drop for RawHandle {
        fn drop(&mut self) {
            unsafe { ((*self.0).destroy)(self.0) };
        }
    }

    fn probe_instance(log: CallLog) -> RawHandle {
        RawHandle(instance_into_raw(Probe {
            log,
            params: vec![0.25, 0.75],
            ..Probe::default()
        }))
    }

    #[test]
    fn get_editor_is_idempotent() {
        let handle = probe_instance(CallLog::default());
        let raw = unsafe { &*handle.0 };
        let first = unsafe { (raw.get_editor)(raw.data) };
        let second = unsafe { (raw.get_editor)(raw.data) };
        assert!(!first.is_null());
        assert_eq!(first, second);
        let shim = unsafe { instance_mut::<Probe>(raw.data) };
        assert_eq!(shim.processor.editors_created, 1);
    }

    #[test]
    fn shift_r_routes_and_out_of_range_is_dropped() {
        let log = CallLog::default();
        let handle = probe_instance(log.clone());
        let raw = unsafe { &*handle.0 };
        unsafe {
            (raw.button_pressed)(raw.data, 13, true);
            (raw.button_pressed)(raw.data, 13, false);
            (raw.button_pressed)(raw.data, 14, true);
            (raw.button_pressed)(raw.data, -1, true);
        }
        let buttons = log.buttons.lock().unwrap();
        assert_eq!(
            &*buttons,
            &[(Button::ShiftR, true), (Button::ShiftR, false)]
        );
    }

    #[test]
    fn encoder_range_is_enforced_at_the_boundary() {
        let log = CallLog::default();
        let handle = probe_instance(log.clone());
        let raw = unsafe { &*handle.0 };
        unsafe {
            (raw.encoder_turned)(raw.data, 3, -2);
            (raw.encoder_turned)(raw.data, 4, 1);
        }
        assert_eq!(&*log.encoders.lock().unwrap(), &[(Encoder::E4, -2)]);
    }

    #[test]
    fn state_blob_crosses_the_table_intact() {
        let handle = probe_instance(CallLog::default());
        let raw = unsafe { &*handle.0 };

        let mut buffer: *mut u8 = ptr::null_mut();
        let mut size: usize = 0;
        unsafe { (raw.get_state)(raw.data, &mut buffer, &mut size) };
        assert!(!buffer.is_null());
        let copy = unsafe { std::slice::from_raw_parts(buffer, size) }.to_vec();
        unsafe { (raw.state_free)(buffer, size) };

        assert!(unsafe { (raw.set_state)(raw.data, copy.as_ptr(), copy.len()) });

        let mut corrupt = copy.clone();
        corrupt[0] ^= 0x01;
        assert!(!unsafe { (raw.set_state)(raw.data, corrupt.as_ptr(), corrupt.len()) });
        // rejected restore left the parameters untouched
        let shim = unsafe { instance_mut::<Probe>(raw.data) };
        assert_eq!(shim.processor.params, vec![0.25, 0.75]);
    }

    #[test]
    fn prepare_and_process_flow_through() {
        let handle = probe_instance(CallLog::default());
        let raw = unsafe { &*handle.0 };
        unsafe { (raw.prepare)(raw.data, 48_000.0, 128) };

        let mut samples = vec![1.0f32; 4];
        let mut ptrs = [samples.as_mut_ptr()];
        unsafe { (raw.process)(raw.data, ptrs.as_mut_ptr(), 1, 4) };
        assert_eq!(samples, vec![2.0; 4]);

        let shim = unsafe { instance_mut::<Probe>(raw.data) };
        assert_eq!(shim.processor.prepared, Some((48_000.0, 128)));
    }

    #[test]
    fn descriptor_survives_the_wire_format() {
        let descriptor = ModuleDescriptor::new("QVCA", four_cc(*b"QVCA"))
            .with_description("Quad VCA")
            .with_manufacturer("Strata")
            .with_version("1.0.1")
            .with_input_names(["In 1", "In 2"])
            .with_output_names(["Out 1"]);
        let raw = descriptor_into_raw(&descriptor);
        let copied = unsafe { descriptor_from_raw(raw) };
        unsafe { ((*raw).destroy)(raw) };
        assert_eq!(copied, descriptor);
    }

    #[test]
    fn version_query_writes_out_params() {
        let mut major = 0u32;
        let mut minor = 0u32;
        unsafe { write_api_version(&mut major, &mut minor) };
        assert_eq!(major, API_MAJOR_VERSION);
        assert_eq!(minor, API_MINOR_VERSION);
    }
}
