//! # strata-host
//!
//! Host-side loading and lifecycle management for Strata modules.
//!
//! A module is a shared object exporting the three load-time symbols
//! defined by `strata-abi`. Driving one from a host application:
//!
//! ```rust,ignore
//! use strata_host::Module;
//!
//! let module = Module::load("modules/qvca.so")?;        // version-gated
//! let descriptor = module.descriptor()?;
//! let mut instance = module.instantiate()?;
//!
//! instance.prepare(48_000.0, 128)?;                     // audio setup
//! // audio thread, per block:
//! instance.process(&mut channels)?;
//! // UI thread, per frame:
//! if let Some(mut editor) = instance.editor() {
//!     editor.frame_start();
//!     editor.render_to_image(&mut pixels, width, height)?;
//! }
//! ```
//!
//! Loading refuses any module whose API major version differs from the
//! host's - a hard incompatibility with no partial interoperation. Call
//! sequencing (never `process` before `prepare`) is enforced host-side by
//! [`LifecycleTracker`] before anything crosses the binary boundary.

pub mod error;
pub mod instance;
pub mod lifecycle;
pub mod loader;

pub use error::HostError;
pub use instance::{EditorHandle, ModuleInstance};
pub use lifecycle::{Lifecycle, LifecycleTracker};
pub use loader::Module;
