//! # strata-core
//!
//! Core abstractions for the Strata workstation module SDK.
//!
//! This crate provides the format-agnostic traits and types that define the
//! boundary between the workstation host and a loadable processing module.
//! The C-ABI plumbing lives in `strata-abi`; the host-side loader lives in
//! `strata-host`. This crate only depends on `parking_lot` (for the
//! try-lock scope buffer) and can be used from either side of the boundary.
//!
//! ## Main Traits
//!
//! - [`Processor`] - Audio processing, control surface and state callbacks
//! - [`Editor`] - Per-frame GUI rendering callbacks
//!
//! ## Types
//!
//! - [`ModuleDescriptor`] - Static identity record for a module type
//! - [`ApiVersion`] - Host/module compatibility contract
//! - [`Block`] - Planar in-place audio block view
//! - [`ImageFrame`] - BGRA pixel buffer view
//! - [`ScopeBuffer`] - Audio-thread-safe snapshot buffer for visualizers
//! - [`Button`] / [`Encoder`] - Fixed control-surface index mappings
//! - [`StateError`] - State blob codec errors

pub mod block;
pub mod controls;
pub mod descriptor;
pub mod editor;
pub mod error;
pub mod image;
pub mod processor;
pub mod scope;
pub mod state;
pub mod trace;
pub mod version;

// Re-exports for convenience
pub use block::{Block, MAX_CHANNELS};
pub use controls::{Button, Encoder, BUTTON_COUNT, ENCODER_COUNT};
pub use descriptor::{four_cc, ModuleDescriptor, DEFAULT_COLOUR};
pub use editor::Editor;
pub use error::StateError;
pub use image::{ImageFrame, BYTES_PER_PIXEL};
pub use processor::Processor;
pub use scope::{ScopeBuffer, Snapshot};
pub use version::{ApiVersion, API_MAJOR_VERSION, API_MINOR_VERSION};
