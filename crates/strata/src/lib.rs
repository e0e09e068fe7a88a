//! # Strata
//!
//! Module SDK for the Strata hardware audio workstation.
//!
//! A module is a shared object the workstation loads at runtime. It
//! implements the [`Processor`] trait (and optionally [`Editor`]) from
//! `strata-core` and exports its entry points with [`export_module!`].
//!
//! ## Architecture
//!
//! ```text
//! Your module (implements Processor + Editor)
//!        ↓
//! strata-abi shim (C function tables, ownership hooks)
//!        ↓
//! workstation host (strata-host: loader, version gate, lifecycle)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strata::prelude::*;
//!
//! #[derive(Default)]
//! struct MyModule;
//!
//! impl Processor for MyModule {
//!     fn prepare(&mut self, _sample_rate: f64, _block_size: usize) {}
//!     fn process(&mut self, block: &mut Block) {
//!         // Your DSP here
//!     }
//! }
//!
//! fn descriptor() -> ModuleDescriptor {
//!     ModuleDescriptor::new("MINE", four_cc(*b"MINE"))
//!         .with_manufacturer("Me")
//!         .with_version(env!("CARGO_PKG_VERSION"))
//! }
//!
//! export_module!(descriptor, MyModule);
//! ```
//!
//! [`Processor`]: strata_core::Processor
//! [`Editor`]: strata_core::Editor
//! [`export_module!`]: strata_abi::export_module

// Re-export sub-crates
pub use strata_abi as abi;
pub use strata_core as core;

pub use strata_abi::export_module;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use strata_abi::export_module;
    pub use strata_core::{
        four_cc, state, trace, ApiVersion, Block, Button, Editor, Encoder, ImageFrame,
        ModuleDescriptor, Processor, ScopeBuffer, Snapshot, StateError, API_MAJOR_VERSION,
        API_MINOR_VERSION, BUTTON_COUNT, BYTES_PER_PIXEL, DEFAULT_COLOUR, ENCODER_COUNT,
        MAX_CHANNELS,
    };
}
