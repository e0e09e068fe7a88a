//! # strata-abi
//!
//! The binary boundary between the workstation host and a module shared
//! object. Host and module are compiled and versioned independently; this
//! crate defines everything that crosses between them:
//!
//! - The three load-time symbols ([`CREATE_DESCRIPTOR_SYMBOL`],
//!   [`CREATE_INSTANCE_SYMBOL`], [`GET_API_VERSION_SYMBOL`]), C linkage,
//!   no arguments, callable before any other interaction.
//! - `#[repr(C)]` records ([`RawDescriptor`], [`RawInstance`],
//!   [`RawEditor`]) built from opaque data pointers plus C function-pointer
//!   tables, so no Rust vtable layout crosses the boundary.
//! - The generic shim that adapts any [`strata_core::Processor`] to those
//!   tables, and the [`export_module!`] macro that wires a module crate's
//!   entry points.
//!
//! ## Ownership across the boundary
//!
//! Every object a factory returns carries its own `destroy` hook, and state
//! buffers carry `state_free`. Whoever receives an object is solely
//! responsible for invoking that hook, and must never free anything
//! obtained through another path - in particular the editor, which is owned
//! by its instance and dies with it. Host-side owned handle types wrapping
//! these hooks live in `strata-host`.

pub mod export;
pub mod raw;
pub mod shim;

pub use raw::{
    DescriptorFn, InstanceFn, RawDescriptor, RawEditor, RawInstance, VersionFn,
    CREATE_DESCRIPTOR_SYMBOL, CREATE_INSTANCE_SYMBOL, GET_API_VERSION_SYMBOL,
};
pub use shim::{descriptor_from_raw, descriptor_into_raw, instance_into_raw, write_api_version};
