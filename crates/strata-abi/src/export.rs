//! Entry-point export macro for module crates.

/// Generate the three load-time symbols for a module shared object.
///
/// Takes a descriptor factory (any path callable as `fn() ->
/// ModuleDescriptor`) and a processor type implementing
/// [`strata_core::Processor`] and `Default`. The descriptor is built fresh
/// on every factory call, so nothing is shared between loaded instances.
///
/// # Example
///
/// ```rust,ignore
/// use strata_core::{four_cc, ModuleDescriptor, Processor};
/// use strata_abi::export_module;
///
/// fn descriptor() -> ModuleDescriptor {
///     ModuleDescriptor::new("QVCA", four_cc(*b"QVCA"))
///         .with_manufacturer("Strata")
///         .with_version(env!("CARGO_PKG_VERSION"))
/// }
///
/// #[derive(Default)]
/// struct QuadVca { /* ... */ }
/// impl Processor for QuadVca { /* ... */ }
///
/// export_module!(descriptor, QuadVca);
/// ```
#[macro_export]
macro_rules! export_module {
    ($descriptor:path, $processor:ty) => {
        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn createDescriptor() -> *mut $crate::RawDescriptor {
            $crate::descriptor_into_raw(&$descriptor())
        }

        #[no_mangle]
        #[allow(non_snake_case)]
        pub extern "C" fn createInstance() -> *mut $crate::RawInstance {
            $crate::instance_into_raw(<$processor as ::std::default::Default>::default())
        }

        #[no_mangle]
        #[allow(non_snake_case)]
        pub unsafe extern "C" fn getApiVersion(major: *mut u32, minor: *mut u32) {
            $crate::write_api_version(major, minor);
        }
    };
}
