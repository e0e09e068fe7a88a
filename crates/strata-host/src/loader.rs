//! Module binary loading and version negotiation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;

use strata_abi::{
    descriptor_from_raw, DescriptorFn, InstanceFn, VersionFn, CREATE_DESCRIPTOR_SYMBOL,
    CREATE_INSTANCE_SYMBOL, GET_API_VERSION_SYMBOL,
};
use strata_core::{ApiVersion, ModuleDescriptor};

use crate::error::HostError;
use crate::instance::ModuleInstance;

/// A loaded module binary.
///
/// Loading resolves the version query first and hard-refuses any major
/// version mismatch before either factory is touched. The `Library` handle
/// is shared with every instance created from this module, so the binary
/// stays mapped for as long as anything built from it is alive.
pub struct Module {
    path: PathBuf,
    library: Arc<Library>,
    api_version: ApiVersion,
    create_descriptor: DescriptorFn,
    create_instance: InstanceFn,
}

impl Module {
    /// Load a module shared object and negotiate the API version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HostError::MissingBinary(path.to_path_buf()));
        }

        let library = unsafe { Library::new(path) }?;

        // the version query comes first; on a major mismatch nothing else
        // is ever called into this binary
        let get_version = unsafe {
            library
                .get::<VersionFn>(GET_API_VERSION_SYMBOL)
                .map_err(|_| HostError::MissingSymbol {
                    path: path.to_path_buf(),
                    symbol: "getApiVersion",
                })?
        };
        let mut major = 0u32;
        let mut minor = 0u32;
        unsafe { get_version(&mut major, &mut minor) };
        let found = ApiVersion::new(major, minor);
        let expected = ApiVersion::CURRENT;
        if !found.compatible_with(expected) {
            log::warn!(
                "refusing module {}: API {} against host API {}",
                path.display(),
                found,
                expected
            );
            return Err(HostError::ApiMismatch { expected, found });
        }

        let create_descriptor = unsafe {
            *library
                .get::<DescriptorFn>(CREATE_DESCRIPTOR_SYMBOL)
                .map_err(|_| HostError::MissingSymbol {
                    path: path.to_path_buf(),
                    symbol: "createDescriptor",
                })?
        };
        let create_instance = unsafe {
            *library
                .get::<InstanceFn>(CREATE_INSTANCE_SYMBOL)
                .map_err(|_| HostError::MissingSymbol {
                    path: path.to_path_buf(),
                    symbol: "createInstance",
                })?
        };

        log::info!("loaded module {} (API {})", path.display(), found);
        Ok(Self {
            path: path.to_path_buf(),
            library: Arc::new(library),
            api_version: found,
            create_descriptor,
            create_instance,
        })
    }

    /// The API version the module reported at load time.
    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Path to the backing shared object.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Query the module's identity record.
    ///
    /// The raw record the factory returns is copied to an owned value and
    /// released immediately through its `destroy` hook; `file_or_identifier`
    /// is overwritten with the binary path, as the boundary contract
    /// reserves that field for the host.
    pub fn descriptor(&self) -> Result<ModuleDescriptor, HostError> {
        let raw = unsafe { (self.create_descriptor)() };
        if raw.is_null() {
            return Err(HostError::NullFactoryResult("descriptor"));
        }
        let mut descriptor = unsafe { descriptor_from_raw(raw) };
        unsafe { ((*raw).destroy)(raw) };
        descriptor.file_or_identifier = self.path.display().to_string();
        Ok(descriptor)
    }

    /// Create a new processing instance of this module.
    pub fn instantiate(&self) -> Result<ModuleInstance, HostError> {
        let raw = unsafe { (self.create_instance)() };
        if raw.is_null() {
            return Err(HostError::NullFactoryResult("instance"));
        }
        log::debug!("instantiated module {}", self.path.display());
        Ok(ModuleInstance::new(
            raw,
            Arc::clone(&self.library),
            self.api_version,
        ))
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("path", &self.path)
            .field("api_version", &self.api_version)
            .finish()
    }
}
