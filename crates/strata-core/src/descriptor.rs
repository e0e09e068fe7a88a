//! Module identity records.

/// Default display colour: opaque mid-green (0xAARRGGBB).
pub const DEFAULT_COLOUR: u32 = 0xFF00_7F00;

/// Build a stable 32-bit unique identifier from a four-character tag.
///
/// ```
/// use strata_core::four_cc;
/// const UID: u32 = four_cc(*b"QVCA");
/// ```
pub const fn four_cc(tag: [u8; 4]) -> u32 {
    (tag[0] as u32) << 24 | (tag[1] as u32) << 16 | (tag[2] as u32) << 8 | tag[3] as u32
}

/// Static identity record for a module type.
///
/// One descriptor is created per factory call and ownership transfers whole
/// to the caller; there is no process-wide shared descriptor state, so
/// multiple loaded instances of the same module type cannot interfere.
///
/// The `uid` field is the compatibility key for saved presets and must
/// never change across releases of a module.
///
/// # Example
///
/// ```
/// use strata_core::{four_cc, ModuleDescriptor};
///
/// let desc = ModuleDescriptor::new("QVCA", four_cc(*b"QVCA"))
///     .with_description("Quad voltage controlled amplifier")
///     .with_manufacturer("Strata")
///     .with_version("1.0.1")
///     .with_input_names(["In 1", "In 2"])
///     .with_output_names(["Out 1", "Out 2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Short name displayed in the host's patch matrix.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Semantic version string of the module binary.
    pub version: String,
    /// Path or identifier of the backing binary. Overwritten by the host
    /// when the module is loaded; module authors leave it empty.
    pub file_or_identifier: String,
    /// Stable unique identifier. Preset compatibility key.
    pub uid: u32,
    /// Ordered input channel labels.
    pub input_names: Vec<String>,
    /// Ordered output channel labels.
    pub output_names: Vec<String>,
    /// Display colour, 0xAARRGGBB.
    pub colour: u32,
}

impl ModuleDescriptor {
    /// Create a descriptor with the given name and unique identifier.
    pub fn new(name: impl Into<String>, uid: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            manufacturer: String::new(),
            version: String::from("1.0.0"),
            file_or_identifier: String::new(),
            uid,
            input_names: Vec::new(),
            output_names: Vec::new(),
            colour: DEFAULT_COLOUR,
        }
    }

    /// Set the human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the manufacturer name.
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = manufacturer.into();
        self
    }

    /// Set the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the ordered input channel labels.
    pub fn with_input_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ordered output channel labels.
    pub fn with_output_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the display colour (0xAARRGGBB).
    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    /// Number of input channels.
    pub fn num_inputs(&self) -> usize {
        self.input_names.len()
    }

    /// Number of output channels.
    pub fn num_outputs(&self) -> usize {
        self.output_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_cc_is_big_endian_tag() {
        assert_eq!(four_cc(*b"TEST"), 0x54455354);
        assert_eq!(four_cc(*b"QVCA"), 0x51564341);
    }

    #[test]
    fn builder_fills_fields() {
        let desc = ModuleDescriptor::new("QVCA", four_cc(*b"QVCA"))
            .with_manufacturer("Strata")
            .with_input_names(["In 1", "In 2"]);
        assert_eq!(desc.uid, 0x51564341);
        assert_eq!(desc.num_inputs(), 2);
        assert_eq!(desc.num_outputs(), 0);
        assert_eq!(desc.colour, DEFAULT_COLOUR);
        assert!(desc.file_or_identifier.is_empty());
    }
}
