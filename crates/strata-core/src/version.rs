//! API version contract between host and module binaries.
//!
//! The major version is a hard compatibility gate: host and module must
//! agree exactly or no interoperation is attempted. The minor version
//! signals additive, backward-compatible capability growth; hosts use it to
//! discover optional operations (e.g. the GL [`draw`] editor hook) instead
//! of relying on silent no-op defaults.
//!
//! [`draw`]: crate::editor::Editor::draw

use std::fmt;

/// Major API version compiled into this SDK.
///
/// A module built against a different major version must be refused by the
/// host, with no partial use.
pub const API_MAJOR_VERSION: u32 = 3;

/// Minor API version compiled into this SDK.
pub const API_MINOR_VERSION: u32 = 5;

/// Minor version that introduced the editor `draw` GL hook.
pub const MINOR_GL_DRAW: u32 = 2;

/// A (major, minor) API version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    /// The version this SDK was compiled with.
    pub const CURRENT: Self = Self::new(API_MAJOR_VERSION, API_MINOR_VERSION);

    /// Create a version pair.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether a module reporting this version may interoperate with a host
    /// expecting `host` - exact major match, any minor.
    pub const fn compatible_with(&self, host: ApiVersion) -> bool {
        self.major == host.major
    }

    /// Whether the editor `draw` GL hook is part of this version's surface.
    pub const fn supports_gl_draw(&self) -> bool {
        self.minor >= MINOR_GL_DRAW
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
