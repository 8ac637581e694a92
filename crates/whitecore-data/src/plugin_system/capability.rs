use std::borrow::Cow;
use std::fmt;

/// Identifies a contract a data plugin satisfies.
///
/// Plugins declare the capabilities they implement when registered, and the
/// data service discovers plugins by capability. Identifiers are plain
/// kebab-case strings so plugin crates can define their own.
///
/// ```
/// use whitecore_data::plugin_system::Capability;
///
/// const ASSET_DATA: Capability = Capability::new("asset-data");
/// assert_eq!(ASSET_DATA.as_str(), "asset-data");
/// assert_ne!(ASSET_DATA, Capability::DATA);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    /// The well-known capability every general storage plugin declares
    pub const DATA: Capability = Capability::new("data-plugin");

    pub const fn new(id: &'static str) -> Self {
        Capability(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Capability {
    fn from(id: String) -> Self {
        Capability(Cow::Owned(id))
    }
}

impl From<&'static str> for Capability {
    fn from(id: &'static str) -> Self {
        Capability::new(id)
    }
}
