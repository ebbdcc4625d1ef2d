//! DXF revision enumeration

use std::fmt;

/// Historical DXF revisions as written in `$ACADVER`, earliest first.
///
/// The declaration order is the comparison order. It follows the order the
/// revisions were introduced, which is why `AC1500` sits between `AC1014`
/// and `AC1015` and the `AC402a`/`AC402b` pair between `AC1015` and `AC1018`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DxfVersion {
    #[default]
    AC1001,
    AC1002,
    AC1003,
    AC1004,
    AC1005,
    AC1006,
    AC1007,
    AC1008,
    AC1009,
    AC1010,
    AC1011,
    AC1012,
    AC1013,
    AC1014,
    AC1500,
    AC1015,
    AC402a,
    AC402b,
    AC1018,
    AC1021,
    AC1024,
    AC1027,
    AC1032,
}

impl DxfVersion {
    /// Newest revision whose grammar does not require subclass markers.
    pub const LEGACY_LIMIT: DxfVersion = DxfVersion::AC1009;

    /// First revision that stores text as UTF-8.
    pub const UNICODE_MIN: DxfVersion = DxfVersion::AC1021;

    const ALL: [(DxfVersion, &'static str); 23] = [
        (DxfVersion::AC1001, "AC1001"),
        (DxfVersion::AC1002, "AC1002"),
        (DxfVersion::AC1003, "AC1003"),
        (DxfVersion::AC1004, "AC1004"),
        (DxfVersion::AC1005, "AC1005"),
        (DxfVersion::AC1006, "AC1006"),
        (DxfVersion::AC1007, "AC1007"),
        (DxfVersion::AC1008, "AC1008"),
        (DxfVersion::AC1009, "AC1009"),
        (DxfVersion::AC1010, "AC1010"),
        (DxfVersion::AC1011, "AC1011"),
        (DxfVersion::AC1012, "AC1012"),
        (DxfVersion::AC1013, "AC1013"),
        (DxfVersion::AC1014, "AC1014"),
        (DxfVersion::AC1500, "AC1500"),
        (DxfVersion::AC1015, "AC1015"),
        (DxfVersion::AC402a, "AC402a"),
        (DxfVersion::AC402b, "AC402b"),
        (DxfVersion::AC1018, "AC1018"),
        (DxfVersion::AC1021, "AC1021"),
        (DxfVersion::AC1024, "AC1024"),
        (DxfVersion::AC1027, "AC1027"),
        (DxfVersion::AC1032, "AC1032"),
    ];

    /// Resolve a `$ACADVER` value. Matching is exact.
    pub fn from_version_string(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(version, _)| *version)
    }

    /// The `$ACADVER` spelling of this revision.
    pub fn as_str(&self) -> &'static str {
        Self::ALL[*self as usize].1
    }

    /// Whether bodies of this revision may end without a subclass marker.
    pub fn is_legacy(&self) -> bool {
        *self <= Self::LEGACY_LIMIT
    }

    /// Whether text of this revision is always UTF-8.
    pub fn is_unicode(&self) -> bool {
        *self >= Self::UNICODE_MIN
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
