use core::fmt;

/// The `pack_format` number of a resource pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackFormat(pub u32);

/// Maps minecraft versions to the resource pack format they expect
const VERSION_TABLE: &[(&str, u32)] = &[
    ("1.6.1", 1),
    ("1.6.2", 1),
    ("1.6.4", 1),
    ("1.7.2", 1),
    ("1.7.3", 1),
    ("1.7.4", 1),
    ("1.7.5", 1),
    ("1.7.6", 1),
    ("1.7.7", 1),
    ("1.7.8", 1),
    ("1.7.9", 1),
    ("1.7.10", 1),
    ("1.8", 1),
    ("1.8.1", 1),
    ("1.8.2", 1),
    ("1.8.3", 1),
    ("1.8.4", 1),
    ("1.8.5", 1),
    ("1.8.6", 1),
    ("1.8.7", 1),
    ("1.8.8", 1),
    ("1.8.9", 1),
    ("1.9", 2),
    ("1.9.1", 2),
    ("1.9.2", 2),
    ("1.9.3", 2),
    ("1.9.4", 2),
    ("1.10", 2),
    ("1.10.1", 2),
    ("1.10.2", 2),
    ("1.11", 3),
    ("1.11.1", 3),
    ("1.11.2", 3),
    ("1.12", 3),
    ("1.12.1", 3),
    ("1.12.2", 3),
    ("1.13", 4),
    ("1.13.1", 4),
    ("1.13.2", 4),
    ("1.14", 4),
    ("1.14.1", 4),
    ("1.14.2", 4),
    ("1.14.3", 4),
    ("1.14.4", 4),
    ("1.15", 5),
    ("1.15.1", 5),
    ("1.15.2", 5),
    ("1.16", 5),
    ("1.16.1", 5),
    ("1.16.2", 6),
    ("1.16.3", 6),
    ("1.16.4", 6),
    ("1.16.5", 6),
    ("1.17", 7),
    ("1.17.1", 7),
    ("1.18", 8),
    ("1.18.1", 8),
    ("1.18.2", 8),
    ("1.19", 9),
    ("1.19.1", 9),
    ("1.19.2", 9),
    ("1.19.3", 12),
    ("1.19.4", 13),
];

impl PackFormat {
    /// Looks up the pack format of a minecraft version.
    ///
    /// Accepts both `1.19.4` and the enum-like spelling `V1_19_4`.
    pub fn from_version(version: &str) -> Option<Self> {
        let version = version.trim();
        let normalized = version
            .strip_prefix(['v', 'V'])
            .map_or_else(|| version.to_string(), |rest| rest.replace('_', "."));

        VERSION_TABLE
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, format)| PackFormat(*format))
    }

    /// All versions that [`PackFormat::from_version`] knows about
    pub fn known_versions() -> impl Iterator<Item = &'static str> {
        VERSION_TABLE.iter().map(|(name, _)| *name)
    }
}

impl fmt::Display for PackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
