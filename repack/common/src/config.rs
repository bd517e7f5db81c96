use crate::PackFormat;

/// Settings that control how a workspace gets compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The description written into `pack.mcmeta`
    pub pack_description: String,
    /// If set, a `pack.mcmeta` for this format is generated
    pub pack_format: Option<PackFormat>,
    /// The extension of the source files, without the leading dot
    pub source_extension: String,
    /// Whether an existing output directory gets deleted before writing the new pack
    pub clean_output: bool,
}

impl Config {
    pub const DEFAULT_SOURCE_EXTENSION: &'static str = "rep";
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pack_description: "Generated by RePack".to_string(),
            pack_format: None,
            source_extension: Config::DEFAULT_SOURCE_EXTENSION.to_string(),
            clean_output: true,
        }
    }
}
