//! A Backend that compiles to optifine cit resource packs

use repack_common::Config;
use vfs::{directories, Directory, File};

mod backend;
pub use backend::CitBackend;

mod generator;

mod property_file;
pub use property_file::{CitPropertyFile, CitVariant, ItemMatch};

mod templates;
use templates::{template_pack_mcmeta, TemplateData};

use crate::common::CIT_PATH;

/// Represents an in-memory resource pack
#[derive(Debug, Default)]
struct CitPack {
    /// The virtual file structure
    dir: Directory,
}

impl CitPack {
    /// Creates a new `CitPack` from a [Config]
    fn new(config: &Config) -> Self {
        let mut dir = directories! {
            assets => directories! {
                minecraft => directories! {
                    optifine => directories! {
                        cit => directories!()
                    }
                }
            }
        };

        if let Some(data) = TemplateData::of(config) {
            dir.insert_at("pack.mcmeta", File::with_data(&template_pack_mcmeta(data)));
        }

        CitPack { dir }
    }

    /// Returns the first name that is taken neither by a property file nor by an asset
    /// with the given extension
    fn unique_name(&self, base: &str, extension: &str) -> String {
        let taken = |name: &str| {
            self.dir.contains_file(&format!("{CIT_PATH}/{name}.properties"))
                || self.dir.contains_file(&format!("{CIT_PATH}/{name}.{extension}"))
        };

        let mut name = base.to_string();
        let mut suffix = 0;
        while taken(&name) {
            suffix += 1;
            name = format!("{base}{suffix}");
        }
        name
    }

    /// Adds a property file and the asset it refers to.
    ///
    /// Returns the name the files were written with.
    fn add_property_file(&mut self, property_file: &CitPropertyFile, asset: File) -> String {
        let extension = property_file.variant.extension();
        let name = self.unique_name(property_file.base_name(), extension);
        let cit = self.dir.dir_at(CIT_PATH);
        cit.insert_at(
            &format!("{name}.properties"),
            File::with_data(&property_file.render(&name)),
        );
        cit.insert_at(&format!("{name}.{extension}"), asset);
        name
    }
}
