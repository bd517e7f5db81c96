//! Static files which only change in some parameters, like 'pack.mcmeta'

use repack_common::{Config, PackFormat};

use crate::common::string_escape::escape_json;

#[derive(Debug, Clone, Copy)]
pub struct TemplateData<'a> {
    pack_format: PackFormat,
    description: &'a str,
}

impl<'a> TemplateData<'a> {
    /// Returns `None` if the config does not ask for a `pack.mcmeta`
    pub fn of(config: &'a Config) -> Option<Self> {
        config.pack_format.map(|pack_format| TemplateData {
            pack_format,
            description: &config.pack_description,
        })
    }
}

pub fn template_pack_mcmeta(data: TemplateData) -> String {
    format!(
        include_str!("res/pack.mcmeta.tp"),
        pack_format = data.pack_format,
        description = escape_json(data.description).collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use repack_common::{Config, PackFormat};

    use super::{template_pack_mcmeta, TemplateData};

    #[test]
    fn pack_mcmeta() {
        let config = Config {
            pack_description: "My \"best\" pack".to_string(),
            pack_format: Some(PackFormat(13)),
            ..Config::default()
        };
        let data = TemplateData::of(&config).unwrap();
        assert_eq!(
            template_pack_mcmeta(data),
            "{\n  \"pack\": {\n    \"pack_format\": 13,\n    \"description\": \"My \\\"best\\\" pack\"\n  }\n}\n"
        );
    }

    #[test]
    fn no_pack_format() {
        assert!(TemplateData::of(&Config::default()).is_none());
    }
}
