use std::{
    fs,
    path::{Path, PathBuf},
};

use repack::{common::Config, error::Diagnostics, CompileConfig, CompileError};
use tempfile::TempDir;

/// A pack whose sources live in a temporary directory
pub struct TestPack {
    input: TempDir,
    output: TempDir,
}

#[allow(dead_code)]
impl TestPack {
    pub fn new() -> Self {
        TestPack {
            input: TempDir::new().expect("Could not create the input directory"),
            output: TempDir::new().expect("Could not create the output directory"),
        }
    }

    pub fn with_file(self, path: &str, contents: &str) -> Self {
        let path = self.input.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
        self
    }

    pub fn input(&self) -> &Path {
        self.input.path()
    }

    pub fn output(&self) -> PathBuf {
        self.output.path().join("pack")
    }

    pub fn compile(&self, config: Config) -> (Result<Diagnostics, CompileError>, CompileConfig) {
        let mut compile_config = CompileConfig::new(config);
        let result = compile_config.compile_to(self.input(), &self.output());
        (result, compile_config)
    }

    /// Compiles the pack and panics if it fails
    pub fn compile_ok(&self) -> Diagnostics {
        match self.compile(Config::default()) {
            (Ok(warnings), _) => warnings,
            (Err(CompileError::Failed(diagnostics)), config) => {
                panic!("{}", config.format_diagnostics(&diagnostics))
            }
            (Err(err), _) => panic!("{err}"),
        }
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.output().join(path))
            .unwrap_or_else(|err| panic!("Could not read '{path}': {err}"))
    }

    pub fn read_properties(&self, name: &str) -> String {
        self.read(&format!("assets/minecraft/optifine/cit/{name}.properties"))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.output().join(path).exists()
    }
}
