use std::{
    fs, io,
    path::{Path, PathBuf},
};

use repack_backends::{Backend, CitBackend};
use repack_common::{
    file_provider::{FileProvider, FsFileProvider},
    CompileContext, Config, PackFormat,
};
use repack_error::{Diagnostics, Outcome};
use repack_workspace::{Workspace, WorkspaceBuilder};
use thiserror::Error;
use tracing::{debug, info};
use vfs::Directory;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Compilation failed with {} error(s)", .0.errors().count())]
    Failed(Diagnostics),
    #[error("Unknown minecraft version '{version}'")]
    UnknownVersion { version: String },
    #[error("Could not remove the old output directory '{}': {source}", .path.display())]
    CleanOutput { path: PathBuf, source: io::Error },
    #[error("Could not write the pack to '{}': {source}", .path.display())]
    Persist { path: PathBuf, source: io::Error },
}

/// Looks up the pack format of a minecraft version
pub fn pack_format(version: &str) -> Result<PackFormat, CompileError> {
    PackFormat::from_version(version).ok_or_else(|| CompileError::UnknownVersion {
        version: version.to_string(),
    })
}

/// Compiles a directory of source files into a resource pack
pub struct CompileConfig<F = FsFileProvider> {
    pub compile_context: CompileContext,
    pub file_provider: F,
}

impl CompileConfig<FsFileProvider> {
    pub fn new(config: Config) -> Self {
        CompileConfig::with_provider(config, FsFileProvider)
    }
}

impl<F: FileProvider> CompileConfig<F> {
    pub fn with_provider(config: Config, file_provider: F) -> Self {
        CompileConfig {
            compile_context: CompileContext::new(config),
            file_provider,
        }
    }

    /// Parses and resolves every source file below `input`
    pub fn compute_workspace(&mut self, input: &Path) -> Outcome<Option<Workspace>> {
        WorkspaceBuilder::new(&mut self.compile_context, &self.file_provider, input).build()
    }

    pub fn compute_pack(&self, workspace: &Workspace) -> Outcome<Directory> {
        let backend: CitBackend = CitBackend::default();
        backend.generate(workspace, &self.compile_context)
    }

    /// Runs the whole pipeline in memory.
    ///
    /// Returns no pack if any error was reported.
    pub fn compile(&mut self, input: &Path) -> Outcome<Option<Directory>> {
        let mut diagnostics = Diagnostics::default();

        let Some(workspace) = self.compute_workspace(input).merge_into(&mut diagnostics) else {
            return Outcome::new(None, diagnostics);
        };
        info!("Compiling workspace ({} pack files)", workspace.files.len());

        let pack = self.compute_pack(&workspace).merge_into(&mut diagnostics);
        let pack = (!diagnostics.has_errors()).then_some(pack);
        Outcome::new(pack, diagnostics)
    }

    /// Compiles `input` and writes the pack to `output`.
    ///
    /// Nothing is written if the compilation fails. On success the reported warnings are returned.
    pub fn compile_to(&mut self, input: &Path, output: &Path) -> Result<Diagnostics, CompileError> {
        let (pack, diagnostics) = self.compile(input).into_parts();
        let Some(pack) = pack else {
            return Err(CompileError::Failed(diagnostics));
        };

        if self.compile_context.config.clean_output && output.is_dir() {
            info!("Deleting old pack output '{}'", output.display());
            fs::remove_dir_all(output).map_err(|source| CompileError::CleanOutput {
                path: output.to_path_buf(),
                source,
            })?;
        }

        debug!("Writing {} files", pack.file_count());
        pack.persist_contents(output)
            .map_err(|source| CompileError::Persist {
                path: output.to_path_buf(),
                source,
            })?;
        info!("Wrote pack to '{}'", output.display());

        Ok(diagnostics)
    }

    /// Renders diagnostics with the source files of this compilation
    pub fn format_diagnostics(&self, diagnostics: &Diagnostics) -> String {
        diagnostics.format(&self.compile_context.input_files)
    }
}
