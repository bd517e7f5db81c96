//! This module has the [`FileProvider`] trait, which the workspace builder uses to discover
//! source files and to check that referenced assets exist.

use std::{
    io,
    ops::Deref,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use walkdir::WalkDir;

pub trait FileProvider {
    /// Gets the contents of the file at the specified path
    fn read_file(&self, path: &Path) -> Option<Box<str>>;

    /// Returns whether a file or directory exists at the specified path
    fn exists(&self, path: &Path) -> bool;

    /// Returns whether a regular file exists at the specified path
    fn is_file(&self, path: &Path) -> bool;

    /// Recursively lists all files below `root` which have the given extension.
    /// The returned list is sorted.
    fn source_files(&self, root: &Path, extension: &str) -> io::Result<Vec<PathBuf>>;
}

impl<T, U> FileProvider for T
where
    T: Deref<Target = U>,
    U: FileProvider + ?Sized,
{
    fn read_file(&self, path: &Path) -> Option<Box<str>> {
        self.deref().read_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.deref().exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.deref().is_file(path)
    }

    fn source_files(&self, root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        self.deref().source_files(root, extension)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// A [`FileProvider`] implementation that reads files from the file system
#[derive(Debug, Default)]
pub struct FsFileProvider;

impl FileProvider for FsFileProvider {
    fn read_file(&self, path: &Path) -> Option<Box<str>> {
        std::fs::read_to_string(path)
            .ok()
            .map(|string| string.into())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn source_files(&self, root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("'{}' is not a directory", root.display()),
            ));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// A [`FileProvider`] implementation that has an in-memory pool of files
#[derive(Debug, Default)]
pub struct MemoryFileProvider {
    files: FxHashMap<PathBuf, Box<str>>,
}

impl MemoryFileProvider {
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<Box<str>>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Box<str>>) -> Self {
        self.add_file(path, content);
        self
    }
}

impl FileProvider for MemoryFileProvider {
    fn read_file(&self, path: &Path) -> Option<Box<str>> {
        self.files.get(path).cloned()
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file == path || file.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn source_files(&self, root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        let mut files: Vec<_> = self
            .files
            .keys()
            .filter(|path| path.starts_with(root) && has_extension(path, extension))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }
}
