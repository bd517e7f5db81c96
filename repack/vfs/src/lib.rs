//! Virtual in-memory file system.
//!
//! The whole output pack is assembled in a [`Directory`] first and only written to disk
//! once it is complete.
use std::io::prelude::*;
use std::{
    collections::HashMap,
    fs::{self, create_dir_all, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Custom macro to easily generate predefined file structures
#[macro_export]
macro_rules! directories {
        ($($rest:tt)+) => {{
        #[allow(unused_mut)]
        let mut file_map: std::collections::HashMap<String, $crate::File> = std::collections::HashMap::new();
        #[allow(unused_mut)]
        let mut dir_map: std::collections::HashMap<String, $crate::Directory> = std::collections::HashMap::new();

        $crate::directories_inner!( file_map, dir_map, $($rest)+ );

        $crate::Directory::with_contents(dir_map, file_map)
    }};
    () => {
        $crate::Directory::new()
    }

}

#[macro_export]
macro_rules! directories_inner {
    ($fname:ident, $dname:ident, $k:expr => File($v:expr)) => {
        $fname.insert($k.into(), $crate::File::with_data(&$v));
    };
    ($fname:ident, $dname:ident, $k:expr => File($v:expr), $($rest:tt)+) => {{
        $crate::directories_inner!($fname, $dname, $k => File($v));
        $crate::directories_inner!($fname, $dname, $($rest)+);
    }};
    ($fname:ident, $dname:ident, $k:ident => $v:expr) => {
        $dname.insert(stringify!($k).to_string(), $v);
    };
    ($fname:ident, $dname:ident, $k:ident => $v:expr, $($rest:tt)+) => {{
        $crate::directories_inner!($fname, $dname, $k => $v);
        $crate::directories_inner!($fname, $dname, $($rest)+);
    }};
    ($fname:ident, $dname:ident, $k:expr => $v:expr) => {
        $dname.insert($k.into(), $v);
    };
    ($fname:ident, $dname:ident, $k:expr => $v:expr, $($rest:tt)+) => {{
        $crate::directories_inner!($fname, $dname, $k => $v);
        $crate::directories_inner!($fname, $dname, $($rest)+);
    }};
    () => {
        $crate::Directory::new()
    };
}

#[derive(Debug, Eq, PartialEq)]
pub enum FsElement<'a> {
    File(&'a mut File),
    Directory(&'a mut Directory),
}

/// What gets written for a [`File`]
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum FileContents {
    Text(String),
    /// A file or directory on disk which is copied when persisting
    Copy(PathBuf),
}

impl Default for FileContents {
    fn default() -> Self {
        FileContents::Text(String::new())
    }
}

#[derive(Debug, Eq, PartialEq, Default)]
pub struct File {
    pub contents: FileContents,
}

#[derive(Debug, Eq, PartialEq, Default)]
pub struct Directory {
    pub files: HashMap<String, File>,
    pub directories: HashMap<String, Directory>,
}

impl<'a> FsElement<'a> {
    pub fn dir(self) -> Option<&'a mut Directory> {
        match self {
            FsElement::Directory(dir) => Some(dir),
            FsElement::File(_) => None,
        }
    }

    pub fn file(self) -> Option<&'a mut File> {
        match self {
            FsElement::File(file) => Some(file),
            FsElement::Directory(_) => None,
        }
    }
}

impl File {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: &str) -> Self {
        File {
            contents: FileContents::Text(data.to_string()),
        }
    }

    pub fn copy_of(source: impl Into<PathBuf>) -> Self {
        File {
            contents: FileContents::Copy(source.into()),
        }
    }

    /// Appends `data` to a text file. A copied file is replaced by the text.
    pub fn push_string(&mut self, data: &str) {
        match &mut self.contents {
            FileContents::Text(text) => text.push_str(data),
            FileContents::Copy(_) => self.contents = FileContents::Text(data.to_string()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.contents {
            FileContents::Text(text) => Some(text),
            FileContents::Copy(_) => None,
        }
    }

    pub fn persist(&self, name: &str, path: &Path) -> io::Result<()> {
        let target = path.join(name);
        match &self.contents {
            FileContents::Text(text) => {
                let mut file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(target)?;
                file.write_all(text.as_bytes())?;
            }
            FileContents::Copy(source) if source.is_dir() => copy_dir(source, &target)?,
            FileContents::Copy(source) => {
                fs::copy(source, target)?;
            }
        }

        Ok(())
    }
}

/// Recursively copies the contents of `source` into `target`
fn copy_dir(source: &Path, target: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            create_dir_all(&destination)?;
        } else {
            fs::copy(entry.path(), &destination)?;
        }
    }
    Ok(())
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(
        directories: HashMap<String, Directory>,
        files: HashMap<String, File>,
    ) -> Self {
        Directory { files, directories }
    }

    /// returns a new file with this name or returns an existing file with this name
    pub fn file(&mut self, name: impl Into<String>) -> &mut File {
        self.files.entry(name.into()).or_default()
    }

    /// Returns a new directory with this name or returns an existing directory with this name
    pub fn dir(&mut self, name: impl Into<String>) -> &mut Directory {
        self.directories.entry(name.into()).or_default()
    }

    /// Returns the directory at the `/` separated `path`, creating every missing directory
    pub fn dir_at(&mut self, path: &str) -> &mut Directory {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self, |dir, segment| dir.dir(segment))
    }

    /// Returns the file at the `/` separated `path`, creating it and its parents if necessary
    pub fn file_at(&mut self, path: &str) -> &mut File {
        let (parent, name) = path.rsplit_once('/').unwrap_or(("", path));
        self.dir_at(parent).file(name)
    }

    /// Inserts `file` at `path`, replacing an existing file
    pub fn insert_at(&mut self, path: &str, file: File) {
        *self.file_at(path) = file;
    }

    pub fn resolve_path(&mut self, path: &[&str]) -> Option<FsElement> {
        match path.split_first() {
            Some((&first, rest)) => {
                if let Some(file) = self.files.get_mut(first) {
                    match rest.is_empty() {
                        true => Some(FsElement::File(file)),
                        false => None,
                    }
                } else if let Some(dir) = self.directories.get_mut(first) {
                    dir.resolve_path(rest)
                } else {
                    None
                }
            }
            None => Some(FsElement::Directory(self)),
        }
    }

    /// Returns the file at the `/` separated `path`
    pub fn get_file(&self, path: &str) -> Option<&File> {
        let mut segments: Vec<_> = path.split('/').filter(|s| !s.is_empty()).collect();
        let name = segments.pop()?;

        let mut dir = self;
        for segment in segments {
            dir = dir.directories.get(segment)?;
        }
        dir.files.get(name)
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.get_file(path).is_some()
    }

    /// Counts the files of this directory and every subdirectory
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .directories
                .values()
                .map(Directory::file_count)
                .sum::<usize>()
    }

    pub fn persist(&self, name: &str, path: &Path) -> io::Result<()> {
        self.persist_contents(&path.join(name))
    }

    /// Writes the contents of this directory directly into `path`
    pub fn persist_contents(&self, path: &Path) -> io::Result<()> {
        create_dir_all(path)?;

        for (dirname, dir) in &self.directories {
            dir.persist(dirname, path)?;
        }

        for (filename, file) in &self.files {
            file.persist(filename, path)?;
        }

        Ok(())
    }
}
