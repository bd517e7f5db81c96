//! Backend implementations for the repack compiler
//!
//! A Backend has to handle a resolved [`Workspace`] and produce a [Directory](vfs::Directory).
//!
//! The module [common] defines useful items that are specific to minecraft resource packs.

use repack_common::CompileContext;
use repack_error::Outcome;
use repack_workspace::Workspace;
use vfs::Directory;

pub mod common;
mod cit;
pub use cit::{CitBackend, CitPropertyFile, CitVariant, ItemMatch};

/// A Backend for repack, which has to convert a `Workspace` into a `Directory`
pub trait Backend {
    /// Converts the workspace into a directory.
    ///
    /// Warnings and errors which are found during the generation are returned alongside.
    fn generate(&self, workspace: &Workspace, ctx: &CompileContext) -> Outcome<Directory>;
}
