use repack_catalog::{ItemCatalog, VanillaItems};
use repack_common::CompileContext;
use repack_error::Outcome;
use repack_workspace::Workspace;
use vfs::Directory;

use crate::Backend;

use super::generator::CitGenerator;

/// The optifine cit Backend implementation
///
/// Item keys are expanded with the catalog `C`.
#[derive(Debug, Default)]
pub struct CitBackend<C = VanillaItems> {
    catalog: C,
}

impl<C: ItemCatalog> CitBackend<C> {
    pub fn new(catalog: C) -> Self {
        CitBackend { catalog }
    }
}

impl<C: ItemCatalog> Backend for CitBackend<C> {
    fn generate(&self, workspace: &Workspace, ctx: &CompileContext) -> Outcome<Directory> {
        CitGenerator::new(ctx, workspace, &self.catalog).build()
    }
}
