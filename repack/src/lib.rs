//! The RePack compiler.
//!
//! RePack compiles `.rep` files, which describe which items should get custom textures
//! or models, into an optifine cit resource pack.
//! Look at [`CompileConfig`] to see how to compile a pack.
//!
//! [`repack_parser`] contains the tokenizer, the parser and the structural checks.
//!
//! [`repack_workspace`] resolves variables and turns the syntax trees into predicates.
//!
//! The crate [`repack_backends`] converts the resolved workspace into the files of the
//! resource pack, which are kept in a [`vfs::Directory`] until they are written to disk.

mod compile_config;

pub use compile_config::{pack_format, CompileConfig, CompileError};

pub use repack_backends as backends;
pub use repack_catalog as catalog;
pub use repack_common as common;
pub use repack_error as error;
pub use repack_parser as parser;
pub use repack_workspace as workspace;
