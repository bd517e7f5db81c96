//! Common items used by the compiler

pub mod file_provider;

mod input_file;
pub use input_file::{Code, CodeId, InputFiles};

mod location;
pub use location::SourceLocation;

mod compile_context;
pub use compile_context::CompileContext;

mod config;
pub use config::Config;

mod pack_format;
pub use pack_format::PackFormat;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
