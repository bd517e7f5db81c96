//! Resolution of parsed pack files into predicates
//!
//! The [`WorkspaceBuilder`] discovers every source file of a pack, runs the front end on it,
//! resolves the variables and converts the statements into [`Predicate`]s.

mod builder;
mod interpolate;
mod pack_file;
mod predicate;
mod variable;
mod workspace;

pub use builder::WorkspaceBuilder;
pub use interpolate::{interpolate, Interpolated};
pub use pack_file::PackFile;
pub use predicate::{CopyFromTo, MatchPredicate, Predicate, PredicateType, SimplePredicate, Target};
pub use variable::{Variable, Variables};
pub use workspace::Workspace;
