pub mod error;
pub mod resolver;

pub use error::{ResolveError, ResolveErrorKind};
pub use resolver::{resolve_branches, BranchResolver};
