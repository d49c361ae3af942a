//! Currency display-name resolution.
//!
//! Rate records carry a human-readable currency name. The name comes from an
//! external catalog reached through [`NameResolver`]; a failed lookup degrades
//! to the currency code and is never reported to the caller.

mod traits;

pub use traits::{resolve_or_code, CodeAsName, NameResolver, ResolveError};
