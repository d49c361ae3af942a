//! Resolution traits for the market data crate.
//!
//! Defines the capability used to attach display names to rate records.

use std::error::Error as StdError;

/// Boxed failure returned by a name resolver.
pub type ResolveError = Box<dyn StdError + Send + Sync>;

/// Resolves the display name of a currency by its code.
///
/// Implementations may fail for any reason (unknown code, backing catalog
/// unavailable). Callers never propagate that failure; see
/// [`resolve_or_code`].
pub trait NameResolver: Send + Sync {
    fn resolve_name(&self, code: &str) -> Result<String, ResolveError>;
}

impl<F> NameResolver for F
where
    F: Fn(&str) -> Result<String, ResolveError> + Send + Sync,
{
    fn resolve_name(&self, code: &str) -> Result<String, ResolveError> {
        self(code)
    }
}

/// Resolves a display name, falling back to the code itself on any failure.
pub fn resolve_or_code(resolver: &dyn NameResolver, code: &str) -> String {
    match resolver.resolve_name(code) {
        Ok(name) => name,
        Err(e) => {
            log::debug!("Name resolution failed for '{}', using code: {}", code, e);
            code.to_string()
        }
    }
}

/// Resolver that never knows a name. Every record is labelled with its code.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeAsName;

impl NameResolver for CodeAsName {
    fn resolve_name(&self, code: &str) -> Result<String, ResolveError> {
        Err(format!("no catalog configured for '{}'", code).into())
    }
}
