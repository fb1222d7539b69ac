use crate::assets::namespace::AssetNamespace;

/// Outcome of resolving one asset reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The reference is already an absolute path or a schemed URI and is kept verbatim.
    AlreadyResolved,
    /// A bare name the bundled-asset namespace mapped to this URI.
    Bundled(String),
    /// A bare name the namespace does not know. The field must be cleared.
    Missing,
}

/// Whether `reference` is already in resolved form.
///
/// Absolute paths start with `/`; schemed URIs contain `://` anywhere. No further URI validation
/// is attempted.
pub fn is_resolved(reference: &str) -> bool {
    reference.starts_with('/') || reference.contains("://")
}

/// Resolve one asset reference against `namespace`.
///
/// Idempotent for any namespace whose URIs carry a scheme: resolving a [`Resolution::Bundled`]
/// result again yields [`Resolution::AlreadyResolved`].
pub fn resolve_reference<N>(reference: &str, namespace: &N) -> Resolution
where
    N: AssetNamespace + ?Sized,
{
    if is_resolved(reference) {
        return Resolution::AlreadyResolved;
    }
    match namespace.lookup(reference) {
        Some(uri) => Resolution::Bundled(uri),
        None => Resolution::Missing,
    }
}

/// Resolve `reference` to its final URI, or `None` if it cannot be resolved.
pub fn resolve_uri<N>(reference: &str, namespace: &N) -> Option<String>
where
    N: AssetNamespace + ?Sized,
{
    match resolve_reference(reference, namespace) {
        Resolution::AlreadyResolved => Some(reference.to_string()),
        Resolution::Bundled(uri) => Some(uri),
        Resolution::Missing => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
