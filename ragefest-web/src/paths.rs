//! URL helpers that respect the deployment base path.
//!
//! `PUBLIC_URL` is read at compile time (for example `/ragefest` when the app
//! is hosted under a subdirectory). Without it everything is root-anchored.

fn public_base() -> &'static str {
    option_env!("PUBLIC_URL").unwrap_or("")
}

/// Path to a bundled static asset.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, public_base())
}

/// Base path for the router, `None` when served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    let base = public_base().trim_end_matches('/').trim();
    (!base.is_empty()).then(|| base.to_string())
}

/// Resolve a media reference for an `src` attribute.
///
/// Absolute references (remote URLs, object URLs, data URIs) pass through;
/// anything else is treated as a bundled asset.
#[must_use]
pub fn media_src(reference: &str) -> String {
    media_src_with_base(reference, public_base())
}

fn is_absolute(reference: &str) -> bool {
    ["http://", "https://", "blob:", "data:"]
        .iter()
        .any(|scheme| reference.starts_with(scheme))
}

fn media_src_with_base(reference: &str, base: &str) -> String {
    if is_absolute(reference) {
        reference.to_string()
    } else {
        asset_path_with_base(reference, base)
    }
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');
    format!("{base}/{rel}")
}
