//! Version parsing utilities.

use semver::Version;

/// Major component of a version string.
///
/// Strict semver is tried first; otherwise a leading `v`/`V` is stripped and
/// the first dot-separated component is parsed (`v2`, `3.1`, `10.0-beta`).
/// Returns `None` for anything without a numeric major component.
#[must_use]
pub fn major_version(version: &str) -> Option<u64> {
    let trimmed = version.trim();
    let unprefixed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if let Ok(parsed) = Version::parse(unprefixed) {
        return Some(parsed.major);
    }

    let head = unprefixed.split('.').next()?;
    let digits: String = head.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Whether `to` bumps the major version of `from`.
///
/// Unparseable versions never count as a major bump.
#[must_use]
pub fn is_major_bump(from: &str, to: &str) -> bool {
    match (major_version(from), major_version(to)) {
        (Some(from), Some(to)) => to > from,
        _ => false,
    }
}
