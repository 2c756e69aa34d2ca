//! The encoded output handed to the upload pipeline.

/// Name used when the source arrived without one.
const FALLBACK_STEM: &str = "image";

/// Encoded export of one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// Replace the extension of `original` with `extension`.
///
/// A name without an extension gains one; dot-files such as `.jpg` and
/// empty names fall back to `image`. Directory components are kept.
pub fn derive_filename(original: &str, extension: &str) -> String {
    let (dir, base) = match original.rfind(['/', '\\']) {
        Some(idx) => original.split_at(idx + 1),
        None => ("", original),
    };

    let stem = match base.rfind('.') {
        Some(idx) => &base[..idx],
        None => base,
    };
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    format!("{dir}{stem}.{extension}")
}
