use std::path::{Path, PathBuf};

/// Undo percent-encoding on a path string.
///
/// Request paths arrive percent-encoded from the URL-shaped identifiers the
/// host application hands around. Encodings that do not decode to UTF-8, or
/// that decode to nothing, are contract violations by the caller, not runtime
/// conditions: continuing with a half-decoded path would corrupt queue state.
pub fn decode_path(encoded: &str) -> String {
    let decoded = urlencoding::decode(encoded)
        .unwrap_or_else(|err| panic!("path {encoded:?} is not valid percent-encoded UTF-8: {err}"));
    assert!(!decoded.is_empty(), "decoded path must not be empty");
    decoded.into_owned()
}

/// Map a decoded remote file name under the resolved documents directory.
pub fn remote_target(documents: &Path, name: &str) -> PathBuf {
    documents.join(name)
}
