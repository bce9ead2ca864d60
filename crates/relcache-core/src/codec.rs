//! Binary codec for cache entries.
//!
//! Every store level persists entries through this one format, so bytes
//! written by one process must decode in another. The layout is a single
//! version byte followed by a MessagePack body; bump [`FORMAT_VERSION`]
//! whenever the scalar set or entry shape changes.

use crate::entry::Entry;
use crate::error::{CacheError, Result};

/// Version byte prepended to every encoded entry.
pub const FORMAT_VERSION: u8 = 1;

/// Encode an entry to its persisted byte form.
///
/// Row widths are validated first; a mismatch is reported as corruption,
/// never silently truncated.
pub fn encode(entry: &Entry) -> Result<Vec<u8>> {
    entry.validate()?;
    let body =
        rmp_serde::to_vec(entry).map_err(|e| CacheError::Encode(e.to_string()))?;
    let mut buf = Vec::with_capacity(body.len() + 1);
    buf.push(FORMAT_VERSION);
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Decode an entry from its persisted byte form.
pub fn decode(buf: &[u8]) -> Result<Entry> {
    let (version, body) = buf
        .split_first()
        .ok_or_else(|| CacheError::Decode("empty payload".to_string()))?;
    if *version != FORMAT_VERSION {
        return Err(CacheError::Decode(format!(
            "unsupported format version {version}, expected {FORMAT_VERSION}"
        )));
    }
    rmp_serde::from_slice(body).map_err(|e| CacheError::Decode(e.to_string()))
}
