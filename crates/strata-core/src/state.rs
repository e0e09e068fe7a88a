//! State blob codec.
//!
//! Serializes a module's persistent parameter array to the opaque byte
//! record stored in host preset files:
//!
//! ```text
//! [name tag][version tag][raw f32 LE parameter array][name tag]
//! ```
//!
//! The repeated name tag at head and tail is a cheap integrity check, not a
//! cryptographic one. There is no length prefix; tag and array lengths are
//! compile-time-fixed on both sides, so [`decode`] checks the total length
//! first and then re-validates every tag byte-for-byte before trusting the
//! payload. On any mismatch nothing is returned and the caller keeps its
//! prior parameter values - a corrupt preset never partially applies.

use crate::error::StateError;

/// Size in bytes of an encoded record for the given tags and parameter count.
pub fn encoded_len(name: &str, version: &str, param_count: usize) -> usize {
    name.len() * 2 + version.len() + param_count * 4
}

/// Encode a parameter array into a state record.
pub fn encode(name: &str, version: &str, params: &[f32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(name, version, params.len()));
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(version.as_bytes());
    for p in params {
        buf.extend_from_slice(&p.to_le_bytes());
    }
    buf.extend_from_slice(name.as_bytes());
    buf
}

/// Validate a state record and extract its parameter array.
///
/// `param_count` is the fixed number of parameters the caller expects; a
/// record of any other size is rejected before tag inspection.
pub fn decode(
    name: &str,
    version: &str,
    param_count: usize,
    data: &[u8],
) -> Result<Vec<f32>, StateError> {
    let name_tag = name.as_bytes();
    let version_tag = version.as_bytes();
    let expected = encoded_len(name, version, param_count);
    if data.len() != expected {
        return Err(StateError::Length {
            expected,
            actual: data.len(),
        });
    }

    let payload_start = name_tag.len() + version_tag.len();
    let payload_end = data.len() - name_tag.len();
    if &data[..name_tag.len()] != name_tag {
        return Err(StateError::Format("head name tag mismatch"));
    }
    if &data[name_tag.len()..payload_start] != version_tag {
        return Err(StateError::Format("version tag mismatch"));
    }
    if &data[payload_end..] != name_tag {
        return Err(StateError::Format("tail name tag mismatch"));
    }

    let params = data[payload_start..payload_end]
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "QVCA";
    const VERSION: &str = "1.0.1";

    #[test]
    fn round_trip_is_byte_identical() {
        let params = [0.0f32, 0.5, -1.0, 2.0];
        let blob = encode(NAME, VERSION, &params);
        assert_eq!(blob.len(), encoded_len(NAME, VERSION, params.len()));
        let restored = decode(NAME, VERSION, params.len(), &blob).unwrap();
        assert_eq!(restored, params);
        // and the re-encoded record matches byte for byte
        assert_eq!(encode(NAME, VERSION, &restored), blob);
    }

    #[test]
    fn corrupted_head_tag_is_rejected() {
        let params = [1.0f32; 4];
        let mut blob = encode(NAME, VERSION, &params);
        blob[0] ^= 0x01;
        assert_eq!(
            decode(NAME, VERSION, params.len(), &blob),
            Err(StateError::Format("head name tag mismatch"))
        );
    }

    #[test]
    fn corrupted_tail_tag_is_rejected() {
        let params = [1.0f32; 4];
        let mut blob = encode(NAME, VERSION, &params);
        let last = blob.len() - 1;
        blob[last] ^= 0x01;
        assert_eq!(
            decode(NAME, VERSION, params.len(), &blob),
            Err(StateError::Format("tail name tag mismatch"))
        );
    }

    #[test]
    fn wrong_version_tag_is_rejected() {
        let params = [1.0f32; 4];
        let blob = encode(NAME, "1.0.2", &params);
        assert_eq!(
            decode(NAME, VERSION, params.len(), &blob),
            Err(StateError::Format("version tag mismatch"))
        );
    }

    #[test]
    fn foreign_or_truncated_records_are_rejected_by_length() {
        let blob = encode(NAME, VERSION, &[1.0f32; 4]);
        assert!(matches!(
            decode(NAME, VERSION, 8, &blob),
            Err(StateError::Length { .. })
        ));
        assert!(matches!(
            decode(NAME, VERSION, 4, &blob[..blob.len() - 1]),
            Err(StateError::Length { .. })
        ));
    }
}
