//! Object key derivation and public URL layout.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::RngCore;

/// Entropy width of a derived key, in bytes.
///
/// 256 bits makes collisions a birthday-bound improbability; no existence
/// check is performed before upload.
const KEY_ENTROPY_BYTES: usize = 32;

/// Derive a fresh object key under the given namespace prefix,
/// e.g. `landscape/dGhpcyBpcyBub3QgYSByZWFsIGtleQ`.
pub fn random_object_key(prefix: &str) -> String {
    let mut entropy = [0u8; KEY_ENTROPY_BYTES];
    rand::rng().fill_bytes(&mut entropy);
    format!("{}/{}", prefix, URL_SAFE_NO_PAD.encode(entropy))
}

/// Build the publicly resolvable URL for an object.
pub fn public_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_carries_prefix() {
        let key = random_object_key("landscape");
        assert!(key.starts_with("landscape/"));
    }

    #[test]
    fn test_key_component_is_url_safe() {
        let key = random_object_key("portrait");
        let component = key.strip_prefix("portrait/").unwrap();
        // 32 bytes, base64 without padding
        assert_eq!(component.len(), 43);
        assert!(component
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_keys_are_unique() {
        assert_ne!(random_object_key("other"), random_object_key("other"));
    }

    #[test]
    fn test_public_url_layout() {
        let url = public_object_url("clips", "us-east-2", "landscape/abc123");
        assert_eq!(
            url,
            "https://clips.s3.us-east-2.amazonaws.com/landscape/abc123"
        );
    }
}
