//! Percent-encoding module
//!
//! Minimal RFC 3986 escaping for request paths and directory-listing links.
//! Browsers escape special characters when they request a file the listing
//! names, so the server must decode on the way in and encode on the way out.

/// Decode `%XX` escapes in a request path
///
/// Invalid escape sequences are kept literally. Decoded bytes that do not
/// form valid UTF-8 yield `None`; such a path cannot name a servable file.
pub fn decode_path(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(out).ok()
}

/// Map an ASCII hex digit to its numeric value.
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Characters kept verbatim besides ASCII alphanumerics.
/// The slash stays so whole paths can be encoded segment-structure intact.
const UNRESERVED: &[u8] = b"-_.~/";

/// Percent-encode a path or file name for use in a URL or href
pub fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for &b in path.as_bytes() {
        if b.is_ascii_alphanumeric() || UNRESERVED.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_space() {
        assert_eq!(
            decode_path("/release%20notes.txt").as_deref(),
            Some("/release notes.txt")
        );
    }

    #[test]
    fn test_decode_leaves_plain_paths_alone() {
        assert_eq!(decode_path("/notes.txt").as_deref(), Some("/notes.txt"));
    }

    #[test]
    fn test_decode_keeps_invalid_escapes() {
        assert_eq!(decode_path("/100%").as_deref(), Some("/100%"));
        assert_eq!(decode_path("/a%zz").as_deref(), Some("/a%zz"));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert_eq!(decode_path("/%ff%fe"), None);
    }

    #[test]
    fn test_encode_space_and_quotes() {
        assert_eq!(encode_path("release notes.txt"), "release%20notes.txt");
        assert_eq!(encode_path("a\"b"), "a%22b");
    }

    #[test]
    fn test_encode_keeps_slashes() {
        assert_eq!(
            encode_path("build/flutter-apk/app-release.apk"),
            "build/flutter-apk/app-release.apk"
        );
    }

    #[test]
    fn test_roundtrip() {
        let name = "release notes (v1).txt";
        assert_eq!(
            decode_path(&encode_path(name)).as_deref(),
            Some(name)
        );
    }
}
