//! Content type detection from magic bytes

/// Detect the MIME type of `data` from its leading bytes
///
/// Only the formats accepted as attachments are recognized.
pub fn sniff_content_type(data: &[u8]) -> Option<&'static str> {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
    ];

    if let Some((_, mime)) = SIGNATURES.iter().find(|(magic, _)| data.starts_with(magic)) {
        return Some(*mime);
    }

    // RIFF container: "RIFF" <size:4> "WEBP"
    if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    // ISO base media: <size:4> "ftyp" <brand:4>
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return Some("video/mp4");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_signatures() {
        assert_eq!(sniff_content_type(b"\x89PNG\r\n\x1a\n...."), Some("image/png"));
        assert_eq!(sniff_content_type(b"\xff\xd8\xff\xe0rest"), Some("image/jpeg"));
        assert_eq!(sniff_content_type(b"GIF89a..."), Some("image/gif"));
        assert_eq!(sniff_content_type(b"%PDF-1.7"), Some("application/pdf"));
        assert_eq!(sniff_content_type(b"RIFF\x10\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_content_type(b"\0\0\0\x18ftypmp42"), Some("video/mp4"));
    }

    #[test]
    fn test_unknown_content() {
        assert_eq!(sniff_content_type(b"hello world"), None);
        assert_eq!(sniff_content_type(b""), None);
        assert_eq!(sniff_content_type(b"RIFF\x10\0\0\0WAVE"), None);
    }
}
