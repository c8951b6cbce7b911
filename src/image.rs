use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is empty", path.display())]
    Empty { path: PathBuf },
    #[error("{} is {size} bytes, over the {limit} byte limit", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("{} is not a supported image", path.display())]
    Unsupported { path: PathBuf },
}

/// An image embedded as a `data:<mime>;base64,...` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn from_bytes(bytes: &[u8], extension: Option<&str>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        let mime = sniff_mime(bytes, extension)?;
        Some(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }

    /// Read and encode an image file. Blocking; run off the UI thread.
    pub fn from_path(path: &Path, max_bytes: u64) -> Result<Self, ImageError> {
        let read_err = |source| ImageError::Read {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(read_err)?.len();
        if size > max_bytes {
            return Err(ImageError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_bytes,
            });
        }
        let bytes = fs::read(path).map_err(read_err)?;
        if bytes.is_empty() {
            return Err(ImageError::Empty {
                path: path.to_path_buf(),
            });
        }
        let extension = path.extension().and_then(|e| e.to_str());
        Self::from_bytes(&bytes, extension).ok_or_else(|| ImageError::Unsupported {
            path: path.to_path_buf(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// MIME type from the file signature, falling back to the extension.
pub fn sniff_mime(bytes: &[u8], extension: Option<&str>) -> Option<&'static str> {
    const SIGNATURES: [(&[u8], &str); 5] = [
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF8", "image/gif"),
        (b"BM", "image/bmp"),
        (b"RIFF", "image/webp"),
    ];
    for (magic, mime) in SIGNATURES {
        if bytes.starts_with(magic) {
            if mime == "image/webp" && bytes.get(8..12) != Some(b"WEBP".as_slice()) {
                continue;
            }
            return Some(mime);
        }
    }

    match extension.map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("webp") => Some("image/webp"),
        Some("bmp") => Some("image/bmp"),
        Some("svg") => Some("image/svg+xml"),
        _ => None,
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(input: &str) -> PathBuf {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with(std::path::MAIN_SEPARATOR) || rest.starts_with('/'))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches(['/', std::path::MAIN_SEPARATOR]));
    }
    PathBuf::from(input)
}

/// What the terminal shows in place of an embedded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageSummary {
    pub mime: String,
    pub bytes: usize,
}

impl ImageSummary {
    pub fn parse(data_url: &str) -> Option<Self> {
        let rest = data_url.strip_prefix("data:")?;
        let (meta, body) = rest.split_once(',')?;
        let mime = meta.strip_suffix(";base64")?;
        let padding = body.bytes().rev().take_while(|b| *b == b'=').count();
        let bytes = (body.len() / 4 * 3).saturating_sub(padding);
        Some(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn format_name(&self) -> String {
        self.mime
            .strip_prefix("image/")
            .unwrap_or(&self.mime)
            .split('+')
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase()
    }

    pub fn label(&self) -> String {
        let size = if self.bytes >= 1024 * 1024 {
            format!("{:.1} MB", self.bytes as f64 / (1024.0 * 1024.0))
        } else if self.bytes >= 1024 {
            format!("{:.1} KB", self.bytes as f64 / 1024.0)
        } else {
            format!("{} B", self.bytes)
        };
        format!("{} {size}", self.format_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn sniffs_signatures_before_extension() {
        assert_eq!(sniff_mime(PNG_HEADER, Some("jpg")), Some("image/png"));
        assert_eq!(sniff_mime(b"\xff\xd8\xff\xe0", None), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 ", None), Some("image/webp"));
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WAVEfmt ", None), None);
        assert_eq!(sniff_mime(b"<svg/>", Some("SVG")), Some("image/svg+xml"));
        assert_eq!(sniff_mime(b"hello", Some("txt")), None);
    }

    #[test]
    fn from_path_builds_data_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forklift.png");
        fs::write(&path, PNG_HEADER).unwrap();

        let payload = ImagePayload::from_path(&path, 1024).unwrap();
        assert!(payload.as_str().starts_with("data:image/png;base64,"));

        let summary = ImageSummary::parse(payload.as_str()).unwrap();
        assert_eq!(summary.mime, "image/png");
        assert_eq!(summary.bytes, PNG_HEADER.len());
        assert_eq!(summary.label(), "PNG 16 B");
    }

    #[test]
    fn from_path_failures() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.png");
        assert!(matches!(
            ImagePayload::from_path(&missing, 1024),
            Err(ImageError::Read { .. })
        ));

        let empty = dir.path().join("empty.png");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(
            ImagePayload::from_path(&empty, 1024),
            Err(ImageError::Empty { .. })
        ));

        let text = dir.path().join("notes.txt");
        fs::write(&text, b"not an image").unwrap();
        assert!(matches!(
            ImagePayload::from_path(&text, 1024),
            Err(ImageError::Unsupported { .. })
        ));

        let big = dir.path().join("big.png");
        fs::write(&big, [0u8; 64]).unwrap();
        assert!(matches!(
            ImagePayload::from_path(&big, 32),
            Err(ImageError::TooLarge { size: 64, limit: 32, .. })
        ));
    }

    #[test]
    fn summary_rejects_non_data_urls() {
        assert!(ImageSummary::parse("https://example.com/a.png").is_none());
        assert!(ImageSummary::parse("data:image/png,raw").is_none());
    }

    #[test]
    fn summary_label_units() {
        let summary = ImageSummary {
            mime: "image/svg+xml".to_string(),
            bytes: 2048,
        };
        assert_eq!(summary.label(), "SVG 2.0 KB");
    }

    #[test]
    fn expand_path_keeps_plain_paths() {
        assert_eq!(expand_path(" /tmp/a.png "), PathBuf::from("/tmp/a.png"));
        assert_eq!(expand_path("~user/a.png"), PathBuf::from("~user/a.png"));
    }
}
