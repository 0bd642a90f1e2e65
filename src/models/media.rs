use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

impl MediaType {
    /// Everything that is neither an image nor a video is treated as audio.
    pub fn from_mime(mime: &str) -> MediaType {
        if mime.starts_with("image/") {
            MediaType::Image
        } else if mime.starts_with("video/") {
            MediaType::Video
        } else {
            MediaType::Audio
        }
    }

    /// Best-effort inference for bare links returned by the search endpoints.
    pub fn from_url(url: &str) -> MediaType {
        let without_query = url.split('?').next().unwrap_or(url);
        match without_query.rsplit('.').next().map(|e| e.to_lowercase()) {
            Some(ext) => match ext.as_str() {
                "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tiff" => MediaType::Image,
                "mp4" | "mov" | "avi" | "mkv" | "webm" => MediaType::Video,
                "mp3" | "wav" | "ogg" | "flac" | "m4a" => MediaType::Audio,
                _ => MediaType::Image,
            },
            None => MediaType::Image,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        };
        write!(f, "{s}")
    }
}

/// MIME type guessed from the file extension, used for the upload request
/// and the presigned PUT.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub count: u32,
}

impl Tag {
    pub fn new(name: impl Into<String>, count: u32) -> Tag {
        Tag {
            name: name.into(),
            count,
        }
    }
}

/// A single media entry as known to the remote service. The service is the
/// system of record; this struct is only ever rebuilt from responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub id: String,
    pub file_name: String,
    pub file_type: MediaType,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("image/jpeg"), MediaType::Image);
        assert_eq!(MediaType::from_mime("video/mp4"), MediaType::Video);
        assert_eq!(MediaType::from_mime("audio/mpeg"), MediaType::Audio);
        // anything unknown falls back to audio
        assert_eq!(
            MediaType::from_mime("application/octet-stream"),
            MediaType::Audio
        );
    }

    #[test]
    fn test_media_type_from_url_ignores_query() {
        assert_eq!(
            MediaType::from_url("https://x/y/owl.jpg?w=300"),
            MediaType::Image
        );
        assert_eq!(MediaType::from_url("https://x/call.mp3"), MediaType::Audio);
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("robin.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn test_media_file_deserializes_without_optional_fields() {
        let file: MediaFile = serde_json::from_str(
            r#"{"id":"1","fileName":"robin.jpg","fileType":"image",
                "fileUrl":"https://x/robin.jpg"}"#,
        )
        .unwrap();
        assert!(file.thumbnail_url.is_none());
        assert!(file.tags.is_empty());
    }
}
