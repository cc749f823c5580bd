/// How a dropped file is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Becomes the surface texture.
    Image,
    /// Anything else; assumed to be decodable audio.
    Audio,
}

impl MediaKind {
    /// Classify by declared MIME type. Only the `image` prefix is checked;
    /// an empty or unknown type falls through to audio.
    #[inline]
    pub fn classify(mime: &str) -> Self {
        if mime.starts_with("image") {
            MediaKind::Image
        } else {
            MediaKind::Audio
        }
    }
}

/// Metadata of the first file in a drop payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl DroppedFile {
    pub fn kind(&self) -> MediaKind {
        MediaKind::classify(&self.mime)
    }
}
