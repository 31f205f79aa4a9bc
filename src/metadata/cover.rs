use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lofty::picture::{Picture, PictureType};

/// Pick the front cover (or else the first picture) and encode it as a data URI.
pub(super) fn cover_data_uri(pictures: &[Picture]) -> Option<String> {
    let picture = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())?;

    if picture.data().is_empty() {
        return None;
    }

    let mime = picture
        .mime_type()
        .map(|m| m.as_str())
        .unwrap_or("application/octet-stream");
    Some(encode_data_uri(mime, picture.data()))
}

pub(super) fn encode_data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}
