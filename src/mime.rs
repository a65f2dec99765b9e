//! MIME type to file extension lookup.
//!
//! Used only to name downloaded temporary files before they are remuxed or
//! muxed. The table covers the usual audio and video types; anything else
//! falls back to the caller's default.

/// Split a media type string into lowercased (type, subtype), dropping any
/// parameters. Types and subtypes are case-insensitive per RFC 2045.
fn parse(mime: &str) -> Option<(String, String)> {
    let essence = mime.split(';').next()?.trim();
    let (kind, subtype) = essence.split_once('/')?;
    if kind.is_empty() || subtype.is_empty() {
        return None;
    }
    Some((kind.to_ascii_lowercase(), subtype.to_ascii_lowercase()))
}

/// Pick a file extension (without the leading dot) for a media type
/// string. Returns `None` for unrecognized or non-media types.
pub fn media_extension(mime: &str) -> Option<&'static str> {
    let (kind, subtype) = parse(mime)?;
    let extension = match kind.as_str() {
        "audio" => match subtype.as_str() {
            "adpcm" => "adp",
            "aiff" | "x-aiff" => "aif",
            "basic" => "au",
            "midi" => "mid",
            "mp3" | "mpeg3" | "x-mpeg-3" => "mp3",
            "mp4" => "m4a",
            "mpa" => "mpa",
            "mpeg" => "mp2",
            "ogg" | "opus" => "ogg",
            "wav" | "x-wav" => "wav",
            "webm" => "weba",
            "x-aac" => "aac",
            "x-matroska" => "mka",
            "x-ms-wax" => "wax",
            "x-ms-wma" => "wma",
            "x-pn-realaudio" => "ra",
            _ => return None,
        },
        "video" => match subtype.as_str() {
            "3gpp" => "3gp",
            "3gpp2" => "3g2",
            "h261" => "h261",
            "h263" => "h263",
            "h264" => "h264",
            "h265" => "h265",
            "jpeg" => "jpgv",
            "jpm" => "jpm",
            "mj2" => "mj2",
            "mp2t" => "ts",
            "mp4" => "mp4",
            "mpeg" => "mpg",
            "ogg" => "ogv",
            "quicktime" => "mov",
            "webm" => "webm",
            "x-f4v" => "f4v",
            "x-fli" => "fli",
            "x-flv" => "flv",
            "x-m4v" => "m4v",
            "x-matroska" => "mkv",
            "x-ms-asf" => "asf",
            "x-ms-wm" => "wm",
            "x-ms-wmv" => "wmv",
            "x-msvideo" => "avi",
            "x-pn-realvideo" => "rm",
            _ => return None,
        },
        _ => return None,
    };
    Some(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_media_types() {
        assert_eq!(media_extension("video/mp4"), Some("mp4"));
        assert_eq!(media_extension("video/webm"), Some("webm"));
        assert_eq!(media_extension("video/x-matroska"), Some("mkv"));
        assert_eq!(media_extension("audio/mp4"), Some("m4a"));
        assert_eq!(media_extension("audio/webm"), Some("weba"));
        assert_eq!(media_extension("audio/opus"), Some("ogg"));
    }

    #[test]
    fn ignores_parameters_and_case() {
        assert_eq!(
            media_extension("video/mp4; codecs=\"avc1.4d401e\""),
            Some("mp4")
        );
        assert_eq!(media_extension("Video/MP4"), Some("mp4"));
        assert_eq!(media_extension("AUDIO/X-AAC"), Some("aac"));
    }

    #[test]
    fn unknown_types_yield_none() {
        assert_eq!(media_extension("application/octet-stream"), None);
        assert_eq!(media_extension("video/made-up"), None);
        assert_eq!(media_extension("not a mime type"), None);
        assert_eq!(media_extension(""), None);
    }
}
