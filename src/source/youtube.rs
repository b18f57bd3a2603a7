use serde::Deserialize;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::source::TranscriptSource;

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Transcript source backed by YouTube's public caption tracks.
///
/// Works the way browser clients do: load the watch page, read the
/// `captionTracks` list out of the embedded player response, then fetch the
/// chosen track in `json3` format. No API key required.
pub struct YouTubeSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl Default for YouTubeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeSource {
    pub fn new() -> Self {
        Self::with_base_url(None)
    }

    /// Override the base URL (config hook, also used by tests and proxies).
    pub fn with_base_url(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get_text(&self, url: &str, video_id: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .header("Accept-Language", "en-US,en")
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                video_id: video_id.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text()?)
    }
}

impl TranscriptSource for YouTubeSource {
    fn name(&self) -> &str {
        "youtube"
    }

    fn fetch_transcript(&self, video_id: &str) -> Result<String, FetchError> {
        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        debug!(video_id, "loading watch page");
        let html = self.get_text(&watch_url, video_id)?;

        let tracks = caption_tracks(&html, video_id)?;
        let track = pick_track(&tracks)
            .ok_or_else(|| FetchError::NoCaptions(video_id.to_string()))?;
        info!(
            video_id,
            language = track.language_code.as_deref().unwrap_or("unknown"),
            generated = track.kind.as_deref() == Some("asr"),
            "fetching caption track"
        );

        let track_url = format!("{}&fmt=json3", track.base_url);
        let body = self.get_text(&track_url, video_id)?;
        parse_json3(&body, video_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: Option<String>,
    /// "asr" marks auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

/// Locate and parse the `"captionTracks":[...]` array embedded in the
/// watch page. Absence means the video has no captions at all.
fn caption_tracks(html: &str, video_id: &str) -> Result<Vec<CaptionTrack>, FetchError> {
    const MARKER: &str = "\"captionTracks\":";
    let Some(idx) = html.find(MARKER) else {
        return Err(FetchError::NoCaptions(video_id.to_string()));
    };
    let rest = &html[idx + MARKER.len()..];
    let array = json_array_prefix(rest).ok_or_else(|| FetchError::Malformed {
        video_id: video_id.to_string(),
        detail: "unterminated captionTracks array".to_string(),
    })?;
    serde_json::from_str(array).map_err(|e| FetchError::Malformed {
        video_id: video_id.to_string(),
        detail: format!("captionTracks did not parse: {e}"),
    })
}

/// Return the leading balanced JSON array of `s`, respecting string
/// literals and escapes. None if `s` doesn't start with `[` or the array
/// never closes.
fn json_array_prefix(s: &str) -> Option<&str> {
    if !s.starts_with('[') {
        return None;
    }
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Track preference: manual English, then auto-generated English, then
/// whatever comes first.
fn pick_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    let is_english = |t: &&CaptionTrack| {
        t.language_code
            .as_deref()
            .is_some_and(|l| l.starts_with("en"))
    };
    tracks
        .iter()
        .filter(is_english)
        .find(|t| t.kind.as_deref() != Some("asr"))
        .or_else(|| tracks.iter().find(is_english))
        .or_else(|| tracks.first())
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: Option<String>,
}

/// Flatten a `json3` caption payload to plain text, one caption event per
/// line. Events without text segments (styling, window metadata) are
/// skipped.
fn parse_json3(body: &str, video_id: &str) -> Result<String, FetchError> {
    let transcript: Json3Transcript =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed {
            video_id: video_id.to_string(),
            detail: format!("caption track did not parse: {e}"),
        })?;

    let mut lines = Vec::new();
    for event in transcript.events {
        let Some(segs) = event.segs else { continue };
        let mut line = String::new();
        for seg in segs {
            if let Some(text) = seg.utf8 {
                line.push_str(&text);
            }
        }
        let line = line.replace('\n', " ");
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_PAGE: &str = r#"<html>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=de","languageCode":"de"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=en\u0026kind=asr","languageCode":"en","kind":"asr"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=dQw4w9WgXcQ\u0026lang=en","languageCode":"en"}]}}};</html>"#;

    #[test]
    fn extracts_caption_tracks_from_watch_page() {
        let tracks = caption_tracks(WATCH_PAGE, "dQw4w9WgXcQ").unwrap();
        assert_eq!(tracks.len(), 3);
        // & escapes come back as plain ampersands
        assert!(tracks[0].base_url.contains("?v=dQw4w9WgXcQ&lang=de"));
    }

    #[test]
    fn missing_caption_tracks_means_no_captions() {
        let err = caption_tracks("<html>no captions here</html>", "dQw4w9WgXcQ").unwrap_err();
        assert!(matches!(err, FetchError::NoCaptions(_)));
    }

    #[test]
    fn unterminated_array_is_malformed() {
        let err = caption_tracks(r#""captionTracks":[{"baseUrl":"x""#, "dQw4w9WgXcQ").unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }

    #[test]
    fn prefers_manual_english_track() {
        let tracks = caption_tracks(WATCH_PAGE, "dQw4w9WgXcQ").unwrap();
        let track = pick_track(&tracks).unwrap();
        assert_eq!(track.language_code.as_deref(), Some("en"));
        assert_eq!(track.kind, None);
    }

    #[test]
    fn falls_back_to_first_track_without_english() {
        let tracks: Vec<CaptionTrack> = serde_json::from_str(
            r#"[{"baseUrl":"u1","languageCode":"fr"},{"baseUrl":"u2","languageCode":"de"}]"#,
        )
        .unwrap();
        let track = pick_track(&tracks).unwrap();
        assert_eq!(track.language_code.as_deref(), Some("fr"));
    }

    #[test]
    fn json_array_prefix_handles_nesting_and_strings() {
        assert_eq!(json_array_prefix(r#"[[1,2],"a]b"] tail"#), Some(r#"[[1,2],"a]b"]"#));
        assert_eq!(json_array_prefix("not an array"), None);
        assert_eq!(json_array_prefix("[1,2"), None);
    }

    #[test]
    fn json3_events_flatten_to_lines() {
        let body = r#"{"events":[
            {"tStartMs":0,"dDurationMs":100},
            {"tStartMs":0,"segs":[{"utf8":"never gonna "},{"utf8":"give you up"}]},
            {"tStartMs":100,"segs":[{"utf8":"\n"}]},
            {"tStartMs":200,"segs":[{"utf8":"never gonna let you down"}]}
        ]}"#;
        let text = parse_json3(body, "dQw4w9WgXcQ").unwrap();
        assert_eq!(text, "never gonna give you up\nnever gonna let you down");
    }

    #[test]
    fn malformed_json3_is_typed_error() {
        let err = parse_json3("<html>not json</html>", "dQw4w9WgXcQ").unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }
}
