/// Extract an 11-character YouTube video id from a URL.
///
/// Matches the id after a `v=` query parameter or a path separator
/// (covers watch URLs, youtu.be short links, /embed/ and /shorts/ paths).
/// Returns None when the URL holds no recognizable id; no fuzzy matching.
pub fn extract_video_id(url: &str) -> Option<String> {
    let re = regex::Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap();
    re.captures(url).map(|cap| cap[1].to_string())
}
