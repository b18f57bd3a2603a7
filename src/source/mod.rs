pub mod youtube;

use crate::error::FetchError;

/// Trait that all transcript sources implement.
///
/// One atomic blocking call per video: no retry, no timeout policy, no
/// cancellation. Failures come back as typed values, never as strings the
/// caller would have to sniff.
pub trait TranscriptSource {
    /// Source name (used in logs and user-facing messages).
    fn name(&self) -> &str;

    /// Fetch the full transcript text for a single video id.
    fn fetch_transcript(&self, video_id: &str) -> Result<String, FetchError>;
}
