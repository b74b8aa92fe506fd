/// Scout Extractor
///
/// Concrete media-fetch capability backed by the yt-dlp binary. The
/// binary does all protocol negotiation, format selection, and per-item
/// error tolerance; this crate only builds its invocations and parses
/// what comes back.
pub mod ytdlp;

pub use ytdlp::YtDlpFetcher;
