//! YouTube transcript retrieval.
//!
//! Caption tracks are discovered through the innertube `player` endpoint and
//! downloaded as timed-text XML.

use crate::error::{ExplainError, Result};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const INNERTUBE_PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Invalid video id regex")
});

static API_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("Invalid api key regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// One timed caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration, in seconds.
    pub duration: f64,
}

/// Source of video transcripts.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the ordered caption fragments for a video.
    ///
    /// A video without captions yields an empty list.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>>;
}

/// Extract the 11-character video id from a YouTube URL.
///
/// The id is the first 11-character `[0-9A-Za-z_-]` run following `v=` or `/`.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Concatenate fragment text with single spaces.
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transcript fetcher backed by YouTube's public endpoints.
pub struct YoutubeTranscriptFetcher {
    http: reqwest::Client,
    language: String,
}

impl YoutubeTranscriptFetcher {
    pub fn new(language: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            language: language.to_string(),
        })
    }

    /// Scrape the innertube API key from the watch page.
    async fn fetch_api_key(&self, video_id: &str) -> Result<String> {
        let html = self
            .http
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if let Some(caps) = API_KEY_REGEX.captures(&html) {
            return Ok(caps[1].to_string());
        }

        if html.contains("class=\"g-recaptcha\"") {
            return Err(ExplainError::Transcript(
                "YouTube is rate limiting requests from this IP".to_string(),
            ));
        }

        Err(ExplainError::Transcript(format!(
            "Could not find innertube API key for video {}",
            video_id
        )))
    }

    /// Ask the innertube player endpoint for the video's caption tracks.
    async fn fetch_caption_tracks(&self, video_id: &str, api_key: &str) -> Result<Vec<CaptionTrack>> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": video_id,
        });

        let player: PlayerResponse = self
            .http
            .post(INNERTUBE_PLAYER_URL)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(status) = &player.playability_status {
            if status.status != "OK" && player.captions.is_none() {
                return Err(ExplainError::Transcript(format!(
                    "Video {} is unavailable: {}",
                    video_id,
                    status.reason.as_deref().unwrap_or(&status.status)
                )));
            }
        }

        Ok(player
            .captions
            .map(|c| c.renderer.caption_tracks)
            .unwrap_or_default())
    }

    /// Download and parse one caption track.
    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptFragment>> {
        let url = timedtext_url(&track.base_url)?;
        let xml = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_timedtext(&xml)
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>> {
        let api_key = self.fetch_api_key(video_id).await?;
        let tracks = self.fetch_caption_tracks(video_id, &api_key).await?;

        let Some(track) = select_track(&tracks, &self.language) else {
            warn!("No caption tracks for video {}", video_id);
            return Ok(Vec::new());
        };

        info!(
            "Fetching {} transcript ({})",
            track.language_code,
            if track.is_generated() { "generated" } else { "manual" }
        );

        let fragments = self.fetch_track(track).await?;
        debug!("Fetched {} transcript fragments", fragments.len());
        Ok(fragments)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// `"asr"` for auto-generated captions.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Pick a manual track in `language`, then a generated one, then anything.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    let in_language = |generated: bool| {
        tracks
            .iter()
            .find(|t| t.language_code == language && t.is_generated() == generated)
    };

    in_language(false)
        .or_else(|| in_language(true))
        .or_else(|| tracks.first())
}

/// Strip the `fmt` parameter so the endpoint returns the classic XML format.
fn timedtext_url(base_url: &str) -> Result<url::Url> {
    let mut url = url::Url::parse(base_url)
        .map_err(|e| ExplainError::Transcript(format!("Invalid caption URL: {}", e)))?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url)
}

/// Parse `<transcript><text start=".." dur="..">..</text></transcript>`.
///
/// Element content is sliced from the source by reader position so entity
/// references stay intact for [`clean_caption_text`].
fn parse_timedtext(xml: &str) -> Result<Vec<TranscriptFragment>> {
    let mut reader = Reader::from_str(xml);
    let mut fragments = Vec::new();
    let mut open: Option<(usize, f64, f64)> = None;

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"text" => {
                let start = numeric_attribute(&e, "start")?;
                let duration = numeric_attribute(&e, "dur")?;
                open = Some((reader.buffer_position() as usize, start, duration));
            }
            Event::End(e) if e.name().as_ref() == b"text" => {
                if let Some((content_start, start, duration)) = open.take() {
                    let text = clean_caption_text(&xml[content_start..before]);
                    if !text.is_empty() {
                        fragments.push(TranscriptFragment {
                            text,
                            start,
                            duration,
                        });
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(fragments)
}

fn numeric_attribute(e: &quick_xml::events::BytesStart<'_>, name: &str) -> Result<f64> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|err| ExplainError::Transcript(format!("Malformed caption attribute: {}", err)))?;

    Ok(attr
        .and_then(|a| std::str::from_utf8(&a.value).ok()?.parse().ok())
        .unwrap_or(0.0))
}

/// Resolve entities (captions are escaped twice) and drop inline markup.
fn clean_caption_text(raw: &str) -> String {
    let once = unescape_lossy(raw);
    let twice = unescape_lossy(&once);
    TAG_REGEX.replace_all(&twice, "").trim().to_string()
}

fn unescape_lossy(text: &str) -> String {
    quick_xml::escape::unescape(text)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| text.to_string())
}
