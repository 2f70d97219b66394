/// YouTube Data API provider
///
/// Single operation: resolve a video id to display metadata via the
/// /videos endpoint (`part=snippet,contentDetails`).
use crate::{
    error::{AppError, AppResult},
    models::VideoMetadata,
    services::providers::VideoPlatform,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Clone)]
pub struct YoutubeClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl YoutubeClient {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
        }
    }
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: Snippet,
    #[serde(rename = "contentDetails")]
    content_details: ContentDetails,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(rename = "channelTitle", default)]
    channel_title: Option<String>,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    #[serde(default)]
    high: Option<Thumbnail>,
    #[serde(default)]
    default: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

/// Parses an ISO-8601 duration of the form `PT#H#M#S` into seconds.
///
/// The platform only emits the time designators, so date components are not
/// handled. Unparseable input yields 0 rather than an error.
fn parse_iso8601_duration(duration: &str) -> u64 {
    let Some(rest) = duration.strip_prefix("PT") else {
        return 0;
    };

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let value: u64 = digits.parse().unwrap_or(0);
        digits.clear();
        match ch {
            'H' => total += value * 3600,
            'M' => total += value * 60,
            'S' => total += value,
            _ => return 0,
        }
    }

    total
}

#[async_trait::async_trait]
impl VideoPlatform for YoutubeClient {
    async fn metadata(&self, video_id: &str) -> AppResult<VideoMetadata> {
        let url = format!("{}/videos", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Video platform returned status {}: {}",
                status, body
            )));
        }

        let videos: VideosResponse = response.json().await?;

        let item = videos
            .items
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No video found for id {}", video_id)))?;

        let thumbnail = item
            .snippet
            .thumbnails
            .high
            .or(item.snippet.thumbnails.default)
            .map(|t| t.url);

        let metadata = VideoMetadata {
            title: item.snippet.title,
            thumbnail,
            duration_seconds: parse_iso8601_duration(&item.content_details.duration),
            channel_title: item.snippet.channel_title,
        };

        tracing::info!(
            video_id = %video_id,
            duration_seconds = metadata.duration_seconds,
            provider = "youtube",
            "Video metadata fetched"
        );

        Ok(metadata)
    }
}
