//! Metadata service client
//!
//! Fetches crowd-sourced segments for a video. Fetch failures of any kind
//! (network, status, malformed body) degrade to an empty segment list after
//! a warning log; nothing on the playback path ever sees an error from here.
//! Submission and voting endpoints are intentionally not implemented.

use bsb_common::config::ApiOptions;
use bsb_common::segment::WireSegment;
use bsb_common::{Error, Result, Segment};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "bsb/0.1.0";

/// Diagnostic record returned by the segment-info endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentInfo {
    #[serde(rename = "UUID")]
    pub uuid: String,
    #[serde(rename = "videoID")]
    pub video_id: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: Option<f64>,
    #[serde(rename = "endTime")]
    pub end_time: Option<f64>,
    pub category: Option<String>,
    pub votes: Option<i64>,
    pub views: Option<i64>,
}

/// Client for the segment metadata service
pub struct MetadataClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    /// Create a client from API options
    pub fn new(options: &ApiOptions) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the segment list for a video
    ///
    /// Returns an empty list on any failure; the tracker treats that the
    /// same as "no segments for this video".
    pub async fn fetch_segments(&self, video_id: &str, cid: Option<&str>) -> Vec<Segment> {
        let url = format!("{}/skipSegments", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![("videoID", video_id)];
        if let Some(cid) = cid {
            query.push(("cid", cid));
        }

        tracing::debug!(video_id = %video_id, url = %url, "fetching skip segments");

        let response = match self.http_client.get(&url).query(&query).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "segment fetch failed");
                return Vec::new();
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // The service answers 404 when it has no segments for the video
            tracing::debug!(video_id = %video_id, "no segments recorded for video");
            return Vec::new();
        }
        if !status.is_success() {
            tracing::warn!(video_id = %video_id, status = status.as_u16(), "segment fetch rejected");
            return Vec::new();
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "segment fetch body unreadable");
                return Vec::new();
            }
        };

        let segments = parse_segments(&body);
        tracing::info!(video_id = %video_id, count = segments.len(), "segments loaded");
        segments
    }

    /// Look up one segment's diagnostic record by id
    ///
    /// Unlike [`MetadataClient::fetch_segments`] this is a diagnostic API off
    /// the playback path, so errors are returned to the caller.
    pub async fn segment_info(&self, uuid: &str) -> Result<SegmentInfo> {
        let url = format!("{}/segmentInfo", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("UUID", uuid)])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("segment {}", uuid)));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Api(status.as_u16(), text));
        }

        let records: Vec<SegmentInfo> = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        first_record(records, uuid)
    }
}

/// Pick the first record from a `/segmentInfo` response list
///
/// The service answers a list even for a single-id query; an empty list means
/// the segment does not exist.
fn first_record(records: Vec<SegmentInfo>, uuid: &str) -> Result<SegmentInfo> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(format!("segment {}", uuid)))
}

/// Parse a `/skipSegments` response body, dropping malformed entries
fn parse_segments(body: &str) -> Vec<Segment> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(body) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(error = %e, "segment response is not a list");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<WireSegment>(value) {
            Ok(wire) => Some(Segment::from(wire)),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed segment entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsb_common::Category;

    #[test]
    fn test_client_creation() {
        let client = MetadataClient::new(&ApiOptions::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MetadataClient::new(&ApiOptions {
            base_url: "http://localhost:9000/api/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_parse_segments() {
        let body = r#"[
            {"UUID":"a","category":"sponsor","segment":[0.0,5.0]},
            {"UUID":"b","category":"intro","segment":[10.0,12.5]}
        ]"#;

        let segments = parse_segments(body);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].category, Category::Sponsor);
        assert_eq!(segments[1].range.end, 12.5);
    }

    #[test]
    fn test_parse_drops_malformed_entries_individually() {
        let body = r#"[
            {"UUID":"a","category":"sponsor","segment":[0.0,5.0]},
            {"UUID":"bad","category":"not_a_category","segment":[1.0,2.0]},
            {"category":"intro","segment":[10.0,12.5]}
        ]"#;

        let segments = parse_segments(body);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].id.as_str(), "a");
    }

    #[test]
    fn test_first_record_takes_head_of_list() {
        let records: Vec<SegmentInfo> = serde_json::from_str(
            r#"[
                {"UUID":"a","videoID":"BV1","startTime":1.0,"endTime":2.0,"category":"sponsor","votes":3,"views":10},
                {"UUID":"b"}
            ]"#,
        )
        .unwrap();

        let info = first_record(records, "a").unwrap();
        assert_eq!(info.uuid, "a");
        assert_eq!(info.votes, Some(3));
    }

    #[test]
    fn test_first_record_empty_list_is_not_found() {
        match first_record(Vec::new(), "missing") {
            Err(Error::NotFound(what)) => assert!(what.contains("missing")),
            other => panic!("expected NotFound, got {:?}", other.map(|i| i.uuid)),
        }
    }

    #[test]
    fn test_parse_non_list_body_is_empty() {
        assert!(parse_segments("{\"oops\":true}").is_empty());
        assert!(parse_segments("not json").is_empty());
    }
}
