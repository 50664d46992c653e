//! Notification envelopes sent by the arr webhook connection.
//!
//! Neither service sends a discriminator, so the envelope is told apart by its
//! shape alone: a movie notification carries `movie`, a series notification
//! carries `series` and `episodes`. Unknown fields are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Movie as it appears inside a Radarr notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMovie {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub folder_path: String,
}

impl fmt::Display for WebhookMovie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, year={}, path={}",
            self.id, self.title, self.year, self.folder_path
        )
    }
}

/// A Radarr notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieWebhook {
    pub event_type: String,
    pub instance_name: String,
    pub application_url: String,
    pub movie: WebhookMovie,
}

/// Series as it appears inside a Sonarr notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSeries {
    pub id: i64,
    pub title: String,
    pub path: String,
    pub year: i32,
}

impl fmt::Display for WebhookSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, year={}, path={}",
            self.id, self.title, self.year, self.path
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEpisode {
    pub id: i64,
    pub episode_number: i32,
    pub season_number: i32,
    pub title: String,
    pub series_id: i64,
}

/// A Sonarr notification. `episodes` keeps the order Sonarr sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesWebhook {
    pub event_type: String,
    pub instance_name: String,
    pub application_url: String,
    pub series: WebhookSeries,
    pub episodes: Vec<WebhookEpisode>,
}

impl SeriesWebhook {
    /// Episode ids to send to the bulk unmonitor endpoint.
    pub fn episode_ids(&self) -> Vec<i64> {
        self.episodes.iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movie_webhook_from_camel_case() {
        let payload = json!({
            "eventType": "Download",
            "instanceName": "Radarr",
            "applicationUrl": "",
            "movie": {
                "id": 2936,
                "title": "Bill Burr: I'm Sorry You Feel That Way",
                "year": 2014,
                "folderPath": "/media/Comedy/Bill Burr - I'm Sorry You Feel That Way (2014)",
                "tmdbId": 308571
            },
            "isUpgrade": false
        });

        let webhook: MovieWebhook = serde_json::from_value(payload).unwrap();
        assert_eq!(webhook.event_type, "Download");
        assert_eq!(webhook.movie.id, 2936);
        assert_eq!(webhook.movie.year, 2014);
        assert!(webhook.movie.folder_path.ends_with("(2014)"));
    }

    #[test]
    fn test_series_webhook_keeps_episode_order() {
        let payload = json!({
            "eventType": "Download",
            "instanceName": "Sonarr",
            "applicationUrl": "http://sonarr.local",
            "series": { "id": 874, "title": "Agatha All Along", "path": "/tv/Agatha", "year": 2024 },
            "episodes": [
                { "id": 30, "episodeNumber": 3, "seasonNumber": 1, "title": "C", "seriesId": 874 },
                { "id": 10, "episodeNumber": 1, "seasonNumber": 1, "title": "A", "seriesId": 874 },
                { "id": 20, "episodeNumber": 2, "seasonNumber": 1, "title": "B", "seriesId": 874 }
            ]
        });

        let webhook: SeriesWebhook = serde_json::from_value(payload).unwrap();
        assert_eq!(webhook.episode_ids(), vec![30, 10, 20]);
        assert_eq!(webhook.episodes[0].series_id, 874);
    }

    #[test]
    fn test_movie_webhook_missing_field_fails() {
        let payload = json!({
            "eventType": "Download",
            "instanceName": "Radarr",
            "applicationUrl": "",
            "movie": { "id": 1, "title": "No Year", "folderPath": "/m" }
        });

        assert!(serde_json::from_value::<MovieWebhook>(payload).is_err());
    }

    #[test]
    fn test_display() {
        let movie = WebhookMovie {
            id: 7,
            title: "Heat".to_string(),
            year: 1995,
            folder_path: "/movies/Heat (1995)".to_string(),
        };
        assert_eq!(
            movie.to_string(),
            "id=7, title=Heat, year=1995, path=/movies/Heat (1995)"
        );
    }
}
