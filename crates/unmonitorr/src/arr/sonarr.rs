//! Sonarr client.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;

use super::client::ArrClient;
use super::error::ArrError;
use super::{ArrService, SeriesGateway};
use crate::models::Series;

/// Body of `PUT /episode/monitor`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeMonitorRequest<'a> {
    episode_ids: &'a [i64],
    monitor: bool,
}

/// Client for Sonarr's series and episode endpoints.
#[derive(Debug, Clone)]
pub struct SonarrClient {
    inner: ArrClient,
}

impl SonarrClient {
    pub fn new(http: Client, uri: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            inner: ArrClient::new(http, ArrService::Sonarr, uri, api_key),
        }
    }
}

#[async_trait]
impl SeriesGateway for SonarrClient {
    fn disabled(&self) -> bool {
        self.inner.disabled()
    }

    async fn get_series(&self, id: i64) -> Result<Option<Series>, ArrError> {
        let path = format!("series/{id}");
        match self.inner.request(Method::GET, &path, &[]).await {
            Ok(value) => self.inner.decode(Method::GET, &path, value),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_series(
        &self,
        id: i64,
        add_import_list_exclusion: bool,
    ) -> Result<(), ArrError> {
        let exclusion = add_import_list_exclusion.to_string();
        let query = [
            ("deleteFiles", "false"),
            ("addImportListExclusion", exclusion.as_str()),
        ];
        self.inner
            .request(Method::DELETE, &format!("series/{id}"), &query)
            .await?;
        Ok(())
    }

    async fn update_series(&self, series: &Series) -> Result<(), ArrError> {
        self.inner
            .request_json(Method::PUT, &format!("series/{}", series.id), &[], series)
            .await?;
        Ok(())
    }

    async fn unmonitor_episodes(&self, episode_ids: &[i64]) -> Result<(), ArrError> {
        let body = EpisodeMonitorRequest {
            episode_ids,
            monitor: false,
        };
        self.inner
            .request_json(
                Method::PUT,
                "episode/monitor",
                &[("includeImages", "false")],
                &body,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arr::ErrorKind;
    use httpmock::prelude::*;
    use serde_json::{Value, json};

    fn series_json(monitored: bool) -> Value {
        json!({
            "id": 874,
            "title": "Agatha All Along",
            "status": "ended",
            "ended": true,
            "path": "/tv/Agatha All Along",
            "year": 2024,
            "monitored": monitored,
            "monitorNewItems": "all",
            "seasons": [
                { "seasonNumber": 1, "monitored": true, "statistics": { "percentOfEpisodes": 100.0, "episodeCount": 9 } }
            ],
            "statistics": { "percentOfEpisodes": 100.0, "episodeCount": 9, "sizeOnDisk": 4196630320_i64 },
            "tvdbId": 412429
        })
    }

    #[tokio::test]
    async fn test_get_series() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v3/series/874")
                    .header("x-api-key", "key");
                then.status(200).json_body(series_json(true));
            })
            .await;

        let client = SonarrClient::new(Client::new(), server.base_url(), "key");
        let series = client.get_series(874).await.unwrap().unwrap();

        mock.assert_async().await;
        assert!(series.is_ended());
        assert!(series.is_complete());
    }

    #[tokio::test]
    async fn test_get_series_not_found_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/series/1");
                then.status(404);
            })
            .await;

        let client = SonarrClient::new(Client::new(), server.base_url(), "key");
        assert!(client.get_series(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_series_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/v3/series/874")
                    .query_param("deleteFiles", "false")
                    .query_param("addImportListExclusion", "true");
                then.status(200);
            })
            .await;

        let client = SonarrClient::new(Client::new(), server.base_url(), "key");
        client.delete_series(874, true).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_series_puts_full_record() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/v3/series/874")
                    .json_body(series_json(false));
                then.status(202).json_body(series_json(false));
            })
            .await;

        let client = SonarrClient::new(Client::new(), server.base_url(), "key");
        let mut series: Series = serde_json::from_value(series_json(true)).unwrap();
        series.unmonitor();
        client.update_series(&series).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unmonitor_episodes_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/v3/episode/monitor")
                    .query_param("includeImages", "false")
                    .json_body(json!({ "episodeIds": [11, 12], "monitor": false }));
                then.status(202).json_body(json!([]));
            })
            .await;

        let client = SonarrClient::new(Client::new(), server.base_url(), "key");
        client.unmonitor_episodes(&[11, 12]).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_disabled_client() {
        let client = SonarrClient::new(Client::new(), "http://sonarr:8989", "");
        assert!(client.disabled());
        let err = client.get_series(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Disabled);
    }
}
