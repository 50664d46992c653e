//! Radarr client.

use async_trait::async_trait;
use reqwest::{Client, Method};

use super::client::ArrClient;
use super::error::ArrError;
use super::{ArrService, MovieGateway};
use crate::models::Movie;

/// Client for Radarr's movie endpoints.
#[derive(Debug, Clone)]
pub struct RadarrClient {
    inner: ArrClient,
}

impl RadarrClient {
    pub fn new(http: Client, uri: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            inner: ArrClient::new(http, ArrService::Radarr, uri, api_key),
        }
    }
}

#[async_trait]
impl MovieGateway for RadarrClient {
    fn disabled(&self) -> bool {
        self.inner.disabled()
    }

    async fn get_movie(&self, id: i64) -> Result<Option<Movie>, ArrError> {
        let path = format!("movie/{id}");
        match self.inner.request(Method::GET, &path, &[]).await {
            Ok(value) => self.inner.decode(Method::GET, &path, value),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete_movie(&self, id: i64) -> Result<(), ArrError> {
        self.inner
            .request(Method::DELETE, &format!("movie/{id}"), &[])
            .await?;
        Ok(())
    }

    async fn update_movie(&self, movie: &Movie) -> Result<(), ArrError> {
        self.inner
            .request_json(Method::PUT, &format!("movie/{}", movie.id), &[], movie)
            .await?;
        Ok(())
    }
}
