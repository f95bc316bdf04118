use crate::config::DirectorySettings;
use crate::models::{Church, CreateChurchRequest, UpdateChurchRequest};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the directory datastore
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Directory API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the managed datastore holding the church directory.
///
/// Speaks the datastore's REST interface and keeps a small in-process
/// cache over directory reads; the list changes rarely (admin edits and
/// the periodic import job), so a short TTL keeps match requests from
/// hammering the store.
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    client: Client,
    cache: moka::future::Cache<String, Vec<Church>>,
    region_location: String,
}

impl DirectoryClient {
    pub fn new(
        base_url: String,
        api_key: String,
        cache_size: u64,
        cache_ttl_secs: u64,
        region_location: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let cache = moka::future::CacheBuilder::new(cache_size)
            .time_to_live(Duration::from_secs(cache_ttl_secs))
            .build();

        Self {
            base_url,
            api_key,
            client,
            cache,
            region_location,
        }
    }

    pub fn from_settings(settings: &DirectorySettings) -> Self {
        Self::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            settings.cache_size.unwrap_or(64),
            settings.cache_ttl_secs.unwrap_or(300),
            settings.region_location.clone(),
        )
    }

    fn churches_url(&self) -> String {
        format!(
            "{}/rest/v1/churches",
            self.base_url.trim_end_matches('/')
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// List all churches, optionally filtered by location. The configured
    /// region-wide location value means "no filter". Results are cached.
    pub async fn list_churches(
        &self,
        location: Option<&str>,
    ) -> Result<Vec<Church>, DirectoryError> {
        let filter = location
            .map(str::trim)
            .filter(|l| !l.is_empty() && *l != self.region_location);

        let cache_key = format!("churches:{}", filter.unwrap_or("all"));
        if let Some(hit) = self.cache.get(&cache_key).await {
            tracing::trace!("Directory cache hit: {}", cache_key);
            return Ok(hit);
        }

        let mut url = format!("{}?select=*&order=name", self.churches_url());
        if let Some(loc) = filter {
            url.push_str(&format!("&location=eq.{}", urlencoding::encode(loc)));
        }

        tracing::debug!("Fetching churches from: {}", url);

        let response = self.request(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to list churches: {}",
                response.status()
            )));
        }

        let churches: Vec<Church> = response.json().await?;

        self.cache.insert(cache_key, churches.clone()).await;

        Ok(churches)
    }

    /// Fetch a single church by id
    pub async fn get_church(&self, id: &str) -> Result<Church, DirectoryError> {
        let url = format!(
            "{}?select=*&id=eq.{}",
            self.churches_url(),
            urlencoding::encode(id)
        );

        let response = self.request(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch church: {}",
                response.status()
            )));
        }

        let mut churches: Vec<Church> = response.json().await?;
        if churches.is_empty() {
            return Err(DirectoryError::NotFound(format!("Church {} not found", id)));
        }
        Ok(churches.remove(0))
    }

    /// Insert a new church (admin surface)
    pub async fn create_church(
        &self,
        request: &CreateChurchRequest,
    ) -> Result<Church, DirectoryError> {
        let now = chrono::Utc::now();
        let row = Church {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            denomination: request.denomination.clone(),
            size: request.size,
            location: request.location.clone(),
            address: request.address.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            phone: request.phone.clone(),
            website: request.website.clone(),
            description: request.description.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let response = self
            .request(self.client.post(&self.churches_url()))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to create church: {}",
                response.status()
            )));
        }

        let mut created: Vec<Church> = response.json().await?;
        let church = if created.is_empty() {
            row
        } else {
            created.remove(0)
        };

        self.cache.invalidate_all();

        tracing::info!("Created church {} ({})", church.name, church.id);

        Ok(church)
    }

    /// Apply a partial update to a church (admin surface)
    pub async fn update_church(
        &self,
        id: &str,
        updates: &UpdateChurchRequest,
    ) -> Result<Church, DirectoryError> {
        let url = format!("{}?id=eq.{}", self.churches_url(), urlencoding::encode(id));

        let response = self
            .request(self.client.patch(&url))
            .header("Prefer", "return=representation")
            .json(updates)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to update church: {}",
                response.status()
            )));
        }

        let mut updated: Vec<Church> = response.json().await?;
        if updated.is_empty() {
            return Err(DirectoryError::NotFound(format!("Church {} not found", id)));
        }

        self.cache.invalidate_all();

        Ok(updated.remove(0))
    }

    /// Delete a church (admin surface)
    pub async fn delete_church(&self, id: &str) -> Result<(), DirectoryError> {
        let url = format!("{}?id=eq.{}", self.churches_url(), urlencoding::encode(id));

        let response = self.request(self.client.delete(&url)).send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to delete church: {}",
                response.status()
            )));
        }

        self.cache.invalidate_all();

        tracing::info!("Deleted church {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_client_creation() {
        let client = DirectoryClient::new(
            "https://directory.test".to_string(),
            "service_key".to_string(),
            64,
            300,
            "Centre County".to_string(),
        );

        assert_eq!(client.base_url, "https://directory.test");
        assert_eq!(client.churches_url(), "https://directory.test/rest/v1/churches");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = DirectoryClient::new(
            "https://directory.test/".to_string(),
            "service_key".to_string(),
            64,
            300,
            "Centre County".to_string(),
        );

        assert_eq!(client.churches_url(), "https://directory.test/rest/v1/churches");
    }
}
