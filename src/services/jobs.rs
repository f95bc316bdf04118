use crate::config::JobsSettings;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when triggering a maintenance job
#[derive(Debug, Error)]
pub enum JobsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// The maintenance jobs the admin surface can trigger. The core never
/// waits on these; they are opaque collaborators reached over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobName {
    /// Pull churches from the map data source and upsert into the directory
    ImportDirectory,
    /// Re-crawl church websites and refresh the cached site summaries
    RefreshSites,
    /// AI enrichment of structured fields from the cached summaries
    Enrich,
}

impl JobName {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "import" => Some(JobName::ImportDirectory),
            "refresh-sites" => Some(JobName::RefreshSites),
            "enrich" => Some(JobName::Enrich),
            _ => None,
        }
    }

    /// The collaborator's endpoint name for this job.
    pub fn endpoint(&self) -> &'static str {
        match self {
            JobName::ImportDirectory => "import-centre-county-churches",
            JobName::RefreshSites => "refresh-church-sites",
            JobName::Enrich => "enrich-churches",
        }
    }
}

/// Outcome of a job trigger: the collaborator's status and result body,
/// passed through to the admin caller verbatim.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Client for the job collaborators. Shares the platform's auth
/// convention: the caller's bearer token, plus the shared admin key
/// header when one is configured.
pub struct JobsClient {
    base_url: String,
    admin_key: Option<String>,
    client: Client,
}

impl JobsClient {
    pub fn new(base_url: String, admin_key: Option<String>) -> Self {
        // Jobs crawl external sites and can take a while
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            admin_key,
            client,
        }
    }

    pub fn from_settings(settings: &JobsSettings) -> Self {
        Self::new(settings.base_url.clone(), settings.admin_key.clone())
    }

    /// Trigger a job and pass its JSON result through.
    pub async fn run(
        &self,
        job: JobName,
        bearer_token: Option<&str>,
    ) -> Result<JobOutcome, JobsError> {
        let url = format!(
            "{}/functions/v1/{}",
            self.base_url.trim_end_matches('/'),
            job.endpoint()
        );

        tracing::info!("Triggering job {} at {}", job.endpoint(), url);

        // Body stays an empty object for consistent JSON parsing downstream
        let mut builder = self.client.post(&url).json(&serde_json::json!({}));
        if let Some(token) = bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(key) = &self.admin_key {
            builder = builder.header("x-admin-import-key", key);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            serde_json::json!({ "ok": status < 400 })
        } else {
            serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::json!({ "error": text }))
        };

        Ok(JobOutcome { status, body })
    }
}
