use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::config::Config;
use crate::database::record_store::{RecordStore, StoreError};
use crate::error::{Error, Result};
use crate::models::application::{Application, NewApplication};
use crate::models::document::Document;
use crate::models::draft::FileAttachment;

/// Record store backed by a Supabase project: PostgREST for rows and the
/// storage API for files.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: Url, api_key: String, client: Client) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Supabase URL cannot be used as a base: {}",
                base_url
            )));
        }
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.store_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        tracing::info!("Record store: {}", config.supabase_url);
        Self::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            client,
        )
    }

    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn rest_url(&self, table: &str) -> Url {
        self.url(["rest", "v1", table])
    }

    fn object_url(&self, bucket: &str, path: &str) -> Url {
        self.url(
            ["storage", "v1", "object", bucket]
                .into_iter()
                .chain(path.split('/').filter(|s| !s.is_empty())),
        )
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn insert_returning<T, R>(&self, table: &str, row: &T) -> std::result::Result<R, StoreError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let resp = self
            .authorized(self.client.post(self.rest_url(table)))
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;
        let body = read_success(resp).await?;
        let mut rows: Vec<R> = serde_json::from_str(&body)?;
        if rows.is_empty() {
            return Err(StoreError::EmptyResponse);
        }
        Ok(rows.swap_remove(0))
    }

    async fn insert<T: Serialize>(&self, table: &str, row: &T) -> std::result::Result<(), StoreError> {
        let resp = self
            .authorized(self.client.post(self.rest_url(table)))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        read_success(resp).await?;
        Ok(())
    }
}

async fn read_success(resp: Response) -> std::result::Result<String, StoreError> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    if status.is_success() {
        return Ok(body);
    }

    // PostgREST and storage both answer errors with a JSON object carrying `message`.
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn insert_application(
        &self,
        row: &NewApplication,
    ) -> std::result::Result<Application, StoreError> {
        self.insert_returning(NewApplication::TABLE, row).await
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        file: &FileAttachment,
    ) -> std::result::Result<(), StoreError> {
        tracing::debug!(bucket, path, size = file.size(), "Uploading object");
        let resp = self
            .authorized(self.client.post(self.object_url(bucket, path)))
            .header(header::CONTENT_TYPE, file.content_type.as_str())
            .header("x-upsert", "false")
            .body(file.bytes.clone())
            .send()
            .await?;
        read_success(resp).await?;
        Ok(())
    }

    async fn insert_document(&self, row: &Document) -> std::result::Result<(), StoreError> {
        self.insert(Document::TABLE, row).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str) -> SupabaseStore {
        SupabaseStore::new(Url::parse(base).unwrap(), "anon".into(), Client::new()).unwrap()
    }

    #[test]
    fn builds_rest_and_storage_urls() {
        let s = store("https://project.supabase.co");
        assert_eq!(
            s.rest_url("applications").as_str(),
            "https://project.supabase.co/rest/v1/applications"
        );
        assert_eq!(
            s.object_url("applications", "A1/resume/My CV.pdf").as_str(),
            "https://project.supabase.co/storage/v1/object/applications/A1/resume/My%20CV.pdf"
        );
    }

    #[test]
    fn keeps_a_base_path_prefix() {
        let s = store("http://localhost:54321/proxy/");
        assert_eq!(
            s.rest_url("documents").as_str(),
            "http://localhost:54321/proxy/rest/v1/documents"
        );
    }

    #[test]
    fn rejects_non_base_urls() {
        let url = Url::parse("mailto:hr@consulnigeria.ae").unwrap();
        assert!(SupabaseStore::new(url, "anon".into(), Client::new()).is_err());
    }
}
