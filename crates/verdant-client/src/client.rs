//! Verdant API client implementation

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use verdant_core::{Section, SectionId};
use verdant_editor::{UploadFile, Uploader};
use verdant_storage::{SectionStore, UploadedFile};

use crate::{Error, Result};

/// One row of the section listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionSummary {
    /// Section id.
    pub id: String,
    /// Schema title.
    pub title: String,
    /// Whether the section has been written.
    pub configured: bool,
}

#[derive(Deserialize)]
struct SectionList {
    sections: Vec<SectionSummary>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Deserialize)]
struct UploadList {
    files: Vec<UploadedFile>,
}

#[derive(Deserialize)]
struct SeedResponse {
    #[serde(default)]
    seeded: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a running Verdant server.
///
/// Implements [`SectionStore`], so a [`SectionEditor`](verdant_editor::SectionEditor)
/// can edit a remote site, and [`Uploader`], so image fields upload through
/// `/api/upload`.
#[derive(Debug, Clone)]
pub struct SiteClient {
    base_url: String,
    http: reqwest::Client,
}

impl SiteClient {
    /// Create a client for the server at `base_url` (`http://host:port`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// Server root the client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------------

    /// Every known section and whether it has content.
    pub async fn list_sections(&self) -> Result<Vec<SectionSummary>> {
        let list: SectionList = self.json(self.request(Method::GET, "/api/sections")).await?;
        Ok(list.sections)
    }

    /// Read one section. `None` means it has never been written.
    pub async fn get_section(&self, id: &SectionId) -> Result<Option<Section>> {
        let endpoint = format!("/api/sections/{id}");
        let value: Value = self.json(self.request(Method::GET, &endpoint)).await?;
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => Ok(Some(Section::from(map))),
            other => Err(Error::unexpected(
                endpoint,
                format!("expected an object or null, got {other}"),
            )),
        }
    }

    /// Replace one section.
    pub async fn put_section(&self, id: &SectionId, section: &Section) -> Result<()> {
        let endpoint = format!("/api/sections/{id}");
        let _: Value = self
            .json(self.request(Method::PUT, &endpoint).json(section))
            .await?;
        Ok(())
    }

    /// Write default content for every section. Returns the seeded ids.
    pub async fn seed(&self) -> Result<Vec<String>> {
        let response: SeedResponse = self.json(self.request(Method::POST, "/api/seed")).await?;
        Ok(response.seeded)
    }

    // ------------------------------------------------------------------------
    // Uploads
    // ------------------------------------------------------------------------

    /// Upload an image, returning its public URL.
    pub async fn upload_image(&self, file: UploadFile) -> Result<String> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);
        let response: UploadResponse = self
            .json(self.request(Method::POST, "/api/upload").multipart(form))
            .await?;
        Ok(response.url)
    }

    /// Every stored upload, newest first.
    pub async fn list_uploads(&self) -> Result<Vec<UploadedFile>> {
        let list: UploadList = self.json(self.request(Method::GET, "/api/upload")).await?;
        Ok(list.files)
    }

    /// Delete an upload by its public URL.
    pub async fn delete_upload(&self, url: &str) -> Result<()> {
        let _: Value = self
            .json(self.request(Method::DELETE, "/api/upload").json(&json!({ "url": url })))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// Every slice of a resource, keyed by slice name.
    pub async fn get_resource(&self, resource: &str) -> Result<Map<String, Value>> {
        self.json(self.request(Method::GET, &format!("/api/{resource}")))
            .await
    }

    /// Replace the given slices of a resource.
    pub async fn put_resource(&self, resource: &str, slices: &Map<String, Value>) -> Result<()> {
        let _: Value = self
            .json(self.request(Method::PUT, &format!("/api/{resource}")).json(slices))
            .await?;
        Ok(())
    }

    /// Write a resource's default slices.
    pub async fn seed_resource(&self, resource: &str) -> Result<()> {
        let _: Value = self
            .json(
                self.request(Method::POST, &format!("/api/{resource}"))
                    .json(&json!({ "action": "seed" })),
            )
            .await?;
        Ok(())
    }

    /// Create one entity, returning it as stored (with slug and order).
    pub async fn create_entity(&self, resource: &str, entity: &Value) -> Result<Value> {
        self.json(self.request(Method::POST, &format!("/api/{resource}")).json(entity))
            .await
    }

    /// Replace one entity by slug.
    pub async fn update_entity(&self, resource: &str, slug: &str, entity: &Value) -> Result<Value> {
        self.json(
            self.request(Method::PUT, &format!("/api/{resource}/{slug}"))
                .json(entity),
        )
        .await
    }

    /// Delete one entity by slug.
    pub async fn delete_entity(&self, resource: &str, slug: &str) -> Result<()> {
        let _: Value = self
            .json(self.request(Method::DELETE, &format!("/api/{resource}/{slug}")))
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------------

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{endpoint}", self.base_url))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let response = check(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turn a non-success response into [`Error::Api`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    tracing::debug!(status = status.as_u16(), "API request failed: {message}");
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SectionStore for SiteClient {
    async fn fetch(&self, id: &SectionId) -> verdant_storage::Result<Option<Section>> {
        Ok(self.get_section(id).await?)
    }

    async fn store(&self, id: &SectionId, section: Section) -> verdant_storage::Result<()> {
        Ok(self.put_section(id, &section).await?)
    }

    async fn list_ids(&self) -> verdant_storage::Result<Vec<SectionId>> {
        let sections = self.list_sections().await?;
        sections
            .into_iter()
            .filter(|s| s.configured)
            .map(|s| SectionId::new(s.id).map_err(verdant_storage::Error::from))
            .collect()
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

#[async_trait]
impl Uploader for SiteClient {
    async fn upload(&self, file: UploadFile) -> verdant_editor::Result<String> {
        Ok(self.upload_image(file).await?)
    }
}
