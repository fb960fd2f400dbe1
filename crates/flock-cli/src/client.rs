//! Async HTTP client wrapping the Flock RPC surface.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use flock_access::wire::{
  CategoryInformation, ClusterInformation, ContactInformation, PersonDetails,
  PersonInformation, PersonList, ProfileInformation, ProfileList, ProfileMembers,
  ProtocolVersion, SmallGroupInformation, VersionSupport,
};
use flock_core::{access::Identity, store::PersonQuery};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// The protocol version this client speaks.
pub const CLIENT_VERSION: ProtocolVersion = ProtocolVersion { major: 0, minor: 1 };

/// Connection settings for a Flock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the Flock RPC surface.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/rpc{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  async fn read<T: DeserializeOwned>(
    &self,
    what: &str,
    resp: reqwest::Response,
  ) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(anyhow!("{what} → {status}: {body}"));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising response to {what}"))
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let what = format!("GET {path}");
    let resp = self
      .auth(self.client.get(self.url(path)))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    self.read(&what, resp).await
  }

  // ── Version ───────────────────────────────────────────────────────────────

  /// `GET /rpc/version`
  pub async fn protocol_version(&self) -> Result<ProtocolVersion> {
    self.get("/version").await
  }

  /// `GET /rpc/version/supported`
  pub async fn is_supported(&self, version: ProtocolVersion) -> Result<bool> {
    let resp = self
      .client
      .get(self.url("/version/supported"))
      .query(&[("major", version.major), ("minor", version.minor)])
      .send()
      .await
      .context("GET /version/supported failed")?;
    let support: VersionSupport = self.read("GET /version/supported", resp).await?;
    Ok(support.supported)
  }

  // ── People ────────────────────────────────────────────────────────────────

  /// `GET /rpc/me`
  pub async fn me(&self) -> Result<Identity> { self.get("/me").await }

  /// `POST /rpc/people/find`
  pub async fn find_people(&self, query: &PersonQuery) -> Result<PersonList> {
    let resp = self
      .auth(self.client.post(self.url("/people/find")))
      .json(query)
      .send()
      .await
      .context("POST /people/find failed")?;
    self.read("POST /people/find", resp).await
  }

  pub async fn person(&self, id: i64) -> Result<PersonInformation> {
    self.get(&format!("/people/{id}")).await
  }

  pub async fn person_details(&self, id: i64) -> Result<PersonDetails> {
    self.get(&format!("/people/{id}/details")).await
  }

  pub async fn person_contact(&self, id: i64) -> Result<ContactInformation> {
    self.get(&format!("/people/{id}/contact")).await
  }

  pub async fn person_profiles(
    &self,
    id: i64,
    profile_type: Option<i32>,
  ) -> Result<ProfileList> {
    match profile_type {
      Some(t) => self.get(&format!("/people/{id}/profiles?profile_type={t}")).await,
      None => self.get(&format!("/people/{id}/profiles")).await,
    }
  }

  // ── Profiles and groups ───────────────────────────────────────────────────

  pub async fn profile(&self, id: i64) -> Result<ProfileInformation> {
    self.get(&format!("/profiles/{id}")).await
  }

  pub async fn profile_members(&self, id: i64) -> Result<ProfileMembers> {
    self.get(&format!("/profiles/{id}/members")).await
  }

  pub async fn small_group(&self, id: i64) -> Result<SmallGroupInformation> {
    self.get(&format!("/groups/{id}")).await
  }

  pub async fn cluster(&self, id: i64) -> Result<ClusterInformation> {
    self.get(&format!("/clusters/{id}")).await
  }

  pub async fn category(&self, id: i64) -> Result<CategoryInformation> {
    self.get(&format!("/categories/{id}")).await
  }
}
