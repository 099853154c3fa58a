//! Nexus REST API 클라이언트.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use tracing::info;

use crate::application::ports::NexusGateway;
use crate::domain::component::{ComponentPage, Repository};

use super::models::{ComponentPageXo, RepositoryXo};
use super::{Auth, ServerSettings};

pub struct NexusClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl NexusClient {
    /// 접속 설정으로 HTTP 클라이언트를 구성한다.
    pub fn build(settings: &ServerSettings) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(settings.timeout_secs));

        if let Some(proxy) = &settings.proxy {
            info!(host = %proxy.host, port = proxy.port, "configuring HTTP client with proxy");
            builder = builder.proxy(proxy.to_reqwest()?);
        }

        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            auth: settings.auth.clone(),
        })
    }

    fn rest_endpoint(&self, tail: &str) -> String {
        format!("{}/service/rest/v1/{}", self.base_url, tail)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("Accept", "application/json");

        match &self.auth {
            Auth::Token(token) => req.bearer_auth(token),
            Auth::Basic { username, password } => req.basic_auth(username, Some(password)),
            Auth::Anonymous => req,
        }
    }
}

#[async_trait]
impl NexusGateway for NexusClient {
    async fn list_repositories(&self) -> Result<Vec<Repository>> {
        let resp = self
            .request(Method::GET, self.rest_endpoint("repositories"))
            .send()
            .await
            .context("nexus: failed to fetch repository list")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("nexus: failed to read repository list body")?;
        if !status.is_success() {
            anyhow::bail!("nexus: failed to fetch repository list ({status}): {body}");
        }

        let repositories: Vec<RepositoryXo> =
            serde_json::from_str(&body).context("nexus: invalid repository list JSON")?;
        Ok(repositories
            .into_iter()
            .map(RepositoryXo::into_domain)
            .collect())
    }

    async fn fetch_component_page(
        &self,
        repository: &str,
        continuation_token: Option<&str>,
    ) -> Result<ComponentPage> {
        let mut req = self
            .request(Method::GET, self.rest_endpoint("components"))
            .query(&[("repository", repository)]);
        if let Some(token) = continuation_token {
            req = req.query(&[("continuationToken", token)]);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("nexus: failed to fetch components of {repository}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("nexus: failed to read components body")?;
        if !status.is_success() {
            anyhow::bail!("nexus: failed to fetch components of {repository} ({status}): {body}");
        }

        let page: ComponentPageXo =
            serde_json::from_str(&body).context("nexus: invalid components JSON")?;
        Ok(page.into_domain())
    }
}
