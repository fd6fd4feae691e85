use super::models::{
    Analysis, AnalysisMethod, AnalyzeRequest, GalleryListing, GalleryPayload, HealthStatus,
    PaletteId, Stats,
};
use super::PaletteApi;
use anyhow::Context;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
}

/// HTTP client for the palette service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PaletteClient {
    inner: Arc<Inner>,
}

impl PaletteClient {
    const USER_AGENT: &'static str = concat!("moodswatch/", env!("CARGO_PKG_VERSION"));

    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }
}

#[async_trait::async_trait]
impl PaletteApi for PaletteClient {
    async fn health(&self) -> anyhow::Result<HealthStatus> {
        let v: HealthStatus = self
            .inner
            .http
            .get(self.url("/health"))
            .send()
            .await
            .context("send health request")?
            .error_for_status()
            .context("health http status")?
            .json()
            .await
            .context("parse health json")?;
        Ok(v)
    }

    async fn analyze(&self, text: &str, method: AnalysisMethod) -> anyhow::Result<Analysis> {
        tracing::debug!(method = %method, len = text.len(), "POST /analyze");
        let v: Analysis = self
            .inner
            .http
            .post(self.url("/analyze"))
            .json(&AnalyzeRequest { text, method })
            .send()
            .await
            .context("send analyze request")?
            .error_for_status()
            .context("analyze http status")?
            .json()
            .await
            .context("parse analyze json")?;
        Ok(v)
    }

    async fn gallery(&self, limit: Option<u32>) -> anyhow::Result<GalleryListing> {
        let path = match limit {
            Some(limit) => format!("/gallery?limit={limit}"),
            None => "/gallery".to_string(),
        };
        let payload: GalleryPayload = self
            .inner
            .http
            .get(self.url(&path))
            .send()
            .await
            .context("send gallery request")?
            .error_for_status()
            .context("gallery http status")?
            .json()
            .await
            .context("parse gallery json")?;
        Ok(payload.into())
    }

    async fn delete_palette(&self, id: &PaletteId) -> anyhow::Result<()> {
        let path = format!("/palettes/{}", urlencoding::encode(id.as_str()));
        tracing::debug!(%id, "DELETE {path}");
        self.inner
            .http
            .delete(self.url(&path))
            .send()
            .await
            .context("send delete request")?
            .error_for_status()
            .with_context(|| format!("delete palette {id}"))?;
        Ok(())
    }

    async fn stats(&self) -> anyhow::Result<Stats> {
        let v: Stats = self
            .inner
            .http
            .get(self.url("/stats"))
            .send()
            .await
            .context("send stats request")?
            .error_for_status()
            .context("stats http status")?
            .json()
            .await
            .context("parse stats json")?;
        Ok(v)
    }
}
