use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

/// 验证服务请求超时
pub const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// 外部人机验证服务
pub trait ChallengeVerifier: Send + Sync {
    /// 校验前端提交的验证结果，返回服务端判定
    fn verify<'a>(&'a self, response: &'a str) -> BoxFuture<'a, Result<bool, VerifyError>>;
}

#[derive(Serialize)]
struct SiteVerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
}

/// Cap 验证服务客户端
#[derive(Clone)]
pub struct CapVerifier {
    client: Client,
    verify_url: String,
    secret: String,
}

impl CapVerifier {
    pub fn new(cap_url: &str, key_id: &str, secret: &str) -> Result<Self, VerifyError> {
        let client = Client::builder().timeout(VERIFY_TIMEOUT).build()?;
        Ok(Self {
            client,
            verify_url: format!("{}/{}/siteverify", cap_url.trim_end_matches('/'), key_id),
            secret: secret.to_string(),
        })
    }

    pub fn verify_url(&self) -> &str {
        &self.verify_url
    }

    async fn site_verify(&self, response: &str) -> Result<bool, VerifyError> {
        let reply: SiteVerifyResponse = self
            .client
            .post(&self.verify_url)
            .json(&SiteVerifyRequest {
                secret: &self.secret,
                response,
            })
            .send()
            .await?
            .json()
            .await?;
        Ok(reply.success)
    }
}

impl ChallengeVerifier for CapVerifier {
    fn verify<'a>(&'a self, response: &'a str) -> BoxFuture<'a, Result<bool, VerifyError>> {
        Box::pin(self.site_verify(response))
    }
}
