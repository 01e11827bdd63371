use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::cache::TokenRegistry;
use crate::captcha::verifier::ChallengeVerifier;
use crate::error::{AppError, ChallengeReason};

/// 验证结果
#[derive(Debug, Clone, Serialize)]
pub struct VerificationOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 会话签发结果
#[derive(Debug, Clone, Serialize)]
pub struct SessionIssue {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 会话准入判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Granted,
    ChallengeRequired {
        reason: ChallengeReason,
        served_count: Option<u64>,
    },
}

impl Admission {
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Admission::Granted => Ok(()),
            Admission::ChallengeRequired {
                reason,
                served_count,
            } => Err(AppError::ChallengeRequired {
                reason,
                vehicle_count: served_count,
            }),
        }
    }
}

/// 防滥用闸门
///
/// 统计自上次验证以来下发的车辆记录数，达到阈值后要求重新完成人机验证。
/// 未配置验证服务时功能关闭，所有会话直接放行。
pub struct AbuseGate {
    tokens: TokenRegistry,
    served: AtomicU64,
    threshold: u64,
    verifier: Option<Arc<dyn ChallengeVerifier>>,
}

impl AbuseGate {
    pub fn new(threshold: u64, verifier: Option<Arc<dyn ChallengeVerifier>>) -> Self {
        Self::with_registry(TokenRegistry::new(), threshold, verifier)
    }

    pub fn disabled() -> Self {
        Self::new(u64::MAX, None)
    }

    pub fn with_registry(
        tokens: TokenRegistry,
        threshold: u64,
        verifier: Option<Arc<dyn ChallengeVerifier>>,
    ) -> Self {
        Self {
            tokens,
            served: AtomicU64::new(0),
            threshold,
            verifier,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.verifier.is_some()
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn issue_token(&self) -> String {
        self.tokens.issue()
    }

    pub fn validate_token(&self, token: Option<&str>) -> bool {
        self.tokens.validate(token)
    }

    pub fn invalidate_token(&self, token: &str) {
        self.tokens.invalidate(token);
    }

    /// 累加下发记录数，返回新的总数
    pub fn record_served(&self, count: usize) -> u64 {
        self.served.fetch_add(count as u64, Ordering::SeqCst) + count as u64
    }

    pub fn served_count(&self) -> u64 {
        self.served.load(Ordering::SeqCst)
    }

    pub fn threshold_crossed(&self) -> bool {
        self.is_enabled() && self.served_count() >= self.threshold
    }

    pub fn reset_counter(&self) {
        self.served.store(0, Ordering::SeqCst);
        tracing::info!("Cap verified, counter reset");
    }

    /// 向验证服务核验，服务异常按验证失败处理
    pub async fn verify_with_provider(&self, token: &str) -> VerificationOutcome {
        let Some(verifier) = &self.verifier else {
            return VerificationOutcome {
                success: true,
                message: Some("Cap not enabled".to_string()),
                error: None,
            };
        };

        match verifier.verify(token).await {
            Ok(true) => {
                self.reset_counter();
                VerificationOutcome {
                    success: true,
                    message: None,
                    error: None,
                }
            }
            Ok(false) => {
                tracing::info!("Cap verification rejected");
                VerificationOutcome {
                    success: false,
                    message: Some("Verification failed".to_string()),
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("Cap verification failed: {}", e);
                VerificationOutcome {
                    success: false,
                    message: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// 会话准入：无效令牌要求验证；用量超限时作废令牌并要求重新验证
    pub fn admit_session(&self, session_token: Option<&str>) -> Admission {
        if !self.is_enabled() {
            return Admission::Granted;
        }

        if !self.validate_token(session_token) {
            return Admission::ChallengeRequired {
                reason: ChallengeReason::Session,
                served_count: None,
            };
        }

        if self.threshold_crossed() {
            if let Some(token) = session_token {
                self.invalidate_token(token);
            }
            return Admission::ChallengeRequired {
                reason: ChallengeReason::Usage,
                served_count: Some(self.served_count()),
            };
        }

        Admission::Granted
    }

    /// 验证通过后签发会话令牌
    pub async fn issue_session(&self, verification_token: &str) -> SessionIssue {
        let outcome = self.verify_with_provider(verification_token).await;
        if outcome.success {
            SessionIssue {
                success: true,
                session_token: Some(self.issue_token()),
                message: None,
                error: None,
            }
        } else {
            SessionIssue {
                success: false,
                session_token: None,
                message: outcome.message,
                error: outcome.error,
            }
        }
    }
}
