use serde::Serialize;
use serde_json::Value;

use crate::config::Locale;

/// Why a non-JSON upstream response was most likely produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NonJsonCause {
    /// HTML page or a login/auth URL: the script is not deployed publicly.
    LikelyAuthRedirect,
    Other,
}

impl NonJsonCause {
    /// User-facing explanation, present only when the cause is recognised.
    pub fn hint(self, locale: Locale) -> Option<&'static str> {
        match (self, locale) {
            (NonJsonCause::Other, _) => None,
            (NonJsonCause::LikelyAuthRedirect, Locale::Ja) => Some(
                "GASのWebアプリが公開デプロイされていないか、認証が必要になっている可能性があります。\
                 デプロイ設定でアクセスできるユーザーを「全員」にして再デプロイしてください。",
            ),
            (NonJsonCause::LikelyAuthRedirect, Locale::En) => Some(
                "The Apps Script web app is probably not deployed publicly or requires sign-in. \
                 Redeploy it with access set to \"Anyone\".",
            ),
        }
    }
}

/// Result of one relay attempt. Built per request and dropped once the
/// response has been written.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    /// Upstream answered 2xx with a JSON body.
    Success(Value),
    /// Upstream answered outside the 2xx range.
    UpstreamError { status: u16, body: String },
    /// Upstream answered 2xx but not with JSON.
    NonJsonResponse {
        content_type: String,
        body: String,
        final_url: String,
        cause: NonJsonCause,
    },
    /// No upstream URL is configured.
    ConfigError,
    /// The request could not be completed or its body could not be read.
    TransportError(String),
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayOutcome::Success(_))
    }

    /// Short machine-readable name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayOutcome::Success(_) => "success",
            RelayOutcome::UpstreamError { .. } => "upstream_non_success",
            RelayOutcome::NonJsonResponse { .. } => "upstream_non_json",
            RelayOutcome::ConfigError => "missing_config",
            RelayOutcome::TransportError(_) => "transport_failure",
        }
    }
}
