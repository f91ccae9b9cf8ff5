//! Closed taxonomy of user-facing failure kinds.

use api_client::ApiError;

/// Route of the login page, used by the re-authentication call to action.
pub const LOGIN_ROUTE: &str = "/auth/discord";

/// User-facing failure classification.
///
/// Derived from a transport response (or a provider error query value),
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Request never reached the server.
    NetworkUnreachable,
    /// HTTP 401 — the bearer token is missing or no longer valid.
    Unauthorized,
    /// Structured backend error with a machine-readable code.
    Api { code: String },
    /// Error code supplied by the OAuth provider redirect.
    Provider { code: String },
    /// Anything else.
    Unknown { raw: String },
}

/// Map a transport failure into a [`FailureKind`].
///
/// Evaluated in precedence order: no-network signal, then 401, then a
/// structured backend error body, then the raw fallback. Total by
/// construction — this is the last line of failure handling and must never
/// panic.
pub fn classify(err: &ApiError) -> FailureKind {
    match err {
        ApiError::Network(_) => FailureKind::NetworkUnreachable,
        ApiError::Status { status: 401, .. } => FailureKind::Unauthorized,
        ApiError::Status {
            error_message: Some(code),
            ..
        } => FailureKind::Api { code: code.clone() },
        ApiError::Status {
            status,
            error_message: None,
        } => FailureKind::Unknown {
            raw: format!("HTTP {status}"),
        },
        ApiError::Decode(e) => FailureKind::Unknown { raw: e.to_string() },
    }
}

/// Classify an error value returned by the OAuth provider redirect,
/// e.g. `access_denied` when the user declined the authorization prompt.
pub fn classify_provider(code: &str) -> FailureKind {
    FailureKind::Provider {
        code: code.to_string(),
    }
}

impl FailureKind {
    /// Localized, user-facing message for this failure.
    ///
    /// Known backend codes map to fixed translations; unknown codes pass the
    /// raw code through so support tickets stay actionable.
    pub fn message(&self) -> String {
        match self {
            FailureKind::NetworkUnreachable => "Błąd połączenia z serwerem.".to_string(),
            FailureKind::Unauthorized => {
                "Nie masz dostępu do tej strony będąc niezalogowanym!".to_string()
            }
            FailureKind::Api { code } => match code.as_str() {
                "invalid code" => "Nieprawidłowy kod".to_string(),
                "missing email" => "Nie uzyskano dostępu do e-mail. Przypisz e-mail do konta \
                                    discord, zweryfikuj go i spróbuj ponownie."
                    .to_string(),
                other => other.to_string(),
            },
            FailureKind::Provider { code } => {
                format!("Dostawca logowania zwrócił błąd: {code}")
            }
            FailureKind::Unknown { raw } => format!("Wystąpił nieznany błąd: {raw}"),
        }
    }

    /// Whether re-authenticating is the fix for this failure.
    pub fn needs_login(&self) -> bool {
        matches!(self, FailureKind::Unauthorized)
    }
}
