//! Push credential strategies.
//!
//! A strategy is picked once when the versioned backend is built and then
//! answers every credential request for that backend's pushes.

use git2::{Cred, CredentialType, ErrorClass, ErrorCode, RemoteCallbacks};
use std::fmt;

use crate::config::types::CredentialSettings;
use crate::errors::ConfigError;

const FALLBACK_USERNAME: &str = "git";

#[derive(Clone, PartialEq)]
pub enum CredentialStrategy {
    /// Identity held by the running ssh-agent.
    SshAgent { username: Option<String> },
    /// Plaintext username/token pair, as used by HTTPS remotes.
    Token { username: String, token: String },
}

impl fmt::Debug for CredentialStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialStrategy::SshAgent { username } => f
                .debug_struct("SshAgent")
                .field("username", username)
                .finish(),
            CredentialStrategy::Token { username, .. } => f
                .debug_struct("Token")
                .field("username", username)
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

impl CredentialStrategy {
    /// Build the strategy from settings, reading a token from the process
    /// environment when the token strategy is selected.
    pub fn from_settings(settings: &CredentialSettings) -> Result<Self, ConfigError> {
        Self::from_settings_with(settings, |name| std::env::var(name).ok())
    }

    /// Build the strategy from settings with an explicit variable lookup.
    pub fn from_settings_with<F>(settings: &CredentialSettings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match settings.strategy() {
            "ssh-agent" => Ok(CredentialStrategy::SshAgent {
                username: settings.username.clone(),
            }),
            "token" => {
                let env_name = settings.token_env();
                let token = lookup(env_name)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| ConfigError::InvalidConfiguration {
                        message: format!(
                            "Token credentials selected but environment variable '{}' is not set",
                            env_name
                        ),
                    })?;
                Ok(CredentialStrategy::Token {
                    username: settings
                        .username
                        .clone()
                        .unwrap_or_else(|| FALLBACK_USERNAME.to_string()),
                    token,
                })
            }
            other => Err(ConfigError::InvalidConfiguration {
                message: format!("Invalid credential strategy '{}'", other),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CredentialStrategy::SshAgent { .. } => "ssh-agent",
            CredentialStrategy::Token { .. } => "token",
        }
    }

    /// The credential type this strategy answers with for a request.
    fn kind_for(&self, allowed: CredentialType) -> Option<CredentialType> {
        match self {
            CredentialStrategy::SshAgent { .. } => {
                if allowed.contains(CredentialType::USERNAME) {
                    Some(CredentialType::USERNAME)
                } else if allowed.contains(CredentialType::SSH_KEY) {
                    Some(CredentialType::SSH_KEY)
                } else {
                    None
                }
            }
            CredentialStrategy::Token { .. } => allowed
                .contains(CredentialType::USER_PASS_PLAINTEXT)
                .then_some(CredentialType::USER_PASS_PLAINTEXT),
        }
    }

    fn credential(
        &self,
        kind: CredentialType,
        username_from_url: Option<&str>,
    ) -> Result<Cred, git2::Error> {
        match self {
            CredentialStrategy::SshAgent { username } => {
                let user = username
                    .as_deref()
                    .or(username_from_url)
                    .unwrap_or(FALLBACK_USERNAME);
                if kind == CredentialType::USERNAME {
                    Cred::username(user)
                } else {
                    Cred::ssh_key_from_agent(user)
                }
            }
            CredentialStrategy::Token { username, token } => {
                Cred::userpass_plaintext(username, token)
            }
        }
    }

    /// Answer one credential request, recording the offered type in
    /// `tried`. A type already in `tried` was rejected by the remote and
    /// fails with an authentication error.
    fn answer(
        &self,
        tried: &mut CredentialType,
        allowed: CredentialType,
        username_from_url: Option<&str>,
    ) -> Result<Cred, git2::Error> {
        let kind = self.kind_for(allowed).ok_or_else(|| {
            git2::Error::new(
                ErrorCode::Auth,
                ErrorClass::Net,
                format!(
                    "remote does not accept {} credentials (allowed: {:?})",
                    self.name(),
                    allowed
                ),
            )
        })?;

        if tried.contains(kind) {
            return Err(git2::Error::new(
                ErrorCode::Auth,
                ErrorClass::Net,
                format!("{} credentials were rejected by the remote", self.name()),
            ));
        }
        *tried |= kind;

        self.credential(kind, username_from_url)
    }

    /// Remote callbacks answering credential requests with this strategy.
    ///
    /// Each credential type is offered once; a repeated request is reported
    /// as an authentication error instead of looping.
    pub fn remote_callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let mut tried = CredentialType::empty();

        callbacks.credentials(move |_url, username_from_url, allowed| {
            self.answer(&mut tried, allowed, username_from_url)
        });

        callbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(strategy: &str) -> CredentialSettings {
        CredentialSettings {
            strategy: Some(strategy.to_string()),
            username: None,
            token_env: Some("TEST_HIERAGIT_TOKEN".to_string()),
        }
    }

    #[test]
    fn test_ssh_agent_from_settings() {
        let strategy = CredentialStrategy::from_settings_with(&settings("ssh-agent"), |_| None)
            .unwrap();
        assert_eq!(strategy, CredentialStrategy::SshAgent { username: None });
        assert_eq!(strategy.name(), "ssh-agent");
    }

    #[test]
    fn test_token_from_settings_reads_lookup() {
        let strategy = CredentialStrategy::from_settings_with(&settings("token"), |name| {
            (name == "TEST_HIERAGIT_TOKEN").then(|| "s3cret".to_string())
        })
        .unwrap();
        assert_eq!(
            strategy,
            CredentialStrategy::Token {
                username: "git".to_string(),
                token: "s3cret".to_string(),
            }
        );
    }

    #[test]
    fn test_token_missing_env_is_error() {
        let err = CredentialStrategy::from_settings_with(&settings("token"), |_| None)
            .unwrap_err();
        assert!(err.to_string().contains("TEST_HIERAGIT_TOKEN"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let strategy = CredentialStrategy::Token {
            username: "deploy".to_string(),
            token: "s3cret".to_string(),
        };
        let debug = format!("{:?}", strategy);
        assert!(debug.contains("deploy"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_kind_for_matches_strategy() {
        let ssh = CredentialStrategy::SshAgent { username: None };
        assert_eq!(
            ssh.kind_for(CredentialType::SSH_KEY | CredentialType::USER_PASS_PLAINTEXT),
            Some(CredentialType::SSH_KEY)
        );
        assert_eq!(ssh.kind_for(CredentialType::USER_PASS_PLAINTEXT), None);

        let token = CredentialStrategy::Token {
            username: "git".to_string(),
            token: "t".to_string(),
        };
        assert_eq!(
            token.kind_for(CredentialType::USER_PASS_PLAINTEXT),
            Some(CredentialType::USER_PASS_PLAINTEXT)
        );
        assert_eq!(token.kind_for(CredentialType::SSH_KEY), None);
    }

    #[test]
    fn test_repeated_request_fails_with_auth() {
        let strategy = CredentialStrategy::SshAgent {
            username: Some("deploy".to_string()),
        };
        let mut tried = CredentialType::empty();

        assert!(
            strategy
                .answer(&mut tried, CredentialType::USERNAME, None)
                .is_ok()
        );

        let err = strategy
            .answer(&mut tried, CredentialType::USERNAME, None)
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::Auth);
        assert!(err.message().contains("rejected"));
    }

    #[test]
    fn test_token_offered_once() {
        let strategy = CredentialStrategy::Token {
            username: "git".to_string(),
            token: "s3cret".to_string(),
        };
        let mut tried = CredentialType::empty();

        assert!(
            strategy
                .answer(&mut tried, CredentialType::USER_PASS_PLAINTEXT, None)
                .is_ok()
        );
        assert!(tried.contains(CredentialType::USER_PASS_PLAINTEXT));

        let err = strategy
            .answer(&mut tried, CredentialType::USER_PASS_PLAINTEXT, None)
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::Auth);
    }

    #[test]
    fn test_unsupported_credential_type_fails_with_auth() {
        let strategy = CredentialStrategy::Token {
            username: "git".to_string(),
            token: "s3cret".to_string(),
        };
        let mut tried = CredentialType::empty();

        let err = strategy
            .answer(&mut tried, CredentialType::SSH_KEY, None)
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::Auth);
        assert!(tried.is_empty());
    }
}
