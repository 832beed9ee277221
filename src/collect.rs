//! Interactive collection of operator identity and authentication inputs
//!
//! Prompts pre-fill from what the machine already knows (git global config,
//! the shell profile, the process environment) so a re-run only asks for what
//! is genuinely missing. Nothing is written here; reconciliation happens in
//! the configuration step.

use inquire::Text;

use crate::error::{DevprepError, Result};
use crate::merge;
use crate::probe::SystemProfile;
use crate::vcs::GitConfig;

/// Environment variable holding the access token; when set, the token prompt
/// is skipped entirely
pub const TOKEN_VAR: &str = "REPO_AUTH_TOKEN";

/// Operator-supplied configuration; `None` fields change nothing downstream
#[derive(Debug, Clone, Default)]
pub struct OperatorConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
}

pub fn collect(profile: &SystemProfile) -> Result<OperatorConfig> {
    let mut git_config = GitConfig::open_global()?;

    let name = prompt_with_current("Full name", git_config.get("user.name"))?;
    let email = prompt_with_current("Email address", git_config.get("user.email"))?;
    let token = resolve_token(profile)?;

    Ok(OperatorConfig { name, email, token })
}

/// Token precedence: process environment wins outright, then the profile's
/// stored export line becomes the prompt default, then a bare prompt.
fn resolve_token(profile: &SystemProfile) -> Result<Option<String>> {
    if let Some(token) = env_token() {
        println!("Using access token from ${TOKEN_VAR}.");
        tracing::info!("token taken from environment, prompt skipped");
        return Ok(Some(token));
    }
    let stored = merge::read_profile_export(&profile.profile_path, TOKEN_VAR)?;
    prompt_with_current("Access token", stored)
}

/// Non-empty value of the reserved token variable, if any
fn env_token() -> Option<String> {
    std::env::var(TOKEN_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn prompt_with_current(label: &str, current: Option<String>) -> Result<Option<String>> {
    let mut prompt = Text::new(label);
    if let Some(cur) = current.as_deref() {
        prompt = prompt.with_initial_value(cur);
    }
    let answer = prompt.prompt().map_err(|e| DevprepError::PromptFailed {
        label: label.to_string(),
        reason: e.to_string(),
    })?;
    Ok(resolve_answer(&answer, current))
}

/// Empty operator input keeps the current value; anything else replaces it
fn resolve_answer(answer: &str, current: Option<String>) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        current
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_resolve_answer_empty_keeps_current() {
        assert_eq!(
            resolve_answer("", Some("Jane".to_string())),
            Some("Jane".to_string())
        );
        assert_eq!(resolve_answer("   ", None), None);
    }

    #[test]
    fn test_resolve_answer_input_replaces_current() {
        assert_eq!(
            resolve_answer("June", Some("Jane".to_string())),
            Some("June".to_string())
        );
        assert_eq!(
            resolve_answer("  June  ", None),
            Some("June".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_env_token_present() {
        unsafe { std::env::set_var(TOKEN_VAR, "tok-from-env") };
        assert_eq!(env_token(), Some("tok-from-env".to_string()));
        unsafe { std::env::remove_var(TOKEN_VAR) };
    }

    #[test]
    #[serial]
    fn test_env_token_empty_counts_as_absent() {
        unsafe { std::env::set_var(TOKEN_VAR, "") };
        assert_eq!(env_token(), None);
        unsafe { std::env::set_var(TOKEN_VAR, "   ") };
        assert_eq!(env_token(), None);
        unsafe { std::env::remove_var(TOKEN_VAR) };
    }

    #[test]
    #[serial]
    fn test_env_token_absent() {
        unsafe { std::env::remove_var(TOKEN_VAR) };
        assert_eq!(env_token(), None);
    }
}
