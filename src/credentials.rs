// Credential lookup: the API token comes from the environment or, for local
// developer use, a plaintext key=value file under the user's home.
// Nothing is ever written back.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable (and fallback file key) holding the API token.
pub const TOKEN_ENV_VAR: &str = "CLICKUP_API_TOKEN";

/// Location of the fallback env file, `~/.claude/.env`.
pub fn fallback_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(".claude").join(".env")
}

/// Resolve the token for this invocation from the real environment and the
/// default fallback file.
pub fn resolve_token() -> Result<String> {
    let env_value = std::env::var(TOKEN_ENV_VAR).ok();
    resolve_token_from(env_value, &fallback_path())
}

/// The environment value wins whenever it is non-empty; the file is only
/// read when it is not.
pub fn resolve_token_from(env_value: Option<String>, fallback: &Path) -> Result<String> {
    if let Some(token) = env_value.map(|v| v.trim().to_string()) {
        if !token.is_empty() {
            tracing::debug!("using token from {}", TOKEN_ENV_VAR);
            return Ok(token);
        }
    }

    match std::fs::read_to_string(fallback) {
        Ok(data) => {
            if let Some(token) = parse_token_file(&data) {
                tracing::debug!("using token from {}", fallback.display());
                return Ok(token);
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    Err(Error::MissingCredential(fallback.display().to_string()))
}

/// Find the first `CLICKUP_API_TOKEN=...` line and return its unquoted value.
pub fn parse_token_file(data: &str) -> Option<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            (key.trim() == TOKEN_ENV_VAR).then(|| strip_quotes(value.trim()).to_string())
        })
        .find(|token| !token.is_empty())
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
