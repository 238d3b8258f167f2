use clickup_cli::credentials::{fallback_path, resolve_token, TOKEN_ENV_VAR};
use clickup_cli::Error;
use serial_test::serial;
use std::fs;

// -- Helper --
/// Point HOME at a fresh directory, optionally with a credentials file.
fn fake_home(file_contents: Option<&str>) -> tempfile::TempDir {
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("HOME", home.path());
    if let Some(contents) = file_contents {
        let path = fallback_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    home
}

#[test]
#[serial]
fn env_var_is_preferred_over_file() {
    let _home = fake_home(Some("CLICKUP_API_TOKEN=\"pk_file\"\n"));
    std::env::set_var(TOKEN_ENV_VAR, "pk_env");
    assert_eq!(resolve_token().unwrap(), "pk_env");
    std::env::remove_var(TOKEN_ENV_VAR);
}

#[test]
#[serial]
fn file_is_used_without_env_var() {
    let home = fake_home(Some("CLICKUP_API_TOKEN=\"pk_file\"\n"));
    std::env::remove_var(TOKEN_ENV_VAR);
    assert_eq!(fallback_path(), home.path().join(".claude").join(".env"));
    assert_eq!(resolve_token().unwrap(), "pk_file");
}

#[test]
#[serial]
fn nothing_configured_is_fatal() {
    let _home = fake_home(None);
    std::env::remove_var(TOKEN_ENV_VAR);
    let err = resolve_token().unwrap_err();
    assert!(matches!(err, Error::MissingCredential(_)));
    assert_eq!(err.exit_code(), 1);
}
