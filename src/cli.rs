// Command-line surface: one required `--action` plus a flat set of optional
// flags. `execute` is the whole pipeline after the credential is known.

use crate::action::Action;
use crate::api::Transport;
use crate::error::Result;
use crate::request::{build_request, Params};
use clap::Parser;
use serde_json::Value;

/// Command-line client for the ClickUp API.
#[derive(Debug, Parser)]
#[command(name = "clickup", version)]
pub struct CliArgs {
    /// Operation to perform.
    #[arg(long, value_enum)]
    pub action: Action,

    #[command(flatten)]
    pub params: Params,

    /// Print indented JSON instead of a single line.
    #[arg(long)]
    pub pretty: bool,

    /// Tracing filter for diagnostics on stderr, e.g. "debug". RUST_LOG wins if set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Build the request for `action` and perform it. Usage errors are raised
/// before `transport` is touched.
pub fn execute<T: Transport + ?Sized>(action: Action, params: &Params, transport: &T) -> Result<Value> {
    let request = build_request(action, params)?;
    transport.send(&request)
}

/// The whole invocation: build the request, then resolve the token, then
/// connect and send. A usage error therefore wins over a missing token, and
/// neither `resolve_token` nor `connect` runs when the flags are incomplete.
pub fn run<T, R, C>(args: &CliArgs, resolve_token: R, connect: C) -> Result<String>
where
    T: Transport,
    R: FnOnce() -> Result<String>,
    C: FnOnce(&str) -> Result<T>,
{
    let request = build_request(args.action, &args.params)?;
    let token = resolve_token()?;
    let transport = connect(&token)?;
    let value = transport.send(&request)?;
    render(&value, args.pretty)
}

/// Render a result for stdout. Empty arrays, zero, false and null are
/// printed like anything else.
pub fn render(value: &Value, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_and_pretty_rendering() {
        let value = json!({"id": "abc"});
        assert_eq!(render(&value, false).unwrap(), r#"{"id":"abc"}"#);
        assert_eq!(render(&value, true).unwrap(), "{\n  \"id\": \"abc\"\n}");
    }

    #[test]
    fn empty_results_are_still_rendered() {
        assert_eq!(render(&json!([]), false).unwrap(), "[]");
        assert_eq!(render(&json!(0), false).unwrap(), "0");
        assert_eq!(render(&Value::Null, true).unwrap(), "null");
    }

    #[test]
    fn action_flag_is_required() {
        assert!(CliArgs::try_parse_from(["clickup"]).is_err());
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(CliArgs::try_parse_from(["clickup", "--action", "get-everything"]).is_err());
    }

    #[test]
    fn flags_are_parsed() {
        let args = CliArgs::try_parse_from([
            "clickup",
            "--action",
            "get-tasks",
            "--list-id",
            "l1",
            "--archived",
            "true",
            "--page",
            "3",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(args.action, Action::GetTasks);
        assert_eq!(args.params.list_id.as_deref(), Some("l1"));
        assert_eq!(args.params.archived, Some(true));
        assert_eq!(args.params.page, Some(3));
        assert!(args.pretty);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn bare_boolean_filters_mean_true() {
        let args = CliArgs::try_parse_from([
            "clickup", "--action", "get-tasks", "--list-id", "l1", "--archived", "--subtasks",
            "false", "--include-closed",
        ])
        .unwrap();
        assert_eq!(args.params.archived, Some(true));
        assert_eq!(args.params.subtasks, Some(false));
        assert_eq!(args.params.include_closed, Some(true));
    }

    #[test]
    fn bare_filter_before_another_flag() {
        let args = CliArgs::try_parse_from([
            "clickup", "--action", "get-tasks", "--archived", "--list-id", "l1",
        ])
        .unwrap();
        assert_eq!(args.params.archived, Some(true));
        assert_eq!(args.params.list_id.as_deref(), Some("l1"));
    }

    #[test]
    fn comment_flag_and_alias() {
        let args = CliArgs::try_parse_from([
            "clickup", "--action", "create-comment", "--task-id", "k", "--comment", "hi",
        ])
        .unwrap();
        assert_eq!(args.params.comment_text.as_deref(), Some("hi"));

        let args = CliArgs::try_parse_from([
            "clickup", "--action", "create-comment", "--task-id", "k", "--comment-text", "yo",
        ])
        .unwrap();
        assert_eq!(args.params.comment_text.as_deref(), Some("yo"));
    }

    #[test]
    fn priority_out_of_range_is_rejected() {
        let res = CliArgs::try_parse_from([
            "clickup", "--action", "update-task", "--task-id", "t1", "--priority", "7",
        ]);
        assert!(res.is_err());
    }
}
