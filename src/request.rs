// Request construction: turns an action plus the flags the user supplied
// into a method, a concrete path, query pairs and an optional JSON body.
// Everything here is pure so it can be checked without touching the network.

use crate::action::{placeholders, Action};
use crate::error::{Error, Result};
use clap::Args;
use reqwest::Method;
use serde_json::{Map, Value};

/// Every optional input an action may draw from. Which of them are
/// required depends on the action.
#[derive(Debug, Default, Clone, Args)]
pub struct Params {
    /// Workspace (team) ID.
    #[arg(long)]
    pub team_id: Option<String>,
    #[arg(long)]
    pub space_id: Option<String>,
    #[arg(long)]
    pub folder_id: Option<String>,
    #[arg(long)]
    pub list_id: Option<String>,
    #[arg(long)]
    pub task_id: Option<String>,
    #[arg(long)]
    pub webhook_id: Option<String>,

    /// Task name.
    #[arg(long)]
    pub name: Option<String>,
    /// Task description.
    #[arg(long)]
    pub description: Option<String>,
    /// Task status, e.g. "in progress".
    #[arg(long)]
    pub status: Option<String>,
    /// Task priority: 1 urgent, 2 high, 3 normal, 4 low.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub priority: Option<u8>,
    /// Due date as a Unix timestamp in milliseconds.
    #[arg(long)]
    pub due_date: Option<i64>,
    /// Comma-separated user IDs, e.g. "123,456".
    #[arg(long)]
    pub assignees: Option<String>,
    /// Comma-separated tag names.
    #[arg(long)]
    pub tags: Option<String>,

    /// Range start for time entries, Unix milliseconds.
    #[arg(long)]
    pub start_date: Option<i64>,
    /// Range end for time entries, Unix milliseconds.
    #[arg(long)]
    pub end_date: Option<i64>,

    /// Comment body.
    #[arg(long = "comment", visible_alias = "comment-text")]
    pub comment_text: Option<String>,
    /// Notify everyone on the task about the new comment.
    #[arg(long)]
    pub notify_all: Option<bool>,

    /// Webhook callback URL.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Comma-separated webhook event names, e.g. "taskCreated,taskUpdated".
    #[arg(long)]
    pub events: Option<String>,

    /// Include archived items. A bare flag means `true`.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub archived: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub subtasks: Option<bool>,
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub include_closed: Option<bool>,
    /// Page number (0-based) for task listing.
    #[arg(long)]
    pub page: Option<u32>,
}

impl Params {
    /// Identifier for a path placeholder. Blank values count as absent.
    fn id(&self, placeholder: &str) -> Option<&str> {
        let value = match placeholder {
            "team_id" => self.team_id.as_deref(),
            "space_id" => self.space_id.as_deref(),
            "folder_id" => self.folder_id.as_deref(),
            "list_id" => self.list_id.as_deref(),
            "task_id" => self.task_id.as_deref(),
            "webhook_id" => self.webhook_id.as_deref(),
            _ => None,
        };
        non_blank(value)
    }
}

/// A fully resolved call, minus the base URL and credential.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `key=value` pairs joined by `&`, in declared order; empty if no
    /// filters were given.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.query.is_empty() {
            format!("{}{}", base, self.path)
        } else {
            format!("{}{}?{}", base, self.path, self.query_string())
        }
    }
}

/// Build the request for `action`, failing with a usage error before any
/// network activity if a required input is missing.
pub fn build_request(action: Action, params: &Params) -> Result<ApiRequest> {
    let (method, template) = select_route(action, params)?;
    let path = fill_path(action, template, params)?;
    let query = query_pairs(action, params);
    let body = request_body(action, params)?;
    tracing::debug!(%action, %method, %path, "built request");
    Ok(ApiRequest {
        method,
        path,
        query,
        body,
    })
}

/// The primary route unless its identifiers are missing and a fallback's
/// are all present.
fn select_route(action: Action, params: &Params) -> Result<(Method, &'static str)> {
    let primary = action.route();
    let Some(fallback) = action.fallback_route() else {
        return Ok(primary);
    };
    let satisfied = |template: &str| placeholders(template).iter().all(|p| params.id(p).is_some());
    if satisfied(primary.1) {
        Ok(primary)
    } else if satisfied(fallback.1) {
        Ok(fallback)
    } else {
        let flags: Vec<String> = placeholders(primary.1)
            .into_iter()
            .chain(placeholders(fallback.1))
            .map(flag_name)
            .collect();
        Err(missing(action, &flags.join(" or ")))
    }
}

fn fill_path(action: Action, template: &str, params: &Params) -> Result<String> {
    let mut path = template.to_string();
    for placeholder in placeholders(template) {
        let value = params
            .id(placeholder)
            .ok_or_else(|| missing(action, &flag_name(placeholder)))?;
        path = path.replace(&format!("{{{}}}", placeholder), value);
    }
    Ok(path)
}

fn query_pairs(action: Action, params: &Params) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    match action {
        Action::GetSpaces | Action::GetFolders | Action::GetLists => {
            push(&mut pairs, "archived", params.archived);
        }
        Action::GetTasks => {
            push(&mut pairs, "archived", params.archived);
            push(&mut pairs, "page", params.page);
            push(&mut pairs, "subtasks", params.subtasks);
            push(&mut pairs, "include_closed", params.include_closed);
        }
        Action::GetTimeEntries => {
            push(&mut pairs, "start_date", params.start_date);
            push(&mut pairs, "end_date", params.end_date);
            push(&mut pairs, "task_id", non_blank(params.task_id.as_deref()));
        }
        _ => {}
    }
    pairs
}

fn push<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}

fn request_body(action: Action, params: &Params) -> Result<Option<Value>> {
    let mut body = Map::new();
    match action {
        Action::CreateTask => {
            let name = required(action, "--name", params.name.as_deref())?;
            body.insert("name".into(), name.into());
            insert_task_fields(&mut body, params, false);
            if let Some(raw) = non_blank(params.assignees.as_deref()) {
                body.insert("assignees".into(), parse_ids(raw)?.into());
            }
            if let Some(raw) = non_blank(params.tags.as_deref()) {
                body.insert("tags".into(), split_list(raw).into());
            }
        }
        Action::UpdateTask => {
            insert_task_fields(&mut body, params, true);
            if body.is_empty() {
                return Err(Error::usage(
                    "update-task needs at least one of --name, --description, --status, --priority or --due-date",
                ));
            }
        }
        Action::CreateComment => {
            let text = required(action, "--comment", params.comment_text.as_deref())?;
            body.insert("comment_text".into(), text.into());
            if let Some(notify_all) = params.notify_all {
                body.insert("notify_all".into(), notify_all.into());
            }
        }
        Action::CreateWebhook => {
            let endpoint = required(action, "--endpoint", params.endpoint.as_deref())?;
            let events = split_list(required(action, "--events", params.events.as_deref())?);
            if events.is_empty() {
                return Err(missing(action, "--events"));
            }
            body.insert("endpoint".into(), endpoint.into());
            body.insert("events".into(), events.into());
        }
        _ => return Ok(None),
    }
    Ok(Some(Value::Object(body)))
}

fn insert_task_fields(body: &mut Map<String, Value>, params: &Params, with_name: bool) {
    if with_name {
        if let Some(name) = non_blank(params.name.as_deref()) {
            body.insert("name".into(), name.into());
        }
    }
    // An empty description is sent as-is so it can be cleared.
    if let Some(description) = &params.description {
        body.insert("description".into(), description.as_str().into());
    }
    if let Some(status) = non_blank(params.status.as_deref()) {
        body.insert("status".into(), status.into());
    }
    if let Some(priority) = params.priority {
        body.insert("priority".into(), priority.into());
    }
    if let Some(due_date) = params.due_date {
        body.insert("due_date".into(), due_date.into());
    }
}

/// Split a comma-separated flag into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Comma-separated user IDs as integers.
pub fn parse_ids(raw: &str) -> Result<Vec<i64>> {
    split_list(raw)
        .iter()
        .map(|item| {
            item.parse::<i64>()
                .map_err(|_| Error::usage(format!("--assignees expects integer user IDs, got {:?}", item)))
        })
        .collect()
}

fn required<'a>(action: Action, flag: &str, value: Option<&'a str>) -> Result<&'a str> {
    non_blank(value).ok_or_else(|| missing(action, flag))
}

fn missing(action: Action, flag: &str) -> Error {
    Error::usage(format!("{} is required for --action {}", flag, action))
}

fn flag_name(placeholder: &str) -> String {
    format!("--{}", placeholder.replace('_', "-"))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
