//! The closed set of actions and their fixed routes on the ClickUp v2 API.

use clap::ValueEnum;
use reqwest::Method;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    GetWorkspaces,
    GetSpaces,
    GetFolders,
    GetLists,
    GetTasks,
    GetTask,
    CreateTask,
    UpdateTask,
    DeleteTask,
    GetTimeEntries,
    GetGoals,
    GetComments,
    CreateComment,
    GetCustomFields,
    GetWebhooks,
    CreateWebhook,
    DeleteWebhook,
}

impl Action {
    /// HTTP method and path template. Placeholders are `{param}` names that
    /// match the identifier flags (`{team_id}` is filled from `--team-id`).
    pub fn route(self) -> (Method, &'static str) {
        match self {
            Action::GetWorkspaces => (Method::GET, "/team"),
            Action::GetSpaces => (Method::GET, "/team/{team_id}/space"),
            Action::GetFolders => (Method::GET, "/space/{space_id}/folder"),
            Action::GetLists => (Method::GET, "/folder/{folder_id}/list"),
            Action::GetTasks => (Method::GET, "/list/{list_id}/task"),
            Action::GetTask => (Method::GET, "/task/{task_id}"),
            Action::CreateTask => (Method::POST, "/list/{list_id}/task"),
            Action::UpdateTask => (Method::PUT, "/task/{task_id}"),
            Action::DeleteTask => (Method::DELETE, "/task/{task_id}"),
            Action::GetTimeEntries => (Method::GET, "/team/{team_id}/time_entries"),
            Action::GetGoals => (Method::GET, "/team/{team_id}/goal"),
            Action::GetComments => (Method::GET, "/task/{task_id}/comment"),
            Action::CreateComment => (Method::POST, "/task/{task_id}/comment"),
            Action::GetCustomFields => (Method::GET, "/list/{list_id}/field"),
            Action::GetWebhooks => (Method::GET, "/team/{team_id}/webhook"),
            Action::CreateWebhook => (Method::POST, "/team/{team_id}/webhook"),
            Action::DeleteWebhook => (Method::DELETE, "/webhook/{webhook_id}"),
        }
    }

    /// Route used when the identifiers for [`Action::route`] are missing.
    /// Only lists have one: folderless lists hang directly off a space.
    pub fn fallback_route(self) -> Option<(Method, &'static str)> {
        match self {
            Action::GetLists => Some((Method::GET, "/space/{space_id}/list")),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}

/// Placeholder names appearing in a path template, in order.
pub fn placeholders(template: &str) -> Vec<&str> {
    template
        .split('{')
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(name, _)| name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_clap() {
        for action in Action::value_variants() {
            let parsed = Action::from_str(&action.to_string(), false).unwrap();
            assert_eq!(parsed, *action);
        }
        assert_eq!(Action::GetTimeEntries.to_string(), "get-time-entries");
    }

    #[test]
    fn placeholders_are_extracted_in_order() {
        assert_eq!(placeholders("/team"), Vec::<&str>::new());
        assert_eq!(placeholders("/team/{team_id}/space"), vec!["team_id"]);
        assert_eq!(placeholders("/a/{x}/b/{y}"), vec!["x", "y"]);
    }

    #[test]
    fn mutating_actions_use_mutating_methods() {
        assert_eq!(Action::CreateTask.route().0, Method::POST);
        assert_eq!(Action::UpdateTask.route().0, Method::PUT);
        assert_eq!(Action::DeleteWebhook.route().0, Method::DELETE);
    }

    #[test]
    fn only_lists_have_a_fallback() {
        let with_fallback: Vec<_> = Action::value_variants()
            .iter()
            .filter(|a| a.fallback_route().is_some())
            .collect();
        assert_eq!(with_fallback, vec![&Action::GetLists]);
    }
}
