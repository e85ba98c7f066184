use crate::protocol::{Action, ActionKind, RecordingState};

/// Default sensitive field names that should be masked in output.
const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "secret",
    "token",
    "cvv",
    "ssn",
    "card_number",
    "credit_card",
];

const MASK: &str = "••••••••";

/// Render the action log as a numbered list, one action per line.
///
/// e.g. `3. type input[name="q"] "hello"`
pub fn format_actions(actions: &[Action], sensitive_fields: &[String]) -> String {
    if actions.is_empty() {
        return "No actions recorded yet.".to_string();
    }

    actions
        .iter()
        .enumerate()
        .map(|(index, action)| format!("{}. {}", index + 1, format_action(action, sensitive_fields)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single action without its position.
pub fn format_action(action: &Action, sensitive_fields: &[String]) -> String {
    match &action.kind {
        ActionKind::Navigate => {
            format!("navigate to {:?}", action.value.as_deref().unwrap_or(""))
        }
        kind => {
            let mut line = kind.to_string();
            if let Some(selector) = &action.selector {
                line.push(' ');
                line.push_str(selector);
            }
            if let Some(value) = &action.value
                && !value.is_empty()
            {
                let field = action.selector.as_deref().unwrap_or("");
                line.push_str(&format!(" {:?}", mask_sensitive(value, field, sensitive_fields)));
            }
            line
        }
    }
}

pub fn format_status(state: RecordingState, action_count: usize, pending_inputs: usize) -> String {
    let mut output = match state {
        RecordingState::Active => "Recording...".to_string(),
        RecordingState::Idle => "Not recording".to_string(),
    };
    output.push_str(&format!(" ({} actions", action_count));
    if pending_inputs > 0 {
        output.push_str(&format!(", {} pending inputs", pending_inputs));
    }
    output.push(')');
    output
}

/// Mask `value` when `field_name` looks like it holds a credential.
pub fn mask_sensitive(value: &str, field_name: &str, sensitive_fields: &[String]) -> String {
    let lower_field = field_name.to_lowercase();

    let is_sensitive = sensitive_fields
        .iter()
        .any(|f| lower_field.contains(&f.to_lowercase()))
        || DEFAULT_SENSITIVE_FIELDS
            .iter()
            .any(|f| lower_field.contains(*f));

    if is_sensitive {
        MASK.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_actions_numbers_each_line() {
        let actions = vec![
            Action::navigate("https://example.com"),
            Action::click("#submit"),
            Action::type_text("input[name=\"q\"]", "hello"),
        ];

        let output = format_actions(&actions, &[]);
        assert_eq!(
            output,
            "1. navigate to \"https://example.com\"\n2. click #submit\n3. type input[name=\"q\"] \"hello\""
        );
    }

    #[test]
    fn test_format_actions_empty() {
        assert_eq!(format_actions(&[], &[]), "No actions recorded yet.");
    }

    #[test]
    fn test_password_values_are_masked() {
        let action = Action::type_text("input[name=\"password\"]", "hunter2");
        let line = format_action(&action, &[]);
        assert!(!line.contains("hunter2"));
        assert!(line.contains(MASK));
    }

    #[test]
    fn test_custom_sensitive_field() {
        assert_eq!(
            mask_sensitive("1234", "#pin-code", &["pin".to_string()]),
            MASK
        );
        assert_eq!(mask_sensitive("alice", "#username", &[]), "alice");
    }

    #[test]
    fn test_format_status() {
        assert_eq!(
            format_status(RecordingState::Active, 3, 1),
            "Recording... (3 actions, 1 pending inputs)"
        );
        assert_eq!(format_status(RecordingState::Idle, 0, 0), "Not recording (0 actions)");
    }
}
