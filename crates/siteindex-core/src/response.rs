use serde_json::{json, Value};

use crate::context::CommandInfo;
use crate::outcome::{CommandStatus, ExecutionOutcome};

pub const PROGRAM_NAME: &str = "siteindex";

#[must_use]
pub fn to_json_response(info: CommandInfo, outcome: &ExecutionOutcome) -> Value {
    let status = match outcome.status {
        CommandStatus::Ok => "ok",
        CommandStatus::UserError => "user-error",
        CommandStatus::Failure => "error",
    };
    let details = match &outcome.details {
        Value::Object(_) => outcome.details.clone(),
        Value::Null => json!({}),
        other => json!({ "value": other }),
    };
    json!({
        "status": status,
        "message": format_status_message(info, &outcome.message),
        "details": details,
    })
}

#[must_use]
pub fn format_status_message(info: CommandInfo, message: &str) -> String {
    let group_name = info.group.to_string();
    let prefix = if group_name == info.name {
        format!("{PROGRAM_NAME} {}", info.name)
    } else {
        format!("{PROGRAM_NAME} {} {}", group_name, info.name)
    };
    if message.is_empty() {
        prefix
    } else if message.starts_with(&prefix) {
        message.to_string()
    } else {
        format!("{prefix}: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CommandGroup;

    #[test]
    fn status_message_is_prefixed_once() {
        let info = CommandInfo::new(CommandGroup::Generate, "generate");
        assert_eq!(
            format_status_message(info, "indexed 2 projects"),
            "siteindex generate: indexed 2 projects"
        );
        assert_eq!(
            format_status_message(info, "siteindex generate: done"),
            "siteindex generate: done"
        );
        assert_eq!(format_status_message(info, ""), "siteindex generate");
    }

    #[test]
    fn envelope_wraps_non_object_details() {
        let info = CommandInfo::new(CommandGroup::List, "list");
        let outcome = ExecutionOutcome::user_error("bad store", json!("oops"));
        let payload = to_json_response(info, &outcome);
        assert_eq!(payload["status"], "user-error");
        assert_eq!(payload["details"]["value"], "oops");
        assert_eq!(payload["message"], "siteindex list: bad store");
    }
}
