use atty::Stream;
use color_eyre::Result;
use serde_json::Value;
use siteindex_core::{
    format_status_message, to_json_response, CommandGroup, CommandInfo, CommandStatus,
    ExecutionOutcome,
};

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub quiet: bool,
    pub json: bool,
    pub no_color: bool,
    pub verbose: u8,
}

pub fn emit_output(
    opts: &OutputOptions,
    info: CommandInfo,
    outcome: &ExecutionOutcome,
) -> Result<i32> {
    let code = outcome.status.exit_code();

    if opts.json {
        let payload = to_json_response(info, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }

    let message = format_status_message(info, &outcome.message);
    match outcome.status {
        CommandStatus::Ok => {
            if opts.quiet {
                return Ok(code);
            }
            let style = Style::new(opts.no_color, atty::is(Stream::Stdout));
            println!("{}", style.status(outcome.status, &message));
            let lines = match info.group {
                CommandGroup::Generate => change_lines(&style, &outcome.details),
                CommandGroup::List => listing_lines(&style, &outcome.details),
            };
            for line in lines {
                println!("{line}");
            }
        }
        CommandStatus::UserError | CommandStatus::Failure => {
            let style = Style::new(opts.no_color, atty::is(Stream::Stderr));
            eprintln!("{}", style.status(outcome.status, &message));
            if let Some(hint) = str_detail(&outcome.details, "hint") {
                eprintln!("{}", style.info(&format!("Tip: {hint}")));
            }
            if opts.verbose > 0 {
                for issue in string_list(&outcome.details, "issues").iter().skip(1) {
                    eprintln!("{}", style.dimmed(&format!("  caused by: {issue}")));
                }
            }
        }
    }

    Ok(code)
}

fn change_lines(style: &Style, details: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    for path in string_list(details, "added") {
        lines.push(style.info(&format!("  + {path}")));
    }
    for path in string_list(details, "pruned") {
        lines.push(style.dimmed(&format!("  - {path}")));
    }
    lines
}

fn listing_lines(style: &Style, details: &Value) -> Vec<String> {
    let Some(categories) = details.get("categories").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    for category in categories {
        let name = str_detail(category, "name").unwrap_or_default();
        lines.push(style.heading(name));
        let projects = category
            .get("projects")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for project in projects {
            let title = str_detail(project, "title").unwrap_or_default();
            let path = str_detail(project, "path").unwrap_or_default();
            lines.push(format!("  {title} {}", style.dimmed(&format!("({path})"))));
            if let Some(description) = str_detail(project, "description") {
                lines.push(format!("      {description}"));
            }
        }
    }
    lines
}

fn str_detail<'a>(details: &'a Value, key: &str) -> Option<&'a str> {
    details.get(key).and_then(Value::as_str)
}

fn string_list<'a>(details: &'a Value, key: &str) -> Vec<&'a str> {
    details
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
