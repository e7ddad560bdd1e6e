use color_eyre::Result;
use siteindex_core::{
    generate, list_projects, CommandContext, CommandGroup, CommandInfo, ExecutionOutcome,
    GenerateRequest,
};

use crate::cli::{CommandGroupCli, GenerateArgs, SiteIndexCli};

pub fn dispatch_command(
    ctx: &CommandContext,
    cli: &SiteIndexCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    if let Some(rejected) = misplaced_generate_options(cli) {
        return Ok(rejected);
    }
    match &cli.command {
        None => dispatch_generate(ctx, &cli.generate),
        Some(CommandGroupCli::Generate(args)) => dispatch_generate(ctx, args),
        Some(CommandGroupCli::List) => {
            let info = CommandInfo::new(CommandGroup::List, "list");
            core_call(info, || list_projects(ctx))
        }
    }
}

fn dispatch_generate(
    ctx: &CommandContext,
    args: &GenerateArgs,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    let info = CommandInfo::new(CommandGroup::Generate, "generate");
    let request = generate_request_from_args(args);
    core_call(info, || generate(ctx, &request))
}

/// Generate options given before a subcommand belong to the implicit
/// generate run, so they cannot be combined with an explicit command.
fn misplaced_generate_options(cli: &SiteIndexCli) -> Option<(CommandInfo, ExecutionOutcome)> {
    if !cli.generate.any_given() {
        return None;
    }
    let (info, hint) = match cli.command.as_ref()? {
        CommandGroupCli::Generate(_) => (
            CommandInfo::new(CommandGroup::Generate, "generate"),
            "place --commit-msg, --strategy and --dry-run after `generate`",
        ),
        CommandGroupCli::List => (
            CommandInfo::new(CommandGroup::List, "list"),
            "drop --commit-msg, --strategy and --dry-run when listing",
        ),
    };
    Some((
        info,
        ExecutionOutcome::user_error(
            "generate options were given before the subcommand",
            serde_json::json!({
                "reason": "misplaced_generate_options",
                "hint": hint,
            }),
        ),
    ))
}

fn generate_request_from_args(args: &GenerateArgs) -> GenerateRequest {
    GenerateRequest {
        commit_message: args.commit_msg.clone(),
        strategy: args.strategy.unwrap_or_default().into(),
        dry_run: args.dry_run,
    }
}

fn core_call<F>(info: CommandInfo, action: F) -> Result<(CommandInfo, ExecutionOutcome)>
where
    F: FnOnce() -> anyhow::Result<ExecutionOutcome>,
{
    match action() {
        Ok(outcome) => Ok((info, outcome)),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            let issues: Vec<String> = err.chain().map(std::string::ToString::to_string).collect();
            Ok((
                info,
                ExecutionOutcome::failure(
                    err.to_string(),
                    serde_json::json!({
                        "reason": "internal_error",
                        "error": err.to_string(),
                        "issues": issues,
                    }),
                ),
            ))
        }
    }
}
