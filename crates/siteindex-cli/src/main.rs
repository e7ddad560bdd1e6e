use clap::Parser;
use color_eyre::Result;
use siteindex_core::{CommandContext, GlobalOptions, NO_COLOR_ENV};

mod cli;
mod dispatch;
mod output;
mod style;

use cli::SiteIndexCli;
use output::OutputOptions;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = SiteIndexCli::parse();
    init_tracing(cli.trace, cli.verbose);

    let global = GlobalOptions {
        root: cli.root.clone(),
        store: cli.store.clone(),
        index: cli.index.clone(),
    };
    let ctx = CommandContext::new(&global);

    let (info, outcome) = dispatch::dispatch_command(&ctx, &cli)?;
    let opts = OutputOptions {
        quiet: cli.quiet,
        json: cli.json,
        no_color: cli.no_color || ctx.env().var(NO_COLOR_ENV).is_some(),
        verbose: cli.verbose,
    };
    let code = output::emit_output(&opts, info, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("siteindex_cli={level},siteindex_core={level},siteindex_domain={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
