//! Command dispatch and execution

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::{builtin_cases, ValidationReport};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render;
use crate::config::{self, RenderStyle, Settings};
use crate::exitcode;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Execute the CLI command, returning the process exit code.
pub fn execute(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        Commands::Check {
            tokens,
            file,
            strict,
            render,
        } => cmd_check(cli, tokens, file.as_deref(), *strict, *render),
        Commands::Demo => cmd_demo(cli),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("get current directory", e))),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let settings = Settings::load(Some(&dir))?;
    debug!("load_settings: {:?}", settings);
    Ok(settings)
}

#[instrument(level = "debug", skip(cli, tokens))]
fn cmd_check(
    cli: &Cli,
    tokens: &[String],
    file: Option<&Path>,
    strict: bool,
    style: Option<RenderStyle>,
) -> CliResult<i32> {
    let mut settings = load_settings(cli)?;
    if strict {
        settings.strict_tokens = true;
    }
    if let Some(style) = style {
        settings.render.style = style;
    }
    let container = ServiceContainer::new(settings);

    let report = match file {
        Some(path) if path != Path::new("-") => container.validation.check_file(path)?,
        _ if !tokens.is_empty() => container.validation.check_args(tokens)?,
        _ => {
            if io::stdin().is_terminal() {
                return Err(CliError::Usage(
                    "no edges given: pass tokens, --file, or pipe edges on stdin".to_string(),
                ));
            }
            info!("reading edges from stdin");
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| CliError::Infra(InfraError::io("read stdin", e)))?;
            container.validation.check_text(&text)?
        }
    };

    print_report(&report, &container.settings);
    Ok(if report.is_valid() {
        exitcode::OK
    } else {
        exitcode::DATAERR
    })
}

fn cmd_demo(cli: &Cli) -> CliResult<i32> {
    let container = ServiceContainer::new(load_settings(cli)?);

    for (i, case) in builtin_cases().iter().enumerate() {
        if i > 0 {
            output::info("");
        }
        output::header(&format!("Test Case #{}: {}", i + 1, case.name));
        let report = container.validation.check_tokens(case.tokens)?;
        print_report(&report, &container.settings);
    }
    Ok(exitcode::OK)
}

fn print_report(report: &ValidationReport, settings: &Settings) {
    for token in &report.skipped {
        output::warning(&format!("skipped malformed token {:?}", token));
    }

    output::info(&format!(
        "Input: [{}]",
        report.input.iter().join(", ")
    ));

    match &report.outcome {
        Ok(tree) => {
            output::success("Output: true");
            if report.edges.len() <= settings.render.max_edges {
                match render::render(tree, settings.render.style) {
                    Some(diagram) => output::info(diagram.trim_end()),
                    None if settings.render.style != RenderStyle::None => debug!(
                        "print_report: depth {} exceeds {}, not drawing",
                        tree.depth(),
                        render::MAX_RENDER_DEPTH
                    ),
                    None => {}
                }
            } else {
                debug!(
                    "print_report: {} edges exceed render.max_edges={}",
                    report.edges.len(),
                    settings.render.max_edges
                );
            }
        }
        Err(e) => {
            output::failure("Output: false");
            output::detail(&format!("Reason: {} ({})", e, e.kind()));
        }
    }
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Path => {
            let global = config::global_config_path();
            let local = config::local_config_path(&project_dir(cli)?);
            match global {
                Some(path) => print_config_path("global", &path),
                None => output::detail("global: <no config directory>"),
            }
            print_config_path("local", &local);
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
    }
    Ok(exitcode::OK)
}

fn print_config_path(label: &str, path: &Path) {
    let state = if path.exists() { "exists" } else { "missing" };
    output::detail(&format!("{}: {} ({})", label, path.display(), state));
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<i32> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(exitcode::OK)
}
