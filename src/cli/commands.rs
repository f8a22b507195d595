//! Command dispatch: wires CLI arguments to services.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::TreeNodeConvert;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match cli.command_or_default() {
        Commands::Run {
            input,
            transfers,
            from,
            to,
        } => cmd_run(cli, &input, transfers, from.as_deref(), to.as_deref()),
        Commands::Tree { input } => cmd_tree(cli, &input),
        Commands::Chain { name, input } => cmd_chain(cli, &input, &name),
        Commands::Info { input } => cmd_info(cli, &input),
        Commands::Config { command } => cmd_config(cli, &command),
        Commands::Completion { shell } => cmd_completion(shell),
    }
}

/// Load settings, apply flag overrides and wire up services.
fn container(cli: &Cli, from: Option<&str>, to: Option<&str>) -> CliResult<ServiceContainer> {
    let settings =
        Settings::load(cli.config.as_deref())?.with_overrides(cli.root.as_deref(), from, to)?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument(skip(cli))]
fn cmd_run(
    cli: &Cli,
    input: &InputArgs,
    transfers: bool,
    from: Option<&str>,
    to: Option<&str>,
) -> CliResult<()> {
    let services = container(cli, from, to)?;
    let map = services.orbits.load(input.input.as_deref())?;
    let report = services.orbits.report(&map.tree, transfers)?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", report.checksum).map_err(|e| InfraError::io("write report", e))?;
    if let Some(count) = report.transfers {
        writeln!(out, "{}", count).map_err(|e| InfraError::io("write report", e))?;
    }
    out.flush().map_err(|e| InfraError::io("flush report", e))?;
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, input: &InputArgs) -> CliResult<()> {
    let services = container(cli, None, None)?;
    let map = services.orbits.load(input.input.as_deref())?;
    let rendered = map.tree.to_tree_string().to_string();
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_chain(cli: &Cli, input: &InputArgs, name: &str) -> CliResult<()> {
    let services = container(cli, None, None)?;
    let map = services.orbits.load(input.input.as_deref())?;
    let chain = services.orbits.chain(&map.tree, name)?;
    output::info(&chain.join(" -> "));
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_info(cli: &Cli, input: &InputArgs) -> CliResult<()> {
    let services = container(cli, None, None)?;
    let map = services.orbits.load(input.input.as_deref())?;
    let summary = services.orbits.summary(&map);

    output::header("Orbit map");
    output::action("root", &summary.root);
    output::action("bodies", &summary.bodies);
    output::action("height", &summary.height);
    output::action("leaves", &summary.leaves);
    output::action("orbits", &summary.checksum);
    output::action("rounds", &summary.rounds);
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let services = container(cli, None, None)?;
            output::info(services.settings.to_toml()?.trim_end());
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
