//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::AllocationService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path};
use crate::domain::{Allocation, NodeId, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show) => show(cli, container),
        Some(Commands::Tree) => tree(cli, container),
        Some(Commands::Percent { id, percentage }) => {
            raise_by_percent(cli, container, id, *percentage)
        }
        Some(Commands::Value { id, value, yes }) => set_value(cli, container, id, *value, *yes),
        Some(Commands::Config { command }) => config(cli, container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `alloctree --help`".to_string(),
        )),
    }
}

fn session(cli: &Cli, container: &ServiceContainer) -> CliResult<AllocationService> {
    Ok(container.allocation_session(cli.file.as_deref())?)
}

fn node_id(id: &str) -> CliResult<NodeId> {
    if id.trim().is_empty() {
        return Err(CliError::InvalidArgs("row id must not be empty".to_string()));
    }
    Ok(NodeId::new(id))
}

fn print_table(session: &AllocationService) {
    output::table(&session.rows(), session.grand_total(), session.policy());
}

#[instrument(skip(container))]
fn show(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let session = session(cli, container)?;
    print_table(&session);
    Ok(())
}

#[instrument(skip(container))]
fn tree(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let session = session(cli, container)?;
    output::info(&session.tree().to_tree_string(session.policy()));
    Ok(())
}

#[instrument(skip(container))]
fn raise_by_percent(
    cli: &Cli,
    container: &ServiceContainer,
    id: &str,
    percentage: f64,
) -> CliResult<()> {
    let id = node_id(id)?;
    let mut session = session(cli, container)?;

    match session.set_by_percentage(&id, percentage)? {
        Allocation::Applied(()) => {
            output::success(&format!("{id} increased by {percentage}%"));
            print_table(&session);
        }
        Allocation::Unchanged => {
            output::warning(&format!("percentage is 0, {id} is unchanged"));
        }
        // Percentages never ask for confirmation
        Allocation::ConfirmationRequired => {}
    }
    Ok(())
}

#[instrument(skip(container))]
fn set_value(
    cli: &Cli,
    container: &ServiceContainer,
    id: &str,
    value: f64,
    yes: bool,
) -> CliResult<()> {
    let id = node_id(id)?;
    let mut session = session(cli, container)?;

    let mut outcome = session.set_by_absolute_value(&id, value, yes)?;
    if let Allocation::ConfirmationRequired = outcome {
        let question = format!("Set {id} and its children to 0?");
        let confirmed = container
            .confirmer
            .confirm(&question)
            .map_err(|e| InfraError::confirmation(question.as_str(), e))?;
        debug!("zero confirmation for {}: {}", id, confirmed);
        if !confirmed {
            output::warning("cancelled, nothing changed");
            return Ok(());
        }
        outcome = session.set_by_absolute_value(&id, value, true)?;
    }

    if outcome.is_applied() {
        output::success(&format!("{id} set to {}", session.policy().format(value)));
        print_table(&session);
    }
    Ok(())
}

#[instrument(skip(container))]
fn config(cli: &Cli, container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => {
            output::info(&crate::config::Settings::template());
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::info("global: <no config directory>"),
            }
            let dir = match &cli.dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()
                    .map_err(|e| InfraError::io("determine current directory", e))?,
            };
            output::info(&format!("local:  {}", local_config_path(&dir).display()));
        }
    }
    Ok(())
}
