//! Command implementations for all healthgrid commands

use crate::cli::args::{AutocompleteCommands, CatalogCommands, DatesCommands, PreviewCommands};
use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use healthgrid_core::error::{HealthError, Result};
use healthgrid_core::store::Store;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => commands::init::execute(ctx.cli, ctx.root),
            other => execute_in_store(ctx.cli, &mut ctx.discover_or_open_store()?, other),
        }
    }
}

fn execute_in_store(cli: &Cli, store: &mut Store, command: &Commands) -> Result<()> {
    match command {
        Commands::Init => Err(HealthError::StoreExists {
            path: store.root().to_path_buf(),
        }),
        Commands::Enter(args) => commands::enter::execute(cli, store, args),
        Commands::Submit(args) => commands::submit::execute(cli, store, &args.target),
        Commands::Suggest(args) => commands::suggest::execute(cli, store, args),
        Commands::Autocomplete(sub) => match sub.command {
            AutocompleteCommands::Setup => commands::autocomplete::execute_setup(cli, store),
        },
        Commands::Catalog(sub) => match &sub.command {
            CatalogCommands::List { kind } => commands::catalog::execute_list(cli, store, *kind),
            CatalogCommands::Show { name, kind } => {
                commands::catalog::execute_show(cli, store, name, *kind)
            }
            CatalogCommands::Add {
                name,
                kind,
                measure,
                values,
            } => commands::catalog::execute_add(
                cli,
                store,
                *kind,
                name,
                measure.as_deref(),
                values,
            ),
            CatalogCommands::Sort => commands::catalog::execute_sort(cli, store),
        },
        Commands::Show(args) => commands::show::execute(cli, store, args.family, args.date),
        Commands::Log(args) => commands::log::execute(cli, store, args.family, args.limit),
        Commands::Preview(sub) => match sub.command {
            PreviewCommands::Refresh => commands::preview::execute_refresh(cli, store),
        },
        Commands::Dates(sub) => match sub.command {
            DatesCommands::Fill => commands::preview::execute_fill_dates(cli, store),
            DatesCommands::Reset => commands::preview::execute_reset_dates(cli, store),
        },
        Commands::ImportActivity(args) => commands::import_activity::execute(cli, store, args),
        Commands::Slots(args) => commands::slots::execute_names(cli, store, args),
        Commands::Dose(args) => commands::slots::execute_dose(cli, store, args),
    }
}
