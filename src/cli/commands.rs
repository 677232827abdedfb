//! Top-level command enum

use clap::Subcommand;

use super::args::*;

/// Top-level healthgrid commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new healthgrid store
    Init,

    /// Stage values into a family's input record
    Enter(EnterArgs),

    /// Submit a family's staged record, or `all`
    Submit(SubmitArgs),

    /// Rank catalog names for a partial query
    Suggest(SuggestArgs),

    /// Manage the autocomplete helper blocks
    Autocomplete(AutocompleteArgs),

    /// Inspect and maintain the food and drink catalogs
    Catalog(CatalogArgs),

    /// Show stored daily rows for a family
    Show(ShowArgs),

    /// Show a family's event log, newest first
    Log(LogArgs),

    /// Manage the preview cells
    Preview(PreviewArgs),

    /// Manage the autofilled input dates
    Dates(DatesArgs),

    /// Import daily activity buckets into the cardio grid
    ImportActivity(ImportActivityArgs),

    /// Name the supplement or skincare slots
    Slots(SlotsArgs),

    /// Set a supplement's base dose
    Dose(DoseArgs),
}
