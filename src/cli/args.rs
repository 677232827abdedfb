//! Command argument structures

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::parse::{parse_date, parse_entry_kind, parse_family};
use healthgrid_core::catalog::EntryKind;
use healthgrid_core::submit::Family;

#[derive(Args, Debug)]
pub struct EnterArgs {
    /// Family whose input record receives the values
    #[arg(value_parser = parse_family)]
    pub family: Family,

    /// Values after the date, left to right (e.g. `500` for water,
    /// `Banana Food "1 medium" 2` for nutrition)
    pub values: Vec<String>,

    /// Date (or timestamp) for the record; keeps today's autofilled date when omitted
    #[arg(long, short)]
    pub date: Option<String>,

    /// Submit the family right after staging
    #[arg(long)]
    pub submit: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Family to submit, or `all` for a locked batch over every family
    pub target: String,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Partial name typed so far; empty browses the whole catalog
    #[arg(default_value = "")]
    pub query: String,

    /// Write the ranked list into this autocomplete slot
    #[arg(long)]
    pub slot: Option<usize>,

    /// Maximum suggestions to print
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Include scores in the output
    #[arg(long)]
    pub scores: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Family to read back
    #[arg(value_parser = parse_family)]
    pub family: Family,

    /// Only the row for this date
    #[arg(long, short, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Logged family: nutrition, supplements or skincare
    #[arg(value_parser = parse_family)]
    pub family: Family,

    /// Show at most this many entries
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ImportActivityArgs {
    /// JSON array of `{date, steps, meters}` buckets
    pub file: PathBuf,

    /// First day to import (defaults to the configured start date)
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last day to import (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct SlotsArgs {
    /// supplements or skincare
    #[arg(value_parser = parse_family)]
    pub family: Family,

    /// Slot names, left to right
    pub names: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DoseArgs {
    /// Supplement name
    pub name: String,

    /// Base dose per "Yes" (e.g. `5000 mg`)
    pub dose: String,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalog entries in stored order
    List {
        /// Only this catalog (food or drink)
        #[arg(long, short, value_parser = parse_entry_kind)]
        kind: Option<EntryKind>,
    },

    /// Show one entry by name
    Show {
        name: String,

        #[arg(long, short, value_parser = parse_entry_kind, default_value = "food")]
        kind: EntryKind,
    },

    /// Add an entry, then resort and refresh suggestions
    Add {
        name: String,

        #[arg(long, short, value_parser = parse_entry_kind, default_value = "food")]
        kind: EntryKind,

        /// Serving measure, e.g. "1 cup"
        #[arg(long, short)]
        measure: Option<String>,

        /// Attribute values in catalog order
        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Resort both catalogs and refresh the autocomplete blocks
    Sort,
}

#[derive(Args, Debug)]
pub struct AutocompleteArgs {
    #[command(subcommand)]
    pub command: AutocompleteCommands,
}

#[derive(Subcommand, Debug)]
pub enum AutocompleteCommands {
    /// Rebuild the helper blocks and bind the nutrition name inputs
    Setup,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(subcommand)]
    pub command: PreviewCommands,
}

#[derive(Subcommand, Debug)]
pub enum PreviewCommands {
    /// Mirror today's stored rows into the preview cells
    Refresh,
}

#[derive(Args, Debug)]
pub struct DatesArgs {
    #[command(subcommand)]
    pub command: DatesCommands,
}

#[derive(Subcommand, Debug)]
pub enum DatesCommands {
    /// Fill blank input date cells with today
    Fill,

    /// Reset every input date to today and clear the previews
    Reset,
}
