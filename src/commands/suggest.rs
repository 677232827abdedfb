//! `healthgrid suggest` - rank catalog names for a partial query

use serde_json::json;

use crate::cli::args::SuggestArgs;
use crate::cli::Cli;
use crate::commands::format::output_by_format_result;
use crate::commands::with_document_lock;
use healthgrid_core::catalog::ReferenceCatalog;
use healthgrid_core::clock::SystemClock;
use healthgrid_core::error::Result;
use healthgrid_core::store::Store;
use healthgrid_core::suggest::{Suggestion, SuggestionRanker};
use healthgrid_core::text::normalize;

pub fn execute(cli: &Cli, store: &mut Store, args: &SuggestArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(store.config().suggest.limit);

    let suggestions: Vec<Suggestion> = if let Some(slot) = args.slot {
        let clock = SystemClock;
        with_document_lock(cli, store, |store| store.engine(&clock).suggest_for_slot(slot, &args.query))?
            .into_iter()
            .take(limit)
            .map(|name| Suggestion { name, score: 0.0 })
            .collect()
    } else {
        let catalog = ReferenceCatalog::new(store.layout(), store.config().max_rows);
        let names = catalog.names(store.workbook())?;
        let ranker = SuggestionRanker::new(limit);
        if normalize(&args.query).is_empty() {
            ranker
                .rank(&args.query, &names)
                .into_iter()
                .take(limit)
                .map(|name| Suggestion { name, score: 0.0 })
                .collect()
        } else {
            ranker.rank_scored(&args.query, &names)
        }
    };
    let show_scores = args.scores && args.slot.is_none() && !normalize(&args.query).is_empty();

    output_by_format_result!(cli.format,
        json => {
            let items: Vec<_> = suggestions
                .iter()
                .map(|s| {
                    if show_scores {
                        json!({ "name": s.name, "score": s.score })
                    } else {
                        json!({ "name": s.name })
                    }
                })
                .collect();
            let output = json!({
                "query": args.query,
                "slot": args.slot,
                "count": items.len(),
                "suggestions": items,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        human => {
            if suggestions.is_empty() && !cli.quiet {
                println!("No suggestions");
            }
            for s in &suggestions {
                if show_scores {
                    println!("{:>7.3}  {}", s.score, s.name);
                } else {
                    println!("{}", s.name);
                }
            }
        }
    )
}
