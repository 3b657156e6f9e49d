//! `pcbuild search`: lists catalog rows matching the filters.

use std::io::Write;

use pcbuild_core::{CoreError, SearchFilter};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::error::AppResult;
use crate::render;
use crate::{App, Outcome};

/// Prints one line per matching component, ordered by id.
pub fn run(app: &App, args: &SearchArgs, out: &mut impl Write) -> AppResult<Outcome> {
    let mut filter = SearchFilter::new()
        .term(args.term.as_deref().unwrap_or_default())
        .map_err(CoreError::from)?
        .manufacturer(args.manufacturer.as_deref().unwrap_or_default());
    if let Some(category) = args.category {
        filter = filter.category(category);
    }
    let limit = args.limit.unwrap_or(app.config().search_limit);

    let records = app.block_on(app.database().components().search(&filter, limit))?;
    debug!(?filter, limit, found = records.len(), "Search finished");

    if records.is_empty() {
        writeln!(out, "No components match the criteria.")?;
    }
    for record in &records {
        writeln!(out, "{}", render::record_line(record))?;
    }
    Ok(Outcome::Success)
}
