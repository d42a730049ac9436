//! Sub-image search command

use crate::LocateArgs;
use anyhow::{bail, Result};
use pic_ops::{parallel, search, EdgePolicy, SearchOptions};
use tracing::debug;

pub fn run(args: LocateArgs, verbose: bool) -> Result<()> {
    let haystack = super::load_image(&args.haystack)?;
    let needle = super::load_image(&args.needle)?;

    let edge = if args.inclusive {
        EdgePolicy::Inclusive
    } else {
        EdgePolicy::Exclusive
    };
    let options = SearchOptions::default().with_edge(edge);

    if verbose {
        println!(
            "Searching {}x{} for {}x{} ({:?}{})",
            haystack.width(),
            haystack.height(),
            needle.width(),
            needle.height(),
            edge,
            if args.parallel { ", parallel" } else { "" }
        );
    }

    let found = match (args.all, args.parallel) {
        (true, true) => parallel::locate_all(&haystack, &needle, &options)?,
        (true, false) => search::locate_all(&haystack, &needle, &options)?,
        (false, true) => parallel::locate(&haystack, &needle, &options)?.into_iter().collect(),
        (false, false) => search::locate_with(&haystack, &needle, &options)?
            .into_iter()
            .collect(),
    };

    debug!(matches = found.len(), "locate finished");
    if found.is_empty() {
        bail!("{} not found in {}", args.needle.display(), args.haystack.display());
    }
    for (x, y) in &found {
        println!("{} {}", x, y);
    }
    Ok(())
}
