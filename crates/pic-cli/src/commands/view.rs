//! Relative view command
//!
//! Writes a region straight from the source buffer. With `--checked` the
//! region is validated up front; otherwise a bad region surfaces while the
//! output is encoded.

use crate::ViewArgs;
use anyhow::{Context, Result};

pub fn run(args: ViewArgs, verbose: bool) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let rect = args.region.rect();

    let view = if args.checked {
        image
            .sub_view_checked(rect)
            .with_context(|| format!("Region {} is outside the image", rect))?
    } else {
        image.sub_view_relative(rect)
    };

    if verbose {
        println!("{:?}", view);
    }

    super::save_image(&args.output, &view)
}
