//! Crop command

use crate::CropArgs;
use anyhow::{Context, Result};

pub fn run(args: CropArgs, verbose: bool) -> Result<()> {
    let image = super::load_image(&args.input)?;
    let rect = args.region.rect();
    let (w, h) = image.dimensions();

    if verbose {
        println!("Cropping {} from {}x{}", rect, w, h);
    }

    let cropped = image
        .copy_sub_region(rect)
        .with_context(|| format!("Crop region {} does not fit {}x{}", rect, w, h))?;

    super::save_image(&args.output, &cropped)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
