//! Image diff command

use crate::DiffArgs;
use anyhow::{bail, Result};
use pic_core::PixelView;

pub fn run(args: DiffArgs, verbose: bool) -> Result<()> {
    let img_a = super::load_image(&args.a)?;
    let img_b = super::load_image(&args.b)?;

    if img_a.dimensions() != img_b.dimensions() {
        bail!(
            "Image dimensions don't match: {}x{} vs {}x{}",
            img_a.width(),
            img_a.height(),
            img_b.width(),
            img_b.height()
        );
    }

    println!("Comparing {} vs {}", args.a.display(), args.b.display());

    if img_a.equals(&img_b)? {
        println!("PASS");
        return Ok(());
    }

    let (count, first) = mismatches(&img_a, &img_b);
    if verbose {
        let total = img_a.width() as u64 * img_a.height() as u64;
        println!(
            "  Pixels differ:   {} ({:.2}%)",
            count,
            100.0 * count as f64 / total as f64
        );
    }
    match first {
        Some((x, y)) => bail!(
            "FAIL: first difference at ({}, {}): {} vs {}",
            x,
            y,
            img_a.at(x, y)?,
            img_b.at(x, y)?
        ),
        None => bail!("FAIL: images differ"),
    }
}

/// Counts differing pixels and returns the first in row-major order.
fn mismatches(a: &PixelView, b: &PixelView) -> (u64, Option<(u32, u32)>) {
    let mut count = 0;
    let mut first = None;
    for y in 0..a.height() {
        for x in 0..a.width() {
            if a.get(x, y) != b.get(x, y) {
                count += 1;
                first.get_or_insert((x, y));
            }
        }
    }
    (count, first)
}
