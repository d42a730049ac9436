//! Image info command

use crate::InfoArgs;
use anyhow::Result;
use pic_core::Rect;

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let image = super::load_image(path)?;
        let (w, h) = image.dimensions();

        println!("{}", path.display());
        println!("  Size:   {}x{}", w, h);
        println!("  Stride: {} bytes", image.stride());
        println!("  Buffer: {}", super::format_size(image.pixels().len()));

        if verbose {
            let opaque = Rect::from_size(w, h)
                .iter_coords()
                .filter_map(|(x, y)| image.get(x, y))
                .all(|px| px.a == 0xFF);
            println!("  Opaque: {}", opaque);
        }
    }
    Ok(())
}
