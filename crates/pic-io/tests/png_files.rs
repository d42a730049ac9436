//! PNG files on disk.

use pic_core::{PixelView, Rect, Rgba};
use pic_io::{read_png, write_png, IoError};
use tempfile::TempDir;

fn checker(width: u32, height: u32) -> PixelView {
    PixelView::from_fn(width, height, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgba::new(240, 240, 240, 255)
        } else {
            Rgba::new(x as u8, y as u8, 30, 200)
        }
    })
}

#[test]
fn test_write_then_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("checker.png");
    let view = checker(33, 17);

    write_png(&path, &view).unwrap();
    let loaded = read_png(&path).unwrap();
    assert_eq!(loaded.dimensions(), (33, 17));
    assert!(loaded.equals(&view).unwrap());
}

#[test]
fn test_crop_round_trip() {
    let dir = TempDir::new().unwrap();
    let full = dir.path().join("full.png");
    let crop = dir.path().join("crop.png");

    write_png(&full, &checker(64, 64)).unwrap();
    let loaded = read_png(&full).unwrap();
    let region = Rect::new(30, 30, 20, 12);
    write_png(&crop, &loaded.sub_view_relative(region)).unwrap();

    let cropped = read_png(&crop).unwrap();
    assert!(cropped.equals(&loaded.copy_sub_region(region).unwrap()).unwrap());
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_png(dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}
