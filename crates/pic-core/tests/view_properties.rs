//! Cross-cutting properties of owning, relative and copied views.

use std::sync::Arc;

use pic_core::{PixelView, Rect, Rgba};

fn textured(width: u32, height: u32) -> PixelView {
    PixelView::from_fn(width, height, |x, y| {
        Rgba::new((x * 7) as u8, (y * 13) as u8, (x * y) as u8, (x + y) as u8)
    })
}

fn regions() -> Vec<Rect> {
    vec![
        Rect::new(0, 0, 24, 16),
        Rect::new(3, 2, 5, 7),
        Rect::new(23, 15, 1, 1),
        Rect::new(10, 0, 14, 1),
        Rect::new(0, 9, 1, 7),
    ]
}

#[test]
fn test_copy_and_relative_agree_with_source() {
    let src = textured(24, 16);
    for rect in regions() {
        let copy = src.copy_sub_region(rect).unwrap();
        let rel = src.sub_view_relative(rect);
        for (i, j) in Rect::from_size(rect.width, rect.height).iter_coords() {
            let expected = src.at(rect.x + i, rect.y + j).unwrap();
            assert_eq!(copy.at(i, j).unwrap(), expected, "copy {rect} at ({i}, {j})");
            assert_eq!(rel.at(i, j).unwrap(), expected, "relative {rect} at ({i}, {j})");
        }
        assert!(copy.equals(&rel).unwrap());
        assert!(rel.equals(&copy).unwrap());
    }
}

#[test]
fn test_copy_of_relative_view() {
    let src = textured(24, 16);
    let rel = src.sub_view_relative(Rect::new(4, 4, 12, 10));
    let copy = rel.copy_sub_region(Rect::new(2, 3, 6, 5)).unwrap();
    assert_eq!(copy.at(0, 0).unwrap(), src.at(6, 7).unwrap());
    assert_eq!(copy.at(5, 4).unwrap(), src.at(11, 11).unwrap());
}

#[test]
fn test_relative_aliases_copy_isolates() {
    let src = textured(24, 16);
    let rel = src.sub_view_relative(Rect::new(1, 1, 4, 4));
    let copy = src.copy_sub_region(Rect::new(1, 1, 4, 4)).unwrap();

    assert!(Arc::ptr_eq(src.shared_buffer(), rel.shared_buffer()));
    assert!(!Arc::ptr_eq(src.shared_buffer(), copy.shared_buffer()));
    // every relative view in the chain holds the root alive
    assert_eq!(Arc::strong_count(src.shared_buffer()), 2);
    drop(rel);
    assert_eq!(Arc::strong_count(src.shared_buffer()), 1);
}

#[test]
fn test_deep_relative_chain() {
    let src = textured(64, 64);
    let mut view = src.clone();
    // each hop moves the origin by one pixel and shrinks the view by one
    for depth in 0..48u32 {
        let size = 63 - depth;
        view = view.sub_view_relative(Rect::new(1, 1, size, size));
    }
    assert_eq!(view.depth(), 48);
    assert_eq!(view.dimensions(), (16, 16));
    assert_eq!(view.at(0, 0).unwrap(), src.at(48, 48).unwrap());
    assert_eq!(view.at(15, 15).unwrap(), src.at(63, 63).unwrap());
    assert!(view.at(16, 0).is_err());

    let flat = src.copy_sub_region(Rect::new(48, 48, 16, 16)).unwrap();
    assert!(view.equals(&flat).unwrap());
}

#[test]
fn test_very_deep_chain_reads_and_drops() {
    let src = textured(4, 4);
    let mut view = src.clone();
    for _ in 0..200_000 {
        view = view.sub_view_relative(Rect::from_size(4, 4));
    }
    assert_eq!(view.depth(), 200_000);
    assert_eq!(view.at(3, 3).unwrap(), src.at(3, 3).unwrap());

    // a second handle into the middle of the chain keeps that part alive
    let middle = view.parent().map(PixelView::clone).unwrap();
    drop(view);
    assert_eq!(middle.depth(), 199_999);
    assert_eq!(middle.at(0, 0).unwrap(), src.at(0, 0).unwrap());
    drop(middle);
    assert_eq!(Arc::strong_count(src.shared_buffer()), 1);
}

#[test]
fn test_equality_reflexive_and_symmetric() {
    let a = textured(9, 9);
    let b = a.copy_sub_region(Rect::from_size(9, 9)).unwrap();
    let c = textured(10, 10).sub_view_relative(Rect::from_size(9, 9));
    assert!(a.equals(&a).unwrap());
    for (x, y) in [(&a, &b), (&a, &c), (&b, &c)] {
        assert_eq!(x.equals(y).unwrap(), y.equals(x).unwrap());
        assert!(x.equals(y).unwrap());
    }
}

#[test]
fn test_two_by_two_example() {
    let view = PixelView::from_rgba(
        2,
        2,
        vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4],
    )
    .unwrap();
    let sub = view.copy_sub_region(Rect::from_corners(1, 0, 2, 2)).unwrap();
    assert_eq!(sub.dimensions(), (1, 2));
    assert_eq!(sub.at(0, 0).unwrap(), Rgba::splat(2));
    assert_eq!(sub.at(0, 1).unwrap(), Rgba::splat(4));
}

#[test]
fn test_concurrent_reads() {
    let src = textured(32, 32);
    let views: Vec<PixelView> = (0..4)
        .map(|i| src.sub_view_relative(Rect::new(i * 4, i * 4, 16, 16)))
        .collect();
    std::thread::scope(|s| {
        for (i, view) in views.iter().enumerate() {
            let src = &src;
            s.spawn(move || {
                let off = i as u32 * 4;
                for (x, y) in Rect::from_size(16, 16).iter_coords() {
                    assert_eq!(view.at(x, y).unwrap(), src.at(off + x, off + y).unwrap());
                }
            });
        }
    });
}
