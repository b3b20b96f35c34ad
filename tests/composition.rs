//! End-to-end composition through the public API.
//!
//! Sources are coordinate-coded: pixel (x, y) stores `[x, y, 0, 255]`, so a
//! wrong paste offset or a clipped edge shows up as a mismatched coordinate
//! rather than a plausible-looking color.

use std::sync::{Arc, RwLock};

use image::{DynamicImage, Rgba, RgbaImage};
use zenplate::*;

// ---- Helpers ----

/// Source whose pixels remember where they came from (sizes up to 256).
fn coded(w: u32, h: u32) -> DynamicImage {
    assert!(w <= 256 && h <= 256);
    DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
        Rgba([x as u8, y as u8, 0, 255])
    }))
}

fn solid(w: u32, h: u32, px: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba(px)))
}

fn block(w: u32, h: u32, color: &str) -> Block {
    Block::new().with_size((w, h)).with_background(color).unwrap()
}

fn px(img: &DynamicImage, x: u32, y: u32) -> [u8; 4] {
    img.to_rgba8().get_pixel(x, y).0
}

// ---- Colors ----

#[test]
fn hex_round_trips_every_gray_and_primary() {
    for v in 0..=255u8 {
        for c in [
            Color::new(v, v, v),
            Color::new(v, 0, 0),
            Color::new(0, v, 0),
            Color::new(0, 0, v),
        ] {
            let hex = c.hex(1.0).unwrap();
            assert!(hex.ends_with("FF"), "{hex}");
            assert_eq!(Color::from_hex(&hex).unwrap(), c);
        }
    }
}

#[test]
fn opacity_bounds_are_inclusive() {
    let c = Color::new(1, 2, 3);
    assert!(c.hex(0.0).is_ok());
    assert!(c.hex(1.0).is_ok());
    assert!(matches!(c.hex(-0.01), Err(Error::OutOfRange { .. })));
    assert!(matches!(c.hex(1.01), Err(Error::OutOfRange { .. })));
}

// ---- Placement ----

#[test]
fn default_block_is_opaque_white() {
    let b = Block::new();
    assert_eq!(b.size(), Size::new(500, 500));
    assert_eq!(b.background_hex(), "#FFFFFFFF");
}

#[test]
fn contain_fit_halves_wide_source() {
    let b = ImageBlock::new(solid(1000, 500, [0, 0, 0, 255])).with_size((500, 500));
    assert_eq!(b.element_size(), Size::new(500, 250));
}

#[test]
fn small_source_stays_native() {
    let b = ImageBlock::new(coded(100, 100)).with_size((500, 500));
    assert_eq!(b.element_size(), Size::new(100, 100));
    assert_eq!(b.xy(), (200, 200));
}

#[test]
fn named_anchors() {
    let mut b = ImageBlock::new(coded(100, 100)).with_size((500, 500));
    for (name, xy) in [
        ("center-center", (200, 200)),
        ("top-left", (0, 0)),
        ("bottom-right", (400, 400)),
        ("top-center", (200, 0)),
        ("center-left", (0, 200)),
    ] {
        b.set_position(Position::parse(name).unwrap());
        assert_eq!(b.xy(), xy, "{name}");
    }
}

#[test]
fn unscaled_paste_keeps_every_coordinate() {
    let b = ImageBlock::new(coded(30, 20))
        .with_size((50, 50))
        .with_position(Anchor::BottomRight);
    let img = b.render().unwrap();
    let (ox, oy) = b.xy();
    assert_eq!((ox, oy), (20, 30));
    for y in 0..20 {
        for x in 0..30 {
            assert_eq!(
                px(&img, x + 20, y + 30),
                [x as u8, y as u8, 0, 255],
                "({x},{y})"
            );
        }
    }
    assert_eq!(px(&img, 19, 30), [255, 255, 255, 255]);
}

#[test]
fn negative_offset_clips_leading_edge() {
    let b = ImageBlock::new(coded(20, 20))
        .with_size((20, 20))
        .with_position(Position::Offset(-5, -3));
    let img = b.render().unwrap();
    assert_eq!(px(&img, 0, 0), [5, 3, 0, 255]);
    assert_eq!(px(&img, 14, 16), [19, 19, 0, 255]);
    assert_eq!(px(&img, 15, 17), [255, 255, 255, 255]);
}

// ---- Containers ----

#[test]
fn strip_of_three() {
    let s = Strip::horizontal([
        Cell::new(block(100, 100, "red")),
        Cell::new(block(200, 100, "green")),
        Cell::new(block(150, 100, "blue")),
    ])
    .unwrap();
    assert_eq!(s.strip_size(), Size::new(470, 100));
    let img = s.render().unwrap();
    assert_eq!(px(&img, 99, 50), [255, 0, 0, 255]);
    assert_eq!(px(&img, 105, 50), [255, 255, 255, 255]);
    assert_eq!(px(&img, 110, 50), [0, 255, 0, 255]);
    assert_eq!(px(&img, 469, 99), [0, 0, 255, 255]);
}

#[test]
fn strip_rejects_mixed_modes() {
    let r = Strip::vertical([
        Cell::new(block(10, 10, "red")),
        Cell::new(block(10, 10, "red").with_mode(Mode::Rgb)),
    ]);
    assert!(matches!(r, Err(Error::InconsistentMode { .. })));
}

#[test]
fn grid_table_layout() {
    let g = Grid::new([
        vec![Cell::new(block(100, 50, "red")), Cell::new(block(200, 80, "green"))],
        vec![Cell::new(block(150, 60, "blue"))],
    ]);
    assert_eq!(g.column_width(0), 150);
    assert_eq!(g.column_width(1), 200);
    assert_eq!(g.row_height(0), 80);
    assert_eq!(g.row_height(1), 60);
    let x_space = g.x_space();
    let y_space = g.y_space();
    assert_eq!(
        g.grid_size(),
        Size::new(150 + 200 + x_space, 80 + 60 + y_space)
    );

    let img = g.render().unwrap();
    // B starts after column 0 and one gap.
    assert_eq!(px(&img, 160, 0), [0, 255, 0, 255]);
    // C starts after row 0 and one gap.
    assert_eq!(px(&img, 0, 90), [0, 0, 255, 255]);
    assert_eq!(px(&img, 149, 149), [0, 0, 255, 255]);
}

#[test]
fn nesting_grid_in_strip_in_grid() {
    let inner = Grid::new([
        vec![Cell::new(block(10, 10, "red")), Cell::new(block(10, 10, "red"))],
        vec![Cell::new(block(10, 10, "red"))],
    ])
    .with_spaces(0, 0);
    let strip = Strip::horizontal([Cell::new(inner), Cell::new(ImageBlock::new(coded(20, 20)))])
        .unwrap()
        .with_space(5);
    assert_eq!(strip.size(), Size::new(45, 20));

    let outer = Grid::new([vec![Cell::new(strip), Cell::Empty, Cell::new(block(5, 5, "black"))]])
        .with_spaces(1, 1);
    assert_eq!(outer.grid_size(), Size::new(45 + 0 + 5 + 2, 20));
    let img = outer.render().unwrap();
    assert_eq!(px(&img, 0, 0), [255, 0, 0, 255]);
    // Inner grid's missing cell and the strip gap show white.
    assert_eq!(px(&img, 15, 15), [255, 255, 255, 255]);
    assert_eq!(px(&img, 22, 0), [255, 255, 255, 255]);
    assert_eq!(px(&img, 25 + 7, 4), [7, 4, 0, 255]);
    assert_eq!(px(&img, 47, 0), [0, 0, 0, 255]);
}

#[test]
fn shared_child_seen_by_both_parents() {
    let leaf: Arc<dyn Visual> = Arc::new(block(30, 10, "blue"));
    let row = Strip::horizontal([Cell::shared(leaf.clone()), Cell::shared(leaf.clone())]).unwrap();
    let col = Strip::vertical([Cell::shared(leaf.clone()), Cell::shared(leaf)]).unwrap();
    assert_eq!(row.size(), Size::new(70, 10));
    assert_eq!(col.size(), Size::new(30, 30));
}

#[test]
fn locked_child_changes_after_placement() {
    let leaf = Arc::new(RwLock::new(ImageBlock::new(coded(30, 10))));
    let row = Strip::horizontal([Cell::shared(leaf.clone()), Cell::shared(leaf.clone())]).unwrap();
    let table = Grid::new([vec![Cell::shared(leaf.clone())], vec![Cell::shared(leaf.clone())]]);
    assert_eq!(row.size(), Size::new(70, 10));
    assert_eq!(table.size(), Size::new(30, 30));

    {
        let mut leaf = leaf.write().unwrap();
        leaf.set_size((20, 20));
        leaf.set_position(Anchor::TopLeft);
    }
    assert_eq!(row.size(), Size::new(50, 20));
    assert_eq!(table.size(), Size::new(20, 50));

    let img = row.render().unwrap();
    assert_eq!((img.width(), img.height()), (50, 20));
    // 30×10 source shrunk into 20×20 is 20×6 at the top edge.
    assert_eq!(px(&img, 30, 0)[3], 255);
    assert_eq!(px(&img, 30, 10), [255, 255, 255, 255]);
    let img = table.render().unwrap();
    assert_eq!((img.width(), img.height()), (20, 50));
}

#[test]
fn half_opaque_containers_keep_their_alpha() {
    let cells = || [Cell::new(block(10, 10, "red")), Cell::new(block(10, 10, "red"))];
    let strip = Strip::horizontal(cells()).unwrap().with_opacity(0.5).unwrap();
    let grid = Grid::new([Vec::from(cells())]).with_opacity(0.5).unwrap();
    for img in [strip.render().unwrap(), grid.render().unwrap()] {
        assert_eq!(px(&img, 15, 5), [255, 255, 255, 128]);
        assert_eq!(px(&img, 5, 5), [255, 0, 0, 255]);
    }
}

#[test]
fn fixed_container_fits_its_content() {
    let s = Strip::horizontal([
        Cell::new(ImageBlock::new(coded(100, 100))),
        Cell::new(ImageBlock::new(coded(100, 100))),
    ])
    .unwrap()
    .with_space(0)
    .with_size((100, 100))
    .with_background("black")
    .unwrap();
    assert_eq!(s.element_size(), Size::new(100, 50));
    let img = s.render().unwrap();
    assert_eq!((img.width(), img.height()), (100, 100));
    assert_eq!(px(&img, 50, 10), [0, 0, 0, 255]);
}

#[test]
fn render_is_idempotent() {
    let tree = Grid::new([
        vec![Cell::new(ImageBlock::new(coded(97, 61)).with_size((40, 40)))],
        vec![Cell::new(
            Strip::horizontal([Cell::new(block(7, 7, "magenta")), Cell::Empty])
                .unwrap()
                .with_opacity(0.5)
                .unwrap(),
        )],
    ]);
    let a = tree.render().unwrap();
    let b = tree.render().unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn rgb_tree_renders_rgb() {
    let s = Strip::new()
        .with_mode(Mode::Rgb)
        .with_cells([Cell::new(block(4, 4, "red").with_mode(Mode::Rgb))])
        .unwrap();
    let img = s.render().unwrap();
    assert_eq!(Mode::of(&img), Mode::Rgb);
    assert_eq!(img.to_rgb8().get_pixel(0, 0).0, [255, 0, 0]);
}

#[test]
fn png_output() {
    let img = block(3, 3, "yellow").render().unwrap();
    let bytes = raster::encode_png(&img).unwrap();
    let back = ImageCrateRasters
        .load(RasterSource::Bytes(bytes))
        .unwrap();
    assert_eq!(back.to_rgba8().get_pixel(1, 1).0, [255, 255, 0, 255]);
}
