use crate::manifest::IconsManifest;
use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const BACKGROUND: Rgba<u8> = Rgba([15, 23, 42, 255]);
pub const TOMATO: Rgba<u8> = Rgba([239, 68, 68, 255]);
pub const HIGHLIGHT: Rgba<u8> = Rgba([252, 165, 165, 180]);
pub const STEM: Rgba<u8> = Rgba([16, 185, 129, 255]);

/// Icons below this size are drawn without a stem.
pub const STEM_MIN_SIZE: u32 = 48;

/// The icon set an extension ships: (size in px, file name).
pub const ICONS: [(u32, &str); 3] = [
    (16, "icon16.png"),
    (48, "icon48.png"),
    (128, "icon128.png"),
];

const RULE_WIDTH: usize = 40;

// Options for the library entry point; `main` fills this from the command line
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
    pub manifest: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            manifest: true,
        }
    }
}

/// Inclusive pixel box `[x0, y0, x1, y1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Bounds {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Box of the main tomato disc.
pub fn tomato_bounds(size: u32) -> Bounds {
    let margin = size / 6;
    Bounds::new(margin, margin, size - margin, size - margin)
}

/// Box of the highlight disc, inset from the tomato's top-left.
pub fn highlight_bounds(size: u32) -> Bounds {
    let highlight_margin = size / 6 + size / 12;
    let highlight_size = size / 4;
    Bounds::new(
        highlight_margin,
        highlight_margin,
        highlight_margin + highlight_size,
        highlight_margin + highlight_size,
    )
}

/// Box of the stem, or `None` for icons too small to carry one.
pub fn stem_bounds(size: u32) -> Option<Bounds> {
    if size < STEM_MIN_SIZE {
        return None;
    }

    let stem_width = size / 8;
    let stem_height = size / 6;
    let stem_x = (size - stem_width) / 2;
    let stem_y = size / 6 / 2;
    Some(Bounds::new(
        stem_x,
        stem_y,
        stem_x + stem_width,
        stem_y + stem_height,
    ))
}

/// Fail when the binary was built without a PNG encoder.
pub fn ensure_png_backend() -> Result<()> {
    if cfg!(feature = "png") {
        Ok(())
    } else {
        anyhow::bail!("PNG support is not available")
    }
}

/// Callers check `ensure_png_backend` first so nothing is written without an encoder.
pub fn generate_icons(args: Args) -> Result<()> {
    // Ensure the output directory exists
    create_dir_all(&args.output).context("Can't create output directory")?;

    println!("Generating FocusFlow Pomodoro icons...");
    println!("{}", "-".repeat(RULE_WIDTH));

    let mut manifest = IconsManifest::new();
    for (size, filename) in ICONS {
        create_icon(size, &args.output.join(filename))?;
        manifest.add_icon(size, filename);
    }

    if args.manifest {
        manifest.write(&args.output)?;
    }

    println!("{}", "-".repeat(RULE_WIDTH));
    println!("✓ All icons generated successfully!");
    println!("\nThe icons are ready to use with your extension.");

    Ok(())
}

/// Render the icon at `size` and write it to `path` as PNG, replacing any existing file.
pub fn create_icon(size: u32, path: &Path) -> Result<()> {
    let canvas = render_icon(size);
    save_png(canvas, path)?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());
    println!("Created {name} ({size}x{size})");
    Ok(())
}

/// Draw the tomato icon onto a fresh `size` x `size` canvas.
pub fn render_icon(size: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size, size, BACKGROUND);

    fill_ellipse(&mut canvas, tomato_bounds(size), TOMATO);

    // Overwrites the disc pixels, no alpha blending
    fill_ellipse(&mut canvas, highlight_bounds(size), HIGHLIGHT);

    if let Some(stem) = stem_bounds(size) {
        fill_rect(&mut canvas, stem, STEM);
    }

    canvas
}

/// Fill the ellipse inscribed in `bounds`, sampling at pixel centers.
fn fill_ellipse(canvas: &mut RgbaImage, bounds: Bounds, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 || bounds.x1 < bounds.x0 || bounds.y1 < bounds.y0 {
        return;
    }

    let center_x = (bounds.x0 + bounds.x1 + 1) as f32 / 2.0;
    let center_y = (bounds.y0 + bounds.y1 + 1) as f32 / 2.0;
    let radius_x = (bounds.x1 - bounds.x0 + 1) as f32 / 2.0;
    let radius_y = (bounds.y1 - bounds.y0 + 1) as f32 / 2.0;

    for y in bounds.y0..=bounds.y1.min(height - 1) {
        for x in bounds.x0..=bounds.x1.min(width - 1) {
            let dx = (x as f32 + 0.5 - center_x) / radius_x;
            let dy = (y as f32 + 0.5 - center_y) / radius_y;
            if dx * dx + dy * dy <= 1.0 {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, bounds: Bounds, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    for y in bounds.y0..=bounds.y1.min(height - 1) {
        for x in bounds.x0..=bounds.x1.min(width - 1) {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn save_png(canvas: RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);

    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut out_file, ImageFormat::Png)
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;
    Ok(())
}

/// What a generated icon looks like at the sample points that matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    pub width: u32,
    pub height: u32,
    pub corners_background: bool,
    pub center_tomato: bool,
    pub stem_pixels: usize,
}

impl IconReport {
    pub fn from_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Self {
                width,
                height,
                corners_background: false,
                center_tomato: false,
                stem_pixels: 0,
            };
        }

        let corners = [
            (0, 0),
            (width - 1, 0),
            (0, height - 1),
            (width - 1, height - 1),
        ];
        let corners_background = corners
            .iter()
            .all(|&(x, y)| *img.get_pixel(x, y) == BACKGROUND);
        let center_tomato = *img.get_pixel(width / 2, height / 2) == TOMATO;
        let stem_pixels = img.pixels().filter(|pixel| **pixel == STEM).count();

        Self {
            width,
            height,
            corners_background,
            center_tomato,
            stem_pixels,
        }
    }

    pub fn is_valid(&self) -> bool {
        let expects_stem = self.width >= STEM_MIN_SIZE;
        self.width == self.height
            && self.corners_background
            && self.center_tomato
            && (self.stem_pixels > 0) == expects_stem
    }
}

/// Load a PNG from disk and sample it.
pub fn inspect_icon(path: &Path) -> Result<IconReport> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load icon {}", path.display()))?
        .to_rgba8();
    Ok(IconReport::from_image(&img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_bounds_at_128() {
        assert_eq!(tomato_bounds(128), Bounds::new(21, 21, 107, 107));
        assert_eq!(highlight_bounds(128), Bounds::new(31, 31, 63, 63));
        assert_eq!(stem_bounds(128), Some(Bounds::new(56, 10, 72, 31)));
    }

    #[test]
    fn test_stem_threshold() {
        assert_eq!(stem_bounds(16), None);
        assert_eq!(stem_bounds(47), None);
        assert_eq!(stem_bounds(48), Some(Bounds::new(21, 4, 27, 12)));
    }

    #[test]
    fn test_shapes_stay_on_canvas() {
        for (size, _) in ICONS {
            let mut boxes = vec![tomato_bounds(size), highlight_bounds(size)];
            boxes.extend(stem_bounds(size));
            for b in boxes {
                assert!(b.x0 <= b.x1 && b.y0 <= b.y1, "{size}: {b:?}");
                assert!(b.x1 < size && b.y1 < size, "{size}: {b:?}");
            }
        }
    }

    #[test]
    fn test_render_128_sample_pixels() {
        let img = render_icon(128);
        assert_eq!(img.dimensions(), (128, 128));
        assert_eq!(*img.get_pixel(64, 64), TOMATO);
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(47, 47), HIGHLIGHT);
        assert_eq!(*img.get_pixel(64, 12), STEM);
    }

    #[test]
    fn test_stem_only_on_larger_icons() {
        for (size, _) in ICONS {
            let report = IconReport::from_image(&render_icon(size));
            assert!(report.is_valid(), "{size}: {report:?}");
            assert_eq!(report.stem_pixels > 0, size >= STEM_MIN_SIZE);
        }
    }

    #[test]
    fn test_stem_pixels_stay_in_stem_box() {
        let img = render_icon(48);
        let stem = stem_bounds(48).unwrap();
        for (x, y, pixel) in img.enumerate_pixels() {
            if *pixel == STEM {
                assert!(stem.contains(x, y), "stray stem pixel at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_disc_is_symmetric() {
        let img = render_icon(128);
        let tomato = tomato_bounds(128);
        // Rows below the highlight and stem mirror left to right around the disc center
        for y in 80..=tomato.y1 {
            for dx in 0..=43 {
                let left = img.get_pixel(tomato.x0 + dx, y);
                let right = img.get_pixel(tomato.x1 - dx, y);
                assert_eq!(left, right, "row {y}, offset {dx}");
            }
        }
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        for size in 0..8 {
            let img = render_icon(size);
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[cfg(not(feature = "png"))]
    #[test]
    fn test_backend_check_fails_without_png() {
        assert!(ensure_png_backend().is_err());
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_icon(48).into_raw(), render_icon(48).into_raw());
    }
}
