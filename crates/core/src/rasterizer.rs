use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::data::MAX_ICON_SIZE;

/// Render `tree` into a `size`x`size` straight-alpha image.
///
/// Both axes are scaled independently so the SVG viewport always fills the
/// whole square, whatever its own aspect ratio.
pub fn render_square(tree: &usvg::Tree, size: u32) -> Result<RgbaImage> {
    if size > MAX_ICON_SIZE {
        bail!("{size}x{size} exceeds the maximum icon size of {MAX_ICON_SIZE}");
    }

    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| anyhow!("cannot allocate a {size}x{size} pixmap"))?;

    let svg_size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        size as f32 / svg_size.width(),
        size as f32 / svg_size.height(),
    );
    resvg::render(tree, transform, &mut pixmap.as_mut());

    pixmap_to_image(&pixmap)
}

// tiny-skia 存储预乘 alpha，PNG 需要直通 alpha
fn pixmap_to_image(pixmap: &tiny_skia::Pixmap) -> Result<RgbaImage> {
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        raw.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .ok_or_else(|| anyhow!("pixmap buffer does not match its dimensions"))
}

pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))
}
