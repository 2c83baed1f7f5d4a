use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{ImageReader, RgbaImage};
use resvg::usvg;

pub fn load_svg(path: &Path) -> Result<usvg::Tree> {
    let svg_data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    // 相对资源按 SVG 所在目录解析
    let mut opt = usvg::Options {
        resources_dir: fs::canonicalize(path)
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf())),
        ..Default::default()
    };
    Arc::make_mut(&mut opt.fontdb).load_system_fonts();

    usvg::Tree::from_data(&svg_data, &opt)
        .with_context(|| format!("failed to parse SVG {}", path.display()))
}

pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to detect image format of {}", path.display()))?
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    Ok(img.to_rgba8())
}
