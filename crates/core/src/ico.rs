use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, RgbaImage, imageops};

use crate::data::{ICO_FILE_NAME, ico_source_name};
use crate::resource_loader::load_image;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IcoOutcome {
    /// `favicon.ico` was written with frames of these sizes, ascending.
    Written { path: PathBuf, frame_sizes: Vec<u32> },
    /// None of the source PNGs existed, nothing was written.
    Skipped { missing: Vec<PathBuf> },
}

/// Build `favicon.ico` in `output_dir` from the `favicon-NxN.png` files
/// already rendered there.
///
/// Missing source PNGs are tolerated; if all of them are missing the ICO is
/// skipped and any existing `favicon.ico` is left as it is.
pub fn assemble_ico(output_dir: &Path, ico_sizes: &[u32]) -> Result<IcoOutcome> {
    let mut sources = Vec::new();
    let mut missing = Vec::new();

    for &size in ico_sizes {
        let png_path = output_dir.join(ico_source_name(size));
        if png_path.is_file() {
            sources.push(load_image(&png_path)?);
        } else {
            tracing::debug!(path = %png_path.display(), "ICO source PNG missing");
            missing.push(png_path);
        }
    }

    if sources.is_empty() {
        tracing::warn!(dir = %output_dir.display(), "no source PNGs for favicon.ico");
        return Ok(IcoOutcome::Skipped { missing });
    }

    let frames = select_frames(&sources, ico_sizes);
    if frames.is_empty() {
        tracing::warn!(dir = %output_dir.display(), "source PNGs are smaller than every ICO size");
        return Ok(IcoOutcome::Skipped { missing });
    }

    let frame_sizes = frames.iter().map(|frame| frame.width()).collect();

    let ico_path = output_dir.join(ICO_FILE_NAME);
    write_ico(&ico_path, &frames)?;

    Ok(IcoOutcome::Written {
        path: ico_path,
        frame_sizes,
    })
}

// 每个尺寸优先使用同尺寸的图片，否则从最大的图片缩小，不放大
fn select_frames(sources: &[RgbaImage], ico_sizes: &[u32]) -> Vec<RgbaImage> {
    let mut sizes = ico_sizes.to_vec();
    sizes.sort_unstable();
    sizes.dedup();

    let largest = sources.iter().max_by_key(|img| img.width().max(img.height()));

    let mut frames = Vec::new();
    for size in sizes {
        if let Some(exact) = sources.iter().find(|img| img.dimensions() == (size, size)) {
            frames.push(exact.clone());
        } else if let Some(largest) = largest
            && largest.width() > size
            && largest.height() > size
        {
            frames.push(imageops::resize(
                largest,
                size,
                size,
                imageops::FilterType::Lanczos3,
            ));
        }
    }

    frames
}

fn write_ico(path: &Path, frames: &[RgbaImage]) -> Result<()> {
    let ico_frames = frames
        .iter()
        .map(|img| {
            let (width, height) = img.dimensions();
            IcoFrame::as_png(img.as_raw(), width, height, ExtendedColorType::Rgba8)
                .with_context(|| format!("failed to encode {width}x{height} ICO frame"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut buf = Vec::new();
    IcoEncoder::new(&mut buf)
        .encode_images(&ico_frames)
        .context("failed to encode ICO container")?;

    fs::write(path, buf).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn solid(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([10, 20, 30, 255]))
    }

    fn dims(frames: &[RgbaImage]) -> Vec<(u32, u32)> {
        frames.iter().map(|f| f.dimensions()).collect()
    }

    #[test]
    fn exact_sizes_are_used_in_ascending_order() {
        let sources = vec![solid(48), solid(16), solid(32)];
        let frames = select_frames(&sources, &[16, 32, 48]);

        assert_eq!(dims(&frames), vec![(16, 16), (32, 32), (48, 48)]);
    }

    #[test]
    fn missing_size_is_downsampled_from_largest() {
        let sources = vec![solid(16), solid(48)];
        let frames = select_frames(&sources, &[16, 32, 48]);

        assert_eq!(dims(&frames), vec![(16, 16), (32, 32), (48, 48)]);
    }

    #[test]
    fn sizes_above_every_source_are_omitted() {
        let sources = vec![solid(16)];
        let frames = select_frames(&sources, &[16, 32, 48]);

        assert_eq!(dims(&frames), vec![(16, 16)]);
    }

    #[test]
    fn duplicate_requested_sizes_collapse() {
        let sources = vec![solid(32)];
        let frames = select_frames(&sources, &[32, 16, 32]);

        assert_eq!(dims(&frames), vec![(16, 16), (32, 32)]);
    }
}
