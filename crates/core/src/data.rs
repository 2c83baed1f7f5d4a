use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const ICO_FILE_NAME: &str = "favicon.ico";
pub const DEFAULT_ICO_SIZES: [u32; 3] = [16, 32, 48];

// ICO 目录项用一个字节存储尺寸，0 表示 256
pub const MAX_ICO_SIZE: u32 = 256;

// 超出此尺寸的位图在分配像素缓冲区时可能直接中止进程
pub const MAX_ICON_SIZE: u32 = 8192;

const DEFAULT_ICON_SPECS: [(&str, u32); 9] = [
    ("favicon-16x16.png", 16),
    ("favicon-32x32.png", 32),
    ("favicon-48x48.png", 48),
    ("favicon-64x64.png", 64),
    ("favicon-96x96.png", 96),
    ("favicon-128x128.png", 128),
    ("apple-touch-icon.png", 180),
    ("android-chrome-192x192.png", 192),
    ("android-chrome-512x512.png", 512),
];

/// One square PNG to rasterize.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct IconSpec {
    #[serde(rename = "file")]
    pub file_name: String,
    pub size: u32,
}

impl IconSpec {
    pub fn new(file_name: impl Into<String>, size: u32) -> Self {
        IconSpec {
            file_name: file_name.into(),
            size,
        }
    }
}

/// Ordered, validated list of icons to generate.
///
/// File names are unique plain `.png` names and every size is in
/// `1..=MAX_ICON_SIZE`.
/// Order only decides the order in which files are rendered and reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeTable {
    specs: Vec<IconSpec>,
}

impl SizeTable {
    pub fn new(specs: Vec<IconSpec>) -> Result<Self> {
        if specs.is_empty() {
            bail!("size table has no entries");
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.size == 0 {
                bail!("'{}' has a size of zero", spec.file_name);
            }

            if spec.size > MAX_ICON_SIZE {
                bail!(
                    "'{}' has size {}, the maximum is {MAX_ICON_SIZE}",
                    spec.file_name,
                    spec.size
                );
            }

            if spec.file_name.is_empty()
                || spec.file_name.contains(['/', '\\'])
                || spec.file_name == ICO_FILE_NAME
            {
                bail!("'{}' is not a valid output file name", spec.file_name);
            }

            if !spec.file_name.to_ascii_lowercase().ends_with(".png") {
                bail!("'{}' must have a .png extension", spec.file_name);
            }

            if !seen.insert(spec.file_name.as_str()) {
                bail!("'{}' appears more than once", spec.file_name);
            }
        }

        Ok(SizeTable { specs })
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for SizeTable {
    fn default() -> Self {
        SizeTable {
            specs: DEFAULT_ICON_SPECS
                .iter()
                .map(|(name, size)| IconSpec::new(*name, *size))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SizeTable {
    type Item = &'a IconSpec;
    type IntoIter = std::slice::Iter<'a, IconSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

pub fn default_icon_specs() -> Vec<IconSpec> {
    SizeTable::default().specs
}

/// Name of the PNG the ICO step reads back for a given frame size.
pub fn ico_source_name(size: u32) -> String {
    format!("favicon-{size}x{size}.png")
}

pub fn validate_ico_sizes(sizes: &[u32]) -> Result<()> {
    if sizes.is_empty() {
        bail!("no ICO sizes configured");
    }

    for &size in sizes {
        if size == 0 || size > MAX_ICO_SIZE {
            bail!("ICO size {size} is outside 1..={MAX_ICO_SIZE}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_published_layout() {
        let table = SizeTable::default();
        let entries: Vec<(&str, u32)> = table
            .iter()
            .map(|spec| (spec.file_name.as_str(), spec.size))
            .collect();

        assert_eq!(entries, DEFAULT_ICON_SPECS.to_vec());
    }

    #[test]
    fn default_table_passes_validation() {
        let table = SizeTable::new(default_icon_specs()).unwrap();
        assert_eq!(table, SizeTable::default());
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = SizeTable::new(vec![
            IconSpec::new("icon.png", 16),
            IconSpec::new("icon.png", 32),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_zero_size() {
        assert!(SizeTable::new(vec![IconSpec::new("icon.png", 0)]).is_err());
    }

    #[test]
    fn rejects_oversized_icons() {
        let err = SizeTable::new(vec![IconSpec::new("big.png", 4_000_000)]).unwrap_err();
        assert!(err.to_string().contains("the maximum is 8192"), "{err}");

        assert!(SizeTable::new(vec![IconSpec::new("big.png", MAX_ICON_SIZE)]).is_ok());
        assert!(SizeTable::new(vec![IconSpec::new("big.png", MAX_ICON_SIZE + 1)]).is_err());
    }

    #[test]
    fn rejects_paths_and_foreign_extensions() {
        assert!(SizeTable::new(vec![IconSpec::new("../icon.png", 16)]).is_err());
        assert!(SizeTable::new(vec![IconSpec::new("icon.jpg", 16)]).is_err());
        assert!(SizeTable::new(vec![IconSpec::new("favicon.ico", 16)]).is_err());
        assert!(SizeTable::new(Vec::new()).is_err());
    }

    #[test]
    fn ico_sizes_bounds() {
        assert!(validate_ico_sizes(&DEFAULT_ICO_SIZES).is_ok());
        assert!(validate_ico_sizes(&[256]).is_ok());
        assert!(validate_ico_sizes(&[0]).is_err());
        assert!(validate_ico_sizes(&[512]).is_err());
        assert!(validate_ico_sizes(&[]).is_err());
    }

    #[test]
    fn ico_source_names_follow_png_naming() {
        assert_eq!(ico_source_name(48), "favicon-48x48.png");
    }
}
