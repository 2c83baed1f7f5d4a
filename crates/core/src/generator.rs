use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::data::{DEFAULT_ICO_SIZES, IconSpec, SizeTable, validate_ico_sizes};
use crate::ico::{IcoOutcome, assemble_ico};
use crate::rasterizer::{render_square, save_png};
use crate::resource_loader::load_svg;

/// Favicon directory relative to the project root.
pub const DEFAULT_FAVICON_DIR: &str = "packages/react-ui/public/favicons";
pub const DEFAULT_SOURCE_NAME: &str = "favicon.svg";

/// Steps reported while a run is in progress.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Started { source: &'a Path, output_dir: &'a Path },
    Rendering(&'a IconSpec),
    AssemblingIco,
    IcoFinished(&'a IcoOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPng {
    pub path: PathBuf,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub pngs: Vec<GeneratedPng>,
    pub ico: IcoOutcome,
}

pub struct FaviconGenerator {
    source: PathBuf,
    output_dir: PathBuf,
    table: SizeTable,
    ico_sizes: Vec<u32>,
}

impl FaviconGenerator {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        FaviconGenerator {
            source: source.into(),
            output_dir: output_dir.into(),
            table: SizeTable::default(),
            ico_sizes: DEFAULT_ICO_SIZES.to_vec(),
        }
    }

    /// Generator using the fixed layout under `root`.
    pub fn for_project(root: &Path) -> Self {
        let favicon_dir = root.join(DEFAULT_FAVICON_DIR);
        Self::new(favicon_dir.join(DEFAULT_SOURCE_NAME), favicon_dir)
    }

    pub fn with_size_table(mut self, table: SizeTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_ico_sizes(mut self, ico_sizes: Vec<u32>) -> Result<Self> {
        validate_ico_sizes(&ico_sizes)?;
        self.ico_sizes = ico_sizes;
        Ok(self)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn size_table(&self) -> &SizeTable {
        &self.table
    }

    pub fn check_prerequisites(&self) -> Result<()> {
        if !self.source.is_file() {
            bail!("SVG source not found at {}", self.source.display());
        }
        Ok(())
    }

    /// Render every PNG in the size table, then build `favicon.ico`.
    ///
    /// Stops at the first error; files written before it stay on disk.
    pub fn run(&self, mut report: impl FnMut(Progress<'_>)) -> Result<GenerationReport> {
        self.check_prerequisites()?;

        report(Progress::Started {
            source: &self.source,
            output_dir: &self.output_dir,
        });

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;

        let tree = load_svg(&self.source)?;

        let mut pngs = Vec::with_capacity(self.table.len());
        for spec in &self.table {
            report(Progress::Rendering(spec));

            let png_path = self.output_dir.join(&spec.file_name);
            let image = render_square(&tree, spec.size)
                .with_context(|| format!("failed to render {}", spec.file_name))?;
            save_png(&image, &png_path)?;

            tracing::debug!(file = %spec.file_name, size = spec.size, "rendered PNG");
            pngs.push(GeneratedPng {
                path: png_path,
                size: spec.size,
            });
        }

        report(Progress::AssemblingIco);
        let ico = assemble_ico(&self.output_dir, &self.ico_sizes)?;
        report(Progress::IcoFinished(&ico));

        tracing::info!(
            dir = %self.output_dir.display(),
            pngs = pngs.len(),
            "favicon generation finished"
        );

        Ok(GenerationReport {
            output_dir: self.output_dir.clone(),
            pngs,
            ico,
        })
    }
}
