mod data;
mod generator;
mod ico;
mod rasterizer;
mod resource_loader;

pub use data::{DEFAULT_ICO_SIZES, ICO_FILE_NAME, IconSpec, SizeTable, default_icon_specs};
pub use generator::{
    DEFAULT_FAVICON_DIR, DEFAULT_SOURCE_NAME, FaviconGenerator, GeneratedPng, GenerationReport,
    Progress,
};
pub use ico::{IcoOutcome, assemble_ico};
