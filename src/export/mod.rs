mod docx;
mod layout;

pub use docx::{DocxWriter, DOCX_MIME};
pub use layout::{
    build_blocks, Align, Block, Logo, TableStyle, DOCUMENT_TITLE, NOT_FILLED, PRIZE_HEADER,
    SCHEDULE_HEADER, UNTITLED,
};

use crate::config::Config;
use crate::error::{PlannerError, Result};
use crate::models::{Draft, FieldId};
use image::ImageFormat;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Settings the serializer reads from [`Config`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub font_family: String,
    pub logo_path: Option<PathBuf>,
}

impl From<&Config> for ExportOptions {
    fn from(config: &Config) -> Self {
        Self {
            font_family: config.font_family.clone(),
            logo_path: config.logo_path.clone(),
        }
    }
}

/// Reads the logo at `path` if it is a PNG with known dimensions.
///
/// A missing or unreadable logo is not an error; the document is simply
/// exported without it.
pub fn probe_logo(path: &Path) -> Option<Logo> {
    if !path.is_file() {
        debug!("No logo at {:?}", path);
        return None;
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping logo {:?}: {}", path, e);
            return None;
        }
    };

    match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => {}
        _ => {
            warn!("Skipping logo {:?}: not a PNG image", path);
            return None;
        }
    }

    match image::image_dimensions(path) {
        Ok((width_px, height_px)) => Some(Logo {
            bytes,
            width_px,
            height_px,
        }),
        Err(e) => {
            warn!("Skipping logo {:?}: {}", path, e);
            None
        }
    }
}

/// Serializes `draft` as a `.docx` document.
///
/// The draft is only read. Any failure aborts the whole export; no partial
/// document is returned.
pub fn serialize(draft: &Draft, options: &ExportOptions) -> Result<Vec<u8>> {
    let logo = options.logo_path.as_deref().and_then(probe_logo);
    let blocks = build_blocks(draft, logo);
    let bytes = DocxWriter::new(options.font_family.as_str()).write(&blocks)?;

    info!(
        name = draft.get(FieldId::Name),
        bytes = bytes.len(),
        "Proposal document serialized"
    );
    Ok(bytes)
}

/// File name for an exported proposal: `{prefix}_{name}.docx`.
///
/// Characters that are unsafe in file names on common platforms become `_`.
pub fn export_filename(proposal_name: &str, prefix: &str) -> Result<String> {
    let unsafe_chars = Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#)
        .map_err(|e| PlannerError::Internal(format!("Invalid filename pattern: {}", e)))?;

    let name = proposal_name.trim();
    let name = if name.is_empty() { UNTITLED } else { name };
    let file_name = format!("{}_{}.docx", prefix.trim(), name);

    Ok(unsafe_chars.replace_all(&file_name, "_").into_owned())
}
