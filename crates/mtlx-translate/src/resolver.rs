//! Document resolution: source reading, standard libraries, modifiers,
//! validation and the baking seam.
//!
//! Baking (flattening arbitrary shading graphs into textures) is owned by
//! the external MaterialX library; this module only defines the seam and a
//! passthrough for documents that are already flat.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use mtlx_document::element::Document;
use mtlx_document::library::load_libraries;
use mtlx_document::modifiers::DocumentModifiers;
use mtlx_document::paths::SearchPath;
use mtlx_document::read::{self, ReadError};
use mtlx_document::validate::{validate, ValidateError};
use mtlx_log::{debug, warn};
use thiserror::Error;

/// Smallest bake resolution handed to the baker when image probing finds
/// nothing larger.
pub const MIN_BAKE_RESOLUTION: u32 = 4;

/// Knobs forwarded to the baker.
#[derive(Debug, Clone, Default)]
pub struct BakeSettings {
    /// Overrides the probed bake width.
    pub width: Option<u32>,
    /// Overrides the probed bake height.
    pub height: Option<u32>,
    /// Requests a high-dynamic-range bake.
    pub hdr: bool,
    /// Averages baked images down to constant values.
    pub average_images: bool,
    /// Folds constant baked images back into literal input values.
    pub optimize_constants: bool,
}

impl BakeSettings {
    pub fn new() -> Self {
        Self {
            optimize_constants: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Error)]
#[error("bake failed: {0}")]
pub struct BakeError(pub String);

/// Flattens a validated document's shading graphs into baked textures
/// written next to `output`, returning the rewritten document.
pub trait TextureBaker: Send + Sync {
    fn bake(
        &self,
        doc: &Document,
        resolution: (u32, u32),
        settings: &BakeSettings,
        output: &Utf8Path,
    ) -> Result<Document, BakeError>;

    fn supports_hdr(&self) -> bool {
        false
    }
}

/// Baker for documents that are already flat. Returns the document as-is
/// and writes nothing.
pub struct PassthroughBaker;

impl TextureBaker for PassthroughBaker {
    fn bake(
        &self,
        doc: &Document,
        _resolution: (u32, u32),
        _settings: &BakeSettings,
        _output: &Utf8Path,
    ) -> Result<Document, BakeError> {
        Ok(doc.clone())
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("standard data libraries not found (searched: {0})")]
    LibrariesMissing(String),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Validate(#[from] ValidateError),
    #[error(transparent)]
    Bake(#[from] BakeError),
    #[error("baker does not support high-dynamic-range output")]
    HdrUnsupported,
}

/// Turns a source `.mtlx` file into a baked, validated document ready for
/// translation: read, import the standard libraries, apply modifiers,
/// validate, bake.
pub struct Resolver {
    pub search_path: SearchPath,
    /// Standard library folders resolved through the search path. Leave
    /// empty for self-contained documents that reference no library.
    pub library_folders: Vec<Utf8PathBuf>,
    pub modifiers: DocumentModifiers,
    pub settings: BakeSettings,
    baker: Arc<dyn TextureBaker>,
}

impl Resolver {
    pub fn new(baker: Arc<dyn TextureBaker>) -> Self {
        Self {
            search_path: SearchPath::new(),
            library_folders: vec![Utf8PathBuf::from("libraries")],
            modifiers: DocumentModifiers::default(),
            settings: BakeSettings::new(),
            baker,
        }
    }

    pub fn resolve(
        &self,
        source: &Utf8Path,
        bake_output: &Utf8Path,
    ) -> Result<Document, ResolveError> {
        if self.settings.hdr && !self.baker.supports_hdr() {
            return Err(ResolveError::HdrUnsupported);
        }

        // The source's own directory always participates in resolution so
        // sibling includes and images are found.
        let mut search = self.search_path.clone();
        if let Some(parent) = source.parent() {
            search.append(parent);
        }

        let mut doc = read::from_file(source, &search)?;

        if !self.library_folders.is_empty() {
            let (library, loaded) = load_libraries(&self.library_folders, &search)?;
            if loaded.is_empty() {
                return Err(ResolveError::LibrariesMissing(search.as_string()));
            }
            debug!("imported {} standard library files", loaded.len());
            doc.import_library(&library);
        }

        self.modifiers.apply(&mut doc);
        validate(&doc)?;

        let resolution = self.bake_resolution(&doc, &search);
        Ok(self.baker.bake(&doc, resolution, &self.settings, bake_output)?)
    }

    /// Picks the bake resolution: the largest dimensions among the images
    /// the document references, floored at [`MIN_BAKE_RESOLUTION`], with
    /// explicit settings taking precedence.
    fn bake_resolution(&self, doc: &Document, search: &SearchPath) -> (u32, u32) {
        let mut width = MIN_BAKE_RESOLUTION;
        let mut height = MIN_BAKE_RESOLUTION;

        for (reference, prefix) in image_references(doc) {
            let mut candidate = Utf8PathBuf::from(reference.replace('\\', "/"));
            if let Some(prefix) = prefix {
                candidate = Utf8PathBuf::from(format!("{prefix}{candidate}"));
            }
            let Some(path) = search.find(&candidate) else {
                debug!("cannot probe image `{candidate}` for bake resolution");
                continue;
            };
            match image::image_dimensions(path.as_std_path()) {
                Ok((w, h)) => {
                    width = width.max(w);
                    height = height.max(h);
                }
                Err(err) => warn!("cannot probe image `{path}`: {err}"),
            }
        }

        (
            self.settings.width.unwrap_or(width),
            self.settings.height.unwrap_or(height),
        )
    }
}

/// Every image file reference in the document, paired with the file prefix
/// in effect where it appears.
fn image_references(doc: &Document) -> Vec<(&str, Option<&str>)> {
    let mut refs = Vec::new();
    let is_image = |category: &str| category == "image" || category == "tiledimage";

    for node in doc.nodes.iter().filter(|n| is_image(&n.category)) {
        if let Some(value) = node.inputs.first().and_then(|i| i.value.as_deref()) {
            refs.push((value, doc.file_prefix.as_deref()));
        }
    }
    for graph in &doc.nodegraphs {
        let prefix = graph.file_prefix.as_deref().or(doc.file_prefix.as_deref());
        for node in graph.nodes.iter().filter(|n| is_image(&n.category)) {
            if let Some(value) = node.inputs.first().and_then(|i| i.value.as_deref()) {
                refs.push((value, prefix));
            }
        }
    }
    refs
}
