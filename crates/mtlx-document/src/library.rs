//! Standard data library loading.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use mtlx_log::warn;

use crate::element::Document;
use crate::paths::SearchPath;
use crate::read::{self, ReadError};

/// Loads every `.mtlx` file found under the given library folders into a
/// single library document, resolving folders through the search path.
///
/// Returns the merged library and the set of files that were read. Callers
/// treat an empty file set as the "standard libraries missing" condition,
/// which is fatal to a load.
pub fn load_libraries(
    folders: &[Utf8PathBuf],
    search: &SearchPath,
) -> Result<(Document, BTreeSet<Utf8PathBuf>), ReadError> {
    let mut library = Document::default();
    let mut loaded = BTreeSet::new();

    for folder in folders {
        let Some(dir) = search.find(folder) else {
            continue;
        };
        let mut files = library_files(&dir);
        files.sort();
        for file in files {
            match read::from_file(&file, search) {
                Ok(doc) => {
                    library.import_library(&doc);
                    loaded.insert(file);
                }
                Err(err) => warn!("failed to read library file `{file}`: {err}"),
            }
        }
    }

    Ok((library, loaded))
}

fn library_files(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut out = Vec::new();
    let entries = match dir.read_dir_utf8() {
        Ok(entries) => entries,
        Err(_) => return out,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        match entry.file_type() {
            Ok(ty) if ty.is_dir() => out.extend(library_files(path)),
            Ok(_) if path.extension() == Some("mtlx") => out.push(path.to_owned()),
            _ => {}
        }
    }
    out
}
