//! Search paths and project path virtualization.

use camino::{Utf8Path, Utf8PathBuf};

/// Scheme prefix for project-relative resource paths.
pub const PROJECT_SCHEME: &str = "res://";

/// An ordered list of directories used to resolve relative file references
/// (document includes, standard libraries, referenced images).
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    roots: Vec<Utf8PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, root: impl Into<Utf8PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }

    /// Resolves `name` against the search roots. Absolute paths resolve to
    /// themselves. Returns `None` when no candidate exists on disk.
    pub fn find(&self, name: &Utf8Path) -> Option<Utf8PathBuf> {
        if name.is_absolute() {
            return name.exists().then(|| name.to_owned());
        }
        self.roots.iter().find_map(|root| {
            let candidate = root.join(name);
            candidate.exists().then_some(candidate)
        })
    }

    pub fn as_string(&self) -> String {
        let parts: Vec<&str> = self.roots.iter().map(|p| p.as_str()).collect();
        parts.join(";")
    }
}

/// Maps between `res://` virtual paths and absolute filesystem paths,
/// rooted at the project directory. Passed explicitly into every load so
/// calls stay independent of each other.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: Utf8PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// `res://a/b` (or a plain relative path) to an absolute path.
    pub fn globalize(&self, path: &Utf8Path) -> Utf8PathBuf {
        match path.as_str().strip_prefix(PROJECT_SCHEME) {
            Some(rel) => self.root.join(rel),
            None if path.is_absolute() => path.to_owned(),
            None => self.root.join(path),
        }
    }

    /// Absolute path to the `res://` form. Paths outside the project are
    /// returned unchanged.
    pub fn localize(&self, path: &Utf8Path) -> Utf8PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rel) => Utf8PathBuf::from(format!("{PROJECT_SCHEME}{rel}")),
            Err(_) => path.to_owned(),
        }
    }

    /// Project-relative form without the scheme prefix, with separators
    /// normalized to `/`. Used for texture references extracted from baked
    /// documents, which may carry backslashes.
    pub fn project_relative(&self, raw: &str) -> Utf8PathBuf {
        let slashed = raw.replace('\\', "/");
        let path = Utf8PathBuf::from(slashed);
        let localized = self.localize(&path);
        match localized.as_str().strip_prefix(PROJECT_SCHEME) {
            Some(rel) => Utf8PathBuf::from(rel),
            None => localized,
        }
    }
}

/// Builds the default search path for a load: the running executable's
/// install root and its ancestors, then the project root itself.
pub fn default_search_path(project: &ProjectPaths) -> SearchPath {
    let mut search = SearchPath::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Ok(exe) = Utf8PathBuf::from_path_buf(exe) {
            let mut dir = exe.parent();
            for _ in 0..3 {
                match dir {
                    Some(d) => {
                        search.append(d);
                        dir = d.parent();
                    }
                    None => break,
                }
            }
        }
    }
    search.append(project.root());
    search
}
