//! Assembly of flat locations into a repository tree.

use arca_concepts::{Cluster, Concept, FileAnalysisResult};
use log::{debug, warn};
use serde::Serialize;

use crate::node::{CodeFragment, Directory, File, PreorderIter, strip_suffix};

/// File-level metadata to fold into the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    /// Full path of the file, starting at the repository root.
    pub path: String,
    /// Classification, when tagged.
    pub cluster: Option<Cluster>,
    /// Non-blank lines of code, when measured.
    pub lines_of_code: Option<usize>,
}

impl From<&FileAnalysisResult> for FileEntry {
    fn from(result: &FileAnalysisResult) -> Self {
        Self {
            path: result.file.clone(),
            cluster: result.cluster,
            lines_of_code: Some(result.file_number_of_lines_of_code),
        }
    }
}

/// Something that can be inserted into a repository tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry {
    /// A detected call site, placed under its file.
    Fragment(CodeFragment),
    /// File metadata.
    File(FileEntry),
}

impl TreeEntry {
    /// The entry's location as given.
    pub fn location(&self) -> &str {
        match self {
            Self::Fragment(fragment) => &fragment.location,
            Self::File(file) => &file.path,
        }
    }

    /// Replaces the entry's location.
    fn relocate(&mut self, location: String) {
        match self {
            Self::Fragment(fragment) => fragment.location = location,
            Self::File(file) => file.path = location,
        }
    }
}

/// The root of an assembled tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    /// Repository identifier: the canonical URL or the local root.
    pub path: String,
    /// Top-level directories in insertion order.
    pub directories: Vec<Directory>,
    /// Files directly at the repository root.
    pub files: Vec<File>,
}

impl Repository {
    /// Creates an empty tree rooted at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        let path: String = path.into();
        Self {
            path: path.trim_end_matches('/').to_string(),
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Folds one entry into the tree.
    ///
    /// Missing entries or concepts, and locations outside the repository root,
    /// are skipped with a warning and leave the tree unchanged. Nodes whose path
    /// already exists are reused. Returns true when the tree changed.
    pub fn insert(&mut self, entry: Option<&TreeEntry>, concepts: Option<&[Concept]>) -> bool {
        let Some(entry) = entry else {
            warn!("skipping missing tree entry");
            return false;
        };
        let Some(concepts) = concepts else {
            warn!("skipping {}: no concepts", entry.location());
            return false;
        };
        let path = strip_suffix(entry.location());
        let Some(relative) = self.relative(path) else {
            warn!("skipping {path}: not under {}", self.path);
            return false;
        };
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            warn!("skipping {path}: no file name");
            return false;
        }
        place(
            &mut self.directories,
            &mut self.files,
            &self.path,
            &segments,
            entry,
            concepts,
        )
    }

    /// The part of `path` below the root, if it is under the root.
    fn relative<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.path.as_str())?.strip_prefix('/')
    }

    /// Pre-order traversal of every directory.
    pub fn iter_directories(&self) -> PreorderIter<'_> {
        PreorderIter::over(&self.directories)
    }

    /// Every file, root files first, then each directory's files in pre-order.
    pub fn iter_files(&self) -> impl Iterator<Item = &File> {
        self.files
            .iter()
            .chain(self.iter_directories().flat_map(|d| d.files.iter()))
    }

    /// Looks up a file by its full path.
    pub fn find_file(&self, path: &str) -> Option<&File> {
        self.iter_files().find(|f| f.path == path)
    }

    /// Number of directories at any depth.
    pub fn directory_count(&self) -> usize {
        self.iter_directories().count()
    }

    /// Number of files at any depth.
    pub fn file_count(&self) -> usize {
        self.iter_files().count()
    }

    /// Number of code fragments across all files.
    pub fn fragment_count(&self) -> usize {
        self.iter_files().map(|f| f.fragments.len()).sum()
    }
}

/// Walks `segments` down from one level of the tree, creating missing nodes.
fn place(
    directories: &mut Vec<Directory>,
    files: &mut Vec<File>,
    prefix: &str,
    segments: &[&str],
    entry: &TreeEntry,
    concepts: &[Concept],
) -> bool {
    let Some((name, rest)) = segments.split_first() else {
        return false;
    };
    let path = format!("{prefix}/{name}");

    if rest.is_empty() {
        let index = match files.iter().position(|f| f.path == path) {
            Some(index) => index,
            None => {
                debug!("new file node {path}");
                files.push(File::new(path, *name));
                files.len() - 1
            }
        };
        let file = &mut files[index];
        match entry {
            TreeEntry::Fragment(fragment) => {
                file.add_fragment(fragment);
            }
            TreeEntry::File(meta) => {
                if meta.cluster.is_some() {
                    file.cluster = meta.cluster;
                }
                if meta.lines_of_code.is_some() {
                    file.lines_of_code = meta.lines_of_code;
                }
            }
        }
        file.add_concepts(concepts);
        return true;
    }

    let index = match directories.iter().position(|d| d.path == path) {
        Some(index) => index,
        None => {
            directories.push(Directory::new(path.clone(), *name));
            directories.len() - 1
        }
    };
    let dir = &mut directories[index];
    place(
        &mut dir.directories,
        &mut dir.files,
        &path,
        rest,
        entry,
        concepts,
    )
}

/// Inserts into an optional tree; a missing tree stays missing.
pub fn insert(
    tree: Option<Repository>,
    entry: Option<&TreeEntry>,
    concepts: Option<&[Concept]>,
) -> Option<Repository> {
    let Some(mut tree) = tree else {
        warn!("skipping insert into missing tree");
        return None;
    };
    tree.insert(entry, concepts);
    Some(tree)
}

/// Rewrites a location under `local_root` to start with `canonical` instead.
///
/// Locations outside the local root are returned unchanged.
pub fn canonicalize_location(location: &str, local_root: &str, canonical: &str) -> String {
    let local_root = local_root.trim_end_matches('/');
    match location.strip_prefix(local_root) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('#') => {
            format!("{}{rest}", canonical.trim_end_matches('/'))
        }
        _ => location.to_string(),
    }
}

/// Builds the tree for one repository from file metadata and fragments.
///
/// With a canonical name, the tree is rooted at it and every entry location
/// under `root` is rewritten to use it as prefix.
pub fn build_directory_tree<I>(root: &str, canonical: Option<&str>, entries: I) -> Repository
where
    I: IntoIterator<Item = (TreeEntry, Vec<Concept>)>,
{
    let mut tree = Repository::new(canonical.unwrap_or(root));
    for (mut entry, concepts) in entries {
        if let Some(canonical) = canonical {
            let location = canonicalize_location(entry.location(), root, canonical);
            entry.relocate(location);
        }
        tree.insert(Some(&entry), Some(concepts.as_slice()));
    }
    debug!(
        "assembled {}: {} directories, {} files, {} fragments",
        tree.path,
        tree.directory_count(),
        tree.file_count(),
        tree.fragment_count()
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FragmentParams, Operation};

    fn concepts(names: &[&str]) -> Vec<Concept> {
        names.iter().map(|n| Concept::new(*n).unwrap()).collect()
    }

    fn fragment(location: &str, method: &str) -> TreeEntry {
        TreeEntry::Fragment(
            CodeFragment::new(FragmentParams {
                location: location.into(),
                technology: "mongoose".into(),
                operation: Operation::Read,
                method: method.into(),
                sample: "Movie.find()".into(),
                concepts: concepts(&["movie"]),
                heuristics: "import".into(),
                score: "1".into(),
            })
            .unwrap(),
        )
    }

    #[test]
    fn repeated_location_reuses_node_chain() {
        let mut tree = Repository::new("/tmp/x");
        let first = fragment("/tmp/x/src/models/movie.js#L3", "find");
        let second = fragment("/tmp/x/src/models/movie.js#L9", "findOne");
        let c = concepts(&["movie"]);

        assert!(tree.insert(Some(&first), Some(&c)));
        assert!(tree.insert(Some(&first), Some(&c)));
        assert_eq!(tree.directory_count(), 2);
        assert_eq!(tree.file_count(), 1);
        assert_eq!(tree.fragment_count(), 1);

        tree.insert(Some(&second), Some(&c));
        assert_eq!(tree.directory_count(), 2);
        assert_eq!(tree.file_count(), 1);
        assert_eq!(tree.fragment_count(), 2);

        let file = tree.find_file("/tmp/x/src/models/movie.js").unwrap();
        assert_eq!(file.name, "movie.js");
        assert_eq!(file.concepts, c);
    }

    #[test]
    fn sibling_paths_get_separate_nodes() {
        let mut tree = Repository::new("/r");
        let c = concepts(&["user"]);
        tree.insert(Some(&fragment("/r/src/a.js#1", "find")), Some(&c));
        tree.insert(Some(&fragment("/r/src/b.js#1", "find")), Some(&c));
        tree.insert(Some(&fragment("/r/lib/c.js#1", "find")), Some(&c));
        tree.insert(Some(&fragment("/r/index.js#1", "find")), Some(&c));

        let dirs: Vec<_> = tree.iter_directories().map(|d| d.path.as_str()).collect();
        assert_eq!(dirs, ["/r/src", "/r/lib"]);
        let files: Vec<_> = tree.iter_files().map(|f| f.path.as_str()).collect();
        assert_eq!(files, ["/r/index.js", "/r/src/a.js", "/r/src/b.js", "/r/lib/c.js"]);
    }

    #[test]
    fn missing_inputs_are_no_ops() {
        let mut tree = Repository::new("/r");
        let entry = fragment("/r/a.js#1", "find");
        let c = concepts(&["user"]);

        assert!(!tree.insert(None, Some(&c)));
        assert!(!tree.insert(Some(&entry), None));
        assert_eq!(tree, Repository::new("/r"));

        assert!(insert(None, Some(&entry), Some(&c)).is_none());
        let tree = insert(Some(tree), None, None).unwrap();
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn location_outside_root_is_skipped() {
        let mut tree = Repository::new("/r");
        let c = concepts(&["user"]);
        assert!(!tree.insert(Some(&fragment("/elsewhere/a.js#1", "find")), Some(&c)));
        assert!(!tree.insert(Some(&fragment("/rx/a.js#1", "find")), Some(&c)));
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn file_entry_sets_metadata() {
        let mut tree = Repository::new("/r");
        let entry = TreeEntry::File(FileEntry {
            path: "/r/src/db.js".into(),
            cluster: Some(Cluster::DataAccess),
            lines_of_code: Some(12),
        });
        tree.insert(Some(&entry), Some(&concepts(&["movie", "genre"])));
        tree.insert(Some(&fragment("/r/src/db.js#L2", "find")), Some(&concepts(&["movie"])));

        let file = tree.find_file("/r/src/db.js").unwrap();
        assert_eq!(file.cluster, Some(Cluster::DataAccess));
        assert_eq!(file.lines_of_code, Some(12));
        assert_eq!(file.concepts, concepts(&["movie", "genre"]));
        assert_eq!(file.fragments.len(), 1);
    }

    #[test]
    fn canonical_name_prefixes_every_location() {
        let url = "https://github.com/acme/shop";
        let entries = vec![
            (fragment("/tmp/unzip-1/src/db.js#L1", "find"), concepts(&["order"])),
            (fragment("/tmp/unzip-1/routes/api.js#L4", "get"), concepts(&["order"])),
            (
                TreeEntry::File(FileEntry {
                    path: "/tmp/unzip-1/src/db.js".into(),
                    cluster: Some(Cluster::Other),
                    lines_of_code: Some(3),
                }),
                concepts(&["order"]),
            ),
        ];
        let tree = build_directory_tree("/tmp/unzip-1/", Some(url), entries);

        assert_eq!(tree.path, url);
        assert_eq!(tree.file_count(), 2);
        for dir in tree.iter_directories() {
            assert!(dir.path.starts_with(url), "{}", dir.path);
        }
        for file in tree.iter_files() {
            assert!(file.path.starts_with(url), "{}", file.path);
            for fragment in &file.fragments {
                assert!(fragment.location.starts_with(url), "{}", fragment.location);
            }
        }
    }

    #[test]
    fn canonicalize_leaves_foreign_locations() {
        assert_eq!(
            canonicalize_location("/tmp/a/x.js#L1", "/tmp/a", "https://h/r/"),
            "https://h/r/x.js#L1"
        );
        assert_eq!(
            canonicalize_location("/tmp/ab/x.js", "/tmp/a", "https://h/r"),
            "/tmp/ab/x.js"
        );
    }

    #[test]
    fn without_canonical_name_tree_uses_local_root() {
        let entries = vec![(fragment("/work/app/a.js#1", "find"), concepts(&["user"]))];
        let tree = build_directory_tree("/work/app", None, entries);
        assert_eq!(tree.path, "/work/app");
        assert!(tree.find_file("/work/app/a.js").is_some());
    }

    #[test]
    fn tree_serializes_nested() {
        let entries = vec![(fragment("/r/src/a.js#1", "find"), concepts(&["user"]))];
        let tree = build_directory_tree("/r", None, entries);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["directories"][0]["files"][0]["name"], "a.js");
        assert_eq!(
            json["directories"][0]["files"][0]["fragments"][0]["operation"],
            "READ"
        );
    }
}
