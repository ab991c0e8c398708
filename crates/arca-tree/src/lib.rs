//! Repository tree assembly for arca.
//!
//! Folds flat locations of tagged files and detected code fragments into a
//! tree of repository, directories, files and fragments. A location has the
//! form `<root>/<dir>/.../<file>[#suffix]`; nodes are matched by exact path and
//! reused, so repeated insertion never duplicates a node.

#![warn(missing_docs)]

mod error;
mod node;
mod tree;

pub use error::TreeError;
pub use node::{
    CodeFragment, Directory, File, FragmentParams, Operation, PreorderIter, strip_suffix,
};
pub use tree::{
    FileEntry, Repository, TreeEntry, build_directory_tree, canonicalize_location, insert,
};
