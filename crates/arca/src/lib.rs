//! arca: architecture recovery and concept analysis.
//!
//! arca inspects a source repository, mines natural-language domain concepts
//! from its identifiers, ranks them by relevance across the repository, and
//! tags the files whose concept density marks them as data-access code. Call
//! sites detected by an external analysis engine are folded together with the
//! tagged files into a repository tree for review.

#![warn(missing_docs)]

pub mod cli;
