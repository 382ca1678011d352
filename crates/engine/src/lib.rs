//! AST indexing and tag-based filtering.
//!
//! A parsed tree is walked once to build an inverted index
//! (property name → stringified value → owning nodes) and the list of
//! search terms offered for autocomplete. Filters made of `tag=term` pairs
//! are resolved against the index into a path-keyed set of subtrees.
//! [`Session`] ties these together for one loaded source and only rebuilds
//! when the source checksum changes.

pub mod filter;
pub mod hash;
pub mod index;
pub mod path;
pub mod session;
pub mod span;
pub mod terms;
pub mod visibility;
pub mod walk;

pub use filter::{evaluate, Filter, FilterResult, FilterTag};
pub use hash::checksum;
pub use index::{build_search_index, build_search_index_with, SearchIndex};
pub use path::{build_path, NodeState, ROOT_PATH};
pub use session::{CodeState, Session};
pub use span::{extract_position, Span};
pub use terms::{extract_search_terms, extract_search_terms_with, SearchTerms};
pub use visibility::{project, KeyVisibility, Projection, COMMON_KEYS};
pub use walk::{find_by_path, walk, Visitor, WalkLimits, WalkStats, DEFAULT_MAX_DEPTH};
