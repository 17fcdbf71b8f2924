//! In-memory prefix completion with lazy top-k ranking.
//!
//! Build once from a word list (optionally with ranks and identifiers), then
//! answer "every word starting with `p`" and "the `k` best words starting
//! with `p`" in logarithmic time. A built index serializes to JSON or to a
//! checksummed binary snapshot and restores without re-sorting.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ search       │────▶│ index::WordStore │────▶│ CompletionIndex  │
//! │ (bisection)  │     │ (buffer, starts, │     │ (find_words,     │
//! └──────────────┘     │  prefix_bounds)  │     │  find_top_k_*)   │
//!                      └──────────────────┘     └──────────────────┘
//! ┌──────────────┐     ┌──────────────────┐              │
//! │ ranking      │────▶│ top_k_indices    │──────────────┘
//! │ (SegmentTree,│     │ (tree + heap,    │              │
//! │  PriorityQ.) │     │  interval split) │              ▼
//! └──────────────┘     └──────────────────┘     ┌──────────────────┐
//!                                               │ snapshot, binary │
//!                                               │ (JSON, FCMP)     │
//!                                               └──────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module     | Purpose                                                   |
//! |------------|-----------------------------------------------------------|
//! | `search`   | Leftmost/rightmost bisection with a three-way comparator  |
//! | `ranking`  | Segment tree, min-heap, rank order and the top-k loop     |
//! | `index`    | Word store and the completion index                       |
//! | `types`    | The five build requests                                   |
//! | `snapshot` | Serializable state (serde)                                |
//! | `binary`   | Compact binary snapshots with a CRC32 footer              |
//! | `verify`   | Debug-build contracts for the structural invariants       |
//!
//! # Usage
//!
//! ```
//! use fastcomplete::CompletionIndex;
//!
//! let index = CompletionIndex::from_ranked_words([
//!     ("sally", 2.0),
//!     ("sells", 5.0),
//!     ("seashells", 3.0),
//!     ("seashore", 6.0),
//! ])?;
//!
//! assert_eq!(index.find_words("sea"), vec!["seashells", "seashore"]);
//! assert_eq!(index.find_top_k_words("se", 2)?, vec!["seashells", "sells"]);
//!
//! let restored: CompletionIndex = CompletionIndex::from_json(&index.to_json()?)?;
//! assert_eq!(restored.find_top_k_words("se", 2)?, vec!["seashells", "sells"]);
//! # Ok::<(), fastcomplete::CompletionError>(())
//! ```

// Module declarations
pub mod binary;
pub mod config;
pub mod error;
pub mod index;
pub mod ranking;
pub mod search;
pub mod snapshot;
pub mod testing;
pub mod types;
pub mod verify;

// Re-exports for public API
pub use config::{CompletionsConfig, DEFAULT_SEPARATOR};
pub use error::{CompletionError, Result};
pub use index::{CompletionIndex, WordStore};
pub use ranking::{top_k_indices, Combine, PriorityQueue, RankOrder, RankTree, SegmentTree};
pub use search::{leftmost_match, rightmost_match};
pub use snapshot::{Snapshot, SnapshotRef, TreeRef, TreeSnapshot};
pub use types::BuildRequest;
