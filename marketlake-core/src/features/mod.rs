//! Derived features for price series.
//!
//! - `enrich`: growth ratios, moving averages, volatility and labels per instrument
//! - `index`: growth-only projection for indices and the merged wide index table
//! - `rolling`: positional window primitives shared by both

pub mod enrich;
pub mod index;
pub mod rolling;

pub use enrich::{enrich, enrich_instrument};
pub use index::{merge_index_rows, project_index};
