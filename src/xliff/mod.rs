/*!
 * XLIFF document editing.
 *
 * - `dom`: arena XML tree with lossless parse/serialize
 * - `document`: file load/save
 * - `units`: XLIFF 1.2 / 2.0 unit index
 * - `query`: filtering and pagination
 * - `mutation`: single and batch target updates
 */

pub mod document;
pub mod dom;
pub mod mutation;
pub mod query;
pub mod units;

pub use document::TranslationDocument;
pub use mutation::{apply_update, update_batch, update_one, BatchOutcome, UnitUpdate};
pub use query::{query, UnitFilter, UnitPage};
pub use units::{enumerate, find_unit, TranslationUnit};
