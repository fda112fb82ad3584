//! In-process dataframe engine
//!
//! The relational capabilities the graph layer calls into:
//! - typed columnar storage (`Column`) under an ordered `Schema`
//! - projection, selection, renaming and sorting
//! - inner hash join and cartesian product
//! - materialization into `Row`s
//!
//! Frames are immutable once built and safe to share between threads.

pub mod column;
pub mod error;
pub mod row;
pub mod schema;
pub mod table;
pub mod value;

pub use column::Column;
pub use error::{EngineError, EngineResult};
pub use row::Row;
pub use schema::Schema;
pub use table::DataFrame;
pub use value::{DataType, Value};
