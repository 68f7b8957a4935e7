//! Output generation for batch results.
//!
//! # Submodules
//!
//! - [`table`]: Encodes a [`ResultSet`](crate::models::ResultSet) as a
//!   BOM-prefixed CSV table and rewrites the output file at each checkpoint
//!
//! # Output Structure
//!
//! ```text
//! articles_summary.csv
//! ├── URL,제목,요약,처리시간,상태     # header row
//! ├── https://good.example/a,...,성공
//! └── https://bad.example/b,,,...,실패
//! ```

pub mod table;
