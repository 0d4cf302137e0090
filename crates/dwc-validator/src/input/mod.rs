//! Record tables and the delimited-file reader that produces them.

mod parser;
mod source;
mod table;

pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
pub use table::{CellValue, ColumnPresence, NumericParse, RecordTable};
