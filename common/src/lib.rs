//! Excel Updater Common Library
//!
//! ワークシート構造の推定とセル解決・加算更新のロジック。
//! ファイルI/Oを持たず、明示的なセルグリッドに対する純粋関数で構成する。

pub mod error;
pub mod grid;
pub mod layout;
pub mod normalizer;
pub mod record;
pub mod alias;
pub mod structure;
pub mod resolver;
pub mod engine;

pub use error::{Error, Result};
pub use grid::{cell_ref, column_letter, CellValue, Grid, MergedRange};
pub use layout::SheetLayout;
pub use normalizer::normalize_header;
pub use record::{parse_record, RawRecord};
pub use alias::TradeAliases;
pub use structure::{detect_structure, HeaderGroup, SheetStructure, SubHeader};
pub use resolver::{find_header_group, find_location_column, find_trade_row, resolve_cell};
pub use engine::{apply_updates, UpdateResult};
