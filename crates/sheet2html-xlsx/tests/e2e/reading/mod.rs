//! Reading tests, one module per workbook feature.

mod data_types;
mod hyperlinks;
mod merged_cells;
mod number_formats;
mod sheets;
