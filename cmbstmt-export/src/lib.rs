//! cmbstmt-export: CSV export, table view (filter/sort) and terminal rendering of parsed statements

pub mod csv_export;
pub mod table;
pub mod view;

pub use csv_export::{CsvOptions, DEFAULT_CSV_NAME, export_csv_file, write_csv, write_csv_with};
pub use table::render_table;
pub use view::{SortDirection, SortField, TableView};
