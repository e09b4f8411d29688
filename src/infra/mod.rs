pub mod loader;

pub use loader::{
    parse_csv_rows, parse_table, parse_workbook, read_rates_file, LoadError, RatesClient,
    TableFormat,
};
