//! The immutable, ordered laptop snapshot.
//!
//! A catalog is loaded once and shared read-only (`Arc<Catalog>`). Reloading
//! means building a new `Catalog` and swapping the `Arc`; rows are never
//! edited in place. Row position is the record's identity and the only
//! ranking the quiz relies on.

use lappybot_core::error::CatalogError;
use lappybot_core::laptop::{LaptopRecord, STANDARD_COLUMNS};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// An ordered, read-only set of laptop records plus the raw cells they were
/// read from (kept for column-faithful comparison output).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    source: Option<PathBuf>,
    columns: Vec<String>,
    records: Vec<LaptopRecord>,
    cells: Vec<Vec<String>>,
}

/// A borrowed view of one catalog row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Position in the catalog (stable identity)
    pub position: usize,
    pub record: &'a LaptopRecord,
    /// Raw cells in [`Catalog::columns`] order
    pub cells: &'a [String],
}

impl Catalog {
    /// A catalog with no rows and no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from records, using the standard dataset columns.
    pub fn from_records(records: Vec<LaptopRecord>) -> Self {
        let cells = records.iter().map(LaptopRecord::cells).collect();
        Self {
            source: None,
            columns: STANDARD_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records,
            cells,
        }
    }

    /// Read a laptop CSV, preserving file row order.
    ///
    /// Any row that cannot be read as a [`LaptopRecord`] (bad number, missing
    /// column, ragged line) fails the whole load.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let malformed = |row: usize, reason: String| CatalogError::Malformed {
            path: path.to_path_buf(),
            row,
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| malformed(0, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| malformed(0, e.to_string()))?
            .clone();
        let columns: Vec<String> = headers.iter().map(String::from).collect();

        let mut records = Vec::new();
        let mut cells = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let row = i + 1;
            let raw = result.map_err(|e| malformed(row, e.to_string()))?;
            let record: LaptopRecord = raw
                .deserialize(Some(&headers))
                .map_err(|e| malformed(row, e.to_string()))?;
            records.push(record);
            cells.push(raw.iter().map(String::from).collect());
        }

        info!(
            path = %path.display(),
            rows = records.len(),
            columns = columns.len(),
            "Catalog loaded"
        );

        Ok(Self {
            source: Some(path.to_path_buf()),
            columns,
            records,
            cells,
        })
    }

    /// Load the catalog, degrading to an empty one on any failure so the
    /// service stays up and answers with zero results.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(error = %e, "Catalog unavailable, continuing with an empty catalog");
                Self::empty()
            }
        }
    }

    /// Column names in load-time order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[LaptopRecord] {
        &self.records
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<Row<'_>> {
        Some(Row {
            position,
            record: self.records.get(position)?,
            cells: self.cells.get(position)?,
        })
    }

    /// All rows in catalog order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records
            .iter()
            .zip(&self.cells)
            .enumerate()
            .map(|(position, (record, cells))| Row {
                position,
                record,
                cells,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/sample_laptops.csv");

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_sample_in_file_order() {
        let catalog = Catalog::load(Path::new(SAMPLE)).unwrap();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.records()[0].model, "TUF Gaming F15");
        assert_eq!(catalog.records()[10].model, "Omen 16");
        let positions: Vec<usize> = catalog.rows().map(|r| r.position).collect();
        assert_eq!(positions, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn columns_echo_header_order() {
        let catalog = Catalog::load(Path::new(SAMPLE)).unwrap();
        assert_eq!(catalog.columns()[0], "index");
        assert_eq!(catalog.columns()[1], "brand");
        assert_eq!(catalog.columns()[4], "Rating");
        assert_eq!(catalog.columns().len(), 22);
        assert!(catalog.rows().all(|r| r.cells.len() == 22));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Catalog::load(Path::new("/nonexistent/laptops.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let file = write_csv("brand,Model,Price_MYR\nasus,TUF,4299\n");
        let err = Catalog::load(file.path()).unwrap_err();
        match err {
            CatalogError::Malformed { row, reason, .. } => {
                assert_eq!(row, 1);
                assert!(reason.contains("missing field"));
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_price_is_malformed() {
        let header = STANDARD_COLUMNS.join(",");
        let row = "asus,TUF,cheap,intel,core i5,6,12,16,SSD,512,None,0,nvidia,dedicated,False,15.6,1920,1080,windows,2";
        let file = write_csv(&format!("{header}\n{row}\n"));
        assert!(matches!(
            Catalog::load(file.path()),
            Err(CatalogError::Malformed { row: 1, .. })
        ));
    }

    #[test]
    fn load_or_empty_degrades_gracefully() {
        let catalog = Catalog::load_or_empty(Path::new("/nonexistent/laptops.csv"));
        assert!(catalog.is_empty());
        assert!(catalog.columns().is_empty());
    }

    #[test]
    fn header_only_file_has_columns_but_no_rows() {
        let file = write_csv(&format!("{}\n", STANDARD_COLUMNS.join(",")));
        let catalog = Catalog::load(file.path()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.columns().len(), STANDARD_COLUMNS.len());
    }

    #[test]
    fn from_records_uses_standard_columns() {
        let catalog = Catalog::from_records(vec![LaptopRecord::new("dell", "XPS 13", 5999.0)]);
        assert_eq!(catalog.columns().len(), STANDARD_COLUMNS.len());
        let row = catalog.get(0).unwrap();
        assert_eq!(row.cells[1], "XPS 13");
        assert!(catalog.get(1).is_none());
    }
}
