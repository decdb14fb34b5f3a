use crate::error::{MetaError, Result};
use crate::types::Front;
use polars::prelude::*;
use std::path::Path;

/// Reads reference fronts stored as delimited numeric matrices, one
/// objective vector per row and no header.
pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P, separator: u8) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(false)
            .map_parse_options(|options| options.with_separator(separator))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| {
                MetaError::Configuration(format!(
                    "failed to read front file {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        Ok(df)
    }

    /// Load a front: every column becomes one objective
    pub fn load_front<P: AsRef<Path>>(path: P, separator: u8) -> Result<Front> {
        let df = Self::load(&path, separator)?;
        if df.height() == 0 || df.width() == 0 {
            return Err(MetaError::Configuration(format!(
                "front file {} is empty",
                path.as_ref().display()
            )));
        }

        let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
        for name in df.get_column_names() {
            let column = df.column(name)?.cast(&DataType::Float64)?;
            for (row, value) in rows.iter_mut().zip(column.f64()?.into_iter()) {
                match value {
                    Some(v) if v.is_finite() => row.push(v),
                    _ => {
                        return Err(MetaError::Configuration(format!(
                            "front file {} has a missing or non-numeric entry in column {}",
                            path.as_ref().display(),
                            name
                        )))
                    }
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_front() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0,1.0").unwrap();
        writeln!(file, "0.5,0.25").unwrap();
        writeln!(file, "1.0,0.0").unwrap();

        let front = CsvConnector::load_front(file.path(), b',').unwrap();
        assert_eq!(front, vec![vec![0.0, 1.0], vec![0.5, 0.25], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_space_separated_front() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2 3").unwrap();
        writeln!(file, "4 5 6").unwrap();

        let front = CsvConnector::load_front(file.path(), b' ').unwrap();
        assert_eq!(front[1], vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_non_numeric_entry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.0,abc").unwrap();
        writeln!(file, "1.0,0.0").unwrap();

        assert!(CsvConnector::load_front(file.path(), b',').is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(CsvConnector::load_front("/nonexistent/front.csv", b',').is_err());
    }
}
