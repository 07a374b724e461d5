use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Read the ordered record list for one invocation.
///
/// Records arrive one per line, already deaggregated by the upstream
/// ingestion step. Empty lines are kept; the batch builder drops them before
/// delivery. Reads the given file, or stdin when no path is supplied.
pub fn read_records(input: Option<&Path>) -> Result<Vec<String>, ReaderError> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("failed to open input file '{}': {}", path.display(), e),
                )
            })?;
            Ok(collect_lines(BufReader::new(file))?)
        }
        None => Ok(collect_lines(io::stdin().lock())?),
    }
}

fn collect_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_records_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.txt");
        fs::write(&path, "host:a\tmsg:1\nhost:b\tmsg:2\n\nhost:c\tmsg:3\n").unwrap();

        let records = read_records(Some(&path)).unwrap();

        assert_eq!(
            records,
            vec!["host:a\tmsg:1", "host:b\tmsg:2", "", "host:c\tmsg:3"]
        );
    }

    #[test]
    fn test_empty_file_yields_no_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(read_records(Some(&path)).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_records(Some(Path::new("/nonexistent/records.txt"))).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/records.txt"));
    }
}
