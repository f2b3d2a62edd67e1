use std::{fs, path::Path};

use crate::error::{ConvertError, Result};
use crate::records::MovieRecord;

pub const CSV_HEADERS: [&str; 4] = ["movie_id", "title", "release_date", "genres"];

/// Writes `records` as CSV to `path`, creating or truncating it.
///
/// The document is assembled in memory first so a serialization failure never
/// leaves a half-written file behind. Rows end in CRLF on every platform and
/// fields are quoted only when they contain a delimiter, quote or line break.
pub fn write_movies_csv<P: AsRef<Path>>(path: P, records: &[MovieRecord]) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_csv_bytes(records).map_err(|source| ConvertError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, bytes).map_err(|e| ConvertError::OutputWriteFailure {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "wrote csv");
    Ok(())
}

fn to_csv_bytes(records: &[MovieRecord]) -> std::result::Result<Vec<u8>, csv::Error> {
    // Header is written by hand so an empty record set still gets one.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    wtr.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::read_movies_csv;
    use tempfile::tempdir;

    fn movie(id: &str, title: &str, genres: &[&str]) -> MovieRecord {
        MovieRecord {
            movie_id: id.to_owned(),
            title: title.to_owned(),
            release_date: "01-Jan-1995".to_owned(),
            genres: genres.iter().map(|g| (*g).to_owned()).collect(),
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        let records = vec![
            movie("1", "Toy Story (1995)", &["Animation", "Children", "Comedy"]),
            movie("3", "Four Rooms (1995)", &["Unknown"]),
        ];

        write_movies_csv(&path, &records).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "movie_id,title,release_date,genres\r\n\
             1,Toy Story (1995),01-Jan-1995,Animation|Children|Comedy\r\n\
             3,Four Rooms (1995),01-Jan-1995,Unknown\r\n"
        );
    }

    #[test]
    fn quotes_fields_with_special_characters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        let records = vec![
            movie("5", "Shawshank Redemption, The (1994)", &["Drama"]),
            movie("6", "\"Quoted\" Title", &["War"]),
            movie("7", "Line\nBreak", &["Drama"]),
        ];

        write_movies_csv(&path, &records).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("5,\"Shawshank Redemption, The (1994)\",01-Jan-1995,Drama\r\n"));
        assert!(written.contains("6,\"\"\"Quoted\"\" Title\",01-Jan-1995,War\r\n"));
        assert!(written.contains("7,\"Line\nBreak\",01-Jan-1995,Drama\r\n"));

        assert_eq!(read_movies_csv(&path).unwrap(), records);
    }

    #[test]
    fn empty_records_write_only_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");

        write_movies_csv(&path, &[]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "movie_id,title,release_date,genres\r\n"
        );
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "stale contents that are longer than the new file\n".repeat(10)).unwrap();

        write_movies_csv(&path, &[]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "movie_id,title,release_date,genres\r\n"
        );
    }

    #[test]
    fn missing_directory_is_write_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("movies.csv");

        let err = write_movies_csv(&path, &[]).unwrap_err();

        match err {
            ConvertError::OutputWriteFailure { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected OutputWriteFailure, got {:?}", other),
        }
        assert!(!path.exists());
    }
}
