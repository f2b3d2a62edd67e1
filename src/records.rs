use serde::{Deserialize, Serialize};

use crate::config::MalformedPolicy;
use crate::error::{ConvertError, Result};
use crate::genres::{
    deserialize_genres, genres_from_flags, serialize_genres, GENRE_FLAG_OFFSET, MIN_FIELDS,
};

pub const FIELD_DELIMITER: char = '|';

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct MovieRecord {
    pub movie_id: String,
    pub title: String,
    pub release_date: String,
    #[serde(
        serialize_with = "serialize_genres",
        deserialize_with = "deserialize_genres"
    )]
    pub genres: Vec<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct ParsedRecords {
    pub records: Vec<MovieRecord>,
    /// Non-blank lines dropped for having too few fields.
    pub skipped: usize,
}

/// Parses one `u.item` line. Returns `None` when the line is too short to hold the flag window.
pub fn parse_line(line: &str) -> Option<MovieRecord> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(MovieRecord {
        movie_id: fields[0].to_owned(),
        title: fields[1].to_owned(),
        release_date: fields[2].to_owned(),
        genres: genres_from_flags(fields[GENRE_FLAG_OFFSET..MIN_FIELDS].iter().copied()),
    })
}

pub fn parse_records(content: &str, policy: MalformedPolicy) -> Result<ParsedRecords> {
    let mut parsed = ParsedRecords::default();
    // CRLF and bare CR both count as one line break.
    let content = content.replace("\r\n", "\n").replace('\r', "\n");

    for (idx, raw) in content.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(record) => parsed.records.push(record),
            None => match policy {
                MalformedPolicy::Skip => parsed.skipped += 1,
                MalformedPolicy::Reject => {
                    return Err(ConvertError::MalformedRecord {
                        line: idx + 1,
                        fields: line.split(FIELD_DELIMITER).count(),
                        expected: MIN_FIELDS,
                    })
                }
            },
        }
    }

    tracing::debug!(
        records = parsed.records.len(),
        skipped = parsed.skipped,
        "parsed source records"
    );

    Ok(parsed)
}

/// Reads back a CSV produced by [`crate::writer::write_movies_csv`].
#[cfg(test)]
pub fn read_movies_csv<P: AsRef<std::path::Path>>(
    path: P,
) -> std::result::Result<Vec<MovieRecord>, csv::Error> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    rdr.deserialize::<MovieRecord>().collect()
}
