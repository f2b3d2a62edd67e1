use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::genres::join_genres;
use crate::records::{parse_records, MovieRecord};
use crate::source::{read_source, SourceEncoding, DEFAULT_ENCODINGS};
use crate::writer::write_movies_csv;

#[derive(Debug)]
pub struct ConversionSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoding: SourceEncoding,
    /// Leading records kept for the progress report.
    pub sample: Vec<MovieRecord>,
    pub total: usize,
    pub skipped: usize,
}

/// Runs read -> parse -> write. Nothing is written unless reading and parsing succeed.
pub fn convert(config: &Config) -> Result<ConversionSummary> {
    let source = read_source(&config.input_path, &DEFAULT_ENCODINGS)?;
    tracing::info!(
        path = %source.path.display(),
        encoding = %source.encoding,
        "read source"
    );

    let parsed = parse_records(&source.content, config.malformed)?;
    write_movies_csv(&config.output_path, &parsed.records)?;

    let total = parsed.records.len();
    let mut sample = parsed.records;
    sample.truncate(config.sample_size);

    Ok(ConversionSummary {
        input_path: source.path,
        output_path: config.output_path.clone(),
        encoding: source.encoding,
        sample,
        total,
        skipped: parsed.skipped,
    })
}

impl ConversionSummary {
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Successfully read {} with {} encoding",
            self.input_path.display(),
            self.encoding
        )?;

        writeln!(out, "\nSample movies:")?;
        for movie in &self.sample {
            writeln!(
                out,
                "  {}: {} -> {}",
                movie.movie_id,
                movie.title,
                join_genres(&movie.genres)
            )?;
        }

        writeln!(
            out,
            "Generated {} with {} movies",
            self.output_path.display(),
            self.total
        )?;
        writeln!(out, "\nTotal movies processed: {}", self.total)?;

        Ok(())
    }
}
