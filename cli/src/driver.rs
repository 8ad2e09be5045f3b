//! Interactive lookup loop
//!
//! `AwaitingInput -> Fetching -> {NotFound, TransientFailure, Tallying} -> Reporting`.
//! Failed lookups go back to `AwaitingInput` until the attempt budget runs out
//! or the input is closed.

use std::io::{BufRead, Write};
use std::path::Path;

use shared::{slugify, CropRecord, PlantingReport};

use crate::error::{AppError, AppResult, FetchError, EXIT_OK};
use crate::external::CropSource;

pub const PROMPT: &str = "What would you like to plant?";

/// Default number of failed lookups before the loop gives up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// How reports are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How an interactive session ended
#[derive(Debug)]
pub enum Outcome {
    /// A report was printed
    Reported(PlantingReport),
    /// Every attempt failed; holds the last failure
    GaveUp(FetchError),
    /// The user closed the input before a report was printed
    InputClosed,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Reported(_) | Outcome::InputClosed => EXIT_OK,
            Outcome::GaveUp(err) => err.exit_code(),
        }
    }
}

/// Drives crop lookups between a console and a crop source.
///
/// Reports go to `output`. Prompts and retry messages go to `prompts` when
/// one is set, otherwise to `output` as well.
pub struct Driver<S, R, W, P = W> {
    source: S,
    input: R,
    output: W,
    prompts: Option<P>,
    max_attempts: u32,
    format: OutputFormat,
}

impl<S, R, W> Driver<S, R, W>
where
    S: CropSource,
    R: BufRead,
    W: Write,
{
    pub fn new(source: S, input: R, output: W) -> Self {
        Self {
            source,
            input,
            output,
            prompts: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            format: OutputFormat::default(),
        }
    }
}

impl<S, R, W, P> Driver<S, R, W, P>
where
    S: CropSource,
    R: BufRead,
    W: Write,
    P: Write,
{
    /// Write prompts and retry messages somewhere other than the report output
    pub fn prompts_to<Q: Write>(self, prompts: Q) -> Driver<S, R, W, Q> {
        Driver {
            source: self.source,
            input: self.input,
            output: self.output,
            prompts: Some(prompts),
            max_attempts: self.max_attempts,
            format: self.format,
        }
    }

    /// Failed lookups allowed before giving up; at least one lookup always runs
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Report output and the separate prompt writer, if one was set
    pub fn into_parts(self) -> (W, Option<P>) {
        (self.output, self.prompts)
    }

    /// Prompt for crops until one produces a report.
    ///
    /// Not-found and API errors are explained and followed by a new prompt.
    /// Blank lines are ignored and do not use up an attempt.
    pub async fn run(&mut self) -> AppResult<Outcome> {
        let mut failures = 0;

        loop {
            let Some(crop) = self.prompt()? else {
                tracing::debug!("Input closed");
                return Ok(Outcome::InputClosed);
            };

            match self.lookup(&crop).await {
                Ok(report) => {
                    self.write_report(&report)?;
                    return Ok(Outcome::Reported(report));
                }
                Err(err) => {
                    failures += 1;
                    tracing::debug!(attempt = failures, error = %err, "Lookup failed");
                    writeln!(self.console(), "{}\n", err.user_message())?;

                    if failures >= self.max_attempts {
                        tracing::warn!("Giving up after {} failed lookups", failures);
                        return Ok(Outcome::GaveUp(err));
                    }
                }
            }
        }
    }

    /// Look up a single crop without prompting
    pub async fn run_once(&mut self, crop: &str) -> AppResult<PlantingReport> {
        let crop = require_crop(crop)?;
        let report = self.lookup(crop).await?;
        self.write_report(&report)?;
        Ok(report)
    }

    /// Report on a crop document read from disk instead of the API
    pub fn run_offline(&mut self, crop: &str, path: &Path) -> AppResult<PlantingReport> {
        let crop = require_crop(crop)?;
        let body = std::fs::read_to_string(path).map_err(|source| AppError::CropFile {
            path: path.to_path_buf(),
            source,
        })?;
        let record =
            CropRecord::from_json(&body).map_err(|source| AppError::InvalidCropFile {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "Loaded crop from file");
        let report = PlantingReport::from_record(crop, &record);
        self.write_report(&report)?;
        Ok(report)
    }

    /// Normalize, fetch, then tally a crop
    pub async fn lookup(&self, crop: &str) -> Result<PlantingReport, FetchError> {
        let slug = slugify(crop);
        tracing::debug!(crop, %slug, "Fetching");

        let record = self.source.fetch_crop(&slug).await?;

        tracing::debug!(
            plantings_count = record.plantings_count,
            plantings = record.plantings.len(),
            "Tallying"
        );
        Ok(PlantingReport::from_record(crop, &record))
    }

    /// Ask for a crop; `None` once the input is exhausted
    fn prompt(&mut self) -> std::io::Result<Option<String>> {
        loop {
            let console = self.console();
            writeln!(console, "{}", PROMPT)?;
            console.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let crop = line.trim();
            if !crop.is_empty() {
                return Ok(Some(crop.to_string()));
            }
        }
    }

    fn console(&mut self) -> &mut dyn Write {
        match &mut self.prompts {
            Some(prompts) => prompts as &mut dyn Write,
            None => &mut self.output as &mut dyn Write,
        }
    }

    fn write_report(&mut self, report: &PlantingReport) -> AppResult<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.output, "{}", report)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.output, report)?;
                writeln!(self.output)?;
            }
        }
        Ok(())
    }
}

/// Trimmed crop name; a blank name never reaches the API or a report
fn require_crop(crop: &str) -> AppResult<&str> {
    let crop = crop.trim();
    if crop.is_empty() {
        return Err(AppError::BlankCrop);
    }
    Ok(crop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::PlantingEntry;
    use std::io::Cursor;

    struct Fixed(u64, Vec<PlantingEntry>);

    #[async_trait]
    impl CropSource for Fixed {
        async fn fetch_crop(&self, _slug: &str) -> Result<CropRecord, FetchError> {
            Ok(CropRecord {
                plantings_count: self.0,
                plantings: self.1.clone(),
            })
        }
    }

    fn output_of<S: CropSource>(driver: Driver<S, Cursor<&[u8]>, Vec<u8>>) -> String {
        String::from_utf8(driver.into_output()).unwrap()
    }

    #[test]
    fn test_max_attempts_floor() {
        let driver = Driver::new(Fixed(0, vec![]), Cursor::new(&b""[..]), Vec::new()).max_attempts(0);
        assert_eq!(driver.max_attempts, 1);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut driver = Driver::new(
            Fixed(1, vec![PlantingEntry::new("seed", "sun")]),
            Cursor::new(&b"\n   \nBasil\n"[..]),
            Vec::new(),
        );

        let outcome = tokio_test::block_on(driver.run()).unwrap();

        assert!(matches!(outcome, Outcome::Reported(_)));
        let output = output_of(driver);
        assert_eq!(output.matches(PROMPT).count(), 3);
        assert!(output.ends_with("Basil was planted 1 times.\nIt was most often planted from seed in sun.\n"));
    }

    #[test]
    fn test_json_format() {
        let mut driver = Driver::new(Fixed(0, vec![]), Cursor::new(&b""[..]), Vec::new())
            .format(OutputFormat::Json);

        tokio_test::block_on(driver.run_once("Yacon")).unwrap();

        let output = output_of(driver);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["status"], "not_yet_planted");
        assert_eq!(json["crop"], "Yacon");
    }

    #[test]
    fn test_json_prompts_stay_off_report_output() {
        let mut driver = Driver::new(
            Fixed(2, vec![PlantingEntry::new("seed", "sun")]),
            Cursor::new(&b"\nKale\n"[..]),
            Vec::new(),
        )
        .format(OutputFormat::Json)
        .prompts_to(Vec::new());

        tokio_test::block_on(driver.run()).unwrap();

        let (output, prompts) = driver.into_parts();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["crop"], "Kale");
        let prompts = String::from_utf8(prompts.unwrap()).unwrap();
        assert_eq!(prompts.matches(PROMPT).count(), 2);
    }

    #[test]
    fn test_require_crop() {
        assert_eq!(require_crop("  kale ").unwrap(), "kale");
        assert!(matches!(require_crop(" \t "), Err(AppError::BlankCrop)));
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::InputClosed.exit_code(), EXIT_OK);
        assert_eq!(
            Outcome::GaveUp(FetchError::transient("down")).exit_code(),
            crate::error::EXIT_TRANSIENT
        );
    }
}
