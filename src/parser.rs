use crate::cue::{CueEntry, ThumbnailRegion};
use crate::error::{ParseWarning, ReferenceError};
use crate::paths::UrlResolver;
use crate::timestamp::seconds_from_timestamp;
use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let ts = r"(?:[0-9]{1,9}:)?(?:[0-9]{2}:)?[0-9]{2}(?:\.[0-9]{3})?";
    Regex::new(&format!(r"^\s*({ts})\s*-->\s*({ts})(?:\s.*)?$"))
        .expect("timing pattern is valid")
});

/// First-stage classification of a block's leading line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Timing { start: &'a str, end: &'a str },
    Other,
}

impl<'a> LineClass<'a> {
    pub fn classify(line: &'a str) -> Self {
        match TIMING_LINE.captures(line) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(start), Some(end)) => Self::Timing {
                    start: start.as_str(),
                    end: end.as_str(),
                },
                _ => Self::Other,
            },
            None => Self::Other,
        }
    }
}

/// A run of non-blank lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// 1-based line number of the first line
    pub line: usize,
    pub lines: Vec<&'a str>,
}

/// What a single block turned into
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutcome {
    Entry(CueEntry),
    /// Header, comment, identifier-led or otherwise non-cue block
    Skip,
    Error(ParseWarning),
}

/// Result of parsing one cue file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedCues {
    pub entries: Vec<CueEntry>,
    pub warnings: Vec<ParseWarning>,
    pub skipped: usize,
}

impl ParsedCues {
    pub fn summarize(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("Cues: {}\n", self.entries.len()));
        summary.push_str(&format!("Skipped blocks: {}\n", self.skipped));
        summary.push_str(&format!("Warnings: {}\n", self.warnings.len()));

        if let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) {
            summary.push_str(&format!(
                "Range: {}s - {}s\n",
                first.start_seconds, last.end_seconds
            ));
        }

        let mut images: Vec<&str> = self.entries.iter().map(|e| e.region.image_url()).collect();
        images.sort_unstable();
        images.dedup();
        summary.push_str(&format!("Images: {}\n", images.len()));
        for image in images {
            summary.push_str(&format!("  {}\n", image));
        }

        for warning in &self.warnings {
            summary.push_str(&format!("  ⚠ {}\n", warning));
        }

        summary
    }
}

/// Split text into blank-line separated blocks, after normalising line endings.
pub fn split_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (idx, line) in text.split(['\n', '\r']).enumerate() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Block {
                line: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

/// Parse cue text, resolving every image reference through `resolve_url`.
pub fn parse_cues<F>(text: &str, resolve_url: F) -> ParsedCues
where
    F: Fn(&str) -> String,
{
    let text = text.replace("\r\n", "\n");
    let mut parsed = ParsedCues::default();

    for block in split_blocks(&text) {
        match parse_block(&block, &resolve_url) {
            BlockOutcome::Entry(entry) => parsed.entries.push(entry),
            BlockOutcome::Skip => {
                debug!(line = block.line, "skipping non-cue block");
                parsed.skipped += 1;
            }
            BlockOutcome::Error(warning) => {
                warn!(line = warning.line, error = %warning.error, "skipping malformed cue");
                parsed.warnings.push(warning);
            }
        }
    }

    parsed
}

/// Second stage: turn a block whose first line is a timing line into an entry.
pub fn parse_block<F>(block: &Block<'_>, resolve_url: &F) -> BlockOutcome
where
    F: Fn(&str) -> String,
{
    let Some(first) = block.lines.first() else {
        return BlockOutcome::Skip;
    };
    let LineClass::Timing { start, end } = LineClass::classify(first) else {
        return BlockOutcome::Skip;
    };

    let (Some(start_seconds), Some(end_seconds)) =
        (seconds_from_timestamp(start), seconds_from_timestamp(end))
    else {
        return BlockOutcome::Skip;
    };

    let Some(reference) = block.lines.get(1) else {
        return BlockOutcome::Error(ParseWarning {
            line: block.line,
            error: ReferenceError::MissingReference,
        });
    };

    let resolved = resolve_url(reference.trim());
    match ThumbnailRegion::from_reference(&resolved) {
        Ok(region) => BlockOutcome::Entry(CueEntry {
            start_seconds,
            end_seconds,
            region,
        }),
        Err(error) => BlockOutcome::Error(ParseWarning {
            line: block.line,
            error,
        }),
    }
}

/// Cue file parser bound to the location the file was loaded from
#[derive(Debug, Clone, Default)]
pub struct CueParser {
    resolver: UrlResolver,
}

impl CueParser {
    pub fn new(resolver: UrlResolver) -> Self {
        Self { resolver }
    }

    /// Parser for the cue file at `src`, as seen from the page at `page_url`
    pub fn for_source(src: &str, page_url: &str) -> Self {
        Self::new(UrlResolver::for_source(src, page_url))
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn parse(&self, text: &str) -> ParsedCues {
        parse_cues(text, |reference| self.resolver.resolve(reference))
    }

    /// Parse a cue file from disk. Invalid UTF-8 is replaced rather than
    /// rejected so Latin-1 files still load.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedCues> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read cue file: {}", path.display()))?;
        Ok(self.parse(&String::from_utf8_lossy(&bytes)))
    }
}
