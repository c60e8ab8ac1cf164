use crate::{types::WordFrequencyMap, Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Which characters separate tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceMode {
    /// Any Unicode `White_Space` character.
    #[default]
    Unicode,
    /// Space, `\t`, `\n`, `\x0B`, `\x0C` and `\r` only.
    Ascii,
}

impl WhitespaceMode {
    fn is_delimiter(self, c: char) -> bool {
        match self {
            WhitespaceMode::Unicode => c.is_whitespace(),
            WhitespaceMode::Ascii => matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountOptions {
    pub whitespace: WhitespaceMode,
    /// Reject lines that are not valid UTF-8 instead of decoding lossily.
    pub strict_utf8: bool,
}

/// Single-pass, line-by-line token counter.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    options: CountOptions,
}

impl WordCounter {
    pub fn new(options: CountOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CountOptions {
        &self.options
    }

    /// Count every token in the file at `path`.
    ///
    /// Fails with [`Error::Read`] if the file cannot be opened or a read
    /// fails part way through; no partial map is returned.
    pub fn count_path(&self, path: &Path) -> Result<WordFrequencyMap> {
        debug!(path = %path.display(), "Opening file for analysis");

        let read_err = |source: io::Error| Error::Read {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(read_err)?;
        let map = self.count_lines(BufReader::new(file)).map_err(read_err)?;

        info!(
            path = %path.display(),
            lines = map.lines(),
            total_tokens = map.total_tokens(),
            distinct_tokens = map.len(),
            "Analysis complete"
        );

        Ok(map)
    }

    /// Count every token produced by `reader`.
    pub fn count_reader<R: BufRead>(&self, reader: R) -> Result<WordFrequencyMap> {
        Ok(self.count_lines(reader)?)
    }

    /// Count every token in an in-memory string.
    pub fn count_str(&self, text: &str) -> WordFrequencyMap {
        let mut map = WordFrequencyMap::new();
        for line in text.lines() {
            self.count_line(line, &mut map);
        }
        map
    }

    fn count_lines<R: BufRead>(&self, mut reader: R) -> io::Result<WordFrequencyMap> {
        let mut map = WordFrequencyMap::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = self.decode(&buf, map.lines() + 1)?;
            self.count_line(&line, &mut map);
        }

        Ok(map)
    }

    fn decode<'a>(&self, bytes: &'a [u8], line_no: u64) -> io::Result<Cow<'a, str>> {
        if !self.options.strict_utf8 {
            return Ok(String::from_utf8_lossy(bytes));
        }

        std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: stream did not contain valid UTF-8 ({})", line_no, e),
            )
        })
    }

    fn count_line(&self, line: &str, map: &mut WordFrequencyMap) {
        map.record_line();

        let mode = self.options.whitespace;
        line.split(|c: char| mode.is_delimiter(c))
            .filter(|token| !token.is_empty())
            .for_each(|token| map.record(token));
    }
}
