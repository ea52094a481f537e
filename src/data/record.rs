// record.rs - FastJ tile record parsing

use crate::data::position::{parse_hex_token, PositionKey};
use crate::error::{Result, TileGraphError};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// JSON header of one FastJ record (the text after the `>` marker)
#[derive(Debug, Deserialize)]
pub struct RecordHeader {
    #[serde(rename = "tileID")]
    pub tile_id: String,
    pub md5sum: String,
    #[serde(rename = "seedTileLength")]
    pub seed_tile_length: u64,
}

/// One parsed tile record: position, allele copy, declared content hash,
/// seed length and the assembled nucleotide sequence.
///
/// Records are ephemeral - created per input entry, consumed by the library
/// builder or the allele replayer, then dropped.
#[derive(Debug, Clone)]
pub struct TileRecord {
    pub key: PositionKey,
    pub allele: u64,
    pub declared_hash: String,
    pub seed_len: u64,
    pub sequence: String,
}

impl TileRecord {
    /// Short context string for error reporting
    pub fn context(&self) -> String {
        format!("{} allele {:x}", self.key, self.allele)
    }
}

struct ParsedHeader {
    key: PositionKey,
    allele: u64,
    declared_hash: String,
    seed_len: u64,
}

/// Streaming FastJ reader.
///
/// A record is a `>`-prefixed JSON header line followed by sequence lines up
/// to the next header or end of input. Blank lines are skipped. A header with
/// no sequence lines yields no record.
pub struct FastjReader<R: BufRead> {
    reader: R,
    path: String,
    line_no: usize,
    pending: Option<ParsedHeader>,
    seq_parts: Vec<String>,
    done: bool,
}

impl FastjReader<BufReader<File>> {
    /// Open a FastJ file for streaming reads
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::new(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }
}

impl<R: BufRead> FastjReader<R> {
    pub fn new(reader: R, path: String) -> Self {
        Self {
            reader,
            path,
            line_no: 0,
            pending: None,
            seq_parts: Vec::new(),
            done: false,
        }
    }

    fn parse_header(&self, line: &str) -> Result<ParsedHeader> {
        let header: RecordHeader = serde_json::from_str(&line[1..]).map_err(|e| {
            TileGraphError::malformed(&self.path, self.line_no, format!("bad record header: {}", e))
        })?;

        // tileID is four dot-separated hex tokens: path, variant (ignored),
        // step, allele
        let parts: Vec<&str> = header.tile_id.split('.').collect();
        if parts.len() != 4 {
            return Err(TileGraphError::malformed(
                &self.path,
                self.line_no,
                format!(
                    "tileID '{}' has {} tokens, expected 4",
                    header.tile_id,
                    parts.len()
                ),
            ));
        }

        let key = PositionKey::from_hex_tokens(parts[0], parts[2]).ok_or_else(|| {
            TileGraphError::malformed(
                &self.path,
                self.line_no,
                format!("non-hexadecimal position tokens in tileID '{}'", header.tile_id),
            )
        })?;
        let allele = parse_hex_token(parts[3]).ok_or_else(|| {
            TileGraphError::malformed(
                &self.path,
                self.line_no,
                format!("non-hexadecimal allele token in tileID '{}'", header.tile_id),
            )
        })?;

        Ok(ParsedHeader {
            key,
            allele,
            declared_hash: header.md5sum,
            seed_len: header.seed_tile_length,
        })
    }

    fn finish_record(&mut self) -> Result<Option<TileRecord>> {
        let header = match self.pending.take() {
            Some(h) => h,
            None => {
                if !self.seq_parts.is_empty() {
                    return Err(TileGraphError::malformed(
                        &self.path,
                        self.line_no,
                        "sequence data before any record header",
                    ));
                }
                return Ok(None);
            }
        };
        if self.seq_parts.is_empty() {
            return Ok(None);
        }
        let sequence = self.seq_parts.concat();
        self.seq_parts.clear();

        if !sequence.is_ascii() {
            return Err(TileGraphError::malformed(
                &self.path,
                self.line_no,
                "sequence contains non-ASCII bytes",
            ));
        }

        Ok(Some(TileRecord {
            key: header.key,
            allele: header.allele,
            declared_hash: header.declared_hash,
            seed_len: header.seed_len,
            sequence,
        }))
    }

    fn next_record(&mut self) -> Result<Option<TileRecord>> {
        if self.done {
            return Ok(None);
        }

        let mut line = String::new();
        loop {
            line.clear();
            let n = self.reader.read_line(&mut line)?;
            if n == 0 {
                self.done = true;
                return self.finish_record();
            }
            self.line_no += 1;

            let trimmed = line.trim_end_matches(['\n', '\r']);
            if trimmed.is_empty() {
                continue;
            }

            if trimmed.starts_with('>') {
                let finished = self.finish_record()?;
                self.pending = Some(self.parse_header(trimmed)?);
                if finished.is_some() {
                    return Ok(finished);
                }
                continue;
            }

            self.seq_parts.push(trimmed.to_string());
        }
    }
}

impl<R: BufRead> Iterator for FastjReader<R> {
    type Item = Result<TileRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
