//! In-memory word vectors loaded from word2vec files.
//!
//! Both word2vec layouts start with a `<count> <dimensions>` line. In the text layout
//! every following line holds a word and its components separated by whitespace; in the
//! binary layout each entry is a word terminated by a space followed by `dimensions`
//! little-endian `f32`s. Either may be gzip-compressed. Vectors are unit-normalised at
//! load time, so cosine similarity reduces to a dot product.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use super::SimilarityModel;
use crate::error::{Result, Vec2GraphError};

/// Word -> unit vector table
#[derive(Debug, Clone, Default)]
pub struct KeyedVectors {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>,
    dimensions: usize,
}

impl KeyedVectors {
    /// Build from `(word, vector)` pairs. All vectors must share one dimension.
    /// A repeated word keeps its first vector.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut model = Self::default();
        for (word, vector) in pairs {
            model.push(word, vector)?;
        }
        Ok(model)
    }

    /// Load a word2vec file, picking the layout from the extension:
    /// `.bin` is binary, anything else (`.vec`, `.txt`) is text, and a trailing `.gz`
    /// is decompressed first.
    pub fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();
        let (stem, gzipped) = match name.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (name.as_str(), false),
        };
        let binary = stem.ends_with(".bin");

        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if gzipped {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        let model = if binary {
            Self::from_binary_reader(reader)?
        } else {
            Self::from_reader(reader)?
        };
        log::info!(
            "Loaded {} vectors ({} dimensions) from {}",
            model.len(),
            model.dimensions,
            path.display()
        );
        Ok(model)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = lines
            .next()
            .ok_or_else(|| Vec2GraphError::Parse("empty embedding file".to_string()))??;
        let (expected_count, dimensions) = parse_header(&header)?;

        let mut model = Self {
            dimensions,
            ..Self::default()
        };
        for (line_no, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let word = parts
                .next()
                .ok_or_else(|| Vec2GraphError::Parse(format!("line {}: missing word", line_no + 2)))?;
            let vector = parts
                .map(|v| {
                    v.parse::<f32>().map_err(|e| {
                        Vec2GraphError::Parse(format!("line {}: bad component '{}': {}", line_no + 2, v, e))
                    })
                })
                .collect::<Result<Vec<f32>>>()?;
            model.push(word.to_string(), vector)?;
        }

        if model.len() != expected_count {
            log::warn!(
                "Embedding header announced {} words, found {}",
                expected_count,
                model.len()
            );
        }
        Ok(model)
    }

    /// Read the binary word2vec layout.
    pub fn from_binary_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(Vec2GraphError::Parse("empty embedding file".to_string()));
        }
        let (count, dimensions) = parse_header(header.trim())?;

        let mut model = Self {
            dimensions,
            ..Self::default()
        };
        let mut word_buf = Vec::new();
        let mut vector_buf = vec![0u8; dimensions * 4];
        for entry in 0..count {
            word_buf.clear();
            reader.read_until(b' ', &mut word_buf)?;
            if word_buf.pop() != Some(b' ') {
                return Err(Vec2GraphError::Parse(format!("entry {}: truncated word", entry)));
            }
            // The newline closing the previous vector is read as part of this word.
            let word = String::from_utf8_lossy(&word_buf).trim_start().to_string();
            if word.is_empty() {
                return Err(Vec2GraphError::Parse(format!("entry {}: missing word", entry)));
            }
            reader.read_exact(&mut vector_buf).map_err(|e| {
                Vec2GraphError::Parse(format!("entry {} ('{}'): truncated vector: {}", entry, word, e))
            })?;
            let vector = vector_buf
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect();
            model.push(word, vector)?;
        }
        Ok(model)
    }

    fn push(&mut self, word: String, mut vector: Vec<f32>) -> Result<()> {
        if self.dimensions == 0 {
            self.dimensions = vector.len();
        }
        if vector.len() != self.dimensions || vector.is_empty() {
            return Err(Vec2GraphError::Parse(format!(
                "vector for '{}' has {} dimensions, expected {}",
                word,
                vector.len(),
                self.dimensions
            )));
        }
        if self.index.contains_key(&word) {
            return Ok(());
        }
        normalize(&mut vector);
        self.index.insert(word.clone(), self.words.len());
        self.words.push(word);
        self.vectors.push(vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn vector(&self, word: &str) -> Result<&[f32]> {
        self.index
            .get(word)
            .map(|&i| self.vectors[i].as_slice())
            .ok_or_else(|| Vec2GraphError::WordNotFound(word.to_string()))
    }
}

impl SimilarityModel for KeyedVectors {
    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn most_similar(&self, word: &str, topn: usize) -> Result<Vec<(String, f64)>> {
        let query = self.vector(word)?;
        let mut scored: Vec<(String, f64)> = self
            .words
            .iter()
            .zip(self.vectors.iter())
            .filter(|(other, _)| other.as_str() != word)
            .map(|(other, vector)| (other.clone(), dot(query, vector)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(topn);
        Ok(scored)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        Ok(dot(self.vector(a)?, self.vector(b)?))
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let mut parts = header.split_whitespace();
    let mut field = |name: &str| -> Result<usize> {
        parts
            .next()
            .and_then(|v| v.parse::<usize>().ok())
            .ok_or_else(|| Vec2GraphError::Parse(format!("header '{}': missing {}", header, name)))
    };
    let count = field("word count")?;
    let dimensions = field("dimensions")?;
    Ok((count, dimensions))
}

fn normalize(vector: &mut [f32]) {
    let magnitude = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    // Zero vectors stay zero and score 0 against everything.
    if magnitude > 0.0 {
        vector.iter_mut().for_each(|x| *x /= magnitude);
    }
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum()
}
