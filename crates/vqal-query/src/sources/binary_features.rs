//! Dense feature matrix stored as little-endian `f32`.
//!
//! Format: header (count: u32 LE, dims: u32 LE) + body (count * dims * f32 LE),
//! row-major, one row per sample index.

use std::path::{Path, PathBuf};

use vqal_core::constants::FEATURE_HEADER_BYTES;
use vqal_core::errors::{SourceError, VqalError, VqalResult};
use vqal_core::models::SampleIndex;
use vqal_core::traits::ISampleSource;

/// Feature file loaded fully into memory.
#[derive(Debug, Clone)]
pub struct BinaryFeatureSource {
    path: PathBuf,
    count: usize,
    dims: usize,
    values: Vec<f32>,
}

impl BinaryFeatureSource {
    /// Read and validate a feature file.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let data = std::fs::read(path).map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let malformed = |message: String| SourceError::Malformed {
            path: path.display().to_string(),
            message,
        };

        if data.len() < FEATURE_HEADER_BYTES {
            return Err(malformed(format!(
                "file too small for header: {} bytes",
                data.len()
            )));
        }

        let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let dims = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;

        let expected_size = count
            .checked_mul(dims)
            .and_then(|n| n.checked_mul(4))
            .and_then(|n| n.checked_add(FEATURE_HEADER_BYTES))
            .ok_or_else(|| {
                malformed(format!(
                    "header declares {count} x {dims} values, which overflows"
                ))
            })?;
        if data.len() != expected_size {
            return Err(malformed(format!(
                "size mismatch: expected {} bytes, got {}",
                expected_size,
                data.len()
            )));
        }

        let values = data[FEATURE_HEADER_BYTES..]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            count,
            dims,
            values,
        })
    }

    /// Write `rows` in the feature-file format. All rows must share a length.
    pub fn write(path: &Path, rows: &[Vec<f32>]) -> Result<(), SourceError> {
        let dims = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|r| r.len() != dims) {
            return Err(SourceError::Malformed {
                path: path.display().to_string(),
                message: format!("ragged rows: expected {} values, got {}", dims, row.len()),
            });
        }

        let mut bytes = Vec::with_capacity(FEATURE_HEADER_BYTES + rows.len() * dims * 4);
        bytes.extend_from_slice(&(rows.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(dims as u32).to_le_bytes());
        for value in rows.iter().flatten() {
            bytes.extend_from_slice(&value.to_le_bytes());
        }

        let io = |e: std::io::Error| SourceError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        std::fs::write(path, bytes).map_err(io)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dims(&self) -> usize {
        self.dims
    }
}

impl ISampleSource for BinaryFeatureSource {
    fn len(&self) -> usize {
        self.count
    }

    fn fetch(&self, indices: &[SampleIndex]) -> VqalResult<Vec<Vec<f32>>> {
        indices
            .iter()
            .map(|&index| {
                if index >= self.count {
                    return Err(VqalError::from(SourceError::IndexOutOfRange {
                        index,
                        len: self.count,
                    }));
                }
                let start = index * self.dims;
                Ok(self.values[start..start + self.dims].to_vec())
            })
            .collect()
    }
}
