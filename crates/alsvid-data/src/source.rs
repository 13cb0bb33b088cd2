//! Digit-image providers.
//!
//! [`DigitSource`] is the seam to whatever supplies raw images and labels.
//! [`IdxSource`] reads the standard MNIST/FashionMNIST IDX ubyte files
//! (plain or gzipped) from a root directory; [`InMemorySource`] serves
//! synthetic arrays for tests and demos.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use ndarray::Array3;
use tracing::debug;

use crate::error::{DataError, DataResult};

/// Raw provider output: `n × h × w` images with parallel integer labels.
#[derive(Debug, Clone)]
pub struct RawDigits {
    /// Pixel data, one `h × w` plane per row.
    pub images: Array3<u8>,
    /// Class label per row.
    pub labels: Vec<u8>,
}

impl RawDigits {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the pool has no rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A provider of ordered (image, label) pools with a train/test flag.
pub trait DigitSource {
    /// Human-readable provider name, for logs.
    fn name(&self) -> &str;

    /// Load the training pool (`train = true`) or the test pool.
    fn load(&self, train: bool) -> DataResult<RawDigits>;
}

/// Reads MNIST-style IDX ubyte files from a root directory.
///
/// Expects the standard file names (`train-images-idx3-ubyte`,
/// `train-labels-idx1-ubyte`, `t10k-images-idx3-ubyte`,
/// `t10k-labels-idx1-ubyte`), each optionally with a `.gz` suffix.
/// FashionMNIST ships under the same names, so the flavor is simply a
/// different root directory.
#[derive(Debug, Clone)]
pub struct IdxSource {
    root: PathBuf,
}

impl IdxSource {
    /// Create a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DigitSource for IdxSource {
    fn name(&self) -> &str {
        "idx"
    }

    fn load(&self, train: bool) -> DataResult<RawDigits> {
        let (images_name, labels_name) = if train {
            ("train-images-idx3-ubyte", "train-labels-idx1-ubyte")
        } else {
            ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte")
        };
        let images = read_idx_images(&self.root.join(images_name))?;
        let labels = read_idx_labels(&self.root.join(labels_name))?;
        if images.dim().0 != labels.len() {
            return Err(DataError::MalformedIdx {
                path: self.root.join(images_name),
                message: format!(
                    "{} images but {} labels",
                    images.dim().0,
                    labels.len()
                ),
            });
        }
        debug!(
            root = %self.root.display(),
            train,
            n = labels.len(),
            "loaded IDX pool"
        );
        Ok(RawDigits { images, labels })
    }
}

/// Serves fixed in-memory pools; intended for tests and synthetic demos.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    train: RawDigits,
    test: RawDigits,
}

impl InMemorySource {
    /// Create from explicit train and test pools.
    pub fn new(train: RawDigits, test: RawDigits) -> Self {
        Self { train, test }
    }
}

impl DigitSource for InMemorySource {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn load(&self, train: bool) -> DataResult<RawDigits> {
        Ok(if train {
            self.train.clone()
        } else {
            self.test.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// IDX ubyte format
// ---------------------------------------------------------------------------

const IDX_IMAGES_MAGIC: u32 = 0x0000_0803;
const IDX_LABELS_MAGIC: u32 = 0x0000_0801;

/// Open `path`, falling back to `path.gz` with gzip decoding.
fn open_maybe_gz(path: &Path) -> DataResult<Box<dyn Read>> {
    if path.exists() {
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(Box::new(file));
    }
    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(".gz");
    let gz_path = PathBuf::from(gz_name);
    let file = File::open(&gz_path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(GzDecoder::new(file)))
}

fn read_u32_be(reader: &mut dyn Read, path: &Path) -> DataResult<u32> {
    let mut buf = [0_u8; 4];
    reader.read_exact(&mut buf).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(u32::from_be_bytes(buf))
}

fn read_idx_images(path: &Path) -> DataResult<Array3<u8>> {
    let mut reader = open_maybe_gz(path)?;
    let magic = read_u32_be(reader.as_mut(), path)?;
    if magic != IDX_IMAGES_MAGIC {
        return Err(DataError::MalformedIdx {
            path: path.to_path_buf(),
            message: format!("bad image magic {magic:#010x}"),
        });
    }
    let n = read_u32_be(reader.as_mut(), path)? as usize;
    let rows = read_u32_be(reader.as_mut(), path)? as usize;
    let cols = read_u32_be(reader.as_mut(), path)? as usize;

    let mut pixels = vec![0_u8; n * rows * cols];
    reader
        .read_exact(&mut pixels)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Array3::from_shape_vec((n, rows, cols), pixels).map_err(|e| DataError::MalformedIdx {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_idx_labels(path: &Path) -> DataResult<Vec<u8>> {
    let mut reader = open_maybe_gz(path)?;
    let magic = read_u32_be(reader.as_mut(), path)?;
    if magic != IDX_LABELS_MAGIC {
        return Err(DataError::MalformedIdx {
            path: path.to_path_buf(),
            message: format!("bad label magic {magic:#010x}"),
        });
    }
    let n = read_u32_be(reader.as_mut(), path)? as usize;
    let mut labels = vec![0_u8; n];
    reader
        .read_exact(&mut labels)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn idx_image_bytes(images: &[[[u8; 2]; 2]]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&IDX_IMAGES_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&(images.len() as u32).to_be_bytes());
        bytes.extend_from_slice(&2_u32.to_be_bytes());
        bytes.extend_from_slice(&2_u32.to_be_bytes());
        for img in images {
            for row in img {
                bytes.extend_from_slice(row);
            }
        }
        bytes
    }

    fn idx_label_bytes(labels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&IDX_LABELS_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    fn write_pool(dir: &Path, train: bool, images: &[[[u8; 2]; 2]], labels: &[u8]) {
        let (img_name, lbl_name) = if train {
            ("train-images-idx3-ubyte", "train-labels-idx1-ubyte")
        } else {
            ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte")
        };
        std::fs::write(dir.join(img_name), idx_image_bytes(images)).unwrap();
        std::fs::write(dir.join(lbl_name), idx_label_bytes(labels)).unwrap();
    }

    #[test]
    fn reads_plain_idx_files() {
        let dir = tempfile::tempdir().unwrap();
        let images = [[[0, 10], [20, 30]], [[40, 50], [60, 70]]];
        write_pool(dir.path(), true, &images, &[3, 7]);

        let pool = IdxSource::new(dir.path()).load(true).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.labels, vec![3, 7]);
        assert_eq!(pool.images[(1, 0, 1)], 50);
    }

    #[test]
    fn reads_gzipped_idx_files() {
        let dir = tempfile::tempdir().unwrap();
        let images = [[[1, 2], [3, 4]]];
        for (name, bytes) in [
            ("t10k-images-idx3-ubyte.gz", idx_image_bytes(&images)),
            ("t10k-labels-idx1-ubyte.gz", idx_label_bytes(&[9])),
        ] {
            let file = File::create(dir.path().join(name)).unwrap();
            let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            enc.write_all(&bytes).unwrap();
            enc.finish().unwrap();
        }

        let pool = IdxSource::new(dir.path()).load(false).unwrap();
        assert_eq!(pool.labels, vec![9]);
        assert_eq!(pool.images[(0, 1, 0)], 3);
    }

    #[test]
    fn rejects_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = idx_image_bytes(&[[[0, 0], [0, 0]]]);
        bytes[3] = 0xff;
        std::fs::write(dir.path().join("train-images-idx3-ubyte"), bytes).unwrap();
        std::fs::write(
            dir.path().join("train-labels-idx1-ubyte"),
            idx_label_bytes(&[0]),
        )
        .unwrap();

        let err = IdxSource::new(dir.path()).load(true).unwrap_err();
        assert!(matches!(err, DataError::MalformedIdx { .. }));
    }

    #[test]
    fn missing_files_surface_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IdxSource::new(dir.path()).load(true).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn rejects_image_label_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_pool(dir.path(), true, &[[[0, 0], [0, 0]]], &[1, 2]);

        let err = IdxSource::new(dir.path()).load(true).unwrap_err();
        assert!(matches!(err, DataError::MalformedIdx { .. }));
    }
}
