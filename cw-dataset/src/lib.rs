//! Loaders for the glass curtain wall installation dataset.
//!
//! A dataset directory holds the images and the motion capture table that gives
//! the pose of the camera in the wall frame for each image:
//!
//! ```text
//! <root>/images/*.png
//! <root>/MotionCaptureData.csv
//! ```
//!
//! Images are numbered from 1 in natural file name order, and row `n` of the
//! table belongs to image `n`.

mod calibration;
mod error;
mod mocap;
mod natural;
mod params;

pub use calibration::*;
pub use error::*;
pub use mocap::*;
pub use natural::*;
pub use params::*;

use cw_core::Transform;
use image::DynamicImage;
use log::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the images directory under the dataset root.
pub const IMAGES_DIR: &str = "images";
/// Name of the motion capture table under the dataset root.
pub const MOCAP_FILE: &str = "MotionCaptureData.csv";

/// An opened dataset: the sorted image paths and their motion capture poses.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
    images: Vec<PathBuf>,
    mocap: MocapTable,
}

impl Dataset {
    /// Opens the dataset under `root` using the standard layout.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut dataset = Self::from_paths(root.join(IMAGES_DIR), root.join(MOCAP_FILE))?;
        dataset.root = root.to_path_buf();
        Ok(dataset)
    }

    /// Opens a dataset whose images and table live somewhere other than the
    /// standard layout. The root is taken to be the parent of `images_dir`.
    pub fn from_paths(images_dir: impl AsRef<Path>, mocap_path: impl AsRef<Path>) -> Result<Self> {
        let images_dir = images_dir.as_ref();
        let mocap_path = mocap_path.as_ref();

        let images = discover_images(images_dir)?;
        if !mocap_path.is_file() {
            return Err(DatasetError::MissingMocap(mocap_path.to_path_buf()));
        }
        let mocap = MocapTable::parse(&fs::read_to_string(mocap_path)?)?;
        if mocap.len() != images.len() {
            return Err(DatasetError::RowCount {
                rows: mocap.len(),
                images: images.len(),
            });
        }
        info!(
            "found {} images in {}",
            images.len(),
            images_dir.display()
        );

        Ok(Self {
            root: images_dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            images,
            mocap,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    pub fn image_paths(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn mocap(&self) -> &MocapTable {
        &self.mocap
    }

    fn index(&self, n: usize) -> Result<usize> {
        if (1..=self.images.len()).contains(&n) {
            Ok(n - 1)
        } else {
            Err(DatasetError::ImageOutOfRange {
                index: n,
                count: self.images.len(),
            })
        }
    }

    /// Path of image `n`, counting from 1.
    pub fn image_path(&self, n: usize) -> Result<&Path> {
        Ok(&self.images[self.index(n)?])
    }

    /// Decodes image `n`, counting from 1.
    pub fn import_image(&self, n: usize) -> Result<DynamicImage> {
        let path = self.image_path(n)?;
        debug!("importing image {} from {}", n, path.display());
        Ok(image::open(path)?)
    }

    pub fn mocap_record(&self, n: usize) -> Result<&MocapRecord> {
        Ok(&self.mocap.records()[self.index(n)?])
    }

    /// `T_W_C` for image `n`: the camera pose in the wall frame.
    pub fn mocap_rel_wall(&self, n: usize) -> Result<Transform> {
        self.mocap_record(n)?.wall_from_camera()
    }

    /// `T_C_W` for image `n`: maps wall coordinates into the camera frame.
    pub fn mocap_rel_camera(&self, n: usize) -> Result<Transform> {
        Ok(self.mocap_rel_wall(n)?.inverse())
    }
}

/// Lists the `.png` files directly inside `dir` in natural order.
fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DatasetError::NoImages(dir.to_path_buf()));
    }
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let is_png = entry
            .path()
            .extension()
            .map(|ext| ext == "png")
            .unwrap_or(false);
        if entry.file_type().is_file() && is_png {
            images.push(entry.into_path());
        }
    }
    if images.is_empty() {
        return Err(DatasetError::NoImages(dir.to_path_buf()));
    }
    images.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    Ok(images)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
