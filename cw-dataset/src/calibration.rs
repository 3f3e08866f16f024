use crate::Result;
use cw_pinhole::{Calibration, WorldUnits};
use log::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The calibration of the camera used to record the dataset.
pub fn camera_calibration() -> Calibration {
    Calibration {
        k1: -0.1552775701035,
        k2: 0.0472686081157939,
        k3: 0.0,
        p1: 0.0,
        p2: 0.0,
        fx: 1821.04993399032,
        fy: 1817.92066001349,
        cx: 741.82871031754,
        cy: 1019.94855509992,
        s: 0.0,
        image_height: 2048,
        image_width: 1536,
        world_units: WorldUnits::Millimeters,
    }
}

/// Loads a calibration from a JSON file with the same fields as [`Calibration`].
pub fn load_calibration(path: impl AsRef<Path>) -> Result<Calibration> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let calibration = serde_json::from_reader(BufReader::new(file))?;
    info!("loaded calibration from {}", path.display());
    Ok(calibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DatasetError;
    use std::io::Write;

    #[test]
    fn json_roundtrip() {
        let calibration = camera_calibration();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        serde_json::to_writer_pretty(&mut file, &calibration).unwrap();
        file.flush().unwrap();
        assert_eq!(load_calibration(file.path()).unwrap(), calibration);
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(camera_calibration()).unwrap();
        assert_eq!(json["world_units"], "millimeters");
        assert_eq!(json["fx"], 1821.04993399032);
        assert_eq!(json["image_width"], 1536);
    }

    #[test]
    fn bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"k1\": 0.1}}").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            load_calibration(file.path()),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            load_calibration("/definitely/not/here.json"),
            Err(DatasetError::Io(_))
        ));
    }
}
