use crate::{DatasetError, Result};
use cw_core::nalgebra::Vector3;
use cw_core::{QuaternionOrder, Transform};

/// Number of columns in `MotionCaptureData.csv`.
pub const MOCAP_COLUMNS: usize = 8;

/// One motion capture sample: the pose of the camera in the wall frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MocapRecord {
    pub qw: f64,
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MocapRecord {
    pub fn quaternion_wxyz(&self) -> [f64; 4] {
        [self.qw, self.qx, self.qy, self.qz]
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// `T_W_C`: maps camera coordinates into wall coordinates.
    pub fn wall_from_camera(&self) -> Result<Transform> {
        Ok(Transform::identity()
            .with_quaternion(&self.quaternion_wxyz(), QuaternionOrder::Wxyz)?
            .with_translation(self.position()))
    }
}

/// The parsed contents of `MotionCaptureData.csv`, one row per image.
#[derive(Debug, Clone, PartialEq)]
pub struct MocapTable {
    columns: Vec<String>,
    records: Vec<MocapRecord>,
}

const POSE_COLUMNS: [&str; 7] = ["qw", "qx", "qy", "qz", "x", "y", "z"];

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|f| f.trim().trim_matches('"'))
}

impl MocapTable {
    /// Parses the table. The first non-blank line is the header; pose columns are
    /// looked up by name so their order does not matter.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let header = lines.next().ok_or(DatasetError::EmptyMocap)?;
        let columns: Vec<String> = fields(header).map(str::to_owned).collect();
        if columns.len() != MOCAP_COLUMNS {
            return Err(DatasetError::ColumnCount {
                expected: MOCAP_COLUMNS,
                found: columns.len(),
            });
        }

        let mut indices = [0; 7];
        for (index, name) in indices.iter_mut().zip(POSE_COLUMNS) {
            *index = columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_owned()))?;
        }

        let records = lines
            .enumerate()
            .map(|(ix, line)| {
                let row = ix + 1;
                let values: Vec<&str> = fields(line).collect();
                if values.len() != columns.len() {
                    return Err(DatasetError::RowWidth {
                        row,
                        expected: columns.len(),
                        found: values.len(),
                    });
                }
                let mut pose = [0.0; 7];
                for (value, &column) in pose.iter_mut().zip(&indices) {
                    let field = values[column];
                    *value = field.parse().map_err(|_| DatasetError::ParseField {
                        row,
                        column: columns[column].clone(),
                        value: field.to_owned(),
                    })?;
                }
                let [qw, qx, qy, qz, x, y, z] = pose;
                Ok(MocapRecord {
                    qw,
                    qx,
                    qy,
                    qz,
                    x,
                    y,
                    z,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[MocapRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TABLE: &str = "\
Frame,qw,qx,qy,qz,x,y,z
1,1,0,0,0,10.5,-20,1500
2, 0.7071067811865476 ,0,0.7071067811865476,0,0,0,0

";

    #[test]
    fn parses_rows() {
        let table = MocapTable::parse(TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns()[0], "Frame");
        assert_eq!(
            table.records()[0],
            MocapRecord {
                qw: 1.0,
                qx: 0.0,
                qy: 0.0,
                qz: 0.0,
                x: 10.5,
                y: -20.0,
                z: 1500.0,
            }
        );
        assert_eq!(table.records()[1].qy, 0.7071067811865476);
    }

    #[test]
    fn columns_by_name() {
        let shuffled = "x,y,z,qw,qx,qy,qz,time\n1,2,3,1,0,0,0,0.5\n";
        let table = MocapTable::parse(shuffled).unwrap();
        assert_eq!(table.records()[0].position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(table.records()[0].quaternion_wxyz(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn quoted_header() {
        let quoted = "\"\",\"qw\",\"qx\",\"qy\",\"qz\",\"x\",\"y\",\"z\"\n0,1,0,0,0,1,2,3\n";
        assert_eq!(MocapTable::parse(quoted).unwrap().len(), 1);
    }

    #[test]
    fn wrong_column_count() {
        let err = MocapTable::parse("qw,qx,qy,qz,x,y,z\n1,0,0,0,0,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::ColumnCount {
                expected: 8,
                found: 7
            }
        ));
    }

    #[test]
    fn missing_column() {
        let err = MocapTable::parse("a,qw,qx,qy,qz,x,y,w\n").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(name) if name == "z"));
    }

    #[test]
    fn ragged_row() {
        let err = MocapTable::parse("f,qw,qx,qy,qz,x,y,z\n1,1,0,0,0,0,0\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RowWidth {
                row: 1,
                expected: 8,
                found: 7
            }
        ));
    }

    #[test]
    fn bad_number() {
        let err = MocapTable::parse("f,qw,qx,qy,qz,x,y,z\n1,1,0,0,0,0,0,0\n2,1,0,0,0,abc,0,0\n")
            .unwrap_err();
        match err {
            DatasetError::ParseField { row, column, value } => {
                assert_eq!((row, column.as_str(), value.as_str()), (2, "x", "abc"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn empty_table() {
        assert!(matches!(
            MocapTable::parse("\n  \n"),
            Err(DatasetError::EmptyMocap)
        ));
    }

    #[test]
    fn record_pose() {
        let table = MocapTable::parse(TABLE).unwrap();
        let t = table.records()[1].wall_from_camera().unwrap();
        // Quarter turn about y maps the camera's forward axis onto the wall's x axis.
        assert_relative_eq!(
            t.rotation() * Vector3::z(),
            Vector3::x(),
            epsilon = 1e-12
        );
        assert_eq!(t.translation(), Vector3::zeros());
    }
}
