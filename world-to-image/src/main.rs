use cw_core::WorldPoint;
use cw_dataset::{camera_calibration, load_calibration, Dataset, ExperimentalParams};
use cw_pinhole::Calibration;
use image::ImageOutputFormat;
use std::error::Error;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use world_to_image::{project_points, render_points, PointArg};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "world-to-image",
    about = "Projects wall frame points onto a dataset image and marks them"
)]
struct Opt {
    /// Root of the dataset (holds `images/` and `MotionCaptureData.csv`).
    #[structopt(short, long, default_value = "../dataset", parse(from_os_str))]
    dataset: PathBuf,
    /// Image number, counting from 1.
    #[structopt(short, long, default_value = "57")]
    image: usize,
    /// A point in the wall frame as X,Y,Z (mm). May be repeated.
    ///
    /// Defaults to the four outer corners of the panel. Each occurrence takes one point,
    /// which may start with a minus sign.
    #[structopt(short, long = "point", number_of_values = 1, allow_hyphen_values = true)]
    points: Vec<PointArg>,
    /// JSON calibration to use instead of the dataset camera's.
    #[structopt(short, long, parse(from_os_str))]
    calibration: Option<PathBuf>,
    /// Half-width of each marker in pixels.
    #[structopt(short, long, default_value = "8")]
    marker_size: u32,
    /// The output path to write to (autodetects image type from extension).
    ///
    /// If this is not provided, then the output goes to stdout as a PNG.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init_timed();
    let opt = Opt::from_args();

    let calibration: Calibration = match &opt.calibration {
        Some(path) => load_calibration(path)?,
        None => camera_calibration(),
    };
    let points: Vec<WorldPoint> = if opt.points.is_empty() {
        ExperimentalParams::default().panel_corners().to_vec()
    } else {
        opt.points.iter().map(|p| p.0).collect()
    };

    let dataset = Dataset::open(&opt.dataset)?;
    let camera_from_world = dataset.mocap_rel_camera(opt.image)?;
    let image = dataset.import_image(opt.image)?;

    let keypoints = project_points(&calibration, &camera_from_world, &points)?;

    let image = render_points(&image, &keypoints, opt.marker_size);
    if let Some(path) = opt.output {
        image.save(path)?;
    } else {
        // PNG encoding needs a seekable writer, which stdout is not.
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageOutputFormat::Png)?;
        std::io::stdout().lock().write_all(png.get_ref())?;
    }
    Ok(())
}
