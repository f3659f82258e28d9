mod error;
mod summary;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;

use pcd_core::pointcloud::point::PointCloud;
use pcd_octree::{
    builder::{DEFAULT_LEAF_CAPACITY, DEFAULT_MAX_DEPTH},
    BuildOptions, OctreeBuilder,
};
use pcd_parser::parsers::{las::LasParser, Parser as _};
use pcd_parser::reader::read_all_bytes;

use crate::error::AppError;
use crate::summary::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "las2octree",
    about = "Decodes a LAS point cloud and composes an octree over its points",
    version
)]
struct Cli {
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Nodes with at most this many points are not split
    #[arg(long, default_value_t = DEFAULT_LEAF_CAPACITY)]
    leaf_capacity: usize,

    /// Depth at which splitting stops regardless of point count
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Drop the point lists of nodes that have children
    #[arg(long)]
    discard_interior_points: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print every node of the composed tree
    #[arg(long)]
    print_tree: bool,

    /// Log the public header fields
    #[arg(long)]
    header: bool,
}

impl Cli {
    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            leaf_capacity: self.leaf_capacity,
            max_depth: self.max_depth,
            retain_interior_points: !self.discard_interior_points,
        }
    }
}

fn log_header(point_cloud: &PointCloud) {
    let metadata = &point_cloud.metadata;
    let bounding_volume = &metadata.bounding_volume;
    log::info!(
        "File signature: {}",
        String::from_utf8_lossy(&point_cloud.summary.signature)
    );
    log::info!("LAS file format version: {}", metadata.version());
    log::info!(
        "System identifier: {}, generating software: {}",
        metadata.system_identifier,
        metadata.generating_software
    );
    log::info!(
        "File creation: day {} of {}",
        metadata.creation_day_of_year,
        metadata.creation_year
    );
    log::info!(
        "Point data format: {} ({} bytes per record), {} VLRs",
        metadata.point_data_format_id,
        metadata.point_data_record_length,
        metadata.number_of_variable_length_records
    );
    log::info!("X,Y,Z scale factors: {:?}", metadata.scale);
    log::info!("X,Y,Z offsets: {:?}", metadata.offset);
    for (axis, name) in ["X", "Y", "Z"].iter().enumerate() {
        log::info!(
            "Max {name}, Min {name}: {:.2} : {:.2}",
            bounding_volume.max[axis],
            bounding_volume.min[axis]
        );
    }
}

fn run<W: Write>(args: &Cli, out: &mut W) -> Result<Summary, AppError> {
    if !args.input.is_file() {
        return Err(AppError::InputNotFound(args.input.clone()));
    }

    log::info!("start parsing {:?}...", args.input);
    let start_local = std::time::Instant::now();
    let buffer = read_all_bytes(&args.input).map_err(|source| AppError::Io {
        path: args.input.clone(),
        source,
    })?;
    let point_cloud = LasParser.parse(&buffer)?;
    log::info!(
        "decoded {} points in {:?}",
        point_cloud.len(),
        start_local.elapsed()
    );
    if args.header {
        log_header(&point_cloud);
    }

    log::info!("start composing octree...");
    let start_local = std::time::Instant::now();
    let point_count = point_cloud.len();
    let tree = OctreeBuilder::new(args.build_options()).compose(point_cloud.into_points())?;
    log::info!("finish composing octree in {:?}", start_local.elapsed());

    if args.print_tree {
        write!(out, "{}", tree)?;
    }

    let summary = Summary::new(point_count, tree.statistics());
    match args.format {
        OutputFormat::Text => summary.write_text(out)?,
        OutputFormat::Json => summary.write_json(out)?,
    }
    Ok(summary)
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();
    let start = std::time::Instant::now();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&args, &mut out) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Elapsed: {:?}", start.elapsed());
}
