use std::env;

use pcd_parser::parsers::{las::LasParser, Parser as _};
use pcd_parser::reader::read_all_bytes;

fn main() {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: read_las <FILE>");
        return;
    };

    let buffer = read_all_bytes(&path).unwrap();
    let point_cloud = LasParser.parse(&buffer).unwrap();

    println!(
        "Number of points: {num_points}",
        num_points = point_cloud.len()
    );
    println!("LAS version: {}", point_cloud.metadata.version());
    if let Some(first) = point_cloud.points.first() {
        println!("First point: {:?}", first);
    }
}
