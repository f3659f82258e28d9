use pcd_core::pointcloud::point::PointRecord;

/// Anything that can be placed in the octree.
pub trait Position {
    fn position(&self) -> [f64; 3];
}

impl Position for PointRecord {
    fn position(&self) -> [f64; 3] {
        PointRecord::position(self)
    }
}

impl Position for [f64; 3] {
    fn position(&self) -> [f64; 3] {
        *self
    }
}

impl Position for [i32; 3] {
    fn position(&self) -> [f64; 3] {
        [self[0] as f64, self[1] as f64, self[2] as f64]
    }
}

impl<T: Position + ?Sized> Position for &T {
    fn position(&self) -> [f64; 3] {
        (**self).position()
    }
}
