use pcd_core::pointcloud::point::BoundingVolume;

/// One of the eight children of a split box.
///
/// Bit 0 of the index selects the upper X half, bit 1 the upper Y half and
/// bit 2 the upper Z half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Octant(u8);

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant(0),
        Octant(1),
        Octant(2),
        Octant(3),
        Octant(4),
        Octant(5),
        Octant(6),
        Octant(7),
    ];

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_upper(self, axis: usize) -> bool {
        (self.0 >> axis) & 1 == 1
    }

    /// Child box of `parent` split at `center`: `[min, center]` or `[center, max]` per axis.
    pub fn bounds(self, parent: &BoundingVolume, center: &[f64; 3]) -> BoundingVolume {
        let mut child = *parent;
        for axis in 0..3 {
            if self.is_upper(axis) {
                child.min[axis] = center[axis];
            } else {
                child.max[axis] = center[axis];
            }
        }
        child
    }

    /// Octant owning `position`. A coordinate equal to the center goes to the lower half.
    pub fn locate(center: &[f64; 3], position: &[f64; 3]) -> Octant {
        let index = (0..3).fold(0u8, |index, axis| {
            index | (((position[axis] > center[axis]) as u8) << axis)
        });
        Octant(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> BoundingVolume {
        BoundingVolume::new([0.0; 3], [1.0; 3])
    }

    #[test]
    fn test_octant_bounds() {
        let parent = unit_cube();
        let center = parent.center();

        assert_eq!(
            Octant::ALL[0].bounds(&parent, &center),
            BoundingVolume::new([0.0, 0.0, 0.0], [0.5, 0.5, 0.5])
        );
        assert_eq!(
            Octant::ALL[1].bounds(&parent, &center),
            BoundingVolume::new([0.5, 0.0, 0.0], [1.0, 0.5, 0.5])
        );
        assert_eq!(
            Octant::ALL[6].bounds(&parent, &center),
            BoundingVolume::new([0.0, 0.5, 0.5], [0.5, 1.0, 1.0])
        );
        assert_eq!(
            Octant::ALL[7].bounds(&parent, &center),
            BoundingVolume::new([0.5, 0.5, 0.5], [1.0, 1.0, 1.0])
        );
    }

    #[test]
    fn test_octants_partition_parent() {
        let parent = BoundingVolume::new([-4.0, 10.0, 0.0], [4.0, 30.0, 3.0]);
        let center = parent.center();
        let children: Vec<BoundingVolume> = Octant::ALL
            .iter()
            .map(|octant| octant.bounds(&parent, &center))
            .collect();

        let total: f64 = children.iter().map(BoundingVolume::volume).sum();
        assert_eq!(total, parent.volume());
        for child in &children {
            assert!(parent.contains_volume(child));
            assert_eq!(child.volume(), parent.volume() / 8.0);
        }
    }

    #[test]
    fn test_locate_tie_break() {
        let center = [0.5, 0.5, 0.5];

        assert_eq!(Octant::locate(&center, &[0.5, 0.5, 0.5]), Octant::ALL[0]);
        assert_eq!(Octant::locate(&center, &[1.0, 0.5, 0.5]), Octant::ALL[1]);
        assert_eq!(Octant::locate(&center, &[0.5, 1.0, 0.5]), Octant::ALL[2]);
        assert_eq!(Octant::locate(&center, &[0.5, 0.5, 1.0]), Octant::ALL[4]);
        assert_eq!(Octant::locate(&center, &[1.0, 1.0, 1.0]), Octant::ALL[7]);
        assert_eq!(Octant::locate(&center, &[0.0, 0.0, 0.0]), Octant::ALL[0]);
    }

    #[test]
    fn test_located_point_is_inside_its_octant() {
        let parent = unit_cube();
        let center = parent.center();
        for position in [[0.0, 1.0, 0.5], [0.25, 0.75, 1.0], [1.0, 0.0, 0.5000001]] {
            let octant = Octant::locate(&center, &position);
            assert!(octant.bounds(&parent, &center).contains(&position));
        }
    }
}
