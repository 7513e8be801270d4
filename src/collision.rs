use glam::DVec2;

/// Axis-aligned box given by its top-left corner and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// Square box enclosing a circle
    pub fn around(centre: DVec2, radius: f64) -> Self {
        Self {
            min: centre - DVec2::splat(radius),
            size: DVec2::splat(radius * 2.0),
        }
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    /// Boxes sharing only an edge do not intersect, and empty boxes never do.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0
        {
            return false;
        }

        let (a_max, b_max) = (self.max(), other.max());

        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}
