//! Unit conversions and the aspect-preserving image fit.
//!
//! All lengths returned from this module are millimetres, the unit `genpdf` lays out in.

pub const MM_PER_INCH: f64 = 25.4;
pub const POINTS_PER_INCH: f64 = 72.0;

/// Converts inches to millimetres.
pub fn inches(value: f64) -> f64 {
    value * MM_PER_INCH
}

/// Converts typographic points to millimetres.
pub fn points(value: f64) -> f64 {
    value * MM_PER_INCH / POINTS_PER_INCH
}

/// Rendered width and height of an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedSize {
    pub width: f64,
    pub height: f64,
}

/// Natural dimensions of an image together with the box it has to fit in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRequest {
    pub natural_width: f64,
    pub natural_height: f64,
    pub target_width: f64,
    pub max_height: Option<f64>,
}

impl FitRequest {
    /// Height-to-width ratio of the natural image; degenerate images count as square.
    pub fn aspect(&self) -> f64 {
        if self.natural_width > 0.0 {
            self.natural_height / self.natural_width
        } else {
            1.0
        }
    }

    /// Scales the image to the target width and, if that makes it taller than the maximum
    /// height, clamps the height and derives the width from it instead.
    pub fn fit(&self) -> FittedSize {
        let aspect = self.aspect();
        let mut size = FittedSize {
            width: self.target_width,
            height: self.target_width * aspect,
        };

        if let Some(max_height) = self.max_height {
            if size.height > max_height {
                size.height = max_height;
                size.width = max_height / aspect;
            }
        }

        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(w: f64, h: f64, target: f64, max: Option<f64>) -> FitRequest {
        FitRequest {
            natural_width: w,
            natural_height: h,
            target_width: target,
            max_height: max,
        }
    }

    #[test]
    fn unconstrained_height_follows_aspect() {
        for (w, h, target) in [(800.0, 600.0, 140.0), (1200.0, 300.0, 100.0), (90.0, 160.0, 50.0)]
        {
            let fitted = request(w, h, target, None).fit();
            assert_eq!(fitted.width, target);
            assert!((fitted.height - target * h / w).abs() < 1e-9);
        }
    }

    #[test]
    fn tall_image_is_clamped_by_height() {
        let req = request(400.0, 1000.0, inches(5.5), Some(inches(4.0)));
        let fitted = req.fit();
        assert_eq!(fitted.height, inches(4.0));
        assert!((fitted.width - inches(4.0) / 2.5).abs() < 1e-9);
        assert!((fitted.width * req.aspect() - fitted.height).abs() < 1e-9);
    }

    #[test]
    fn image_within_bounds_is_not_clamped() {
        let fitted = request(1000.0, 500.0, inches(5.5), Some(inches(4.0))).fit();
        assert_eq!(fitted.width, inches(5.5));
        assert!((fitted.height - inches(2.75)).abs() < 1e-9);
    }

    #[test]
    fn zero_width_counts_as_square() {
        let fitted = request(0.0, 50.0, 30.0, None).fit();
        assert_eq!(fitted, FittedSize { width: 30.0, height: 30.0 });
    }

    #[test]
    fn unit_conversions() {
        assert!((inches(1.0) - 25.4).abs() < 1e-12);
        assert!((points(72.0) - 25.4).abs() < 1e-12);
        assert!((points(18.0) - inches(0.25)).abs() < 1e-12);
    }
}
