use geo::{coord, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CdlError, Result};

/// Axis-aligned region over two projected spatial axes and one time axis.
///
/// Time is expressed in Unix epoch seconds. Every constructor enforces
/// `min <= max` on each axis, so a value of this type is always well formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVolume", into = "RawVolume")]
pub struct BoundingVolume {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    min_t: f64,
    max_t: f64,
}

impl BoundingVolume {
    /// Create a bounding volume from `(minx, maxx, miny, maxy, mint, maxt)`
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_t: f64,
        max_t: f64,
    ) -> Result<Self> {
        check_axis("x", min_x, max_x)?;
        check_axis("y", min_y, max_y)?;
        check_axis("t", min_t, max_t)?;

        Ok(Self { min_x, max_x, min_y, max_y, min_t, max_t })
    }

    /// Combine a spatial rectangle with a time interval
    pub fn from_rect(rect: Rect<f64>, min_t: f64, max_t: f64) -> Result<Self> {
        let min = rect.min();
        let max = rect.max();
        Self::new(min.x, max.x, min.y, max.y, min_t, max_t)
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn min_t(&self) -> f64 {
        self.min_t
    }

    pub fn max_t(&self) -> f64 {
        self.max_t
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn duration(&self) -> f64 {
        self.max_t - self.min_t
    }

    /// Spatial footprint of the volume
    pub fn spatial_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_x, y: self.min_y },
            coord! { x: self.max_x, y: self.max_y },
        )
    }

    /// Closed-interval overlap on all three axes.
    ///
    /// Shared boundaries count as overlap, so an instant query
    /// (`min_t == max_t`) inside a year intersects that year.
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
            && self.min_t <= other.max_t
            && other.min_t <= self.max_t
    }

    /// Whether `other` lies entirely within this volume
    pub fn contains(&self, other: &BoundingVolume) -> bool {
        self.min_x <= other.min_x
            && other.max_x <= self.max_x
            && self.min_y <= other.min_y
            && other.max_y <= self.max_y
            && self.min_t <= other.min_t
            && other.max_t <= self.max_t
    }

    /// Smallest volume enclosing both
    pub fn union(&self, other: &BoundingVolume) -> BoundingVolume {
        BoundingVolume {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
            min_t: self.min_t.min(other.min_t),
            max_t: self.max_t.max(other.max_t),
        }
    }

    /// Components in `(minx, maxx, miny, maxy, mint, maxt)` order
    pub fn to_array(&self) -> [f64; 6] {
        [self.min_x, self.max_x, self.min_y, self.max_y, self.min_t, self.max_t]
    }
}

impl fmt::Display for BoundingVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {}, {})",
            self.min_x, self.max_x, self.min_y, self.max_y, self.min_t, self.max_t
        )
    }
}

fn check_axis(axis: &str, min: f64, max: f64) -> Result<()> {
    if min.is_nan() || max.is_nan() {
        return Err(CdlError::InvalidBoundingVolume {
            reason: format!("{} bounds must not be NaN", axis),
        });
    }

    if min > max {
        return Err(CdlError::InvalidBoundingVolume {
            reason: format!("min{} ({}) is greater than max{} ({})", axis, min, axis, max),
        });
    }

    Ok(())
}

/// Serialized form, validated on the way back in
#[derive(Serialize, Deserialize)]
struct RawVolume {
    minx: f64,
    maxx: f64,
    miny: f64,
    maxy: f64,
    mint: f64,
    maxt: f64,
}

impl TryFrom<RawVolume> for BoundingVolume {
    type Error = CdlError;

    fn try_from(raw: RawVolume) -> Result<Self> {
        BoundingVolume::new(raw.minx, raw.maxx, raw.miny, raw.maxy, raw.mint, raw.maxt)
    }
}

impl From<BoundingVolume> for RawVolume {
    fn from(volume: BoundingVolume) -> Self {
        RawVolume {
            minx: volume.min_x,
            maxx: volume.max_x,
            miny: volume.min_y,
            maxy: volume.max_y,
            mint: volume.min_t,
            maxt: volume.max_t,
        }
    }
}
