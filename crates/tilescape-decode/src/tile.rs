//! Geographic coordinates and tile addressing.
//!
//! Implements the standard Web-Mercator square tiling scheme: the world is
//! divided into `2^z * 2^z` square tiles at zoom level `z`, with tile rows
//! growing southward from the north pole.

use crate::error::TileError;
use crate::spiral::SpiralOffset;

/// Maximum supported zoom level.
///
/// Keeps `2^z` comfortably inside `u32` tile indices; real imagery sources
/// top out well below this (Mapbox serves up to z22).
pub const MAX_ZOOM: u8 = 30;

/// A validated geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, validating the geographic range.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidCoordinate`] if latitude is outside
    /// `[-90, 90]`, longitude is outside `[-180, 180]`, or either is not
    /// finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TileError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(TileError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Latitude in degrees, in `[-90, 90]`.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, in `[-180, 180]`.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Address of one tile in the square tiling scheme.
///
/// Invariant: `x < 2^z` and `y < 2^z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    /// Tile column, growing eastward from the antimeridian.
    pub x: u32,
    /// Tile row, growing southward from the north pole.
    pub y: u32,
    /// Zoom level.
    pub z: u8,
}

impl TileAddress {
    /// Resolve a geographic coordinate to the tile containing it.
    ///
    /// Uses the standard Web-Mercator point-to-tile projection. The result
    /// is clamped into `[0, 2^z - 1]` on both axes to absorb floating-point
    /// edge cases at the poles and the antimeridian.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidZoom`] if `zoom` exceeds [`MAX_ZOOM`].
    pub fn from_geo(coordinate: GeoCoordinate, zoom: u8) -> Result<Self, TileError> {
        if zoom > MAX_ZOOM {
            return Err(TileError::InvalidZoom { zoom });
        }

        let n = f64::from(1u32 << zoom);
        let fx = (coordinate.longitude() + 180.0) / 360.0 * n;

        let lat_rad = coordinate.latitude().to_radians();
        let fy = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
            * n;

        // Float-to-int casts saturate, so infinities at the poles land on
        // the clamp bounds rather than wrapping.
        let max_index = i64::from((1u32 << zoom) - 1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let clamp = |v: f64| (v.floor() as i64).clamp(0, max_index) as u32;

        Ok(Self {
            x: clamp(fx),
            y: clamp(fy),
            z: zoom,
        })
    }

    /// The neighboring tile at a spiral offset from this one.
    ///
    /// The column wraps across the antimeridian. Returns `None` when the row
    /// falls off the top or bottom edge of the tiling scheme; such neighbors
    /// simply do not exist and are skipped by session planning.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn neighbor(&self, offset: SpiralOffset) -> Option<Self> {
        let n = 1i64 << self.z;
        let x = (i64::from(self.x) + i64::from(offset.dx)).rem_euclid(n);
        let y = i64::from(self.y) + i64::from(offset.dy);
        if (0..n).contains(&y) {
            Some(Self {
                x: x as u32,
                y: y as u32,
                z: self.z,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(GeoCoordinate::new(40.0, -105.0).is_ok());
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
        assert!(matches!(
            GeoCoordinate::new(90.1, 0.0),
            Err(TileError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            GeoCoordinate::new(0.0, -180.5),
            Err(TileError::InvalidCoordinate { .. })
        ));
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_from_geo_zoom_zero() {
        // At zoom 0 the whole world is one tile.
        let coord = GeoCoordinate::new(40.0, -105.0).unwrap();
        let tile = TileAddress::from_geo(coord, 0).unwrap();
        assert_eq!((tile.x, tile.y, tile.z), (0, 0, 0));
    }

    #[test]
    fn test_from_geo_known_tile() {
        // Boulder, Colorado at z15. Reference values from tilebelt's
        // pointToTile(-105, 40, 15).
        let coord = GeoCoordinate::new(40.0, -105.0).unwrap();
        let tile = TileAddress::from_geo(coord, 15).unwrap();
        assert_eq!((tile.x, tile.y, tile.z), (6826, 12405, 15));
    }

    #[test]
    fn test_from_geo_invalid_zoom() {
        let coord = GeoCoordinate::new(0.0, 0.0).unwrap();
        assert!(matches!(
            TileAddress::from_geo(coord, MAX_ZOOM + 1),
            Err(TileError::InvalidZoom { .. })
        ));
    }

    #[test]
    fn test_from_geo_pole_clamped() {
        // tan(90 degrees) blows up; the row must clamp, not wrap.
        let north = GeoCoordinate::new(90.0, 0.0).unwrap();
        let tile = TileAddress::from_geo(north, 10).unwrap();
        assert_eq!(tile.y, 0);

        let south = GeoCoordinate::new(-90.0, 0.0).unwrap();
        let tile = TileAddress::from_geo(south, 10).unwrap();
        assert_eq!(tile.y, (1 << 10) - 1);
    }

    #[test]
    fn test_neighbor_wraps_column() {
        let tile = TileAddress { x: 0, y: 1, z: 2 };
        let west = tile.neighbor(SpiralOffset { dx: -1, dy: 0 }).unwrap();
        assert_eq!((west.x, west.y), (3, 1));
    }

    #[test]
    fn test_neighbor_off_the_edge() {
        let tile = TileAddress { x: 1, y: 0, z: 2 };
        assert!(tile.neighbor(SpiralOffset { dx: 0, dy: -1 }).is_none());
        assert!(tile.neighbor(SpiralOffset { dx: 0, dy: 4 }).is_none());
    }

    proptest! {
        #[test]
        fn prop_resolved_tile_in_range(
            zoom in 0u8..=22,
            lat in -85.0f64..=85.0,
            lon in -180.0f64..=180.0,
        ) {
            let coord = GeoCoordinate::new(lat, lon).unwrap();
            let tile = TileAddress::from_geo(coord, zoom).unwrap();
            let n = 1u32 << zoom;
            prop_assert!(tile.x < n);
            prop_assert!(tile.y < n);
        }

        #[test]
        fn prop_resolution_is_deterministic(
            zoom in 0u8..=22,
            lat in -85.0f64..=85.0,
            lon in -180.0f64..=180.0,
        ) {
            let coord = GeoCoordinate::new(lat, lon).unwrap();
            let a = TileAddress::from_geo(coord, zoom).unwrap();
            let b = TileAddress::from_geo(coord, zoom).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
