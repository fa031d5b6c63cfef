//! Session planning: from a geographic origin to an ordered tile plan.
//!
//! A session is the immutable description of one terrain build: the resolved
//! center tile plus the spiral-ordered list of neighbor tiles to fetch. The
//! session holds no connection or scene state; it only assigns work. Tiles
//! are loaded independently from the plan, in any order and with any
//! parallelism, and one tile's failure never invalidates the session.

use glam::Vec3;
use tilescape_decode::{GeoCoordinate, SpiralOffset, TileAddress, spiral_offsets, world_position};

use crate::error::Result;
use crate::types::TilePlan;

/// Parameters for building a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Geographic origin the terrain is built around.
    pub origin: GeoCoordinate,
    /// Tile zoom level.
    pub zoom: u8,
    /// Number of spiral offsets to plan.
    pub tile_count: usize,
    /// World-space edge length of one tile mesh.
    pub tile_world_size: f32,
}

/// An immutable plan for one terrain build.
#[derive(Debug, Clone)]
pub struct Session {
    center: TileAddress,
    plans: Vec<TilePlan>,
    tile_world_size: f32,
}

impl Session {
    /// Resolve the center tile and lay out the spiral plan.
    ///
    /// Spiral offsets whose row falls outside the tiling scheme (past a
    /// pole) have no tile and are skipped; columns wrap across the
    /// antimeridian. The surviving plan keeps spiral order, so nearer tiles
    /// come first.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the zoom level is unsupported. The origin
    /// coordinate is validated at construction by [`GeoCoordinate::new`].
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let center = TileAddress::from_geo(config.origin, config.zoom)?;

        let offsets = spiral_offsets(config.tile_count);
        let plans: Vec<TilePlan> = offsets
            .into_iter()
            .filter_map(|offset| {
                center
                    .neighbor(offset)
                    .map(|address| TilePlan { offset, address })
            })
            .collect();

        let skipped = config.tile_count - plans.len();
        if skipped > 0 {
            tracing::warn!(skipped, "spiral offsets beyond the tiling scheme edge");
        }
        tracing::info!(
            x = center.x,
            y = center.y,
            z = center.z,
            tiles = plans.len(),
            "session planned"
        );

        Ok(Self {
            center,
            plans,
            tile_world_size: config.tile_world_size,
        })
    }

    /// The tile containing the session origin.
    #[must_use]
    pub fn center(&self) -> TileAddress {
        self.center
    }

    /// The spiral-ordered tile plan.
    #[must_use]
    pub fn plans(&self) -> &[TilePlan] {
        &self.plans
    }

    /// World-space edge length of one tile mesh.
    #[must_use]
    pub fn tile_world_size(&self) -> f32 {
        self.tile_world_size
    }

    /// World position of the center tile, for framing the initial view.
    #[must_use]
    pub fn framing_position(&self) -> Vec3 {
        world_position(SpiralOffset::CENTER, self.tile_world_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashSet;
    use tilescape_decode::MAX_ZOOM;

    fn config() -> SessionConfig {
        SessionConfig {
            origin: GeoCoordinate::new(40.0, -105.0).unwrap(),
            zoom: 15,
            tile_count: 16,
            tile_world_size: 512.0,
        }
    }

    #[test]
    fn test_plan_matches_spiral() {
        let session = Session::new(&config()).unwrap();

        assert_eq!(session.center().z, 15);
        assert_eq!(session.plans().len(), 16);
        assert_eq!(session.plans()[0].offset, SpiralOffset::CENTER);
        assert_eq!(session.plans()[0].address, session.center());
    }

    #[test]
    fn test_addresses_follow_offsets() {
        let session = Session::new(&config()).unwrap();
        let center = session.center();

        for plan in session.plans() {
            assert_eq!(
                i64::from(plan.address.x),
                i64::from(center.x) + i64::from(plan.offset.dx)
            );
            assert_eq!(
                i64::from(plan.address.y),
                i64::from(center.y) + i64::from(plan.offset.dy)
            );
        }
    }

    #[test]
    fn test_world_positions_distinct_and_spaced() {
        // 16 placed tiles must land at pairwise-distinct world positions,
        // each an exact multiple of the tile size.
        let session = Session::new(&config()).unwrap();
        let size = session.tile_world_size();

        let positions: Vec<Vec3> = session
            .plans()
            .iter()
            .map(|plan| world_position(plan.offset, size))
            .collect();
        assert_eq!(positions.len(), 16);

        let unique: HashSet<(i64, i64)> = positions
            .iter()
            .map(|p| (p.x as i64, p.y as i64))
            .collect();
        assert_eq!(unique.len(), 16);

        for p in &positions {
            assert_eq!(p.x % size, 0.0);
            assert_eq!(p.y % size, 0.0);
        }
    }

    #[test]
    fn test_polar_offsets_skipped() {
        // At zoom 1 around the north edge, the spiral's northern offsets
        // have no tile and are dropped; the rest keep their order.
        let session = Session::new(&SessionConfig {
            origin: GeoCoordinate::new(84.0, 0.0).unwrap(),
            zoom: 1,
            tile_count: 9,
            tile_world_size: 100.0,
        })
        .unwrap();

        assert_eq!(session.center().y, 0);
        assert!(session.plans().len() < 9);
        assert!(session.plans().iter().all(|p| p.address.y < 2));
    }

    #[test]
    fn test_invalid_zoom_is_fatal() {
        let error = Session::new(&SessionConfig {
            zoom: MAX_ZOOM + 1,
            ..config()
        })
        .unwrap_err();
        assert!(matches!(error, Error::Tile(_)));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_framing_position_is_center_tile() {
        let session = Session::new(&config()).unwrap();
        assert_eq!(session.framing_position(), Vec3::ZERO);
    }
}
