//! Geometric filtering of candidate rooms.
//!
//! Each reduced cycle becomes a polygon on the plan plane. A candidate whose
//! centre falls inside a candidate of at least its own rank is a region
//! enclosed by another room (for instance an inner wall ring) and is not a
//! room itself.

use crate::config::TopologyConfig;
use crate::cycle_finder::Cycle;
use crate::plan::{PlanCoord, Point, Vec3};
use geo::{Area, BoundingRect, Contains, Coord, LineString, Point as GeoPoint, Polygon, Rect};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// A room that survived containment filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCandidate {
    pub cycle: Cycle,
    /// Corner coordinates in cycle order.
    pub outline: Vec<PlanCoord>,
    /// Plan-projected centre, also the persisted identity key.
    pub center: Vec3,
    pub area: f64,
}

impl RoomCandidate {
    /// Position of the centre marker in render space, where `y` is up.
    pub fn marker_position(&self) -> Vec3 {
        Vec3::new(self.center.x, self.center.z, self.center.y)
    }
}

/// Plan polygon for a cycle, with plan `z` on the polygon's `y` axis. The ring
/// starts at the last vertex so the closing edge comes first.
pub fn room_polygon(points: &[Point], cycle: &[usize]) -> Polygon<f64> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(cycle.len() + 1);

    if let Some(&last) = cycle.last() {
        coords.push(Coord {
            x: points[last].x,
            y: points[last].z,
        });
    }
    coords.extend(cycle.iter().map(|&i| Coord {
        x: points[i].x,
        y: points[i].z,
    }));

    Polygon::new(LineString::from(coords), vec![])
}

/// Bounding-box centre of the polygon extruded by `depth`.
///
/// The extrusion runs along the polygon's normal, so the third component is
/// always `depth / 2`. Returns `None` for an empty polygon.
pub fn extruded_center(polygon: &Polygon<f64>, depth: f64) -> Option<Vec3> {
    let rect = polygon.bounding_rect()?;
    let center = rect.center();

    Some(Vec3::new(center.x, center.y, depth / 2.0))
}

/// Point-in-polygon test for a ring of `[x, y]` pairs. Points on the ring
/// itself are outside.
pub fn inside(point: [f64; 2], ring: &[[f64; 2]]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let coords: Vec<Coord<f64>> = ring.iter().map(|&[x, y]| Coord { x, y }).collect();
    let polygon = Polygon::new(LineString::from(coords), vec![]);
    let Some(bounds) = polygon.bounding_rect() else {
        return false;
    };

    contains_point(&polygon, &bounds, point)
}

/// Strict containment, rejecting points outside `bounds` before the ring walk.
fn contains_point(polygon: &Polygon<f64>, bounds: &Rect<f64>, point: [f64; 2]) -> bool {
    let (min, max) = (bounds.min(), bounds.max());
    if point[0] <= min.x || point[0] >= max.x || point[1] <= min.y || point[1] >= max.y {
        return false;
    }

    polygon.contains(&GeoPoint::new(point[0], point[1]))
}

struct Shape {
    polygon: Polygon<f64>,
    bounds: Rect<f64>,
    center: Vec3,
    area: f64,
    vertices: usize,
}

/// `true` when `a` ranks above `b`: more vertices, then larger area, then
/// earlier enumeration.
fn outranks(a: (usize, &Shape), b: (usize, &Shape)) -> bool {
    match a.1.vertices.cmp(&b.1.vertices) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match a.1.area.partial_cmp(&b.1.area) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => a.0 < b.0,
            _ => false,
        },
    }
}

/// Discard candidates whose centre lies inside another candidate that
/// outranks them. Survivors keep their input order.
pub fn filter_nested(
    points: &[Point],
    cycles: Vec<Cycle>,
    config: &TopologyConfig,
) -> Vec<RoomCandidate> {
    let mut shapes = Vec::with_capacity(cycles.len());
    let mut kept_cycles = Vec::with_capacity(cycles.len());

    for cycle in cycles {
        let polygon = room_polygon(points, &cycle);
        let (Some(bounds), Some(center)) = (
            polygon.bounding_rect(),
            extruded_center(&polygon, config.floor_depth),
        ) else {
            warn!("Skipping cycle {:?} without a bounding box", cycle);
            continue;
        };
        shapes.push(Shape {
            area: polygon.unsigned_area(),
            bounds,
            polygon,
            center,
            vertices: cycle.len(),
        });
        kept_cycles.push(cycle);
    }

    let total = shapes.len();
    let mut rooms = Vec::new();

    for (i, (shape, cycle)) in shapes.iter().zip(kept_cycles).enumerate() {
        let center = [shape.center.x, shape.center.y];

        let enclosed = shapes.iter().enumerate().any(|(j, other)| {
            j != i
                && outranks((j, other), (i, shape))
                && contains_point(&other.polygon, &other.bounds, center)
        });

        if enclosed {
            debug!("Discarding cycle {:?}: centre lies inside another room", cycle);
            continue;
        }

        let outline = cycle.iter().map(|&p| points[p].coord()).collect();
        rooms.push(RoomCandidate {
            cycle,
            outline,
            center: shape.center,
            area: shape.area,
        });
    }

    debug!("{} of {} candidates are rooms", rooms.len(), total);
    rooms
}
