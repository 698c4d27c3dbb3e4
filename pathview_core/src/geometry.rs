//! Planar and geographic primitives shared by the simplifier, animator and
//! distance tracker.
//!
//! Two different notions of distance live here and must not be mixed:
//! - **Planar** ([`segment_distance`]): raw degree deltas treated as a flat
//!   x/y plane. Only the simplifier uses it.
//! - **Geographic** ([`DistanceMetric`]): metres over the earth's surface.
//!   Only the distance tracker uses it.

use geo::{BoundingRect, Distance, Geodesic, Haversine, MultiPoint};
use serde::{Deserialize, Serialize};

/// One recorded latitude/longitude sample, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Converts to a `geo` point. `geo` is x/y ordered, so x = lon, y = lat.
    pub fn to_geo(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    /// Euclidean distance in raw degrees.
    pub fn planar_distance(&self, other: &Point) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

impl From<[f64; 2]> for Point {
    /// `[lat, lon]`, the order GPX track points use.
    fn from(coords: [f64; 2]) -> Self {
        Self::new(coords[0], coords[1])
    }
}

/// Shortest planar distance from `point` to the segment `start`-`end`.
///
/// The projection parameter is clamped to `[0, 1]`, so points beyond either
/// end measure to that endpoint. A zero-length segment measures to `start`.
pub fn segment_distance(point: &Point, start: &Point, end: &Point) -> f64 {
    let a = point.lat - start.lat;
    let b = point.lon - start.lon;
    let c = end.lat - start.lat;
    let d = end.lon - start.lon;

    let len_sq = c * c + d * d;
    let t = if len_sq != 0.0 {
        ((a * c + b * d) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let closest = Point::new(start.lat + t * c, start.lon + t * d);
    point.planar_distance(&closest)
}

/// Axis-aligned lat/lon box around a point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// None for an empty sequence, which has no extent to fit.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let multi: MultiPoint<f64> = points.iter().map(|p| p.to_geo()).collect();
        multi.bounding_rect().map(|rect| Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        })
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lon >= self.west
            && point.lon <= self.east
    }
}

/// Ground distance between two points, in metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Great-circle distance on a sphere of mean earth radius.
    #[default]
    Haversine,
    /// Distance on the WGS84 ellipsoid (Karney's method). Slower, sub-millimetre accurate.
    Geodesic,
}

impl DistanceMetric {
    pub fn distance(&self, a: &Point, b: &Point) -> f64 {
        match self {
            DistanceMetric::Haversine => Haversine::distance(a.to_geo(), b.to_geo()),
            DistanceMetric::Geodesic => Geodesic::distance(a.to_geo(), b.to_geo()),
        }
    }

    /// Sum of consecutive distances along `points`.
    pub fn path_length(&self, points: &[Point]) -> f64 {
        points
            .windows(2)
            .map(|pair| self.distance(&pair[0], &pair[1]))
            .sum()
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "haversine" => Ok(DistanceMetric::Haversine),
            "geodesic" => Ok(DistanceMetric::Geodesic),
            other => Err(format!("Unknown distance metric: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = segment_distance(
            &Point::new(1.0, 1.0),
            &Point::new(0.0, 0.0),
            &Point::new(2.0, 0.0),
        );
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(1.0, 0.0);

        // Beyond the end: measured to `end`, not to the infinite line
        let d = segment_distance(&Point::new(4.0, 4.0), &start, &end);
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);

        // Before the start
        let d = segment_distance(&Point::new(-3.0, 4.0), &start, &end);
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_segment_distance_degenerate_segment() {
        let p = Point::new(3.0, 4.0);
        let origin = Point::new(0.0, 0.0);
        assert_relative_eq!(segment_distance(&p, &origin, &origin), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            Point::new(53.54, -113.50),
            Point::new(53.60, -113.40),
            Point::new(53.50, -113.45),
        ];
        let bounds = Bounds::from_points(&points).unwrap();
        assert_eq!(bounds.south, 53.50);
        assert_eq!(bounds.north, 53.60);
        assert_eq!(bounds.west, -113.50);
        assert_eq!(bounds.east, -113.40);

        assert!(points.iter().all(|p| bounds.contains(p)));
        let center = bounds.center();
        assert_relative_eq!(center.lat, 53.55, epsilon = 1e-9);
        assert_relative_eq!(center.lon, -113.45, epsilon = 1e-9);
    }

    #[test]
    fn test_bounds_empty_and_single() {
        assert!(Bounds::from_points(&[]).is_none());

        let single = Bounds::from_points(&[Point::new(1.0, 2.0)]).unwrap();
        assert_eq!(single.south, single.north);
        assert_eq!(single.west, single.east);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        // One degree along a meridian is ~111.2km on a 6371km sphere
        let d = DistanceMetric::Haversine.distance(&Point::new(0.0, 0.0), &Point::new(1.0, 0.0));
        assert_relative_eq!(d, 111_195.0, max_relative = 1e-3);
    }

    #[test]
    fn test_metrics_agree_roughly() {
        let a = Point::new(53.5461, -113.4938); // Edmonton
        let b = Point::new(51.0447, -114.0719); // Calgary
        let h = DistanceMetric::Haversine.distance(&a, &b);
        let g = DistanceMetric::Geodesic.distance(&a, &b);
        assert!(h > 270_000.0 && h < 290_000.0);
        assert_relative_eq!(h, g, max_relative = 5e-3);
    }

    #[test]
    fn test_path_length() {
        let metric = DistanceMetric::Haversine;
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 1.0);
        let c = Point::new(1.0, 1.0);
        let total = metric.path_length(&[a, b, c]);
        assert_relative_eq!(
            total,
            metric.distance(&a, &b) + metric.distance(&b, &c),
            epsilon = 1e-9
        );
        assert_eq!(metric.path_length(&[a]), 0.0);
        assert_eq!(metric.path_length(&[]), 0.0);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("haversine".parse::<DistanceMetric>(), Ok(DistanceMetric::Haversine));
        assert_eq!("Geodesic".parse::<DistanceMetric>(), Ok(DistanceMetric::Geodesic));
        assert!("manhattan".parse::<DistanceMetric>().is_err());
    }
}
