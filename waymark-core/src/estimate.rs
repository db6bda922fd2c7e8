//! Walking distance and duration between two points.
//!
//! Distances are great-circle (haversine) distances on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Durations assume a constant walking pace of
//! [`WALKING_SPEED_KMH`] and are truncated to whole minutes.

use geo::Coord;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed walking pace used by [`walking_minutes`].
pub const WALKING_SPEED_KMH: f64 = 5.0;

/// Great-circle distance in kilometres between two WGS84 positions.
///
/// Coordinates use `x = longitude` and `y = latitude`, both in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waymark_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// assert_eq!(haversine_km(origin, origin), 0.0);
///
/// let one_degree = haversine_km(origin, Coord { x: 0.0, y: 1.0 });
/// assert!((one_degree - 111.19).abs() < 0.01);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat_delta = (to.y - from.y).to_radians();
    let lon_delta = (to.x - from.x).to_radians();

    let lat_sin = (lat_delta / 2.0).sin();
    let lon_sin = (lon_delta / 2.0).sin();
    let cos_product = from.y.to_radians().cos() * to.y.to_radians().cos();

    // Rounding can push the haversine slightly past 1 for antipodal points.
    let half_chord = (lat_sin * lat_sin + cos_product * lon_sin * lon_sin).clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    EARTH_RADIUS_KM * angle
}

/// Whole minutes needed to walk `distance_km` at [`WALKING_SPEED_KMH`].
///
/// The result is truncated towards zero. Negative or non-finite distances
/// yield `0`.
///
/// # Examples
/// ```
/// use waymark_core::walking_minutes;
///
/// assert_eq!(walking_minutes(5.0), 60);
/// assert_eq!(walking_minutes(0.99), 11);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "converting a distance to a duration divides by the walking pace"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "truncation to whole minutes is the intended rounding"
)]
pub fn walking_minutes(distance_km: f64) -> u32 {
    if !distance_km.is_finite() {
        return 0;
    }
    let hours = distance_km / WALKING_SPEED_KMH;
    // `as` saturates negative values to zero.
    (hours * 60.0) as u32
}

/// Distance and walking time between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteEstimate {
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
    /// Walking time in whole minutes.
    pub minutes: u32,
}

impl RouteEstimate {
    /// Estimate the walk from `from` to `to`.
    #[must_use]
    pub fn between(from: Coord<f64>, to: Coord<f64>) -> Self {
        let distance_km = haversine_km(from, to);
        Self {
            distance_km,
            minutes: walking_minutes(distance_km),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MOSCOW: Coord<f64> = Coord {
        x: 37.6208,
        y: 55.7539,
    };
    const ST_PETERSBURG: Coord<f64> = Coord {
        x: 30.3146,
        y: 59.9398,
    };

    #[rstest]
    fn moscow_to_st_petersburg_is_about_634_km() {
        let distance = haversine_km(MOSCOW, ST_PETERSBURG);
        assert!((distance - 634.0).abs() < 2.0, "unexpected distance {distance}");
    }

    #[rstest]
    fn antipodal_points_are_half_the_circumference() {
        let distance = haversine_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 180.0, y: 0.0 });
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half_circumference).abs() < 1e-6);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(5.0, 60)]
    #[case(2.5, 30)]
    #[case(0.08, 0)]
    #[case(10.01, 120)]
    fn walking_minutes_truncates(#[case] distance: f64, #[case] expected: u32) {
        assert_eq!(walking_minutes(distance), expected);
    }

    #[rstest]
    #[case(-3.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn walking_minutes_clamps_invalid_input(#[case] distance: f64) {
        assert_eq!(walking_minutes(distance), 0);
    }

    #[rstest]
    fn estimate_combines_distance_and_time() {
        let estimate = RouteEstimate::between(MOSCOW, ST_PETERSBURG);
        assert_eq!(estimate.minutes, walking_minutes(estimate.distance_km));
        assert!(estimate.minutes > 7000);
    }
}
