//! Distance between coordinates.
//!
//! If we have two coordinates we could use Haversine formula:
//!
//! ```norust
//! d=2R*sin ^ −1(√(sin^2((Φ2​−Φ1​​)/2)+cos(Φ1​)cos(Φ2​)sin^2((λ2​−λ1​​)/2)))
//! ```
//!
//! where:
//!
//! - R – Earth's radius (R = 6371 km);
//! - λ1, φ₁ – First point longitude and latitude coordinates;
//! - λ2, φ₂ – Second point longitude and latitude coordinates;
//! - d – Distance between them along Earth's surface.

mod models;

pub use models::*;

/// Radius of Earth
pub const R: f64 = 6371.0087714150598;

/// Movement between two consecutive fixes.
///
/// When both fixes carry altitude, the climb is folded into the distance.
pub fn movement(first: &Gps, second: &Gps) -> Movement {
    let flat_distance = haversine(
        first.longitude,
        first.latitude,
        second.longitude,
        second.latitude,
    );

    let distance = match (first.altitude, second.altitude) {
        (Some(altitude_1), Some(altitude_2)) => {
            (flat_distance.powi(2) + ((altitude_2 - altitude_1) / 1000.0).powi(2)).sqrt()
        }
        _ => flat_distance,
    };

    Movement {
        distance: Distance::from_kilometers(distance),
        duration: second.timestamp.saturating_sub(first.timestamp),
    }
}

/// Speed in km/h between two fixes, `None` if no time has passed between them.
pub fn speed_kmphr(first: &Gps, second: &Gps) -> Option<f64> {
    movement(first, second).speed_kmphr()
}

/// Calculates distance from point A to point B in kilometers
pub fn haversine(longitude_1: f64, latitude_1: f64, longitude_2: f64, latitude_2: f64) -> f64 {
    let d_lat = (std::f64::consts::PI / 180.0) * (latitude_2 - latitude_1);
    let d_lon = (std::f64::consts::PI / 180.0) * (longitude_2 - longitude_1);

    // convert to radians
    let latitude_1 = (std::f64::consts::PI / 180.0) * latitude_1;
    let latitude_2 = (std::f64::consts::PI / 180.0) * latitude_2;

    R * (2.0
        * ((d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * latitude_1.cos() * latitude_2.cos())
        .sqrt()
        .asin())
}
