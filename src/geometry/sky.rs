//! Celestial sphere as seen by an observer on the planet's surface.

use std::f64::consts::FRAC_PI_2;

use bevy::math::{DMat3, DVec3};

use super::{
    GeometryError, Horizontal, ecliptic_to_equatorial, equatorial_to_horizon, globe,
    normalize_degrees, parallel, solar_coordinates, transform,
};
use crate::types::{DEGREES_PER_HOUR, DayType, ObserverConfig, ViewFrame};

/// Compass points on the horizon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::East,
        Cardinal::South,
        Cardinal::West,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Cardinal::North => "N",
            Cardinal::East => "E",
            Cardinal::South => "S",
            Cardinal::West => "W",
        }
    }

    /// Unit vector in the horizon frame.
    pub fn horizon_vector(self) -> DVec3 {
        match self {
            Cardinal::North => DVec3::Y,
            Cardinal::East => DVec3::X,
            Cardinal::South => DVec3::NEG_Y,
            Cardinal::West => DVec3::NEG_X,
        }
    }
}

/// Where the sun is, in every coordinate system the view needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunPosition {
    pub ecliptic_longitude_deg: f64,
    pub declination_deg: f64,
    /// Right ascension, `[0, 360)` degrees.
    pub right_ascension_deg: f64,
    /// Hour angle, `[-180, 180)` degrees, negative before transit.
    pub hour_angle_deg: f64,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    /// Unit vector in the equatorial frame.
    pub direction: DVec3,
}

/// Everything drawn by the celestial-sphere view, for one configuration.
///
/// Curves are closed polylines of unit vectors in the equatorial frame; use
/// [`SkyGeometry::view_rotation`] to bring them into the frame held fixed on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SkyGeometry {
    pub sun: SunPosition,
    pub equator: Vec<DVec3>,
    pub ecliptic: Vec<DVec3>,
    /// Circle of constant declination traced by the sun during the day.
    pub sun_diurnal_circle: Vec<DVec3>,
    pub horizon: Vec<DVec3>,
    /// Circle traced by the zenith during a sidereal day (declination = latitude).
    pub zenith_diurnal_circle: Vec<DVec3>,
    pub zenith: DVec3,
    pub cardinal_points: [(Cardinal, DVec3); 4],
    /// RA/Dec coordinate grid.
    pub grid: Vec<Vec<DVec3>>,
    pub grid_labels: Vec<(&'static str, DVec3)>,
    /// Equatorial → ecliptic rotation.
    pub to_ecliptic: DMat3,
    /// Equatorial → horizon rotation.
    pub to_horizon: DMat3,
}

impl SkyGeometry {
    /// Rotation from the equatorial frame into `view`.
    pub fn view_rotation(&self, view: ViewFrame) -> DMat3 {
        match view {
            ViewFrame::Ecliptic => self.to_ecliptic,
            ViewFrame::Equator => DMat3::IDENTITY,
            ViewFrame::Horizon => self.to_horizon,
        }
    }

    pub fn is_sun_up(&self) -> bool {
        self.sun.altitude_deg > 0.0
    }
}

/// Labels placed on the RA/Dec grid (equatorial frame).
const GRID_LABELS: [(&str, DVec3); 6] = [
    ("+90°", DVec3::Z),
    ("\u{2212}90°", DVec3::NEG_Z),
    ("0h", DVec3::X),
    ("6h", DVec3::Y),
    ("12h", DVec3::NEG_X),
    ("18h", DVec3::NEG_Y),
];

/// Evaluate the celestial sphere for an observer configuration.
///
/// Fails only with [`GeometryError::InvalidParameter`]; polar latitudes and a sun
/// at the zenith are handled in place.
pub fn evaluate_sky(config: &ObserverConfig) -> Result<SkyGeometry, GeometryError> {
    config.validate()?;

    let obliquity = config.obliquity_deg.to_radians();
    let latitude = config.latitude_deg.to_radians();
    let solar = solar_coordinates(obliquity, config.time_of_year());

    let clock_angle = (config.hour_of_day - 12.0) * DEGREES_PER_HOUR;
    let sidereal = match config.day_type {
        DayType::Apparent => solar.right_ascension + clock_angle.to_radians(),
        DayType::Mean => solar.longitude + clock_angle.to_radians(),
        DayType::Sidereal => (config.hour_of_day * DEGREES_PER_HOUR).to_radians(),
    };

    let to_equatorial = ecliptic_to_equatorial(obliquity);
    let to_ecliptic = to_equatorial.transpose();
    let to_horizon = equatorial_to_horizon(latitude, sidereal);
    let from_horizon = to_horizon.transpose();

    let (sin_lon, cos_lon) = solar.longitude.sin_cos();
    let sun_direction = to_equatorial * DVec3::new(cos_lon, sin_lon, 0.0);
    let horizontal = Horizontal::from_vector(to_horizon * sun_direction);
    let hour_angle_deg =
        normalize_degrees((sidereal - solar.right_ascension).to_degrees() + 180.0) - 180.0;

    let sun = SunPosition {
        ecliptic_longitude_deg: normalize_degrees(solar.longitude.to_degrees()),
        declination_deg: solar.declination.to_degrees(),
        right_ascension_deg: solar.right_ascension.to_degrees(),
        hour_angle_deg,
        altitude_deg: horizontal.altitude_deg,
        azimuth_deg: horizontal.azimuth_deg,
        direction: sun_direction,
    };

    let great_circle = parallel(FRAC_PI_2);
    let cardinal_points = Cardinal::ALL.map(|c| (c, from_horizon * c.horizon_vector()));

    Ok(SkyGeometry {
        sun,
        equator: great_circle.clone(),
        ecliptic: transform(to_equatorial, &great_circle),
        sun_diurnal_circle: parallel(FRAC_PI_2 - solar.declination),
        horizon: transform(from_horizon, &great_circle),
        zenith_diurnal_circle: parallel(FRAC_PI_2 - latitude),
        zenith: from_horizon * DVec3::Z,
        cardinal_points,
        grid: globe(3, 3),
        grid_labels: GRID_LABELS.to_vec(),
        to_ecliptic,
        to_horizon,
    })
}
