//! Conversion of provider map coordinates into WGS84 degrees.
//!
//! KorService2 publishes `mapx` (longitude) and `mapy` (latitude) as strings.
//! Older payloads use a fixed-point integer scaled by 10,000,000; current
//! payloads carry plain decimal degrees. [`CoordinateEncoding::detect`] sniffs
//! the encoding; callers that know the API version can pin it with
//! [`convert_with`].

use serde::Serialize;
use tracing::warn;

/// Scale factor applied to fixed-point provider coordinates.
pub const FIXED_POINT_SCALE: f64 = 10_000_000.0;

/// Latitude range covering the Korean peninsula and Jeju.
pub const KOREA_LATITUDE_RANGE: (f64, f64) = (33.0, 43.0);
/// Longitude range covering the Korean peninsula and Ulleungdo.
pub const KOREA_LONGITUDE_RANGE: (f64, f64) = (124.0, 132.0);

/// Map centre used when no marker can be placed (Seoul City Hall).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 37.5665,
    lng: 126.978,
};
/// Zoom used with [`DEFAULT_CENTER`].
pub const DEFAULT_ZOOM: u8 = 10;

/// Zoom levels for spans at or above each threshold, widest first.
const ZOOM_THRESHOLDS: [(f64, u8); 9] = [
    (5.0, 7),
    (2.0, 8),
    (1.0, 9),
    (0.5, 10),
    (0.2, 11),
    (0.1, 12),
    (0.05, 13),
    (0.02, 14),
    (0.01, 15),
];
const CLOSEST_ZOOM: u8 = 16;

/// Errors raised while converting provider coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// One of the inputs was blank or not a number.
    #[error("coordinates are not numeric: mapx={mapx:?}, mapy={mapy:?}")]
    NotNumeric {
        /// Raw longitude input.
        mapx: String,
        /// Raw latitude input.
        mapy: String,
    },
}

/// How the provider encoded a coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateEncoding {
    /// Integer degrees scaled by [`FIXED_POINT_SCALE`].
    FixedPoint,
    /// Decimal degrees.
    Decimal,
}

impl CoordinateEncoding {
    /// Guess the encoding: any decimal point means decimal degrees.
    pub fn detect(mapx: &str, mapy: &str) -> Self {
        if mapx.contains('.') || mapy.contains('.') {
            Self::Decimal
        } else {
            Self::FixedPoint
        }
    }
}

/// Latitude/longitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinates {
    /// Whether the point lies inside the expected Korean bounds.
    pub fn is_within_korea(&self) -> bool {
        let (min_lat, max_lat) = KOREA_LATITUDE_RANGE;
        let (min_lng, max_lng) = KOREA_LONGITUDE_RANGE;
        (min_lat..=max_lat).contains(&self.lat) && (min_lng..=max_lng).contains(&self.lng)
    }
}

/// Convert a provider coordinate pair, detecting its encoding.
///
/// # Examples
/// ```
/// use mytrip::domain::coordinates::convert;
///
/// let decimal = convert("126.9846616856", "37.5820858828").expect("decimal");
/// assert_eq!(decimal.lng, 126.9846616856);
///
/// let fixed = convert("1270000000", "375000000").expect("fixed point");
/// assert_eq!((fixed.lng, fixed.lat), (127.0, 37.5));
/// ```
pub fn convert(mapx: &str, mapy: &str) -> Result<Coordinates, CoordinateError> {
    convert_with(CoordinateEncoding::detect(mapx, mapy), mapx, mapy)
}

/// Convert a provider coordinate pair using a known encoding.
///
/// Values outside the Korean bounds are returned unchanged with a warning so
/// that data quality problems show up in logs without hiding the record.
pub fn convert_with(
    encoding: CoordinateEncoding,
    mapx: &str,
    mapy: &str,
) -> Result<Coordinates, CoordinateError> {
    let not_numeric = || CoordinateError::NotNumeric {
        mapx: mapx.to_owned(),
        mapy: mapy.to_owned(),
    };
    let parse = |raw: &str| match encoding {
        CoordinateEncoding::Decimal => parse_decimal(raw),
        CoordinateEncoding::FixedPoint => parse_fixed_point(raw),
    };

    let lng = parse(mapx).ok_or_else(not_numeric)?;
    let lat = parse(mapy).ok_or_else(not_numeric)?;
    let coordinates = Coordinates { lat, lng };

    if !coordinates.is_within_korea() {
        warn!(
            mapx,
            mapy,
            lat,
            lng,
            "converted coordinates fall outside Korean bounds"
        );
    }
    Ok(coordinates)
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn parse_fixed_point(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix(['-', '+'])
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .map(|scaled| scaled / FIXED_POINT_SCALE)
}

/// Axis-aligned bounding box over converted coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lng: f64,
    /// Eastern edge.
    pub max_lng: f64,
}

impl Bounds {
    /// Build bounds around `points`; `None` when there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self {
                    min_lat: point.lat,
                    max_lat: point.lat,
                    min_lng: point.lng,
                    max_lng: point.lng,
                },
                Some(current) => Self {
                    min_lat: current.min_lat.min(point.lat),
                    max_lat: current.max_lat.max(point.lat),
                    min_lng: current.min_lng.min(point.lng),
                    max_lng: current.max_lng.max(point.lng),
                },
            })
        })
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lng: (self.min_lng + self.max_lng) / 2.0,
        }
    }

    /// Largest of the latitude and longitude spans.
    pub fn span(&self) -> f64 {
        (self.max_lat - self.min_lat).max(self.max_lng - self.min_lng)
    }

    /// Zoom level that fits the box on a typical map viewport.
    pub fn estimate_zoom(&self) -> u8 {
        zoom_for_span(self.span())
    }
}

/// Map a degree span to a Naver map zoom level (7 widest, 16 closest).
pub fn zoom_for_span(span: f64) -> u8 {
    ZOOM_THRESHOLDS
        .iter()
        .find(|(threshold, _)| span >= *threshold)
        .map_or(CLOSEST_ZOOM, |(_, zoom)| *zoom)
}

#[cfg(test)]
mod tests {
    //! Conversion and bounds coverage.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("126.9846616856", "37.5820858828", 126.984_661_685_6, 37.582_085_882_8)]
    #[case("1270000000", "375000000", 127.0, 37.5)]
    #[case("1269846616", "375820858", 126.984_661_6, 37.582_085_8)]
    fn converts_both_encodings(
        #[case] mapx: &str,
        #[case] mapy: &str,
        #[case] lng: f64,
        #[case] lat: f64,
    ) {
        let converted = convert(mapx, mapy).expect("numeric input");
        assert!((converted.lng - lng).abs() < 1e-9, "lng {}", converted.lng);
        assert!((converted.lat - lat).abs() < 1e-9, "lat {}", converted.lat);
    }

    #[rstest]
    #[case(CoordinateEncoding::Decimal, "127", "37", 127.0)]
    #[case(CoordinateEncoding::FixedPoint, "1270000000", "375000000", 127.0)]
    fn pinned_encoding_skips_detection(
        #[case] encoding: CoordinateEncoding,
        #[case] mapx: &str,
        #[case] mapy: &str,
        #[case] lng: f64,
    ) {
        let converted = convert_with(encoding, mapx, mapy).expect("numeric input");
        assert!((converted.lng - lng).abs() < 1e-9);
    }

    #[rstest]
    #[case("", "37.5")]
    #[case("abc", "37.5")]
    #[case("127.0", "north")]
    #[case("12a0000000", "375000000")]
    fn non_numeric_input_is_an_error(#[case] mapx: &str, #[case] mapy: &str) {
        let err = convert(mapx, mapy).expect_err("non-numeric input");
        assert!(matches!(err, CoordinateError::NotNumeric { .. }));
    }

    #[rstest]
    fn out_of_range_values_are_kept() {
        let converted = convert("2.3522", "48.8566").expect("numeric input");
        assert!(!converted.is_within_korea());
        assert!((converted.lat - 48.8566).abs() < 1e-9);
    }

    #[rstest]
    fn bounds_center_is_midpoint() {
        let bounds = Bounds::from_points([
            Coordinates { lat: 37.0, lng: 126.0 },
            Coordinates { lat: 38.0, lng: 128.0 },
        ])
        .expect("two points");
        assert_eq!(bounds.center(), Coordinates { lat: 37.5, lng: 127.0 });
        assert_eq!(bounds.estimate_zoom(), 8);
    }

    #[rstest]
    fn bounds_of_nothing_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[rstest]
    #[case(6.0, 7)]
    #[case(5.0, 7)]
    #[case(1.5, 9)]
    #[case(0.3, 11)]
    #[case(0.015, 15)]
    #[case(0.0, 16)]
    fn zoom_thresholds(#[case] span: f64, #[case] expected: u8) {
        assert_eq!(zoom_for_span(span), expected);
    }
}
