use geo_types::Coord;
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{HH_BBOX, WOLVERCOTE_BBOX};

/// A rectangular region in WGS84, `min` being the south-west corner and
/// `max` the north-east one. `x` is longitude, `y` latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Coord<f64>,
    pub max: Coord<f64>,
}

#[derive(Error, Debug, PartialEq)]
pub enum BBoxError {
    #[error("expected 4 comma-separated coordinates or a preset name, got {0} value(s)")]
    WrongArity(usize),
    #[error("invalid coordinate '{value}': {source}")]
    InvalidNumber {
        value: String,
        source: ParseFloatError,
    },
    #[error("coordinate {0} is not finite")]
    NonFinite(f64),
    #[error("{axis} {value} is outside [-{limit}, {limit}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("min {axis} {min} is not less than max {axis} {max}")]
    Inverted {
        axis: &'static str,
        min: f64,
        max: f64,
    },
}

impl BoundingBox {
    /// Unchecked; used for the compile-time presets.
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min: Coord { x: min_lon, y: min_lat },
            max: Coord { x: max_lon, y: max_lat },
        }
    }

    pub fn try_new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, BBoxError> {
        let bbox = Self::new(min_lon, min_lat, max_lon, max_lat);
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn min_lon(&self) -> f64 {
        self.min.x
    }

    pub fn min_lat(&self) -> f64 {
        self.min.y
    }

    pub fn max_lon(&self) -> f64 {
        self.max.x
    }

    pub fn max_lat(&self) -> f64 {
        self.max.y
    }

    /// Checks that every value is finite, within WGS84 range, and that
    /// each min is strictly below its max.
    pub fn validate(&self) -> Result<(), BBoxError> {
        for value in [self.min.x, self.min.y, self.max.x, self.max.y] {
            if !value.is_finite() {
                return Err(BBoxError::NonFinite(value));
            }
        }

        for (axis, value, limit) in [
            ("longitude", self.min.x, 180.0),
            ("longitude", self.max.x, 180.0),
            ("latitude", self.min.y, 90.0),
            ("latitude", self.max.y, 90.0),
        ] {
            if !(-limit..=limit).contains(&value) {
                return Err(BBoxError::OutOfRange { axis, value, limit });
            }
        }

        if self.min.x >= self.max.x {
            return Err(BBoxError::Inverted {
                axis: "longitude",
                min: self.min.x,
                max: self.max.x,
            });
        }
        if self.min.y >= self.max.y {
            return Err(BBoxError::Inverted {
                axis: "latitude",
                min: self.min.y,
                max: self.max.y,
            });
        }

        Ok(())
    }

    /// The `bbox` query value: left,bottom,right,top with six decimals.
    pub fn query_value(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.min_lon(),
            self.min_lat(),
            self.max_lon(),
            self.max_lat(),
        )
    }

    pub fn map_url(&self, base_url: &str) -> String {
        format!("{base_url}?bbox={}", self.query_value())
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query_value())
    }
}

impl FromStr for BoundingBox {
    type Err = BBoxError;

    /// Accepts a preset name (`hh`, `wolvercote`) or
    /// `minLon,minLat,maxLon,maxLat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("hh") {
            return Ok(HH_BBOX);
        }
        if s.eq_ignore_ascii_case("wolvercote") {
            return Ok(WOLVERCOTE_BBOX);
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BBoxError::WrongArity(parts.len()));
        }

        let mut values = [0.0_f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|source| BBoxError::InvalidNumber {
                value: part.to_string(),
                source,
            })?;
        }

        Self::try_new(values[0], values[1], values[2], values[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn hh_query_uses_six_decimals_in_lon_lat_order() {
        assert_eq!(HH_BBOX.query_value(), "-1.316300,51.738700,-0.413200,51.780300");
    }

    #[test]
    fn map_url_appends_bbox_parameter() {
        assert_eq!(
            WOLVERCOTE_BBOX.map_url("http://localhost:3000/api/0.5/map"),
            "http://localhost:3000/api/0.5/map?bbox=-1.316300,51.757400,-1.268400,51.778200"
        );
    }

    #[test]
    fn presets_are_valid() {
        assert_eq!(HH_BBOX.validate(), Ok(()));
        assert_eq!(WOLVERCOTE_BBOX.validate(), Ok(()));
    }

    #[rstest]
    #[case("hh", HH_BBOX)]
    #[case("HH", HH_BBOX)]
    #[case(" wolvercote ", WOLVERCOTE_BBOX)]
    #[case("-1.5,51.5,-1.0,52.0", BoundingBox::new(-1.5, 51.5, -1.0, 52.0))]
    #[case("0, 0, 1, 1", BoundingBox::new(0.0, 0.0, 1.0, 1.0))]
    fn parses_presets_and_coordinates(#[case] input: &str, #[case] expected: BoundingBox) -> Result<(), BBoxError> {
        let result: BoundingBox = input.parse()?;

        assert_eq!(result, expected);
        Ok(())
    }

    #[rstest]
    #[case("1,2,3", BBoxError::WrongArity(3))]
    #[case("1,2,3,4,5", BBoxError::WrongArity(5))]
    #[case("oxford", BBoxError::WrongArity(1))]
    #[case("0,0,-1,1", BBoxError::Inverted { axis: "longitude", min: 0.0, max: -1.0 })]
    #[case("0,1,1,1", BBoxError::Inverted { axis: "latitude", min: 1.0, max: 1.0 })]
    #[case("0,0,181,1", BBoxError::OutOfRange { axis: "longitude", value: 181.0, limit: 180.0 })]
    #[case("0,-91,1,1", BBoxError::OutOfRange { axis: "latitude", value: -91.0, limit: 90.0 })]
    fn rejects_malformed_boxes(#[case] input: &str, #[case] expected: BBoxError) {
        assert_eq!(input.parse::<BoundingBox>(), Err(expected));
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let err = "0,zero,1,1".parse::<BoundingBox>().unwrap_err();

        assert!(matches!(err, BBoxError::InvalidNumber { ref value, .. } if value == "zero"));
    }

    #[test]
    fn rejects_nan() {
        let err = BoundingBox::try_new(f64::NAN, 0.0, 1.0, 1.0).unwrap_err();

        assert!(matches!(err, BBoxError::NonFinite(v) if v.is_nan()));
    }
}
