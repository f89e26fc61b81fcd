//! Conversion from SPARQL rows to raw station records.
//!
//! This is where label normalization and type coercion happen: dates are
//! parsed from Wikidata's timestamp form, coordinates from decimal text.
//! A row that cannot be converted is rejected as a whole.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{DomainError, RawRecord, normalize};

use super::types::RawRow;

/// Entity URI of the station.
pub const STATION: &str = "station";
/// Station label.
pub const STATION_LABEL: &str = "stationLabel";
/// UIC station code.
pub const STATION_ID: &str = "stationID";
/// Transport network label.
pub const TRANSPORT_NETWORK: &str = "transportNetworkLabel";
/// Street address.
pub const ADDRESS: &str = "address";
/// Station type label.
pub const STATION_TYPE: &str = "BaneTypeLabel";
/// Connecting line label.
pub const CONNECTING_LINE: &str = "connectingLineLabel";
/// Opening date timestamp.
pub const OPENING_DATE: &str = "openingDate";
/// Latitude.
pub const LATITUDE: &str = "geoLatitude";
/// Longitude.
pub const LONGITUDE: &str = "geoLongitude";

/// Wikidata timestamp format for dates (`1918-07-01T00:00:00Z`).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Error converting a row into a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A required variable was unbound
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a date
    #[error("invalid date in {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    /// Failed to parse a number
    #[error("invalid number in {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// The parsed values violate a record invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Convert a single row into a raw record.
///
/// The station type label is normalized exactly once, here.
pub fn convert_row(row: &RawRow) -> Result<RawRecord, ConversionError> {
    let station_id = row
        .get(STATION)
        .ok_or(ConversionError::MissingField(STATION))?;
    let name = row
        .get(STATION_LABEL)
        .ok_or(ConversionError::MissingField(STATION_LABEL))?;

    let mut record = RawRecord::new(station_id, name)?;
    record.uic_code = text(row, STATION_ID);
    record.transport_network = text(row, TRANSPORT_NETWORK);
    record.address = text(row, ADDRESS);
    record.station_type = normalize(row.get(STATION_TYPE));
    record.connecting_line = text(row, CONNECTING_LINE);
    record.opening_date = row
        .get(OPENING_DATE)
        .map(|v| parse_date(OPENING_DATE, v))
        .transpose()?;

    let latitude = number(row, LATITUDE)?;
    let longitude = number(row, LONGITUDE)?;
    record.set_coordinates(latitude, longitude)?;

    Ok(record)
}

fn text(row: &RawRow, field: &str) -> Option<String> {
    row.get(field).map(str::to_string)
}

fn number(row: &RawRow, field: &'static str) -> Result<Option<f64>, ConversionError> {
    row.get(field)
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ConversionError::InvalidNumber {
                    field,
                    value: v.to_string(),
                })
        })
        .transpose()
}

/// Parse a Wikidata timestamp into a calendar date.
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ConversionError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|dt| dt.date())
        .map_err(|_| ConversionError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RawRow {
        RawRow::default()
            .with(STATION, "http://www.wikidata.org/entity/Q1781596")
            .with(STATION_LABEL, "Nørreport")
    }

    #[test]
    fn minimal_row() {
        let record = convert_row(&row()).unwrap();
        assert_eq!(record.station_id, "http://www.wikidata.org/entity/Q1781596");
        assert_eq!(record.name, "Nørreport");
        assert_eq!(record.station_type, None);
        assert_eq!(record.opening_date, None);
        assert_eq!(record.latitude, None);
    }

    #[test]
    fn full_row() {
        let row = row()
            .with(STATION_ID, "8600646")
            .with(TRANSPORT_NETWORK, "S-tog")
            .with(ADDRESS, "Nørre Voldgade 13")
            .with(STATION_TYPE, "S-tog Bx")
            .with(CONNECTING_LINE, "C")
            .with(OPENING_DATE, "1918-07-01T00:00:00Z")
            .with(LATITUDE, "55.6833")
            .with(LONGITUDE, "12.5713");

        let record = convert_row(&row).unwrap();
        assert_eq!(record.uic_code.as_deref(), Some("8600646"));
        assert_eq!(record.transport_network.as_deref(), Some("S-tog"));
        assert_eq!(record.address.as_deref(), Some("Nørre Voldgade 13"));
        assert_eq!(record.station_type.as_deref(), Some("Bx line"));
        assert_eq!(record.connecting_line.as_deref(), Some("C"));
        assert_eq!(record.opening_date, NaiveDate::from_ymd_opt(1918, 7, 1));
        assert_eq!(record.latitude, Some(55.6833));
        assert_eq!(record.longitude, Some(12.5713));
    }

    #[test]
    fn bare_line_code_normalized() {
        let record = convert_row(&row().with(STATION_TYPE, "a")).unwrap();
        assert_eq!(record.station_type.as_deref(), Some("a line"));
    }

    #[test]
    fn missing_station_rejected() {
        let row = RawRow::default().with(STATION_LABEL, "Valby");
        assert_eq!(
            convert_row(&row),
            Err(ConversionError::MissingField(STATION))
        );
    }

    #[test]
    fn missing_or_blank_name_rejected() {
        let row = RawRow::default().with(STATION, "Q1");
        assert_eq!(
            convert_row(&row),
            Err(ConversionError::MissingField(STATION_LABEL))
        );

        let row = RawRow::default().with(STATION, "Q1").with(STATION_LABEL, "");
        assert_eq!(
            convert_row(&row),
            Err(ConversionError::Domain(DomainError::EmptyName))
        );
    }

    #[test]
    fn bad_date_rejected() {
        let err = convert_row(&row().with(OPENING_DATE, "1918")).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidDate { .. }));
    }

    #[test]
    fn bad_number_rejected() {
        let err = convert_row(&row().with(LATITUDE, "north")).unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidNumber {
                field: LATITUDE,
                value: "north".into()
            }
        );
    }

    #[test]
    fn non_finite_number_rejected() {
        let err = convert_row(&row().with(LONGITUDE, "NaN")).unwrap_err();
        assert!(matches!(err, ConversionError::Domain(_)));
    }

    #[test]
    fn error_display() {
        let err = ConversionError::InvalidDate {
            field: OPENING_DATE,
            value: "soon".into(),
        };
        assert_eq!(err.to_string(), "invalid date in openingDate: soon");
        assert_eq!(
            ConversionError::Domain(DomainError::EmptyName).to_string(),
            "station name must not be empty"
        );
    }
}
