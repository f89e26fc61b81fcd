//! Raw station records.
//!
//! A `RawRecord` is one row of upstream data after label normalization and
//! type coercion. Records are built once per fetch cycle and never mutated
//! by the engine; the record store persists the same shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::position::finite;
use super::{DomainError, Position};

/// A single station row as delivered by the upstream source.
///
/// Optional fields are `None` when the source omitted them. `name` is the
/// aggregation key and is never empty; coordinates are finite when present.
///
/// # Examples
///
/// ```
/// use station_map::domain::RawRecord;
///
/// let mut record = RawRecord::new("http://www.wikidata.org/entity/Q1", "Nørreport").unwrap();
/// record.station_type = Some("Bx line".into());
/// record.set_coordinates(Some(55.6833), Some(12.5713)).unwrap();
///
/// assert!(record.position().is_some());
/// assert!(RawRecord::new("Q2", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRecord")]
pub struct RawRecord {
    /// External stable identifier (Wikidata entity URI)
    pub station_id: String,
    /// Station display name
    pub name: String,
    /// UIC station code
    pub uic_code: Option<String>,
    /// Transport network the station belongs to
    pub transport_network: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Normalized station type label
    pub station_type: Option<String>,
    /// A line calling at the station
    pub connecting_line: Option<String>,
    /// Date the station opened
    pub opening_date: Option<NaiveDate>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

impl RawRecord {
    /// Create a record with the required fields and every optional field absent.
    pub fn new(
        station_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let station_id = station_id.into();
        let name = name.into();

        if station_id.trim().is_empty() {
            return Err(DomainError::EmptyStationId);
        }
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }

        Ok(Self {
            station_id,
            name,
            uic_code: None,
            transport_network: None,
            address: None,
            station_type: None,
            connecting_line: None,
            opening_date: None,
            latitude: None,
            longitude: None,
        })
    }

    /// Set the coordinates, rejecting NaN and infinite values.
    pub fn set_coordinates(
        &mut self,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<(), DomainError> {
        self.latitude = latitude.map(|v| finite("latitude", v)).transpose()?;
        self.longitude = longitude.map(|v| finite("longitude", v)).transpose()?;
        Ok(())
    }

    /// The record's position, if both coordinates are present.
    pub fn position(&self) -> Option<Position> {
        Position::new(self.latitude?, self.longitude?).ok()
    }

    /// The composite identity enforced by record stores.
    ///
    /// Covers every field except the address.
    pub fn store_key(&self) -> StoreKey {
        StoreKey {
            station_id: self.station_id.clone(),
            name: self.name.clone(),
            uic_code: self.uic_code.clone(),
            transport_network: self.transport_network.clone(),
            station_type: self.station_type.clone(),
            connecting_line: self.connecting_line.clone(),
            opening_date: self.opening_date,
            latitude: self.latitude.map(f64::to_bits),
            longitude: self.longitude.map(f64::to_bits),
        }
    }
}

/// Serialized form of a record, checked by `RawRecord::try_from` on the way in.
#[derive(Deserialize)]
struct UncheckedRecord {
    station_id: String,
    name: String,
    uic_code: Option<String>,
    transport_network: Option<String>,
    address: Option<String>,
    station_type: Option<String>,
    connecting_line: Option<String>,
    opening_date: Option<NaiveDate>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl TryFrom<UncheckedRecord> for RawRecord {
    type Error = DomainError;

    fn try_from(raw: UncheckedRecord) -> Result<Self, Self::Error> {
        let mut record = RawRecord::new(raw.station_id, raw.name)?;
        record.uic_code = raw.uic_code;
        record.transport_network = raw.transport_network;
        record.address = raw.address;
        record.station_type = raw.station_type;
        record.connecting_line = raw.connecting_line;
        record.opening_date = raw.opening_date;
        record.set_coordinates(raw.latitude, raw.longitude)?;
        Ok(record)
    }
}

/// Uniqueness key for stored records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    station_id: String,
    name: String,
    uic_code: Option<String>,
    transport_network: Option<String>,
    station_type: Option<String>,
    connecting_line: Option<String>,
    opening_date: Option<NaiveDate>,
    latitude: Option<u64>,
    longitude: Option<u64>,
}
