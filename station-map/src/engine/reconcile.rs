//! Folding raw records into aggregated stations.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{AggregatedStation, RawRecord};

/// Merge raw records into one aggregated station per distinct name.
///
/// Output order is the order in which each name first appears. The first
/// record for a name supplies the station's identifier and position; later
/// records only contribute station types, connecting lines and transport
/// networks not already present. The same input always yields the same
/// output.
///
/// # Examples
///
/// ```
/// use station_map::domain::RawRecord;
/// use station_map::engine::reconcile;
///
/// let mut a = RawRecord::new("Q1", "Nørreport").unwrap();
/// a.station_type = Some("Bx line".into());
/// let mut b = RawRecord::new("Q1", "Nørreport").unwrap();
/// b.connecting_line = Some("C".into());
/// let c = RawRecord::new("Q2", "Valby").unwrap();
///
/// let stations = reconcile(&[a, b, c]);
/// assert_eq!(stations.len(), 2);
/// assert_eq!(stations[0].name(), "Nørreport");
/// assert_eq!(stations[0].connecting_lines(), ["C"]);
/// assert_eq!(stations[1].name(), "Valby");
/// ```
pub fn reconcile(records: &[RawRecord]) -> Vec<AggregatedStation> {
    let mut stations: Vec<AggregatedStation> = Vec::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match by_name.get(record.name.as_str()) {
            Some(&idx) => {
                stations[idx].absorb(record);
            }
            None => {
                by_name.insert(record.name.as_str(), stations.len());
                stations.push(AggregatedStation::from_record(record));
            }
        }
    }

    debug!(
        records = records.len(),
        stations = stations.len(),
        "reconciled station records"
    );

    stations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Position, normalize};

    fn record(id: &str, name: &str) -> RawRecord {
        RawRecord::new(id, name).unwrap()
    }

    #[test]
    fn empty_input() {
        assert!(reconcile(&[]).is_empty());
    }

    #[test]
    fn normalized_rows_merge_by_name() {
        let mut a = record("Q1", "Nørreport");
        a.station_type = normalize(Some("S-tog Bx"));
        let mut b = record("Q1", "Nørreport");
        b.connecting_line = Some("C".into());
        let mut c = record("Q2", "Valby");
        c.station_type = normalize(Some("a"));

        let stations = reconcile(&[a, b, c]);

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name(), "Nørreport");
        assert_eq!(stations[0].station_types(), ["Bx line"]);
        assert_eq!(stations[0].connecting_lines(), ["C"]);
        assert_eq!(stations[1].name(), "Valby");
        assert_eq!(stations[1].station_types(), ["a line"]);
    }

    #[test]
    fn interleaved_names_keep_first_seen_order() {
        let rows = [
            record("Q1", "Østerport"),
            record("Q2", "Hellerup"),
            record("Q1", "Østerport"),
            record("Q3", "Lyngby"),
            record("Q2", "Hellerup"),
        ];
        let names: Vec<_> = reconcile(&rows)
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["Østerport", "Hellerup", "Lyngby"]);
    }

    #[test]
    fn first_seen_identifier_and_position_win() {
        let mut a = record("Q1", "Køge");
        a.set_coordinates(Some(55.45), Some(12.18)).unwrap();
        let mut b = record("Q7", "Køge");
        b.set_coordinates(Some(55.46), Some(12.19)).unwrap();
        b.transport_network = Some("S-tog".into());

        let stations = reconcile(&[a, b]);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_id(), "Q1");
        assert_eq!(
            stations[0].position(),
            Some(Position::new(55.45, 12.18).unwrap())
        );
        assert_eq!(stations[0].transport_networks(), ["S-tog"]);
    }

    #[test]
    fn records_without_coordinates_still_merge() {
        let mut a = record("Q1", "Ny Ellebjerg");
        a.station_type = Some("Metro".into());
        let mut b = record("Q1", "Ny Ellebjerg");
        b.station_type = Some("F line".into());

        let stations = reconcile(&[a, b]);
        assert_eq!(stations[0].position(), None);
        assert_eq!(stations[0].station_types(), ["Metro", "F line"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn arb_record() -> impl Strategy<Value = RawRecord> {
        (
            "[A-D]",
            proptest::option::of("[a-c] line"),
            proptest::option::of("[CHF]"),
            proptest::option::of("(S-tog|Metro|DSB)"),
        )
            .prop_map(|(name, station_type, line, network)| {
                let mut r = RawRecord::new(format!("Q-{name}"), name).unwrap();
                r.station_type = station_type;
                r.connecting_line = line;
                r.transport_network = network;
                r
            })
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> HashSet<&'a String> {
        values.collect()
    }

    proptest! {
        /// Reconciling the same input twice gives identical output
        #[test]
        fn deterministic(records in proptest::collection::vec(arb_record(), 0..40)) {
            prop_assert_eq!(reconcile(&records), reconcile(&records));
        }

        /// Every distinct attribute value appears exactly once on its station
        #[test]
        fn merge_complete(records in proptest::collection::vec(arb_record(), 0..40)) {
            let stations = reconcile(&records);
            for station in &stations {
                let rows: Vec<_> = records.iter().filter(|r| r.name == station.name()).collect();

                let types = distinct(rows.iter().filter_map(|r| r.station_type.as_ref()));
                prop_assert_eq!(station.station_types().len(), types.len());
                prop_assert_eq!(distinct(station.station_types().iter()), types);

                let lines = distinct(rows.iter().filter_map(|r| r.connecting_line.as_ref()));
                prop_assert_eq!(station.connecting_lines().len(), lines.len());
                prop_assert_eq!(distinct(station.connecting_lines().iter()), lines);

                let networks = distinct(rows.iter().filter_map(|r| r.transport_network.as_ref()));
                prop_assert_eq!(station.transport_networks().len(), networks.len());
                prop_assert_eq!(distinct(station.transport_networks().iter()), networks);
            }
        }

        /// Output order follows first appearance of each name
        #[test]
        fn order_stable(records in proptest::collection::vec(arb_record(), 0..40)) {
            let mut expected: Vec<&str> = Vec::new();
            for r in &records {
                if !expected.contains(&r.name.as_str()) {
                    expected.push(&r.name);
                }
            }
            let stations = reconcile(&records);
            let actual: Vec<&str> = stations.iter().map(|s| s.name()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
