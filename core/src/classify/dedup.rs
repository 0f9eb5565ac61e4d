use std::collections::HashMap;

use crate::feed::FlightRecord;

/// Merges per-region batches into one record per aircraft key.
///
/// The last sighting of a key replaces earlier ones; output keeps the order
/// in which keys were first seen. Records without any key are dropped.
pub fn deduplicate<I>(batches: I) -> Vec<FlightRecord>
where
    I: IntoIterator<Item = Vec<FlightRecord>>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<FlightRecord> = Vec::new();

    for record in batches.into_iter().flatten() {
        let Some(key) = record.key().map(str::to_string) else {
            continue;
        };
        match slots.get(&key) {
            Some(&slot) => records[slot] = record,
            None => {
                slots.insert(key, records.len());
                records.push(record);
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_batch_overwrites_earlier_sighting() {
        let first = vec![
            FlightRecord::new("AE01C2").with_callsign("RCH123"),
            FlightRecord::new("A1B2C3"),
        ];
        let second = vec![FlightRecord::new("AE01C2").with_callsign("RCH999")];

        let merged = deduplicate(vec![first, second]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].callsign.as_deref(), Some("RCH999"));
        assert_eq!(merged[1].key(), Some("A1B2C3"));
    }

    #[test]
    fn keyless_records_are_excluded() {
        let batch = vec![
            FlightRecord::default().with_callsign("GHOST1"),
            FlightRecord {
                alt_identity: Some("3a1b2c4d".into()),
                ..Default::default()
            },
        ];
        let merged = deduplicate(vec![batch]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].key(), Some("3a1b2c4d"));
    }

    #[test]
    fn running_twice_yields_same_set() {
        let batches = vec![
            vec![FlightRecord::new("AAA111"), FlightRecord::new("BBB222")],
            vec![FlightRecord::new("BBB222").with_callsign("X1")],
        ];
        let once = deduplicate(batches.clone());
        let twice = deduplicate(batches);
        assert_eq!(once, twice);
    }
}
