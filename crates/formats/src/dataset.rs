use std::fmt;
use std::fs;
use std::path::Path;

use foundation::math::LatLng;
use scene::collection::{RecordSet, SceneError};
use scene::record::{Record, RecordMeta, StationStatus};
use serde::Deserialize;

use crate::timestamp::parse_timestamp;

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidRecord { index: usize, reason: String },
    Scene(SceneError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "I/O error: {err}"),
            DatasetError::Parse(err) => write!(f, "Dataset parse error: {err}"),
            DatasetError::InvalidRecord { index, reason } => {
                write!(f, "Invalid record at index {index}: {reason}")
            }
            DatasetError::Scene(err) => write!(f, "Dataset rejected: {err}"),
        }
    }
}

impl std::error::Error for DatasetError {}

/// Charging station entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStation {
    id: u64,
    lat: f64,
    lng: f64,
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default, rename = "type")]
    kind: String,
    status: StationStatus,
    ports: u32,
    available_ports: u32,
}

/// Service complaint entry; `date` is ISO-8601.
#[derive(Debug, Deserialize)]
struct RawComplaint {
    id: u64,
    lat: f64,
    lng: f64,
    #[serde(default)]
    address: String,
    date: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Station(RawStation),
    Complaint(RawComplaint),
}

fn checked_position(lat: f64, lng: f64) -> Result<LatLng, String> {
    let p = LatLng::new(lat, lng);
    if p.is_valid() {
        Ok(p)
    } else {
        Err(format!("coordinate ({lat}, {lng}) out of range"))
    }
}

impl RawEntry {
    fn into_record(self) -> Result<Record, String> {
        match self {
            RawEntry::Station(s) => {
                let position = checked_position(s.lat, s.lng)?;
                if s.available_ports > s.ports {
                    return Err(format!(
                        "{} available ports exceeds {} total",
                        s.available_ports, s.ports
                    ));
                }
                Ok(Record::new(s.id, position, s.name)
                    .with_address(s.address)
                    .with_category(s.kind)
                    .with_meta(RecordMeta::Station {
                        status: s.status,
                        ports: s.ports,
                        available_ports: s.available_ports,
                    }))
            }
            RawEntry::Complaint(c) => {
                let position = checked_position(c.lat, c.lng)?;
                let reported_at = parse_timestamp(&c.date)
                    .ok_or_else(|| format!("unparseable date {:?}", c.date))?;
                Ok(Record::new(c.id, position, c.kind.clone())
                    .with_address(c.address)
                    .with_category(c.kind.clone())
                    .with_meta(RecordMeta::Incident {
                        incident_type: c.kind,
                        reported_at,
                    }))
            }
        }
    }
}

/// A validated record snapshot plus the identity of the bytes it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: RecordSet,
    /// blake3 of the raw file contents, hex encoded.
    pub content_hash: String,
    pub stations: usize,
    pub incidents: usize,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(DatasetError::Io)?;
        let dataset = Self::from_slice(&bytes)?;
        tracing::info!(
            "loaded {} records ({} stations, {} incidents) from {} (blake3={})",
            dataset.records.len(),
            dataset.stations,
            dataset.incidents,
            path.display(),
            dataset.content_hash
        );
        Ok(dataset)
    }

    /// Parses a JSON array mixing station and complaint entries.
    ///
    /// The first invalid entry aborts the load; nothing is partially accepted.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DatasetError> {
        let entries: Vec<RawEntry> = serde_json::from_slice(bytes).map_err(DatasetError::Parse)?;

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let record = entry.into_record().map_err(|reason| {
                tracing::warn!("rejecting record #{index}: {reason}");
                DatasetError::InvalidRecord { index, reason }
            })?;
            records.push(record);
        }

        let stations = records
            .iter()
            .filter(|r| r.station_status().is_some())
            .count();
        let incidents = records.iter().filter(|r| r.is_incident()).count();
        let records = RecordSet::new(records).map_err(|err| {
            tracing::warn!("rejecting dataset: {err}");
            DatasetError::Scene(err)
        })?;

        Ok(Self {
            records,
            content_hash: blake3::hash(bytes).to_hex().to_string(),
            stations,
            incidents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetError};
    use foundation::RecordId;
    use foundation::math::LatLng;
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use scene::collection::SceneError;
    use scene::record::{RecordMeta, StationStatus};
    use std::fs;
    use std::path::PathBuf;

    const MIXED: &str = r#"[
        { "id": 1, "lat": 42.3601, "lng": -71.0589, "name": "Downtown Boston Station",
          "address": "100 Summer St, Boston, MA 02110", "type": "DC Fast", "distance": "0.1 mi",
          "status": "available", "ports": 4, "availablePorts": 2 },
        { "id": 2, "lat": 42.3584, "lng": -71.0636, "address": "1 Charles St S, Boston, MA 02116",
          "date": "2024-03-01T12:00:00Z", "type": "Rodent" }
    ]"#;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("geocluster_dataset_{label}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn parses_stations_and_complaints() {
        let dataset = Dataset::from_slice(MIXED.as_bytes()).expect("parse dataset");
        assert_eq!(dataset.records.len(), 2);
        assert_eq!((dataset.stations, dataset.incidents), (1, 1));

        let station = dataset.records.get(RecordId(1)).expect("station");
        assert_eq!(station.position, LatLng::new(42.3601, -71.0589));
        assert_eq!(station.category, "DC Fast");
        assert_eq!(
            station.meta,
            RecordMeta::Station {
                status: StationStatus::Available,
                ports: 4,
                available_ports: 2,
            }
        );

        let complaint = dataset.records.get(RecordId(2)).expect("complaint");
        assert_eq!(complaint.name, "Rodent");
        assert_eq!(complaint.category, "Rodent");
        assert_eq!(complaint.reported_at(), Some(Time(1_709_294_400.0)));
    }

    #[test]
    fn content_hash_tracks_bytes() {
        let a = Dataset::from_slice(MIXED.as_bytes()).expect("parse");
        let b = Dataset::from_slice(MIXED.as_bytes()).expect("parse");
        assert_eq!(a.content_hash, b.content_hash);
        assert_eq!(a.content_hash.len(), 64);

        let c = Dataset::from_slice(MIXED.replace("Rodent", "Tree").as_bytes()).expect("parse");
        assert_ne!(a.content_hash, c.content_hash);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let raw = r#"[
            { "id": 1, "lat": 42.0, "lng": -71.0, "date": "2024-03-01", "type": "Tree" },
            { "id": 2, "lat": 91.0, "lng": -71.0, "date": "2024-03-01", "type": "Tree" }
        ]"#;
        match Dataset::from_slice(raw.as_bytes()).expect_err("expect invalid record") {
            DatasetError::InvalidRecord { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("out of range"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_dates_and_ports() {
        let raw = r#"[{ "id": 1, "lat": 42.0, "lng": -71.0, "date": "soon", "type": "Tree" }]"#;
        assert!(matches!(
            Dataset::from_slice(raw.as_bytes()),
            Err(DatasetError::InvalidRecord { index: 0, .. })
        ));

        let raw = r#"[{ "id": 1, "lat": 42.0, "lng": -71.0, "name": "x", "status": "occupied",
                        "ports": 2, "availablePorts": 3 }]"#;
        assert!(matches!(
            Dataset::from_slice(raw.as_bytes()),
            Err(DatasetError::InvalidRecord { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = r#"[
            { "id": 7, "lat": 42.0, "lng": -71.0, "date": "2024-03-01", "type": "Tree" },
            { "id": 7, "lat": 42.1, "lng": -71.1, "date": "2024-03-02", "type": "Rodent" }
        ]"#;
        match Dataset::from_slice(raw.as_bytes()).expect_err("expect duplicate") {
            DatasetError::Scene(SceneError::DuplicateId(id)) => assert_eq!(id, RecordId(7)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Dataset::from_slice(b"{ not json"),
            Err(DatasetError::Parse(_))
        ));
        assert!(matches!(
            Dataset::from_slice(br#"[{ "id": 1 }]"#),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn loads_bundled_sample_data() {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let stations = Dataset::load(data.join("stations.json")).expect("load stations");
        assert_eq!(stations.records.len(), 18);
        assert_eq!(stations.stations, 18);

        let complaints = Dataset::load(data.join("complaints.json")).expect("load complaints");
        assert_eq!(complaints.incidents, complaints.records.len());
        assert!(complaints.records.categories().contains(&"Rodent"));
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let root = temp_dir("load");
        let path = root.join("records.json");
        fs::write(&path, MIXED).expect("write dataset");
        let dataset = Dataset::load(&path).expect("load dataset");
        assert_eq!(dataset.records.len(), 2);

        let err = Dataset::load(root.join("missing.json")).expect_err("expect io error");
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
