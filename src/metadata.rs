use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ReportMetadata, TableGrid};

/// Key-cell patterns, tried in this order. Each is anchored at the start of the
/// cell only, so "Name of vessel" and "Vessel's name" both hit `vessel_name`.
static KEY_PATTERNS: Lazy<Vec<(MetadataField, Regex)>> = Lazy::new(|| {
    [
        (MetadataField::VesselName, r"vessel.*name|name.*vessel"),
        (MetadataField::VesselType, r"vessel.*type|type.*vessel"),
        (MetadataField::AccidentDate, r"date.*accident|accident.*date"),
        (MetadataField::AccidentLocation, r"location|where"),
        (MetadataField::Severity, r"severity|serious"),
        (MetadataField::LossOfLife, r"loss.*life|fatalities|casualties"),
        (MetadataField::PortOfOrigin, r"port.*origin|departure.*port|from"),
        (MetadataField::Destination, r"destination|to\b"),
        (MetadataField::AccidentType, r"accident.*type|type.*accident|incident.*type"),
    ]
    .into_iter()
    .map(|(field, pattern)| (field, Regex::new(&format!("(?i)^(?:{pattern})")).unwrap()))
    .collect()
});

const EMPTY_VALUES: &[&str] = &["", "none", "n/a", "-"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetadataField {
    VesselName,
    VesselType,
    AccidentDate,
    AccidentLocation,
    Severity,
    LossOfLife,
    PortOfOrigin,
    Destination,
    AccidentType,
}

impl MetadataField {
    fn slot(self, metadata: &mut ReportMetadata) -> &mut Option<String> {
        match self {
            MetadataField::VesselName => &mut metadata.vessel_name,
            MetadataField::VesselType => &mut metadata.vessel_type,
            MetadataField::AccidentDate => &mut metadata.accident_date,
            MetadataField::AccidentLocation => &mut metadata.accident_location,
            MetadataField::Severity => &mut metadata.severity,
            MetadataField::LossOfLife => &mut metadata.loss_of_life,
            MetadataField::PortOfOrigin => &mut metadata.port_of_origin,
            MetadataField::Destination => &mut metadata.destination,
            MetadataField::AccidentType => &mut metadata.accident_type,
        }
    }
}

/// Pull vessel and accident particulars out of two-column key/value tables.
///
/// A row fills the first field whose key pattern matches and which is still
/// empty; populated fields are never overwritten.
pub fn extract_metadata_from_tables(tables: &[TableGrid]) -> ReportMetadata {
    let mut metadata = ReportMetadata::default();

    for row in tables.iter().flatten() {
        let Some((key, value)) = key_value(row) else {
            continue;
        };

        for (field, pattern) in KEY_PATTERNS.iter() {
            let slot = field.slot(&mut metadata);
            if slot.is_none() && pattern.is_match(key) {
                *slot = Some(value.to_string());
                break;
            }
        }
    }

    metadata
}

fn key_value(row: &[Option<String>]) -> Option<(&str, &str)> {
    if row.len() < 2 {
        return None;
    }

    let key = row[0].as_deref().unwrap_or("").trim();
    let value = row[1].as_deref().unwrap_or("").trim();
    if key.is_empty() || EMPTY_VALUES.contains(&value.to_lowercase().as_str()) {
        return None;
    }

    Some((key, value))
}
