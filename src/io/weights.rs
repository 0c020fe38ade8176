use std::io::BufRead;
use std::path::Path;

use crate::error::{ConvError, Result};
use crate::models::{SourceCatalog, WeightEntry, WeightTable};

/// Read `<name> <repeat> <scale>` lines and check every catalogued source has one
pub fn read_data_weights(path: &Path, catalog: &SourceCatalog) -> Result<WeightTable> {
    let file = std::fs::File::open(path).map_err(|e| ConvError::io(path, e))?;
    let reader = std::io::BufReader::new(file);

    let mut table = WeightTable::default();
    for line in reader.lines() {
        let line = line.map_err(|e| ConvError::io(path, e))?;
        let (name, entry) = parse_weight_line(&line)?;
        if !table.insert(name.to_string(), entry) {
            return Err(ConvError::DuplicateWeight {
                name: name.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    for name in catalog.names() {
        if !table.contains(name) {
            return Err(ConvError::MissingWeight {
                name: name.to_string(),
            });
        }
    }

    Ok(table)
}

fn parse_weight_line(line: &str) -> Result<(&str, WeightEntry)> {
    let bad = |reason: String| ConvError::MalformedWeightLine {
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, repeat, scale] = fields[..] else {
        return Err(bad(format!("expected 3 fields, got {}", fields.len())));
    };

    let repeat: u64 = repeat
        .parse()
        .map_err(|e| bad(format!("repeat count '{}': {}", repeat, e)))?;
    let scale: f64 = scale
        .parse()
        .map_err(|e| bad(format!("scale '{}': {}", scale, e)))?;

    Ok((name, WeightEntry::new(repeat, scale)))
}
