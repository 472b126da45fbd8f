use log::*;
use serde_json::Value;

use crate::document::grid::Grid;
use crate::document::model::*;

/// Reads a level file written by the old editor. This is a one-off
/// migration path: any failure yields an empty (or partial) model rather
/// than an error, and malformed entries are dropped silently.
pub fn load_legacy(filename :&str, grid :&Grid) -> Model {
    let text = match std::fs::read_to_string(filename) {
        Ok(t) => t,
        Err(e) => {
            warn!("Could not read legacy level file {:?}: {}", filename, e);
            return Model::empty();
        },
    };
    parse_legacy(&text, grid)
}

pub fn parse_legacy(text :&str, grid :&Grid) -> Model {
    let doc :Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!("Legacy level file is not valid JSON: {}", e);
            return Model::empty();
        },
    };

    let mut model = Model::empty();

    // The old format stores points in its own column/row units; scale by
    // the declared counts against the current device size, then snap.
    let (cols, rows) = match (doc.get("cols").and_then(Value::as_f64),
                              doc.get("rows").and_then(Value::as_f64)) {
        (Some(c), Some(r)) if c > 0.0 && r > 0.0 => (c, r),
        _ => {
            warn!("Legacy level file is missing cols/rows.");
            return model;
        },
    };
    let tile_w = grid.device_width() / cols;
    let tile_h = grid.device_height() / rows;

    let paths = match doc.get("paths").and_then(Value::as_array) {
        Some(p) => p,
        None => {
            warn!("Legacy level file has no paths list.");
            return model;
        },
    };

    for entry in paths {
        let kind = entry.get("Type")
            .and_then(Value::as_str)
            .and_then(PathType::from_legacy)
            .unwrap_or(PathType::Road);

        let mut segments = Vec::new();
        for curve in entry.get("points").and_then(Value::as_array).unwrap_or(&Vec::new()) {
            let mut vertices = Vec::new();
            for p in curve.as_array().unwrap_or(&Vec::new()) {
                let xy = p.as_array()
                    .filter(|a| a.len() == 2)
                    .and_then(|a| Some((a[0].as_f64()?, a[1].as_f64()?)));
                match xy {
                    Some((x,y)) => vertices.push(
                        grid.vertex_from_device_point(x * tile_w, y * tile_h)),
                    None => debug!("Skipping malformed point {:?}.", p),
                }
            }
            match Segment::new(vertices) {
                Some(seg) => segments.push(seg),
                None => debug!("Skipping curve with invalid vertex count."),
            }
        }

        if segments.is_empty() {
            debug!("Skipping legacy path without any usable segments.");
            continue;
        }
        model.paths.push(Path { kind, color: random_color(), segments });
    }

    info!("Imported {} path(s) from legacy level data.", model.paths.len());
    model
}
