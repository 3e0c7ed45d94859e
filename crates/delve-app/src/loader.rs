//! Reading maps and configuration from disk.
//!
//! Map files are JSON arrays of rows of 0 (floor) and 1 (wall). Config files
//! are a JSON `SimConfig`; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use delve_core::map::GridMap;
use delve_sim::SimConfig;

use crate::error::AppError;

/// Load and validate a map file.
pub fn load_map(path: &Path) -> Result<GridMap, AppError> {
    read_json(path)
}

/// Load a config file; geometry must be positive and finite.
pub fn load_config(path: &Path) -> Result<SimConfig, AppError> {
    let config: SimConfig = read_json(path)?;
    for (field, value) in [
        ("cell_size", config.cell_size),
        ("wall_height", config.wall_height),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(AppError::InvalidConfig {
                path: path.to_path_buf(),
                field,
                value,
            });
        }
    }
    Ok(config)
}

/// Parse a `WIDTHxHEIGHT` dungeon size such as `40x30`.
pub fn parse_size(text: &str) -> Result<(usize, usize), AppError> {
    let bad = || AppError::BadSize(text.to_string());
    let (w, h) = text.split_once(['x', 'X']).ok_or_else(bad)?;
    let width = w.trim().parse().map_err(|_| bad())?;
    let height = h.trim().parse().map_err(|_| bad())?;
    Ok((width, height))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // GridMap validation errors surface through serde as JSON errors.
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("delve-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_map() {
        let path = temp_file("map.json", "[[1,1,1],[1,0,1],[1,1,1]]");
        let map = load_map(&path).unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.spawn_cell(), (1, 1));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_ragged_map_file_rejected() {
        let path = temp_file("ragged.json", "[[1,1,1],[1,0],[1,1,1]]");
        let err = load_map(&path).unwrap_err();
        assert!(matches!(err, AppError::Json { .. }), "{err}");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_map(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let path = temp_file("config.json", r#"{"seed": 7, "max_creatures": 4}"#);
        let config = load_config(&path).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_creatures, 4);
        assert_eq!(config.min_creatures, SimConfig::default().min_creatures);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_non_positive_geometry_rejected() {
        let path = temp_file("flat.json", r#"{"cell_size": 0.0}"#);
        let err = load_config(&path).unwrap_err();
        assert!(
            matches!(err, AppError::InvalidConfig { field: "cell_size", .. }),
            "{err}"
        );
        fs::remove_file(path).unwrap();

        let path = temp_file("sunken.json", r#"{"wall_height": -3.0}"#);
        let err = load_config(&path).unwrap_err();
        assert!(
            matches!(err, AppError::InvalidConfig { field: "wall_height", value, .. } if value == -3.0),
            "{err}"
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("40x30").unwrap(), (40, 30));
        assert_eq!(parse_size("12X8").unwrap(), (12, 8));
        assert!(matches!(parse_size("40"), Err(AppError::BadSize(_))));
        assert!(matches!(parse_size("ax3"), Err(AppError::BadSize(_))));
    }
}
