use std::{fs, path::PathBuf};

use tempfile::{TempDir, tempdir};

use plansheet_cli::{Args, Command, execute, load_sheet};

const SHEET: &str = r#"
[[diagrams]]
id = "D1"
zoom_scale = 500.0
origin_page_offset = { x = 2.0, y = 3.0 }
bounding_extent = { min_x = 0.0, min_y = 0.0, max_x = 100.0, max_y = 100.0 }

[[coordinates]]
id = "a"
position = { x = 0.0, y = 0.0 }

[[coordinates]]
id = "b"
position = { x = 100.0, y = 50.0 }

[[lines]]
id = "L1"
diagram = "D1"
coordinates = ["a", "b"]

[[labels]]
id = "T1"
anchor = { x = 5.0, y = 5.0 }
text = "Lot 1"
attached_to = { diagram = "D1" }
"#;

/// Writes the sheet and an empty configuration into a fresh directory.
fn workspace(sheet: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().expect("Failed to create temp directory");
    let sheet_path = dir.path().join("sheet.toml");
    let config_path = dir.path().join("config.toml");
    fs::write(&sheet_path, sheet).expect("Failed to write sheet");
    fs::write(&config_path, "").expect("Failed to write config");
    (dir, sheet_path, config_path)
}

fn args(sheet: &PathBuf, config: &PathBuf, command: Command) -> Args {
    Args {
        sheet: sheet.to_string_lossy().to_string(),
        config: Some(config.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        command,
    }
}

fn parse(report: &str) -> toml::Table {
    toml::from_str(report).expect("Report should be valid TOML")
}

#[test]
fn test_map_ground_to_page() {
    let (_dir, sheet, config) = workspace(SHEET);
    let command = Command::Map {
        diagram: "D1".to_string(),
        x: 10.0,
        y: 0.0,
        inverse: false,
    };

    let report = parse(&execute(&args(&sheet, &config, command)).unwrap());
    assert_eq!(report["diagram"].as_str(), Some("D1"));
    assert_eq!(report["page"]["x"].as_float(), Some(4.0));
    assert_eq!(report["page"]["y"].as_float(), Some(3.0));
}

#[test]
fn test_map_page_to_ground() {
    let (_dir, sheet, config) = workspace(SHEET);
    let command = Command::Map {
        diagram: "D1".to_string(),
        x: 4.0,
        y: 3.0,
        inverse: true,
    };

    let report = parse(&execute(&args(&sheet, &config, command)).unwrap());
    assert_eq!(report["ground"]["x"].as_float(), Some(10.0));
    assert_eq!(report["ground"]["y"].as_float(), Some(0.0));
}

#[test]
fn test_fit() {
    let (_dir, sheet, config) = workspace(SHEET);
    let command = Command::Fit {
        diagram: "D1".to_string(),
    };

    let report = parse(&execute(&args(&sheet, &config, command)).unwrap());
    assert_eq!(report["binding"].as_str(), Some("width"));
    let scale = report["zoom_scale"].as_float().unwrap();
    assert!((scale - 100.0 / 0.39).abs() < 1e-9, "{scale}");
}

#[test]
fn test_move() {
    let (_dir, sheet, config) = workspace(SHEET);
    let command = Command::Move {
        diagram: "D1".to_string(),
        x: 10.0,
        y: 10.0,
        zoom_scale: None,
    };

    let report = parse(&execute(&args(&sheet, &config, command)).unwrap());
    let lines = report["affected_lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].as_str(), Some("L1"));
    assert_eq!(report["affected_labels"].as_array().unwrap().len(), 1);
    assert_eq!(report["bounds"]["max_x"].as_float(), Some(30.0));
    assert_eq!(report["labels"][0]["anchor"]["x"].as_float(), Some(13.0));
}

#[test]
fn test_unknown_diagram_fails() {
    let (_dir, sheet, config) = workspace(SHEET);
    let command = Command::Fit {
        diagram: "D9".to_string(),
    };

    let err = execute(&args(&sheet, &config, command)).unwrap_err();
    assert!(err.to_string().contains("unknown diagram `D9`"));
}

#[test]
fn test_malformed_sheet_fails() {
    let (_dir, sheet, config) = workspace("[[diagrams]]\nid = 3\n");
    let command = Command::Fit {
        diagram: "D1".to_string(),
    };

    let err = execute(&args(&sheet, &config, command)).unwrap_err();
    assert!(err.to_string().starts_with("Invalid sheet"));
}

#[test]
fn test_missing_sheet_file_fails() {
    let dir = tempdir().unwrap();
    assert!(load_sheet(dir.path().join("absent.toml")).is_err());
}

#[test]
fn e2e_smoke_test_demo_sheets() {
    let demos = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos");
    let mut paths: Vec<PathBuf> = fs::read_dir(&demos)
        .expect("demos/ should exist")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "No demo sheets found in demos/");

    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let mut failed = Vec::new();
    for path in &paths {
        let sheet = load_sheet(path).expect("Demo sheet should parse");
        for diagram in sheet.diagrams() {
            let id = diagram.id().to_string();
            let corner = diagram.bounding_extent().min_point();
            let offset = diagram.origin_page_offset();
            let commands = [
                Command::Map {
                    diagram: id.clone(),
                    x: corner.x(),
                    y: corner.y(),
                    inverse: false,
                },
                Command::Map {
                    diagram: id.clone(),
                    x: offset.x(),
                    y: offset.y(),
                    inverse: true,
                },
                Command::Fit {
                    diagram: id.clone(),
                },
                Command::Move {
                    diagram: id.clone(),
                    x: offset.x(),
                    y: offset.y(),
                    zoom_scale: None,
                },
            ];
            for command in commands {
                let name = format!("{command:?}");
                match execute(&args(path, &config, command)) {
                    Ok(report) => {
                        if let Err(err) = toml::from_str::<toml::Table>(&report) {
                            failed.push(format!("{}: {name} report ({err})", path.display()));
                        }
                    }
                    Err(err) => failed.push(format!("{}: {name} ({err})", path.display())),
                }
            }
        }
    }

    assert!(failed.is_empty(), "Demo sheets failed: {failed:#?}");
}
