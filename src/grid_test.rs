#[cfg(test)]
mod tests {
    use super::super::cli::{self, Command, OutputFormat, ResultTarget};
    use super::super::error::LogError;
    use super::super::grid::*;
    use super::super::hour::HourIndex;
    use super::super::xlsx::{parse_coordinate, render_serial};
    use rust_decimal_macros::dec;
    use std::path::{Path, PathBuf};

    fn military(cell: &str, value: &str) -> MemoryGrid {
        MemoryGrid::new().with(Sheet::Military, cell, value)
    }

    #[test]
    fn test_missing_cell_and_sheet() {
        let grid = military("A1", "5");

        match read_text(&grid, Sheet::Military, "A2", "error reading count") {
            Err(LogError::CellRead {
                sheet,
                cell,
                context,
            }) => {
                assert_eq!(sheet, "Military");
                assert_eq!(cell, "A2");
                assert_eq!(context, "error reading count");
            }
            other => panic!("Expected a read error, got {:?}", other),
        }

        assert!(grid.cell(Sheet::Magic, "A1").is_err());
    }

    #[test]
    fn test_every_sheet_is_addressable() {
        let mut grid = MemoryGrid::new();
        for sheet in Sheet::ALL {
            grid.set(sheet, "A1", sheet.as_str());
        }

        for sheet in Sheet::ALL {
            assert_eq!(grid.cell(sheet, "A1").unwrap(), sheet.to_string());
        }
        let names: std::collections::HashSet<&str> = Sheet::ALL.iter().map(Sheet::as_str).collect();
        assert_eq!(names.len(), Sheet::ALL.len());
    }

    #[test]
    fn test_read_int_cleans_decorations() {
        let grid = MemoryGrid::new()
            .with(Sheet::Military, "A1", "1,234")
            .with(Sheet::Military, "A2", " → 12 ")
            .with(Sheet::Military, "A3", "   ")
            .with(Sheet::Military, "A4", "-7");

        assert_eq!(read_int(&grid, Sheet::Military, "A1", "ctx").unwrap(), 1234);
        assert_eq!(read_int(&grid, Sheet::Military, "A2", "ctx").unwrap(), 12);
        assert_eq!(read_int(&grid, Sheet::Military, "A3", "ctx").unwrap(), 0);
        assert_eq!(read_int(&grid, Sheet::Military, "A4", "ctx").unwrap(), -7);
    }

    #[test]
    fn test_read_int_rejects_text() {
        let grid = military("A1", "lots");
        let err = read_int(&grid, Sheet::Military, "A1", "error reading count").unwrap_err();

        match &err {
            LogError::ValueFormat {
                location, value, ..
            } => {
                assert_eq!(location, "Military!A1");
                assert_eq!(value, "lots");
            }
            other => panic!("Expected a format error, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "error reading count: failed to parse 'lots' at Military!A1 into a number"
        );
    }

    #[test]
    fn test_read_decimal() {
        let grid = MemoryGrid::new()
            .with(Sheet::Constants, "B75", "1.5")
            .with(Sheet::Constants, "B76", "1e2")
            .with(Sheet::Constants, "B77", "")
            .with(Sheet::Constants, "B78", "n/a");

        assert_eq!(read_decimal(&grid, Sheet::Constants, "B75", "ctx").unwrap(), dec!(1.5));
        assert_eq!(read_decimal(&grid, Sheet::Constants, "B76", "ctx").unwrap(), dec!(100));
        assert_eq!(read_decimal(&grid, Sheet::Constants, "B77", "ctx").unwrap(), dec!(0));
        assert!(read_decimal(&grid, Sheet::Constants, "B78", "ctx").is_err());
    }

    #[test]
    fn test_grid_loads_from_json() {
        let temp_file = std::env::temp_dir().join("od_tools_grid_test.json");
        std::fs::write(&temp_file, r#"{"Military": {"Y4": "90%"}}"#).unwrap();

        let grid = MemoryGrid::load_from_file(&temp_file).unwrap();
        assert_eq!(grid.cell(Sheet::Military, "Y4").unwrap(), "90%");

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_hour_index() {
        let index = HourIndex::for_hour(1, 3);
        assert_eq!(index.current_hour, 0);
        assert_eq!(index.sim_row, 4);
        assert_eq!(index.hour(), 1);
        assert_eq!(index.cell("BY"), "BY4");
        assert_eq!(index.previous_cell("Z"), "Z3");

        assert_eq!(HourIndex::for_hour(73, 3).sim_row, 76);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("A1"), Some((0, 0)));
        assert_eq!(parse_coordinate("Z10"), Some((9, 25)));
        assert_eq!(parse_coordinate("AA1"), Some((0, 26)));
        assert_eq!(parse_coordinate("BY4"), Some((3, 76)));
        assert_eq!(parse_coordinate("by4"), Some((3, 76)));
        assert_eq!(parse_coordinate("A0"), None);
        assert_eq!(parse_coordinate("12"), None);
        assert_eq!(parse_coordinate("AB"), None);
    }

    #[test]
    fn test_render_serial() {
        assert_eq!(render_serial(0.25), "6:00");
        assert_eq!(render_serial(45430.0), "5/18/2024");
        assert_eq!(render_serial(45430.75), "5/18/2024 18:00");
    }

    #[test]
    fn test_result_target() {
        assert_eq!(ResultTarget::from_flag(""), ResultTarget::Stdout);
        assert_eq!(ResultTarget::from_flag("std"), ResultTarget::Stdout);
        assert_eq!(
            ResultTarget::from_flag("out.txt"),
            ResultTarget::File(PathBuf::from("out.txt"))
        );
    }

    #[test]
    fn test_sim_kind_by_extension() {
        assert!(cli::is_json_sim(Path::new("sim.json")));
        assert!(cli::is_json_sim(Path::new("SIM.JSON")));
        assert!(!cli::is_json_sim(Path::new("sim.xlsm")));
        assert!(!cli::is_json_sim(Path::new("sim")));
    }

    #[test]
    fn test_parse_generate_command() {
        let args = cli::parse_from(lexopt::Parser::from_args([
            "generate_log",
            "--sim",
            "sim.xlsm",
            "--result",
            "sim.txt",
            "--hour",
            "3",
            "--debug",
        ]))
        .unwrap();

        assert!(args.debug);
        assert!(!args.quiet);
        assert_eq!(
            args.command,
            Command::GenerateLog {
                sim: PathBuf::from("sim.xlsm"),
                result: ResultTarget::File(PathBuf::from("sim.txt")),
                hour: Some(3),
            }
        );
    }

    #[test]
    fn test_hour_zero_means_all_hours() {
        let args = cli::parse_from(lexopt::Parser::from_args([
            "generate_log",
            "--sim",
            "sim.json",
            "--hour",
            "0",
        ]))
        .unwrap();

        match args.command {
            Command::GenerateLog { hour, result, .. } => {
                assert_eq!(hour, None);
                assert_eq!(result, ResultTarget::Stdout);
            }
            other => panic!("Expected generate_log, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_parse_command() {
        let args = cli::parse_from(lexopt::Parser::from_args([
            "parse_log",
            "--log",
            "sim.txt",
            "-f",
            "yaml",
            "-q",
            "--config",
            "settings.yaml",
        ]))
        .unwrap();

        assert!(args.quiet);
        assert_eq!(args.config_file, Some(PathBuf::from("settings.yaml")));
        assert_eq!(
            args.command,
            Command::ParseLog {
                log: PathBuf::from("sim.txt"),
                result: ResultTarget::Stdout,
                format: OutputFormat::Yaml,
            }
        );
    }

    #[test]
    fn test_bad_arguments_are_errors() {
        let bad_format = cli::parse_from(lexopt::Parser::from_args([
            "parse_log", "--log", "sim.txt", "--format", "xml",
        ]));
        assert!(bad_format.is_err());

        let unknown = cli::parse_from(lexopt::Parser::from_args([
            "parse_log", "--log", "sim.txt", "--bogus",
        ]));
        assert!(unknown.is_err());
    }
}
