#[cfg(test)]
mod tests {
    use super::super::builder::*;
    use super::super::catalog::*;
    use super::super::error::LogError;
    use super::super::extractors::Extractor;
    use super::super::grid::{MemoryGrid, Sheet};
    use super::super::settings::Settings;

    const UNIT_NAMES: [&str; 8] = [
        "Spearman", "Archer", "Knight", "Cavalry", "Spies", "Archspies", "Wizards", "Archmages",
    ];

    fn settings(last_hour: usize) -> Settings {
        Settings {
            last_hour,
            ..Settings::default()
        }
    }

    fn blank_row(grid: &mut MemoryGrid, sheet: Sheet, columns: &[&str], row: usize) {
        for column in columns {
            grid.set(sheet, &format!("{}{}", column, row), "");
        }
    }

    /// A sim where every hour up to `last_hour` has a timeline and nothing else.
    fn quiet_sim(last_hour: usize) -> MemoryGrid {
        let mut grid = MemoryGrid::new().with(Sheet::Overview, "B15", "5/18/2024");
        for (column, name) in RELEASE_COLUMNS.iter().zip(UNIT_NAMES) {
            grid.set(Sheet::Military, &format!("{}2", column), name);
        }
        for (column, name) in TRAIN_COLUMNS.iter().zip(UNIT_NAMES) {
            grid.set(Sheet::Military, &format!("{}2", column), name);
        }

        let spell_columns: Vec<&str> = SPELLS.iter().map(|s| s.column).collect();
        let explore_columns: Vec<&str> = EXPLORE_LANDS.iter().map(|(_, c)| *c).collect();
        let rezone_columns: Vec<&str> = REZONE_LANDS.iter().map(|(_, c)| *c).collect();
        let trade_columns: Vec<&str> = TRADE_RESOURCES.iter().map(|(_, c)| *c).collect();

        for row in 3..=last_hour + 3 {
            grid.set(Sheet::Imps, &format!("BY{}", row), format!("{}:00", (row + 14) % 24));
            grid.set(Sheet::Imps, &format!("BZ{}", row), format!("{}:00", (row + 20) % 24));
            blank_row(&mut grid, Sheet::Imps, &["P", "S", "V"], row);
            blank_row(&mut grid, Sheet::Military, &["Y", "Z", "AW"], row);
            blank_row(&mut grid, Sheet::Military, &RELEASE_COLUMNS, row);
            blank_row(&mut grid, Sheet::Military, &TRAIN_COLUMNS, row);
            blank_row(&mut grid, Sheet::Explore, &["S", "B"], row);
            blank_row(&mut grid, Sheet::Explore, &explore_columns, row);
            blank_row(&mut grid, Sheet::Magic, &spell_columns, row);
            blank_row(&mut grid, Sheet::Techs, &["K"], row);
            blank_row(&mut grid, Sheet::Production, &["C"], row);
            blank_row(&mut grid, Sheet::Production, &trade_columns, row);
            blank_row(&mut grid, Sheet::Construction, &DESTROY_BUILDING_COLUMNS, row);
            blank_row(&mut grid, Sheet::Construction, &CREATE_BUILDING_COLUMNS, row);
            blank_row(&mut grid, Sheet::Rezone, &["Y"], row);
            blank_row(&mut grid, Sheet::Rezone, &rezone_columns, row);
        }
        grid
    }

    #[test]
    fn test_quiet_hours_are_suppressed() {
        let builder = LogBuilder::new(quiet_sim(3), settings(3));
        let generated = builder.run(None);

        assert!(generated.is_complete());
        assert_eq!(generated.text, "");
    }

    #[test]
    fn test_header_only_single_hour_is_empty() {
        let builder = LogBuilder::new(quiet_sim(3), settings(3));
        assert_eq!(builder.hour_log(2).unwrap(), "");
        assert_eq!(builder.run(Some(2)).text, "");
    }

    #[test]
    fn test_hour_with_events() {
        let grid = quiet_sim(3)
            .with(Sheet::Military, "AX5", "10")
            .with(Sheet::Military, "AY5", "5")
            .with(Sheet::Military, "AW5", "20");
        let builder = LogBuilder::new(grid, settings(3));
        let generated = builder.run(None);

        assert!(generated.is_complete());
        assert_eq!(
            generated.text,
            "====== Protection Hour: 2 ( Local Time: 7:00:00 PM 5/18/2024 ) ( Domtime: 1:00:00 AM 5/18/2024 ) ======\n\
             You successfully released 10 Spearman, 5 Archer.\n\
             You successfully released 20 draftees into the peasantry.\n\
             \n"
        );
    }

    #[test]
    fn test_single_hour_has_no_trailing_separator() {
        let grid = quiet_sim(3).with(Sheet::Military, "Y4", "90%");
        let builder = LogBuilder::new(grid, settings(3));
        let generated = builder.run(Some(1));

        assert_eq!(
            generated.text,
            "====== Protection Hour: 1 ( Local Time: 6:00:00 PM 5/18/2024 ) ( Domtime: 12:00:00 AM 5/18/2024 ) ======\n\
             Draftrate changed to 90%.\n"
        );
    }

    #[test]
    fn test_hours_are_emitted_in_order() {
        let grid = quiet_sim(3)
            .with(Sheet::Military, "Y6", "80%")
            .with(Sheet::Military, "Y4", "90%");
        let generated = LogBuilder::new(grid, settings(3)).run(None);

        let first = generated.text.find("Protection Hour: 1").unwrap();
        let third = generated.text.find("Protection Hour: 3").unwrap();
        assert!(first < third);
        assert!(!generated.text.contains("Protection Hour: 2"));
    }

    #[test]
    fn test_first_error_stops_the_run() {
        let grid = quiet_sim(3)
            .with(Sheet::Military, "Y4", "90%")
            .with(Sheet::Military, "AX5", "lots")
            .with(Sheet::Military, "Y6", "80%");
        let generated = LogBuilder::new(grid, settings(3)).run(None);

        assert!(generated.text.contains("Protection Hour: 1"));
        assert!(!generated.text.contains("Protection Hour: 3"));
        match generated.failure {
            Some(LogError::Extractor {
                hour, extractor, ..
            }) => {
                assert_eq!(hour, 2);
                assert_eq!(extractor, "release units");
            }
            other => panic!("Expected extractor failure, got {:?}", other),
        }
    }

    #[test]
    fn test_single_hour_failure_reports_context() {
        let grid = quiet_sim(3).with(Sheet::Imps, "BZ4", "noon");
        let generated = LogBuilder::new(grid, settings(3)).run(Some(1));

        assert_eq!(generated.text, "");
        let failure = generated.failure.expect("run should fail");
        let message = failure.to_string();
        assert!(message.contains("timeline"));
        assert!(message.contains("error parsing dom time"));
    }

    #[test]
    fn test_runs_are_idempotent() {
        let grid = quiet_sim(3)
            .with(Sheet::Military, "Y4", "90%")
            .with(Sheet::Techs, "K5", "1")
            .with(Sheet::Techs, "CA5", "Treasure Hunt");
        let builder = LogBuilder::new(grid, settings(3));

        assert_eq!(builder.run(None).text, builder.run(None).text);
    }

    #[test]
    fn test_custom_extractor_order() {
        let grid = quiet_sim(1)
            .with(Sheet::Military, "Y4", "90%")
            .with(Sheet::Techs, "K4", "1")
            .with(Sheet::Techs, "CA4", "Treasure Hunt");
        let builder = LogBuilder::new(grid, settings(1)).with_extractors(vec![
            Extractor::Timeline,
            Extractor::UnlockTech,
            Extractor::DraftRate,
        ]);

        assert_eq!(builder.extractors().len(), 3);
        let text = builder.hour_log(1).unwrap();
        let tech = text.find("You have unlocked Treasure Hunt.").unwrap();
        let draft = text.find("Draftrate changed to 90%.").unwrap();
        assert!(tech < draft);
    }
}
