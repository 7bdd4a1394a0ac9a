//! Walks the protection hours and assembles the narrative log.

use crate::error::{LogError, Result};
use crate::extractors::{Extractor, HourContext};
use crate::grid::GridSource;
use crate::settings::Settings;
use log::{debug, error, info};

/// Report text accumulated by a run, and the error that stopped it, if any.
#[derive(Debug)]
pub struct GeneratedLog {
    pub text: String,
    pub failure: Option<LogError>,
}

impl GeneratedLog {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

pub struct LogBuilder<G> {
    grid: G,
    settings: Settings,
    extractors: Vec<Extractor>,
}

impl<G: GridSource> LogBuilder<G> {
    pub fn new(grid: G, settings: Settings) -> Self {
        Self {
            grid,
            settings,
            extractors: Extractor::ALL.to_vec(),
        }
    }

    /// Replace the registered extractors; they run in the given order.
    pub fn with_extractors(mut self, extractors: Vec<Extractor>) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn extractors(&self) -> &[Extractor] {
        &self.extractors
    }

    /// Log a single hour, or every hour when `hour` is `None` (or zero).
    ///
    /// A failing hour stops the whole run; the text built before it is kept.
    pub fn run(&self, hour: Option<usize>) -> GeneratedLog {
        if let Some(hour) = hour.filter(|h| *h > 0) {
            return match self.hour_log(hour) {
                Ok(text) => GeneratedLog {
                    text,
                    failure: None,
                },
                Err(err) => {
                    error!("{}", err);
                    GeneratedLog {
                        text: String::new(),
                        failure: Some(err),
                    }
                }
            };
        }

        let mut text = String::new();
        for hour in 1..=self.settings.last_hour {
            match self.hour_log(hour) {
                Ok(hour_log) if hour_log.is_empty() => continue,
                Ok(hour_log) => {
                    text.push_str(&hour_log);
                    text.push('\n');
                }
                Err(err) => {
                    error!("{}", err);
                    return GeneratedLog {
                        text,
                        failure: Some(err),
                    };
                }
            }
        }

        info!("Generated log for {} hours", self.settings.last_hour);
        GeneratedLog {
            text,
            failure: None,
        }
    }

    /// Sentences for one hour. Hours with nothing but the timeline header
    /// produce an empty string.
    pub fn hour_log(&self, hour: usize) -> Result<String> {
        let ctx = HourContext::new(&self.grid, hour, &self.settings);
        let mut output = String::new();
        let mut events = 0;

        for extractor in &self.extractors {
            let sentences = extractor
                .extract(&ctx)
                .map_err(|err| LogError::Extractor {
                    hour,
                    extractor: extractor.name(),
                    source: Box::new(err),
                })?;

            if sentences.is_empty() {
                continue;
            }
            if *extractor != Extractor::Timeline {
                events += 1;
            }

            output.push_str(&sentences);
            if !sentences.ends_with('\n') {
                output.push('\n');
            }
        }

        debug!("Hour {}: {} extractors reported events", hour, events);
        if events == 0 {
            return Ok(String::new());
        }

        Ok(output)
    }
}
