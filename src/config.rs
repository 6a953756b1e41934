// ⚙️ Configuration - where platforms, transitions and the reference month come from
// The dataset is small and declarative: a JSON document, or a pair of CSV
// files for spreadsheet-maintained timelines.

use crate::month::Month;
use crate::timeline::{PlatformRecord, TransitionLink};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SankeyConfig {
    /// Diagram title, passed through to the renderer
    #[serde(default)]
    pub title: Option<String>,

    pub platforms: Vec<PlatformRecord>,

    #[serde(default)]
    pub transitions: Vec<TransitionLink>,

    /// Reference month that terminates still-open platforms.
    /// Absent means "whatever month it is when the run happens".
    #[serde(default)]
    pub current_month: Option<Month>,
}

impl SankeyConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: SankeyConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a CSV file pair: platform rows
    /// (`name,group,start,end`, empty end = still in service) and
    /// transition rows (`source,target,value,date`).
    pub fn from_csv_files<P: AsRef<Path>>(platforms: P, transitions: P) -> Result<Self> {
        let platform_file = fs::File::open(platforms.as_ref())
            .with_context(|| format!("Failed to open platforms CSV: {:?}", platforms.as_ref()))?;
        let transition_file = fs::File::open(transitions.as_ref()).with_context(|| {
            format!("Failed to open transitions CSV: {:?}", transitions.as_ref())
        })?;
        Self::from_csv_readers(platform_file, transition_file)
    }

    /// CSV loading against arbitrary readers.
    pub fn from_csv_readers<R: Read>(platforms: R, transitions: R) -> Result<Self> {
        let mut records = Vec::new();
        for row in csv::Reader::from_reader(platforms).deserialize() {
            let row: PlatformRow = row.context("Failed to parse platform CSV row")?;
            records.push(platform_from_row(row)?);
        }

        let mut links = Vec::new();
        for row in csv::Reader::from_reader(transitions).deserialize() {
            let row: TransitionRow = row.context("Failed to parse transition CSV row")?;
            links.push(link_from_row(row)?);
        }

        let config = SankeyConfig {
            title: None,
            platforms: records,
            transitions: links,
            current_month: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        for platform in &self.platforms {
            if let Some(end) = platform.end {
                if end < platform.start {
                    bail!(
                        "platform \"{}\" ends ({}) before it starts ({})",
                        platform.name,
                        end,
                        platform.start
                    );
                }
            }
        }

        for link in &self.transitions {
            if !(link.value > 0.0) {
                bail!(
                    "transition \"{}\" → \"{}\" must have a positive value, got {}",
                    link.source,
                    link.target,
                    link.value
                );
            }
        }

        Ok(())
    }

    /// The configured reference month, or the wall-clock month.
    pub fn current_month(&self) -> Month {
        self.current_month.unwrap_or_else(Month::now)
    }

    /// Built-in demo dataset, used by the CLI when no config is given.
    pub fn sample() -> Self {
        Self::from_json_str(include_str!("../data/platforms.json"))
            .expect("built-in sample configuration is valid")
    }
}

// ============================================================================
// CSV ROWS
// ============================================================================

#[derive(Debug, Deserialize)]
struct PlatformRow {
    name: String,
    group: String,
    start: String,
    #[serde(default)]
    end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TransitionRow {
    source: String,
    target: String,
    value: f64,
    date: String,
}

fn platform_from_row(row: PlatformRow) -> Result<PlatformRecord> {
    let start: Month = row
        .start
        .parse()
        .with_context(|| format!("platform \"{}\": bad start month", row.name))?;

    let end = match row.end.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse()
                .with_context(|| format!("platform \"{}\": bad end month", row.name))?,
        ),
    };

    Ok(PlatformRecord {
        name: row.name,
        group: row.group,
        start,
        end,
    })
}

fn link_from_row(row: TransitionRow) -> Result<TransitionLink> {
    let date: Month = row.date.parse().with_context(|| {
        format!("transition \"{}\" → \"{}\": bad date", row.source, row.target)
    })?;

    Ok(TransitionLink {
        source: row.source,
        target: row.target,
        value: row.value,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
