// 🪢 Diagram Assembly - labels, coordinates and index links for the renderer

use crate::closer::{close_timeline, ClosedTimeline};
use crate::config::SankeyConfig;
use crate::layout::position_nodes;
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// RENDERER INPUT
// ============================================================================

/// Everything the external renderer consumes, as parallel arrays.
/// Node attributes are indexed by position in `labels`; links are index
/// triples into that same list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SankeyDiagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub labels: Vec<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,

    pub link_sources: Vec<usize>,
    pub link_targets: Vec<usize>,
    pub link_values: Vec<f64>,
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Assemble renderer input from a closed timeline.
///
/// Labels are the sorted node names; the renderer indexes nodes by label,
/// so any duplicate is terminal.
pub fn build_diagram(timeline: &ClosedTimeline) -> Result<SankeyDiagram> {
    let mut labels: Vec<String> = timeline.nodes.iter().map(|n| n.name.clone()).collect();
    labels.sort();
    for pair in labels.windows(2) {
        if pair[0] == pair[1] {
            bail!("duplicate node label \"{}\"", pair[0]);
        }
    }

    let label_index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();

    let mut link_sources = Vec::with_capacity(timeline.links.len());
    let mut link_targets = Vec::with_capacity(timeline.links.len());
    let mut link_values = Vec::with_capacity(timeline.links.len());
    for link in &timeline.links {
        let source = *label_index
            .get(link.source.as_str())
            .ok_or_else(|| anyhow!("link source \"{}\" matches no node", link.source))?;
        let target = *label_index
            .get(link.target.as_str())
            .ok_or_else(|| anyhow!("link target \"{}\" matches no node", link.target))?;

        link_sources.push(source);
        link_targets.push(target);
        link_values.push(link.value);
    }

    let positions = position_nodes(&timeline.nodes, &labels)?;

    Ok(SankeyDiagram {
        title: None,
        labels,
        x: positions.x,
        y: positions.y,
        link_sources,
        link_targets,
        link_values,
    })
}

/// The whole pipeline in one call: validate → close → assemble.
pub fn diagram_from_config(config: &SankeyConfig) -> Result<SankeyDiagram> {
    config.validate()?;

    let timeline = close_timeline(
        &config.platforms,
        &config.transitions,
        config.current_month(),
    );

    let mut diagram = build_diagram(&timeline)?;
    diagram.title = config.title.clone();
    Ok(diagram)
}

// ============================================================================
// TESTS
// ============================================================================
