// 📐 Layout Engine - normalized node coordinates for the diagram
//
// X spreads nodes over the observed month range; Y gives each lane
// (group) a horizontal band sized by how many platform generations it
// holds. All coordinates land in [0.001, 1.0].

use crate::month::Month;
use crate::timeline::PlatformNode;
use std::collections::HashMap;
use std::fmt;

/// Weight of the first counted record in a lane.
const BASE_LANE_WEIGHT: f64 = 1.0;

/// Additional weight for each further counted record in the same lane.
const REPEAT_LANE_WEIGHT: f64 = 2.2;

/// Keeps nodes off the exact diagram edge, where renderers clip them or
/// draw them on top of axis lines.
pub const EDGE_MARGIN: f64 = 0.001;

// ============================================================================
// LAYOUT ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A label had no node with that name
    UnknownLabel(String),

    /// A group never received a weight: every node in it is a link target
    UnassignedGroup(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::UnknownLabel(label) => {
                write!(f, "no node matches label \"{}\"", label)
            }
            LayoutError::UnassignedGroup(group) => {
                write!(
                    f,
                    "unassigned group \"{}\": no weight (every node in it is a link target)",
                    group
                )
            }
        }
    }
}

impl std::error::Error for LayoutError {}

// ============================================================================
// NODE POSITIONS
// ============================================================================

/// X/Y sequences positionally aligned with the label list they were
/// computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePositions {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Compute normalized coordinates for every label, in label order.
///
/// X is the node's start month relative to the observed month range. The
/// span includes the final month, so nodes starting there stay strictly
/// inside the right edge of the frame.
///
/// Y is the starting coordinate of the node's lane band. Lanes stack in
/// lexicographic group order from y = 0.001; each band's height is the
/// lane's share of the total weight. Nodes sharing a lane share a y
/// coordinate (flat lanes, no intra-lane stacking).
pub fn position_nodes(nodes: &[PlatformNode], labels: &[String]) -> Result<NodePositions, LayoutError> {
    if nodes.is_empty() {
        if let Some(label) = labels.first() {
            return Err(LayoutError::UnknownLabel(label.clone()));
        }
        return Ok(NodePositions {
            x: Vec::new(),
            y: Vec::new(),
        });
    }

    let (first, span) = month_span(nodes);
    let band_y = lane_bands(nodes)?;

    let mut by_name: HashMap<&str, (f64, f64)> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let x = (node.start.serial() - first.serial()) as f64 / span;
        let y = band_y[node.group.as_str()];
        by_name.insert(node.name.as_str(), (x.max(EDGE_MARGIN), y.max(EDGE_MARGIN)));
    }

    let mut x_values = Vec::with_capacity(labels.len());
    let mut y_values = Vec::with_capacity(labels.len());
    for label in labels {
        let (x, y) = by_name
            .get(label.as_str())
            .ok_or_else(|| LayoutError::UnknownLabel(label.clone()))?;
        x_values.push(*x);
        y_values.push(*y);
    }

    Ok(NodePositions {
        x: x_values,
        y: y_values,
    })
}

/// Earliest observed month and the (inclusive) number of months covered
/// by all starts and ends.
fn month_span(nodes: &[PlatformNode]) -> (Month, f64) {
    let mut first = nodes[0].start;
    let mut last = nodes[0].end;
    for node in nodes {
        first = first.min(node.start).min(node.end);
        last = last.max(node.start).max(node.end);
    }

    let span = (last.serial() - first.serial() + 1) as f64;
    (first, span)
}

/// Starting y coordinate for every lane, stacked in lexicographic group
/// order with heights proportional to lane weight.
fn lane_bands(nodes: &[PlatformNode]) -> Result<HashMap<&str, f64>, LayoutError> {
    // Non-target nodes are the generations a lane actually introduces;
    // terminal nodes would inflate the lane for no visual gain.
    let mut weights: HashMap<&str, f64> = HashMap::new();
    for node in nodes.iter().filter(|n| !n.is_target) {
        weights
            .entry(node.group.as_str())
            .and_modify(|w| *w += REPEAT_LANE_WEIGHT)
            .or_insert(BASE_LANE_WEIGHT);
    }
    let total: f64 = weights.values().sum();

    let mut groups: Vec<&str> = nodes.iter().map(|n| n.group.as_str()).collect();
    groups.sort_unstable();
    groups.dedup();

    let mut band_y: HashMap<&str, f64> = HashMap::with_capacity(groups.len());
    let mut cursor = EDGE_MARGIN;
    for group in groups {
        let weight = weights
            .get(group)
            .ok_or_else(|| LayoutError::UnassignedGroup(group.to_string()))?;
        band_y.insert(group, cursor);
        cursor += weight / total;
    }

    Ok(band_y)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::NodeOrigin;

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn make_node(name: &str, group: &str, start: &str, end: &str, is_target: bool) -> PlatformNode {
        PlatformNode {
            name: name.to_string(),
            group: group.to_string(),
            start: month(start),
            end: month(end),
            origin: NodeOrigin::Declared,
            is_source: false,
            is_target,
        }
    }

    fn labels_of(nodes: &[PlatformNode]) -> Vec<String> {
        let mut labels: Vec<String> = nodes.iter().map(|n| n.name.clone()).collect();
        labels.sort();
        labels
    }

    #[test]
    fn test_x_is_proportional_to_start_month() {
        let nodes = vec![
            make_node("A", "g1", "2020-01", "2021-01", false),
            make_node("B", "g1", "2021-01", "2021-01", true),
        ];
        let labels = labels_of(&nodes);

        let positions = position_nodes(&nodes, &labels).unwrap();

        // Range is 2020-01..2021-01, 13 months inclusive. A starts at the
        // left edge and gets floored; B starts 12 months in.
        assert_eq!(positions.x[0], EDGE_MARGIN);
        assert!((positions.x[1] - 12.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_coordinates_stay_inside_unit_square() {
        let nodes = vec![
            make_node("A", "g1", "2016-10", "2018-06", false),
            make_node("B", "g1", "2018-06", "2023-03", true),
            make_node("C", "g2", "2016-10", "2024-06", false),
            make_node("D", "g3", "2023-09", "2024-06", false),
        ];
        let labels = labels_of(&nodes);

        let positions = position_nodes(&nodes, &labels).unwrap();

        for value in positions.x.iter().chain(positions.y.iter()) {
            assert!(
                (EDGE_MARGIN..=1.0).contains(value),
                "coordinate {} outside [{}, 1.0]",
                value,
                EDGE_MARGIN
            );
        }
    }

    #[test]
    fn test_band_heights_sum_to_one() {
        let nodes = vec![
            make_node("A", "g1", "2020-01", "2020-06", false),
            make_node("B", "g1", "2020-06", "2020-12", false),
            make_node("C", "g2", "2020-01", "2020-12", false),
        ];

        let bands = lane_bands(&nodes).unwrap();

        // g1 holds two counted generations (1.0 + 2.2), g2 one (1.0).
        let total = 3.2 + 1.0;
        assert!((bands["g1"] - EDGE_MARGIN).abs() < 1e-9);
        assert!((bands["g2"] - (EDGE_MARGIN + 3.2 / total)).abs() < 1e-9);

        // Last band's top edge closes the unit interval.
        let top = bands["g2"] + 1.0 / total;
        assert!((top - (EDGE_MARGIN + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_lane_is_flat() {
        let nodes = vec![
            make_node("A", "g1", "2020-01", "2020-06", false),
            make_node("B", "g1", "2020-06", "2020-12", false),
        ];
        let labels = labels_of(&nodes);

        let positions = position_nodes(&nodes, &labels).unwrap();
        assert_eq!(positions.y[0], positions.y[1]);
    }

    #[test]
    fn test_target_only_nodes_do_not_weigh_lanes() {
        let nodes = vec![
            make_node("A", "g1", "2020-01", "2020-06", false),
            make_node("A (current)", "g1", "2020-06", "2020-06", true),
            make_node("B", "g2", "2020-01", "2020-06", false),
        ];

        let bands = lane_bands(&nodes).unwrap();

        // Both lanes hold one counted generation each, so they split
        // the interval evenly.
        assert!((bands["g2"] - (EDGE_MARGIN + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_unassigned_group_is_reported() {
        // g2 only holds a target node, so it never receives a weight.
        let nodes = vec![
            make_node("A", "g1", "2020-01", "2020-06", false),
            make_node("B", "g2", "2020-06", "2020-12", true),
        ];
        let labels = labels_of(&nodes);

        let err = position_nodes(&nodes, &labels).unwrap_err();
        assert_eq!(err, LayoutError::UnassignedGroup("g2".to_string()));
        assert!(err.to_string().contains("unassigned group"));
    }

    #[test]
    fn test_unknown_label_is_reported() {
        let nodes = vec![make_node("A", "g1", "2020-01", "2020-06", false)];
        let labels = vec!["A".to_string(), "Ghost".to_string()];

        let err = position_nodes(&nodes, &labels).unwrap_err();
        assert_eq!(err, LayoutError::UnknownLabel("Ghost".to_string()));
    }

    #[test]
    fn test_empty_input_yields_empty_layout() {
        let positions = position_nodes(&[], &[]).unwrap();
        assert!(positions.x.is_empty());
        assert!(positions.y.is_empty());
    }

    #[test]
    fn test_output_is_aligned_to_label_order() {
        let nodes = vec![
            make_node("B", "g1", "2021-01", "2021-06", false),
            make_node("A", "g1", "2020-01", "2021-06", false),
        ];
        let labels = vec!["A".to_string(), "B".to_string()];

        let positions = position_nodes(&nodes, &labels).unwrap();

        // A starts earlier than B, and the labels were given A first.
        assert!(positions.x[0] < positions.x[1]);
    }
}
