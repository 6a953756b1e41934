// 🔒 Closing Pass - terminate open-ended platforms at a reference month
//
// Open records get their end pinned to the reference month, plus a
// zero-duration "(current)" twin node and a closing link, so the diagram
// visibly extends to the present instead of stopping at the last event.

use crate::month::Month;
use crate::timeline::{NodeOrigin, PlatformNode, PlatformRecord, TransitionLink};

/// Suffix appended to the synthetic twin of a still-open platform.
pub const CURRENT_SUFFIX: &str = " (current)";

// ============================================================================
// CLOSED TIMELINE
// ============================================================================

/// Everything the layout stage needs: fully-bounded nodes plus the link
/// set extended with one closing link per previously-open record.
#[derive(Debug, Clone)]
pub struct ClosedTimeline {
    pub nodes: Vec<PlatformNode>,
    pub links: Vec<TransitionLink>,
}

// ============================================================================
// CLOSING PASS
// ============================================================================

/// Close every open record at `current` and annotate endpoint roles.
///
/// For each record without an end month: the emitted node ends at
/// `current`, a synthetic twin named `<name> (current)` spanning exactly
/// that month is appended after all declared nodes, and a closing link
/// from the record to its twin carries the value that originally flowed
/// into the record (1.0 when nothing ever did).
///
/// Records that already have an end month pass through untouched, so the
/// pass is idempotent: a fully-closed input gains no nodes and no links.
pub fn close_timeline(
    records: &[PlatformRecord],
    links: &[TransitionLink],
    current: Month,
) -> ClosedTimeline {
    let mut closed_links: Vec<TransitionLink> = links.to_vec();
    let mut nodes: Vec<PlatformNode> = Vec::with_capacity(records.len());
    let mut synthetic: Vec<PlatformNode> = Vec::new();

    for record in records {
        nodes.push(PlatformNode {
            name: record.name.clone(),
            group: record.group.clone(),
            start: record.start,
            end: record.end.unwrap_or(current),
            origin: NodeOrigin::Declared,
            is_source: false,
            is_target: false,
        });

        if record.is_open() {
            let closing_name = format!("{}{}", record.name, CURRENT_SUFFIX);

            synthetic.push(PlatformNode {
                name: closing_name.clone(),
                group: record.group.clone(),
                start: current,
                end: current,
                origin: NodeOrigin::Synthetic,
                is_source: false,
                is_target: false,
            });

            closed_links.push(TransitionLink {
                source: record.name.clone(),
                target: closing_name,
                value: carried_value(links, record),
                date: current,
            });
        }
    }

    nodes.extend(synthetic);

    // Endpoint roles are only meaningful once every closing link exists.
    for node in &mut nodes {
        node.is_source = closed_links.iter().any(|l| l.source == node.name);
        node.is_target = closed_links.iter().any(|l| l.target == node.name);
    }

    ClosedTimeline {
        nodes,
        links: closed_links,
    }
}

/// Value carried into a closing link: the first declared link that fed
/// this record at its own start month, or 1.0 when nothing ever flowed in.
fn carried_value(links: &[TransitionLink], record: &PlatformRecord) -> f64 {
    links
        .iter()
        .find(|l| l.target == record.name && l.date == record.start)
        .map(|l| l.value)
        .unwrap_or(1.0)
}

// ============================================================================
// TESTS
// ============================================================================
