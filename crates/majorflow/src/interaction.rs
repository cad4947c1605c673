//! Hover, click-to-focus and flow filtering as pure state transitions.
//!
//! The renderer owns one [`Highlight`] and one [`FlowFilter`], feeds pointer
//! events through the transition functions, and re-derives emphasis for every
//! node and edge from the current state on each frame.

use crate::network::EdgeDatum;

/// Default minimum total flow for an edge to be shown.
pub const DEFAULT_THRESHOLD: u64 = 10;

/// Which node, if any, is driving highlight and dim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Transient: cleared when the pointer leaves the node.
    Hovered(String),
    /// Sticky: survives hover and leave until clicked again or cleared.
    Selected(String),
}

impl Highlight {
    pub fn on_hover(&self, id: &str) -> Self {
        match self {
            Highlight::Selected(_) => self.clone(),
            _ => Highlight::Hovered(id.to_string()),
        }
    }

    pub fn on_leave(&self) -> Self {
        match self {
            Highlight::Hovered(_) => Highlight::None,
            _ => self.clone(),
        }
    }

    /// Clicking the selected node releases it; clicking any other node
    /// selects that one.
    pub fn on_click(&self, id: &str) -> Self {
        match self {
            Highlight::Selected(current) if current == id => Highlight::None,
            _ => Highlight::Selected(id.to_string()),
        }
    }

    pub fn on_click_outside(&self) -> Self {
        Highlight::None
    }

    /// The node currently in focus.
    pub fn focus(&self) -> Option<&str> {
        match self {
            Highlight::None => None,
            Highlight::Hovered(id) | Highlight::Selected(id) => Some(id),
        }
    }

    pub fn is_sticky(&self) -> bool {
        matches!(self, Highlight::Selected(_))
    }
}

/// Which edges are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowFilter {
    All,
    /// Only edges with `total_flow >= threshold`.
    AtLeast(u64),
}

impl Default for FlowFilter {
    fn default() -> Self {
        FlowFilter::AtLeast(DEFAULT_THRESHOLD)
    }
}

impl FlowFilter {
    pub fn admits(&self, edge: &EdgeDatum) -> bool {
        match self {
            FlowFilter::All => true,
            FlowFilter::AtLeast(threshold) => edge.total_flow >= *threshold,
        }
    }

    /// Switch between showing everything and thresholding at `threshold`.
    pub fn toggle(self, threshold: u64) -> Self {
        match self {
            FlowFilter::All => FlowFilter::AtLeast(threshold),
            FlowFilter::AtLeast(_) => FlowFilter::All,
        }
    }

    pub fn label(&self) -> String {
        match self {
            FlowFilter::All => "all flows".to_string(),
            FlowFilter::AtLeast(threshold) => format!("flows \u{2265} {threshold}"),
        }
    }
}

/// The edges that pass `filter`, in their original order.
pub fn visible_edges(edges: &[EdgeDatum], filter: FlowFilter) -> Vec<&EdgeDatum> {
    edges.iter().filter(|e| filter.admits(e)).collect()
}

/// Visual weight of a node or edge under the current highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Normal,
    Highlighted,
    Dimmed,
}

pub fn edge_emphasis(edge: &EdgeDatum, highlight: &Highlight) -> Emphasis {
    match highlight.focus() {
        None => Emphasis::Normal,
        Some(id) if edge.touches(id) => Emphasis::Highlighted,
        Some(_) => Emphasis::Dimmed,
    }
}

/// A node is highlighted if it is the focus or shares a visible edge with it.
pub fn node_emphasis(id: &str, visible: &[&EdgeDatum], highlight: &Highlight) -> Emphasis {
    match highlight.focus() {
        None => Emphasis::Normal,
        Some(focus) if focus == id => Emphasis::Highlighted,
        Some(focus) => {
            if visible.iter().any(|e| e.other(focus) == Some(id)) {
                Emphasis::Highlighted
            } else {
                Emphasis::Dimmed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: &str, target: &str, total: u64) -> EdgeDatum {
        EdgeDatum {
            source: source.to_string(),
            target: target.to_string(),
            flow_source_to_target: total,
            flow_target_to_source: 0,
            total_flow: total,
            curvature_base: 0.5,
            dominant_category: "SOC".to_string(),
            color: "#4E79A7".to_string(),
        }
    }

    #[test]
    fn hover_then_leave_returns_to_none() {
        let state = Highlight::None.on_hover("PSYC");
        assert_eq!(state, Highlight::Hovered("PSYC".to_string()));
        assert_eq!(state.on_leave(), Highlight::None);
    }

    #[test]
    fn hover_moves_between_nodes() {
        let state = Highlight::None.on_hover("PSYC").on_hover("NEUR");
        assert_eq!(state.focus(), Some("NEUR"));
    }

    #[test]
    fn selection_survives_hover_and_leave() {
        let state = Highlight::None.on_click("PSYC");
        let state = state.on_hover("NEUR").on_leave();
        assert_eq!(state, Highlight::Selected("PSYC".to_string()));
        assert!(state.is_sticky());
    }

    #[test]
    fn clicking_selected_node_again_clears() {
        let state = Highlight::None.on_click("PSYC").on_click("PSYC");
        assert_eq!(state, Highlight::None);
    }

    #[test]
    fn clicking_other_node_moves_selection() {
        let state = Highlight::None.on_click("PSYC").on_click("NEUR");
        assert_eq!(state, Highlight::Selected("NEUR".to_string()));
    }

    #[test]
    fn click_on_hovered_node_selects_it() {
        let state = Highlight::None.on_hover("PSYC").on_click("PSYC");
        assert_eq!(state, Highlight::Selected("PSYC".to_string()));
    }

    #[test]
    fn click_outside_clears_everything() {
        assert_eq!(
            Highlight::Selected("PSYC".to_string()).on_click_outside(),
            Highlight::None
        );
        assert_eq!(
            Highlight::Hovered("PSYC".to_string()).on_click_outside(),
            Highlight::None
        );
    }

    #[test]
    fn default_filter_is_threshold_ten() {
        assert_eq!(FlowFilter::default(), FlowFilter::AtLeast(10));
    }

    #[test]
    fn threshold_is_inclusive() {
        let filter = FlowFilter::AtLeast(10);
        assert!(filter.admits(&edge("A", "B", 10)));
        assert!(!filter.admits(&edge("A", "B", 9)));
    }

    #[test]
    fn all_admits_everything() {
        assert!(FlowFilter::All.admits(&edge("A", "B", 1)));
    }

    #[test]
    fn toggle_round_trips() {
        let filter = FlowFilter::default().toggle(DEFAULT_THRESHOLD);
        assert_eq!(filter, FlowFilter::All);
        assert_eq!(filter.toggle(DEFAULT_THRESHOLD), FlowFilter::AtLeast(10));
    }

    #[test]
    fn visible_edges_keeps_order() {
        let edges = vec![edge("A", "B", 20), edge("A", "C", 3), edge("B", "C", 11)];
        let visible = visible_edges(&edges, FlowFilter::default());
        let pairs: Vec<(&str, &str)> = visible
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "B"), ("B", "C")]);
    }

    #[test]
    fn emphasis_without_focus_is_normal() {
        let edges = vec![edge("A", "B", 20)];
        let visible = visible_edges(&edges, FlowFilter::All);
        assert_eq!(edge_emphasis(&edges[0], &Highlight::None), Emphasis::Normal);
        assert_eq!(
            node_emphasis("A", &visible, &Highlight::None),
            Emphasis::Normal
        );
    }

    #[test]
    fn focus_highlights_neighbours_and_dims_the_rest() {
        let edges = vec![edge("A", "B", 20), edge("C", "D", 20)];
        let visible = visible_edges(&edges, FlowFilter::All);
        let state = Highlight::Hovered("A".to_string());

        assert_eq!(edge_emphasis(&edges[0], &state), Emphasis::Highlighted);
        assert_eq!(edge_emphasis(&edges[1], &state), Emphasis::Dimmed);
        assert_eq!(node_emphasis("A", &visible, &state), Emphasis::Highlighted);
        assert_eq!(node_emphasis("B", &visible, &state), Emphasis::Highlighted);
        assert_eq!(node_emphasis("C", &visible, &state), Emphasis::Dimmed);
    }

    #[test]
    fn filtered_out_edge_does_not_highlight_neighbour() {
        let edges = vec![edge("A", "B", 3)];
        let visible = visible_edges(&edges, FlowFilter::default());
        let state = Highlight::Selected("A".to_string());
        assert_eq!(node_emphasis("B", &visible, &state), Emphasis::Dimmed);
    }
}
