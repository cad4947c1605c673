use eframe::egui::{self, Color32, Pos2, Stroke};
use std::path::PathBuf;
use std::time::Instant;

use majorflow::interaction::{
    Emphasis, FlowFilter, Highlight, edge_emphasis, node_emphasis, visible_edges,
};
use majorflow::network::{CurveRoute, EdgeDatum, Network, NodeDatum, PathCache, Point};

use crate::config::Config;
use crate::theme::Theme;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;
/// Layout units kept free around the label ring.
const VIEW_MARGIN: f64 = 60.0;
/// Extra screen pixels around a node that still count as a hit.
const HIT_SLOP: f32 = 3.0;
const MIN_HIT_RADIUS: f32 = 6.0;
/// Screen distance within which the pointer is over a curve.
const EDGE_HIT: f32 = 5.0;
const EDGE_SAMPLES: usize = 24;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// Maps layout coordinates (origin at ring center) into a screen rect.
#[derive(Debug, Clone, Copy)]
struct ViewTransform {
    center: Pos2,
    scale: f32,
}

impl ViewTransform {
    fn fit(rect: egui::Rect, extent: f64) -> Self {
        let half = rect.width().min(rect.height()) / 2.0;
        Self {
            center: rect.center(),
            scale: half / extent as f32,
        }
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        self.center + egui::vec2(p.x as f32, p.y as f32) * self.scale
    }
}

/// The node under `pos`, if any. Nearest wins when hit areas overlap.
fn hit_test<'a>(nodes: &'a [NodeDatum], pos: Pos2, view: &ViewTransform) -> Option<&'a str> {
    nodes
        .iter()
        .filter_map(|n| {
            let screen = view.to_screen(Point::new(n.x, n.y));
            let reach = (n.radius_size as f32 * view.scale).max(MIN_HIT_RADIUS) + HIT_SLOP;
            let d = screen.distance(pos);
            (d <= reach).then_some((d, n.id.as_str()))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Shortest screen distance from `pos` to a polyline.
fn polyline_distance(points: &[Pos2], pos: Pos2) -> f32 {
    match points {
        [] => f32::INFINITY,
        [only] => only.distance(pos),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(pos, w[0], w[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Route through the cache; an edge that cannot be routed is logged and
/// skipped.
fn cached_route(paths: &mut PathCache, network: &Network, edge: &EdgeDatum) -> Option<CurveRoute> {
    match paths.get_or_route(edge, &network.layout, &network.config) {
        Ok(route) => Some(route),
        Err(e) => {
            log::warn!("skipping edge {} -> {}: {e}", edge.source, edge.target);
            None
        }
    }
}

/// Stroke width in screen pixels; square-root scaled by flow.
fn edge_width(total: u64, max_total: u64, scale: f32) -> f32 {
    let ratio = if max_total == 0 {
        0.0
    } else {
        (total as f32 / max_total as f32).sqrt()
    };
    (0.8 + 5.0 * ratio) * scale.clamp(0.5, 2.0)
}

fn emphasis_opacity(emphasis: Emphasis, theme: &Theme, base: f32) -> f32 {
    match emphasis {
        Emphasis::Normal => base,
        Emphasis::Highlighted => 0.95,
        Emphasis::Dimmed => theme.dim_opacity,
    }
}

struct NetworkApp {
    network: Network,
    paths: PathCache,
    highlight: Highlight,
    /// Edge under the pointer, by `(source, target)`.
    hovered_edge: Option<(String, String)>,
    filter: FlowFilter,
    /// Threshold restored when toggling back from "all".
    threshold: u64,
    theme: Theme,
    toast: Option<Toast>,
}

impl NetworkApp {
    fn new(network: Network, filter: FlowFilter, threshold: u64, theme: Theme) -> Self {
        Self {
            network,
            paths: PathCache::new(),
            highlight: Highlight::None,
            hovered_edge: None,
            filter,
            threshold,
            theme,
            toast: None,
        }
    }

    fn toggle_filter(&mut self) {
        self.filter = self.filter.toggle(self.threshold);
        self.toast = Some(Toast::new(format!("Showing {}", self.filter.label())));
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn handle_pointer(&mut self, response: &egui::Response, view: &ViewTransform) {
        let hovered = response
            .hover_pos()
            .and_then(|pos| hit_test(&self.network.nodes, pos, view))
            .map(str::to_string);

        self.highlight = match &hovered {
            Some(id) => self.highlight.on_hover(id),
            None => self.highlight.on_leave(),
        };

        if response.clicked() {
            self.highlight = match &hovered {
                Some(id) => self.highlight.on_click(id),
                None => self.highlight.on_click_outside(),
            };
        }

        self.hovered_edge = match (hovered, response.hover_pos()) {
            (None, Some(pos)) => self.edge_at(pos, view),
            _ => None,
        };
    }

    /// Nearest visible edge whose curve passes within reach of `pos`.
    fn edge_at(&mut self, pos: Pos2, view: &ViewTransform) -> Option<(String, String)> {
        let visible = visible_edges(&self.network.edges, self.filter);
        let mut best: Option<(f32, &EdgeDatum)> = None;
        for edge in visible {
            let Some(route) = cached_route(&mut self.paths, &self.network, edge) else {
                continue;
            };
            let points: Vec<Pos2> = route
                .curve
                .sample(EDGE_SAMPLES)
                .into_iter()
                .map(|p| view.to_screen(p))
                .collect();
            let d = polyline_distance(&points, pos);
            if d <= EDGE_HIT && best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, edge));
            }
        }
        best.map(|(_, edge)| edge.key())
    }

    fn draw_edges(&mut self, painter: &egui::Painter, view: &ViewTransform) {
        let max_total = self.network.max_total_flow();
        let visible = visible_edges(&self.network.edges, self.filter);

        // Dimmed first so highlighted curves end up on top.
        let mut ordered: Vec<(&EdgeDatum, Emphasis)> = visible
            .into_iter()
            .map(|e| (e, edge_emphasis(e, &self.highlight)))
            .collect();
        ordered.sort_by_key(|(_, emphasis)| match emphasis {
            Emphasis::Dimmed => 0,
            Emphasis::Normal => 1,
            Emphasis::Highlighted => 2,
        });

        for (edge, emphasis) in ordered {
            let Some(route) = cached_route(&mut self.paths, &self.network, edge) else {
                continue;
            };
            let opacity = emphasis_opacity(emphasis, &self.theme, self.theme.edge_opacity);
            let color = Theme::with_opacity(self.theme.category_color(&edge.color), opacity);
            let width = edge_width(edge.total_flow, max_total, view.scale);
            let points = [
                view.to_screen(route.curve.start),
                view.to_screen(route.curve.control),
                view.to_screen(route.curve.end),
            ];
            painter.add(egui::epaint::QuadraticBezierShape::from_points_stroke(
                points,
                false,
                Color32::TRANSPARENT,
                Stroke::new(width, color),
            ));
        }
    }

    fn draw_nodes(&self, painter: &egui::Painter, view: &ViewTransform) {
        let visible = visible_edges(&self.network.edges, self.filter);
        let radius = self.network.config.radius;

        for node in &self.network.nodes {
            let emphasis = node_emphasis(&node.id, &visible, &self.highlight);
            let opacity = emphasis_opacity(emphasis, &self.theme, 1.0);
            let fill = Theme::with_opacity(self.theme.category_color(&node.color), opacity);
            let center = view.to_screen(Point::new(node.x, node.y));
            let r = node.radius_size as f32 * view.scale;

            painter.circle_filled(center, r, fill);
            let pinned =
                self.highlight.is_sticky() && self.highlight.focus() == Some(node.id.as_str());
            let outline = if pinned {
                Stroke::new(2.5, self.theme.accent)
            } else {
                Stroke::new(1.0, self.theme.node_outline)
            };
            painter.circle_stroke(center, r, outline);

            let label_pos = view.to_screen(Point::from_polar(
                radius + node.radius_size + 10.0,
                node.angle,
            ));
            let text_color = Theme::with_opacity(self.theme.foreground, opacity);
            painter.text(
                label_pos,
                egui::Align2::CENTER_CENTER,
                &node.id,
                egui::FontId::proportional(self.theme.node_label_size * view.scale.max(0.8)),
                text_color,
            );
        }

        for label in &self.network.labels {
            painter.text(
                view.to_screen(Point::new(label.x, label.y)),
                egui::Align2::CENTER_CENTER,
                &label.text,
                egui::FontId::proportional(self.theme.label_size * view.scale.max(0.8)),
                self.theme.category_color(&label.color),
            );
        }
    }

    /// Details of the focused node in the top-left corner.
    fn draw_focus_panel(&self, painter: &egui::Painter, rect: egui::Rect) {
        let Some(id) = self.highlight.focus() else {
            return;
        };
        let Some(node) = self.network.node(id) else {
            return;
        };

        let visible = visible_edges(&self.network.edges, self.filter);
        let mut outgoing: u64 = 0;
        let mut incoming: u64 = 0;
        let mut partners = 0;
        for edge in visible.iter().filter(|e| e.touches(id)) {
            partners += 1;
            if edge.source == id {
                outgoing = outgoing.saturating_add(edge.flow_source_to_target);
                incoming = incoming.saturating_add(edge.flow_target_to_source);
            } else {
                outgoing = outgoing.saturating_add(edge.flow_target_to_source);
                incoming = incoming.saturating_add(edge.flow_source_to_target);
            }
        }

        let category = self
            .network
            .config
            .category(&node.category)
            .map_or(node.category.as_str(), |c| c.label());
        let pinned = if self.highlight.is_sticky() {
            "  (pinned)"
        } else {
            ""
        };
        let (id, weight) = (&node.id, node.weight);
        let text = format!(
            "{id}{pinned}\n{category}\nweight {weight}\n{partners} linked majors\n\
             {outgoing} left, {incoming} arrived"
        );

        let galley = painter.layout_no_wrap(
            text,
            egui::FontId::proportional(self.theme.body_size),
            self.theme.foreground,
        );
        let padding = 12.0;
        let panel = egui::Rect::from_min_size(
            rect.left_top() + egui::vec2(16.0, 16.0),
            galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
        );
        painter.rect_filled(panel, 6.0, self.theme.panel_background);
        painter.galley(
            panel.left_top() + egui::vec2(padding, padding),
            galley,
            self.theme.foreground,
        );
    }

    /// Both directional counts for the edge under the pointer.
    fn draw_edge_tooltip(&self, painter: &egui::Painter, pointer: Option<Pos2>) {
        let (Some((source, target)), Some(pos)) = (&self.hovered_edge, pointer) else {
            return;
        };
        let Some(edge) = self
            .network
            .edges
            .iter()
            .find(|e| &e.source == source && &e.target == target)
        else {
            return;
        };
        let text = format!(
            "{} \u{2192} {}: {}\n{} \u{2192} {}: {}\ntotal {}",
            edge.source,
            edge.target,
            edge.flow_source_to_target,
            edge.target,
            edge.source,
            edge.flow_target_to_source,
            edge.total_flow
        );
        let galley = painter.layout_no_wrap(
            text,
            egui::FontId::proportional(self.theme.body_size),
            self.theme.foreground,
        );
        let padding = 8.0;
        let tip = egui::Rect::from_min_size(
            pos + egui::vec2(14.0, 14.0),
            galley.rect.size() + egui::vec2(padding * 2.0, padding * 2.0),
        );
        painter.rect_filled(tip, 4.0, self.theme.panel_background);
        painter.rect_stroke(
            tip,
            4.0,
            Stroke::new(1.0, self.theme.category_color(&edge.color)),
            egui::StrokeKind::Inside,
        );
        painter.galley(
            tip.left_top() + egui::vec2(padding, padding),
            galley,
            self.theme.foreground,
        );
    }

    /// Category swatches in the bottom-left corner.
    fn draw_legend(&self, painter: &egui::Painter, rect: egui::Rect) {
        let present: Vec<_> = self
            .network
            .config
            .categories
            .iter()
            .filter(|c| self.network.nodes.iter().any(|n| n.category == c.code))
            .collect();
        let line = self.theme.body_size + 8.0;
        let mut y = rect.bottom() - 48.0 - line * present.len() as f32;
        for category in present {
            let swatch = egui::pos2(rect.left() + 28.0, y);
            painter.circle_filled(swatch, 6.0, self.theme.category_color(&category.color));
            painter.text(
                swatch + egui::vec2(14.0, 0.0),
                egui::Align2::LEFT_CENTER,
                category.label(),
                egui::FontId::proportional(self.theme.body_size),
                self.theme.foreground,
            );
            y += line;
        }
    }

    fn draw_footer(&self, painter: &egui::Painter, rect: egui::Rect) {
        let hint = format!(
            "F: {}   T: theme   Esc: clear   Q: quit",
            self.filter.label()
        );
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - 16.0),
            egui::Align2::CENTER_BOTTOM,
            hint,
            egui::FontId::proportional(self.theme.body_size),
            self.theme.muted,
        );
    }

    fn draw_toast(&self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        let Some(ref toast) = self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.panel_background, opacity * 0.9);
        let galley = painter.layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(18.0),
            toast_color,
        );
        let padding = 14.0;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 90.0,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        painter.rect_filled(toast_rect, 8.0, toast_bg);
        painter.galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            toast_color,
        );
        ctx.request_repaint();
    }
}

impl eframe::App for NetworkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Send viewport commands after the input closure; sending inside
        // ctx.input() deadlocks.
        let mut quit = false;
        let (toggle_filter, toggle_theme, clear) = ctx.input(|i| {
            quit = i.key_pressed(egui::Key::Q);
            (
                i.key_pressed(egui::Key::F),
                i.key_pressed(egui::Key::T),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if toggle_filter {
            self.toggle_filter();
        }
        if toggle_theme {
            self.toggle_theme();
        }
        if clear {
            self.highlight = self.highlight.on_click_outside();
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let rect = response.rect;
                let view = ViewTransform::fit(rect, self.network.config.label_radius + VIEW_MARGIN);

                self.handle_pointer(&response, &view);
                self.draw_edges(&painter, &view);
                self.draw_nodes(&painter, &view);
                self.draw_focus_panel(&painter, rect);
                self.draw_legend(&painter, rect);
                self.draw_edge_tooltip(&painter, response.hover_pos());
                self.draw_footer(&painter, rect);
                self.draw_toast(ctx, &painter, rect);
            });
    }
}

pub fn run(
    file: PathBuf,
    windowed: bool,
    filter: FlowFilter,
    config: &Config,
) -> anyhow::Result<()> {
    let network = crate::commands::load_network(&file)?;

    let title = format!(
        "majorflow - {}",
        file.file_name().unwrap_or_default().to_string_lossy()
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let theme = Theme::from_name(config.theme_name());
    let threshold = match filter {
        FlowFilter::AtLeast(threshold) => threshold,
        FlowFilter::All => config.threshold(),
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(NetworkApp::new(network, filter, threshold, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
