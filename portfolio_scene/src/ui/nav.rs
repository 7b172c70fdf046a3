//! Fixed navigation bar with a sliding highlight under the active entry.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::content::PortfolioContent;

const INDICATOR_GLIDE_SECS: f32 = 0.5;

/// Section currently shown, supplied by whatever drives page routing.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct ActiveSection(pub String);

impl Default for ActiveSection {
    fn default() -> Self {
        Self("home".into())
    }
}

/// Emitted when a navigation entry is activated.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub struct NavigateTo {
    pub section_id: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavIndicatorGeometry {
    pub left_px: f32,
    pub width_px: f32,
}

/// Measured position of one rendered button, relative to the bar's content edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonLayout {
    pub id: String,
    pub offset_left: f32,
    pub width: f32,
}

/// Highlight geometry, recomputed only when the active entry changes.
#[derive(Resource, Clone, Debug, Default)]
pub struct NavIndicator {
    applied_for: Option<String>,
    geometry: NavIndicatorGeometry,
}

impl NavIndicator {
    pub fn geometry(&self) -> NavIndicatorGeometry {
        self.geometry
    }

    /// Moves the highlight to `active`'s button. Returns whether the geometry
    /// was recomputed. An id with no matching button keeps the last geometry
    /// and is retried on the next call.
    pub fn sync(&mut self, active: &str, buttons: &[ButtonLayout]) -> bool {
        if self.applied_for.as_deref() == Some(active) {
            return false;
        }
        let Some(button) = buttons.iter().find(|b| b.id == active) else {
            return false;
        };
        self.geometry = NavIndicatorGeometry {
            left_px: button.offset_left,
            width_px: button.width,
        };
        self.applied_for = Some(active.to_string());
        true
    }
}

pub fn nav_plugin(app: &mut App) {
    app.init_resource::<ActiveSection>()
        .init_resource::<NavIndicator>()
        .add_event::<NavigateTo>()
        .add_systems(Update, nav_bar_system);
}

/// Treats every navigation request as immediately honoured. Apps with their
/// own routing leave this out and update `ActiveSection` themselves.
pub fn follow_navigation(mut requests: EventReader<NavigateTo>, mut active: ResMut<ActiveSection>) {
    if let Some(request) = requests.read().last() {
        if active.0 != request.section_id {
            active.0 = request.section_id.clone();
        }
    }
}

fn nav_bar_system(
    mut contexts: EguiContexts,
    content: Option<Res<PortfolioContent>>,
    active: Res<ActiveSection>,
    mut indicator: ResMut<NavIndicator>,
    mut layouts: Local<Vec<ButtonLayout>>,
    mut navigate: EventWriter<NavigateTo>,
) {
    let Some(content) = content else {
        return;
    };
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    // Layouts come from the previous frame: buttons are measured as they are drawn.
    indicator.sync(&active.0, &layouts);
    let target = indicator.geometry();
    let mut measured = Vec::with_capacity(content.nav.len());

    egui::Area::new(egui::Id::new("portfolio_nav"))
        .anchor(egui::Align2::CENTER_TOP, [0.0, 24.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 51))
                .stroke(egui::Stroke::new(
                    1.0,
                    egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26),
                ))
                .inner_margin(egui::Margin::same(4))
                .corner_radius(egui::CornerRadius::same(24))
                .show(ui, |ui| {
                    let origin = ui.cursor().left();
                    let highlight = ui.painter().add(egui::Shape::Noop);

                    let row = ui
                        .horizontal(|ui| {
                            for entry in &content.nav {
                                let is_active = entry.id == active.0;
                                let color = if is_active {
                                    egui::Color32::WHITE
                                } else {
                                    egui::Color32::from_rgb(156, 163, 175)
                                };
                                let response = ui.add(
                                    egui::Button::new(
                                        egui::RichText::new(&entry.label).color(color),
                                    )
                                    .frame(false)
                                    .min_size(egui::vec2(0.0, 32.0)),
                                );
                                if response.has_focus() {
                                    ui.painter().rect_stroke(
                                        response.rect.expand(2.0),
                                        egui::CornerRadius::same(16),
                                        egui::Stroke::new(
                                            2.0,
                                            egui::Color32::from_rgb(59, 130, 246),
                                        ),
                                        egui::StrokeKind::Outside,
                                    );
                                }
                                if response.clicked() {
                                    navigate.send(NavigateTo {
                                        section_id: entry.id.clone(),
                                    });
                                }
                                measured.push(ButtonLayout {
                                    id: entry.id.clone(),
                                    offset_left: response.rect.left() - origin,
                                    width: response.rect.width(),
                                });
                            }
                        })
                        .response
                        .rect;

                    let glide = |name: &str, value: f32| {
                        ui.ctx().animate_value_with_time(
                            egui::Id::new(("portfolio_nav_indicator", name)),
                            value,
                            INDICATOR_GLIDE_SECS,
                        )
                    };
                    let left = glide("left", target.left_px);
                    let width = glide("width", target.width_px);
                    if width > 0.0 {
                        let rect = egui::Rect::from_min_size(
                            egui::pos2(origin + left, row.top()),
                            egui::vec2(width, row.height()),
                        );
                        ui.painter().set(
                            highlight,
                            egui::Shape::rect_filled(
                                rect,
                                egui::CornerRadius::same(16),
                                egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26),
                            ),
                        );
                    }
                });
        });

    *layouts = measured;
}
