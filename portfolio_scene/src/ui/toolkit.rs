//! Toolkit panel: reserves the rectangle the toolkit scene renders into and
//! draws the pulsing particle overlay and orb names on top of it.

use bevy::prelude::*;
use bevy::render::camera::CameraProjection;
use bevy_egui::egui;

use crate::field::ParticleSpec;
use crate::scene::materials::{parse_color, to_egui};
use crate::scene::ToolkitViewport;
use crate::ui::to_bevy_rect;

pub(crate) const PANEL_HEIGHT: f32 = 384.0;
const PARTICLE_RADIUS: f32 = 2.0;
const PARTICLE_COLOR: &str = "#22d3ee";

/// An orb name and the world position it hangs at.
pub(crate) struct PanelLabel {
    pub text: String,
    pub world: Vec3,
}

/// Projects world points the way the toolkit camera does for the whole panel,
/// regardless of how much of the panel is on screen.
#[derive(Clone, Debug)]
pub(crate) struct LabelProjector {
    pub projection: PerspectiveProjection,
    pub view_from_world: Mat4,
}

impl LabelProjector {
    pub fn new(projection: &PerspectiveProjection, camera: &GlobalTransform) -> Self {
        Self {
            projection: projection.clone(),
            view_from_world: camera.compute_matrix().inverse(),
        }
    }

    /// Normalised device position for a panel of the given aspect ratio, or
    /// `None` behind the camera.
    pub fn ndc(&self, aspect_ratio: f32, world: Vec3) -> Option<Vec2> {
        let projection = PerspectiveProjection {
            aspect_ratio,
            ..self.projection.clone()
        };
        let clip = projection.get_clip_from_view() * self.view_from_world * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        (0.0..=1.0).contains(&ndc.z).then(|| ndc.truncate())
    }
}

/// Maps normalised device coordinates (`-1..1`, Y up) into `rect`.
pub(crate) fn ndc_to_panel(rect: egui::Rect, ndc: Vec2) -> egui::Pos2 {
    egui::pos2(
        rect.left() + (ndc.x + 1.0) / 2.0 * rect.width(),
        rect.top() + (1.0 - ndc.y) / 2.0 * rect.height(),
    )
}

/// Draws the panel and reports where it is, for the 3D viewport.
pub(crate) fn toolkit_panel_ui(
    ui: &mut egui::Ui,
    particles: &[ParticleSpec],
    labels: &[PanelLabel],
    projector: Option<&LabelProjector>,
    now: f32,
) -> ToolkitViewport {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, PANEL_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(
        rect,
        egui::CornerRadius::same(16),
        egui::Color32::from_rgba_unmultiplied(88, 28, 135, 40),
    );
    // Border breathes on a 4 s cycle.
    let breath = 0.5 + 0.5 * (now * std::f32::consts::TAU / 4.0).sin();
    painter.rect_stroke(
        rect,
        egui::CornerRadius::same(16),
        egui::Stroke::new(
            1.0 + breath,
            egui::Color32::from_rgba_unmultiplied(6, 182, 212, (77.0 + 50.0 * breath) as u8),
        ),
        egui::StrokeKind::Inside,
    );

    let particle_color = parse_color(PARTICLE_COLOR);
    for particle in particles {
        let center = egui::pos2(
            rect.left() + rect.width() * particle.left_percent / 100.0,
            rect.top() + rect.height() * particle.top_percent / 100.0,
        );
        painter.circle_filled(
            center,
            PARTICLE_RADIUS,
            to_egui(particle_color, particle.opacity_at(now)),
        );
    }

    if let Some(projector) = projector {
        let aspect = rect.width() / rect.height();
        for label in labels {
            let Some(ndc) = projector.ndc(aspect, label.world) else {
                continue;
            };
            painter.text(
                ndc_to_panel(rect, ndc),
                egui::Align2::CENTER_CENTER,
                &label.text,
                egui::FontId::monospace(12.0),
                egui::Color32::WHITE,
            );
        }
    }

    let visible = rect.intersect(ui.clip_rect());
    if visible.is_positive() {
        ToolkitViewport {
            panel: Some(to_bevy_rect(rect)),
            visible: Some(to_bevy_rect(visible)),
        }
    } else {
        ToolkitViewport::default()
    }
}
