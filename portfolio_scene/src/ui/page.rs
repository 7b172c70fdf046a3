//! Scrolling page overlay: toolkit panel followed by the skills section.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::SceneCamera;
use crate::content::{content_or_default, PortfolioContent};
use crate::field::FieldCache;
use crate::reveal::ViewportObservers;
use crate::scene::{OrbLabel, ScenePreset, ToolkitViewport};
use crate::ui::skills::{skills_section_ui, SkillsSection};
use crate::ui::toolkit::{toolkit_panel_ui, LabelProjector, PanelLabel};

/// Optional content override file.
#[derive(Resource, Clone, Debug, Default)]
pub struct ContentSource(pub Option<PathBuf>);

/// How many overlay particles and backdrop stars to draw.
#[derive(Resource, Clone, Copy, Debug)]
pub struct FieldCounts {
    pub particles: usize,
    pub stars: usize,
}

pub fn page_plugin(app: &mut App) {
    app.init_resource::<ContentSource>()
        .init_resource::<ViewportObservers>()
        .init_resource::<ToolkitViewport>()
        .add_systems(Startup, (load_portfolio_content, mount_skills_section).chain())
        .add_systems(Update, page_system);
}

fn load_portfolio_content(mut commands: Commands, source: Res<ContentSource>) {
    commands.insert_resource(content_or_default(source.0.as_deref()));
}

fn mount_skills_section(
    mut commands: Commands,
    content: Res<PortfolioContent>,
    observers: Res<ViewportObservers>,
) {
    commands.insert_resource(SkillsSection::new(&content, &observers));
}

#[allow(clippy::too_many_arguments)]
fn page_system(
    mut contexts: EguiContexts,
    content: Option<Res<PortfolioContent>>,
    section: Option<ResMut<SkillsSection>>,
    fields: Option<ResMut<FieldCache>>,
    counts: Option<Res<FieldCounts>>,
    mut viewport: ResMut<ToolkitViewport>,
    cameras: Query<(&SceneCamera, &Camera, &Projection, &GlobalTransform)>,
    labels: Query<(&OrbLabel, &GlobalTransform)>,
) {
    let (Some(content), Some(mut section), Some(mut fields)) = (content, section, fields) else {
        return;
    };
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let counts = counts.map(|c| *c).unwrap_or(FieldCounts {
        particles: crate::config::DEFAULT_PARTICLES,
        stars: crate::config::DEFAULT_STARS,
    });
    let now = ctx.input(|i| i.time) as f32;
    let projector = toolkit_projector(&cameras);
    let panel_labels: Vec<PanelLabel> = labels
        .iter()
        .map(|(label, tf)| PanelLabel {
            text: label.text.clone(),
            world: tf.translation(),
        })
        .collect();
    let particles = fields.particles(counts.particles).to_vec();
    let stars = fields.stars(counts.stars).to_vec();

    let mut placement = ToolkitViewport::default();
    egui::CentralPanel::default()
        .frame(egui::Frame::default().inner_margin(egui::Margin::symmetric(48, 0)))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(120.0);
                    placement = toolkit_panel_ui(
                        ui,
                        &particles,
                        &panel_labels,
                        projector.as_ref(),
                        now,
                    );
                    skills_section_ui(ui, &content, &mut section, &stars, now);
                });
        });

    if *viewport != placement {
        *viewport = placement;
    }
    // Twinkles and pulses are time driven; keep egui repainting.
    ctx.request_repaint();
}

fn toolkit_projector(
    cameras: &Query<(&SceneCamera, &Camera, &Projection, &GlobalTransform)>,
) -> Option<LabelProjector> {
    cameras
        .iter()
        .find(|(scene, camera, _, _)| scene.0 == ScenePreset::Toolkit && camera.is_active)
        .and_then(|(_, _, projection, tf)| match projection {
            Projection::Perspective(perspective) => Some(LabelProjector::new(perspective, tf)),
            _ => None,
        })
}
