//! Skills and experience section: twinkling star backdrop, skill bars that
//! reveal when the section scrolls into view, and the experience timeline.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::content::PortfolioContent;
use crate::field::StarSpec;
use crate::reveal::{intersection_ratio, ObservationHandle, RevealController, ViewportObservers};
use crate::ui::{panel_frame, to_bevy_rect};

const BAR_FILL: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(147, 197, 253);

/// Reveal state for the mounted section. Removing the resource drops the
/// observation handle, which stops the viewport observation.
#[derive(Resource)]
pub struct SkillsSection {
    pub reveal: RevealController,
    observation: ObservationHandle,
}

impl SkillsSection {
    pub fn new(content: &PortfolioContent, observers: &ViewportObservers) -> Self {
        Self {
            reveal: RevealController::new(content.skill_tracks()),
            observation: observers.observe(),
        }
    }

    /// Feeds the section's on-screen rectangle. Does nothing once the
    /// observation has been released.
    pub fn track_viewport(&mut self, section: Rect, viewport: Rect, now: f32) {
        if !self.observation.is_live() {
            return;
        }
        let ratio = intersection_ratio(section, viewport);
        if let Some(state) = self.reveal.observe(ratio, now) {
            debug!("portfolio: skills section {state:?} at ratio {ratio:.2}");
        }
    }
}

pub(crate) fn skills_section_ui(
    ui: &mut egui::Ui,
    content: &PortfolioContent,
    section: &mut SkillsSection,
    stars: &[StarSpec],
    now: f32,
) {
    let widths = section.reveal.widths_at(now);
    let backdrop = ui.painter().add(egui::Shape::Noop);

    let response = ui
        .vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                egui::RichText::new(&content.skills_heading)
                    .monospace()
                    .size(36.0)
                    .color(egui::Color32::WHITE),
            );
            ui.label(
                egui::RichText::new(&content.skills_tagline)
                    .size(16.0)
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(48.0);

            skill_columns(ui, content, &widths);

            ui.add_space(64.0);
            experience_timeline(ui, content);
            ui.add_space(80.0);
        })
        .response;

    let rect = response.rect;
    ui.painter().set(backdrop, star_shapes(rect, stars, now));
    section.track_viewport(to_bevy_rect(rect), to_bevy_rect(ui.clip_rect()), now);
}

fn skill_columns(ui: &mut egui::Ui, content: &PortfolioContent, widths: &[f32]) {
    let mut bar = 0usize;
    ui.columns(content.skills.len().max(1), |columns| {
        for (category, column) in content.skills.iter().zip(columns.iter_mut()) {
            panel_frame().show(column, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&category.category)
                            .strong()
                            .size(20.0)
                            .color(egui::Color32::WHITE),
                    );
                });
                ui.add_space(16.0);
                for skill in &category.skills {
                    let width = widths.get(bar).copied().unwrap_or(0.0);
                    bar += 1;
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&skill.name).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format!("{}%", skill.proficiency))
                                    .small()
                                    .color(ACCENT),
                            );
                        });
                    });
                    ui.add(
                        egui::ProgressBar::new(width / 100.0)
                            .desired_height(8.0)
                            .fill(BAR_FILL),
                    );
                    ui.add_space(12.0);
                }
            });
        }
    });
}

fn experience_timeline(ui: &mut egui::Ui, content: &PortfolioContent) {
    ui.label(
        egui::RichText::new("Professional Experience")
            .strong()
            .size(24.0)
            .color(egui::Color32::WHITE),
    );
    ui.add_space(24.0);
    for job in &content.experience {
        panel_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&job.role)
                        .strong()
                        .size(18.0)
                        .color(egui::Color32::WHITE),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&job.duration).color(ACCENT));
                });
            });
            ui.label(egui::RichText::new(&job.company).color(egui::Color32::from_rgb(216, 180, 254)));
            ui.label(egui::RichText::new(&job.summary).color(egui::Color32::GRAY));
        });
        ui.add_space(16.0);
    }
}

fn star_shapes(rect: egui::Rect, stars: &[StarSpec], now: f32) -> egui::Shape {
    let shapes = stars
        .iter()
        .map(|star| {
            let (opacity, scale) = star.twinkle_at(now);
            let center = egui::pos2(
                rect.left() + rect.width() * star.left_percent / 100.0,
                rect.top() + rect.height() * star.top_percent / 100.0,
            );
            egui::Shape::circle_filled(
                center,
                star.size_px * scale / 2.0,
                egui::Color32::from_white_alpha((opacity * 255.0) as u8),
            )
        })
        .collect();
    egui::Shape::Vec(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::RevealState;

    #[test]
    fn section_reveals_when_scrolled_into_view() {
        let observers = ViewportObservers::default();
        let mut section = SkillsSection::new(&PortfolioContent::default(), &observers);
        let region = Rect::new(0.0, 1000.0, 800.0, 2000.0);

        section.track_viewport(region, Rect::new(0.0, 0.0, 800.0, 900.0), 0.0);
        assert_eq!(section.reveal.state(), RevealState::Hidden);

        section.track_viewport(region, Rect::new(0.0, 600.0, 800.0, 1500.0), 1.0);
        assert_eq!(section.reveal.state(), RevealState::Visible);
        assert_eq!(observers.active(), 1);

        drop(section);
        assert_eq!(observers.active(), 0);
    }
}
