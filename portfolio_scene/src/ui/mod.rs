mod nav;
mod page;
mod skills;
mod toolkit;
mod vignette;

use bevy::prelude::*;
use bevy_egui::egui;

pub use nav::{
    follow_navigation, nav_plugin, ActiveSection, ButtonLayout, NavIndicator, NavIndicatorGeometry, NavigateTo,
};
pub use page::{page_plugin, ContentSource, FieldCounts};
pub use skills::SkillsSection;
pub use vignette::{vignette_alpha, vignette_plugin};

pub(crate) fn to_bevy_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

pub(crate) fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 13))
        .stroke(egui::Stroke::new(
            1.0,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26),
        ))
        .inner_margin(egui::Margin::same(16))
        .corner_radius(egui::CornerRadius::same(16))
}
