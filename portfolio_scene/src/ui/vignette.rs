//! Screen-edge darkening over the whole page.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Normalised radius where the darkening starts.
const CLEAR_RADIUS: f32 = 0.6;
const MAX_ALPHA: f32 = 0.5;
const RINGS: usize = 8;
const SEGMENTS: usize = 64;

pub fn vignette_plugin(app: &mut App) {
    app.add_systems(Update, vignette_system);
}

/// Black opacity at normalised radius `r`, where 1 is the screen corner.
pub fn vignette_alpha(r: f32) -> f32 {
    if r <= CLEAR_RADIUS {
        0.0
    } else {
        ((r - CLEAR_RADIUS) / (1.0 - CLEAR_RADIUS)).min(1.0) * MAX_ALPHA
    }
}

/// Concentric ellipses from the clear radius out to the corners, shaded with
/// `vignette_alpha`. The outermost ellipse passes through all four corners.
pub fn vignette_mesh(screen: egui::Rect, rings: usize, segments: usize) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    if rings == 0 || segments < 3 {
        return mesh;
    }
    let center = screen.center();
    let reach = egui::vec2(screen.width(), screen.height()) * 0.5 * std::f32::consts::SQRT_2;

    for ring in 0..=rings {
        let r = CLEAR_RADIUS + (1.0 - CLEAR_RADIUS) * ring as f32 / rings as f32;
        let color = egui::Color32::from_black_alpha((vignette_alpha(r) * 255.0).round() as u8);
        for segment in 0..segments {
            let theta = std::f32::consts::TAU * segment as f32 / segments as f32;
            let pos = center + egui::vec2(theta.cos() * reach.x, theta.sin() * reach.y) * r;
            mesh.colored_vertex(pos, color);
        }
    }

    let n = segments as u32;
    for ring in 0..rings as u32 {
        for segment in 0..n {
            let inner = ring * n + segment;
            let inner_next = ring * n + (segment + 1) % n;
            let outer = inner + n;
            let outer_next = inner_next + n;
            mesh.add_triangle(inner, outer, outer_next);
            mesh.add_triangle(inner, outer_next, inner_next);
        }
    }
    mesh
}

fn vignette_system(mut contexts: EguiContexts) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let screen = ctx.screen_rect();
    if !screen.is_positive() {
        return;
    }
    let layer = egui::LayerId::new(egui::Order::Foreground, egui::Id::new("vignette"));
    ctx.layer_painter(layer)
        .add(egui::Shape::mesh(vignette_mesh(screen, RINGS, SEGMENTS)));
}
