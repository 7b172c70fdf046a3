//! Shared colour and material helpers for orbs, planets, asteroids and the backdrop.

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy_egui::egui;

use crate::error::SetupError;
use crate::scene::presets::SPARKLE_OPACITY;
use crate::scene::{AnimatedEntity, EntityKind};

/// Parses `#rrggbb` / `#rgb` colours.
pub fn try_parse_color(hex: &str) -> Result<Color, SetupError> {
    Srgba::hex(hex)
        .map(Color::from)
        .map_err(|_| SetupError::InvalidColor(hex.to_string()))
}

/// Like [`try_parse_color`], but logs and falls back to white.
pub fn parse_color(hex: &str) -> Color {
    try_parse_color(hex).unwrap_or_else(|err| {
        warn!("portfolio: {err}, using white");
        Color::WHITE
    })
}

pub fn to_egui(color: Color, alpha: f32) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub fn entity_material(
    materials: &mut Assets<StandardMaterial>,
    entity: &AnimatedEntity,
) -> Handle<StandardMaterial> {
    let material = match entity.kind {
        EntityKind::Orb => StandardMaterial {
            base_color: entity.color,
            perceptual_roughness: 0.1,
            metallic: 0.8,
            ..default()
        },
        EntityKind::Planet => {
            let lin = entity.color.to_linear();
            StandardMaterial {
                base_color: entity.color,
                perceptual_roughness: 0.1,
                metallic: 0.9,
                emissive: LinearRgba::rgb(lin.red * 0.2, lin.green * 0.2, lin.blue * 0.2),
                ..default()
            }
        }
        EntityKind::Asteroid => StandardMaterial {
            base_color: entity.color,
            perceptual_roughness: 0.8,
            metallic: 0.2,
            ..default()
        },
        // Seen from inside: cull the outward faces.
        EntityKind::Nebula => StandardMaterial {
            base_color: entity.color,
            alpha_mode: AlphaMode::Blend,
            cull_mode: Some(Face::Front),
            unlit: true,
            fog_enabled: false,
            ..default()
        },
    };
    materials.add(material)
}

/// Unlit, semi-transparent glitter in the planet's colour.
pub fn sparkle_material(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color.with_alpha(SPARKLE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    })
}

pub fn star_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(2.0, 2.0, 2.0),
        unlit: true,
        fog_enabled: false,
        ..default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_parse() {
        let color = try_parse_color("#61DAFB").unwrap().to_srgba();
        assert!((color.red - 0x61 as f32 / 255.0).abs() < 1e-6);
        assert!((color.blue - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bad_hex_falls_back_to_white() {
        assert_eq!(
            try_parse_color("#zzzzzz"),
            Err(SetupError::InvalidColor("#zzzzzz".into()))
        );
        assert_eq!(parse_color("not a colour"), Color::WHITE);
    }

    #[test]
    fn egui_conversion_keeps_channels() {
        let c = to_egui(Color::srgb(1.0, 0.0, 0.0), 0.5);
        assert_eq!(c, egui::Color32::from_rgba_unmultiplied(255, 0, 0, 127));
    }
}
