//! Fixed layouts and lighting for the two scenes.

use bevy::prelude::*;

/// Which of the two decorative scenes an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    /// Six technology orbs around the origin, rendered inside the toolkit panel.
    Toolkit,
    /// Orbiting planets, asteroids and a nebula shell behind the whole page.
    Space,
}

impl ScenePreset {
    /// Render layer the scene's camera, lights and entities live on.
    pub fn layer(self) -> usize {
        match self {
            Self::Space => 0,
            Self::Toolkit => 1,
        }
    }
}

pub struct OrbDef {
    pub name: &'static str,
    pub color: &'static str,
    pub position: [f32; 3],
}

pub const TOOLKIT_ORBS: [OrbDef; 6] = [
    OrbDef { name: "React", color: "#61DAFB", position: [-1.2, 0.8, 0.0] },
    OrbDef { name: "Node.js", color: "#68A063", position: [1.2, 0.8, 0.0] },
    OrbDef { name: "Python", color: "#3776AB", position: [-1.2, -0.8, 0.0] },
    OrbDef { name: "Docker", color: "#0DB7ED", position: [1.2, -0.8, 0.0] },
    OrbDef { name: "AWS", color: "#FF9900", position: [0.0, 0.0, -1.0] },
    OrbDef { name: "ML/AI", color: "#FF6B6B", position: [0.0, 0.0, 1.0] },
];

pub const ORB_RADIUS: f32 = 0.3;
pub const ORB_SPIN: f32 = 0.01;
pub const ORB_PHASE_STEP: f32 = 0.5;
/// Orb name labels hang this far below their orb.
pub const ORB_LABEL_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);

/// Whole-frame float sway parameters.
pub struct FloatDef {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

pub const ORB_FLOAT: FloatDef = FloatDef { speed: 2.0, rotation_intensity: 0.5, float_intensity: 0.8 };
pub const PLANET_FLOAT: FloatDef = FloatDef { speed: 2.0, rotation_intensity: 0.4, float_intensity: 0.6 };
/// Asteroids sway at their own random speed; only the intensities are fixed.
pub const ASTEROID_FLOAT: FloatDef = FloatDef { speed: 0.0, rotation_intensity: 1.0, float_intensity: 0.5 };
/// Each float cycle starts somewhere in `[0, FLOAT_OFFSET_RANGE)` seconds.
pub const FLOAT_OFFSET_RANGE: f32 = 10_000.0;

pub struct PlanetDef {
    pub color: &'static str,
    pub position: [f32; 3],
    pub size: f32,
    pub speed: f32,
}

pub const SPACE_PLANETS: [PlanetDef; 6] = [
    PlanetDef { color: "#4f46e5", position: [-6.0, 3.0, -8.0], size: 1.2, speed: 0.008 },
    PlanetDef { color: "#06b6d4", position: [7.0, -3.0, -12.0], size: 1.8, speed: 0.006 },
    PlanetDef { color: "#8b5cf6", position: [-3.0, -4.0, -15.0], size: 0.9, speed: 0.01 },
    PlanetDef { color: "#f59e0b", position: [4.0, 5.0, -10.0], size: 1.4, speed: 0.007 },
    PlanetDef { color: "#ef4444", position: [0.0, -6.0, -18.0], size: 1.1, speed: 0.009 },
    PlanetDef { color: "#10b981", position: [-8.0, 0.0, -6.0], size: 0.8, speed: 0.012 },
];

/// Past positions kept per planet trail, one per frame.
pub const TRAIL_POINTS: usize = 200;

pub const SPARKLES_PER_PLANET: usize = 15;
/// Sparkles fill a cube this many planet radii wide, centred on the planet.
pub const SPARKLE_SPREAD: f32 = 2.0;
pub const SPARKLE_SPEED: f32 = 0.5;
pub const SPARKLE_JITTER: f32 = 0.2;
pub const SPARKLE_OPACITY: f32 = 0.6;
pub const SPARKLE_RADIUS: f32 = 0.03;

pub const ASTEROID_COUNT: usize = 50;
pub const ASTEROID_SPREAD: f32 = 40.0;
pub const ASTEROID_COLOR: &str = "#444444";

pub const NEBULA_POSITION: Vec3 = Vec3::new(0.0, 0.0, -20.0);
pub const NEBULA_SCALE: f32 = 30.0;
pub const NEBULA_COLOR: &str = "#1a0033";
pub const NEBULA_ALPHA: f32 = 0.3;
pub const NEBULA_TUMBLE: Vec3 = Vec3::new(0.0005, 0.0008, 0.0003);

/// Star shells behind the space scene: (count, radius, depth).
pub const STAR_SHELLS: [(usize, f32, f32); 2] = [(5000, 300.0, 60.0), (2000, 100.0, 30.0)];

#[derive(Clone, Debug, PartialEq)]
pub enum LightKind {
    Point,
    Spot { angle: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightSpec {
    pub kind: LightKind,
    pub position: Vec3,
    pub color: &'static str,
    pub intensity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraSpec {
    pub position: Vec3,
    pub fov_degrees: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FogSpec {
    pub color: &'static str,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundSpec {
    /// `None` leaves whatever was drawn beneath untouched.
    pub clear_color: Option<&'static str>,
    pub fog: Option<FogSpec>,
    pub ambient_brightness: f32,
}

pub fn lights(preset: ScenePreset) -> Vec<LightSpec> {
    let point = |position: Vec3, color, intensity| LightSpec {
        kind: LightKind::Point,
        position,
        color,
        intensity,
    };
    match preset {
        ScenePreset::Toolkit => vec![
            point(Vec3::splat(10.0), "#4f46e5", 1.0),
            point(Vec3::splat(-10.0), "#06b6d4", 0.5),
        ],
        ScenePreset::Space => vec![
            point(Vec3::splat(10.0), "#4f46e5", 2.0),
            point(Vec3::splat(-10.0), "#06b6d4", 1.0),
            point(Vec3::new(0.0, 15.0, 5.0), "#8b5cf6", 1.5),
            LightSpec {
                kind: LightKind::Spot { angle: 0.3 },
                position: Vec3::new(0.0, 10.0, 0.0),
                color: "#f59e0b",
                intensity: 2.0,
            },
        ],
    }
}

pub fn camera(preset: ScenePreset) -> CameraSpec {
    match preset {
        ScenePreset::Toolkit => CameraSpec {
            position: Vec3::new(0.0, 0.0, 3.0),
            fov_degrees: 75.0,
        },
        ScenePreset::Space => CameraSpec {
            position: Vec3::new(0.0, 0.0, 12.0),
            fov_degrees: 75.0,
        },
    }
}

pub fn background(preset: ScenePreset) -> BackgroundSpec {
    match preset {
        ScenePreset::Toolkit => BackgroundSpec {
            clear_color: None,
            fog: None,
            ambient_brightness: 0.4,
        },
        ScenePreset::Space => BackgroundSpec {
            clear_color: Some("#0a0820"),
            fog: Some(FogSpec {
                color: "#0a0820",
                near: 20.0,
                far: 80.0,
            }),
            ambient_brightness: 0.2,
        },
    }
}
