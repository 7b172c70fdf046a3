//! SDK entry points and builder for composing the portfolio app.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::animation::animation_plugin;
use crate::camera::orbit_camera_plugin;
use crate::config::{self, PortfolioConfig};
use crate::field::FieldCache;
use crate::render::{EntityRenderer, RendererResource, SphereRenderer};
use crate::scene::{scene_plugin, trail_plugin, SceneComposer, SpaceCameraSettings};
use crate::ui::{
    follow_navigation, nav_plugin, page_plugin, vignette_plugin, ContentSource, FieldCounts,
};

const LOG_FILTER: &str = "info,wgpu=error,naga=warn";

/// Builder for constructing the portfolio app with customizable plugins.
pub struct PortfolioBuilder {
    config: Option<PortfolioConfig>,
    renderer: Option<Box<dyn EntityRenderer>>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_nav: bool,
    enable_page: bool,
    enable_vignette: bool,
    follow_navigation: bool,
}

impl Default for PortfolioBuilder {
    fn default() -> Self {
        Self {
            config: None,
            renderer: None,
            window_title: "Orrery".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.02, 0.02, 0.06),
            enable_nav: true,
            enable_page: true,
            enable_vignette: true,
            follow_navigation: true,
        }
    }
}

impl PortfolioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of reading the environment.
    pub fn config(mut self, config: PortfolioConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Provide a custom entity renderer implementation.
    pub fn renderer(mut self, renderer: impl EntityRenderer) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_nav(mut self) -> Self {
        self.enable_nav = false;
        self
    }

    pub fn disable_page(mut self) -> Self {
        self.enable_page = false;
        self
    }

    pub fn disable_vignette(mut self) -> Self {
        self.enable_vignette = false;
        self
    }

    /// Leave `ActiveSection` to the caller. `NavigateTo` events are still sent.
    pub fn external_routing(mut self) -> Self {
        self.follow_navigation = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let config = self.config.unwrap_or_else(config::portfolio_config);
        let renderer = self
            .renderer
            .unwrap_or_else(|| Box::new(SphereRenderer::default()));

        let mut app = App::new();
        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: self.window_title,
                        resolution: self.window_resolution.into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: LOG_FILTER.to_string(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(SceneComposer::new(config.seed))
        // Overlay fields get their own stream so they don't shift with scene layout.
        .insert_resource(FieldCache::new(config.seed.map(|s| s.wrapping_add(1))))
        .insert_resource(FieldCounts {
            particles: config.particle_count,
            stars: config.star_count,
        })
        .insert_resource(ContentSource(config.content_path.clone()))
        .insert_resource(SpaceCameraSettings {
            interactive: config.interactive_camera,
        });

        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        renderer.setup(&mut app);
        app.insert_resource(RendererResource(renderer));

        app.add_plugins((scene_plugin, animation_plugin, trail_plugin, orbit_camera_plugin));

        if self.enable_nav {
            app.add_plugins(nav_plugin);
            if self.follow_navigation {
                app.add_systems(Update, follow_navigation);
            }
        }
        if self.enable_page {
            app.add_plugins(page_plugin);
        }
        if self.enable_vignette {
            app.add_plugins(vignette_plugin);
        }

        info!(
            "orrery: seed={:?} particles={} stars={} interactive_camera={}",
            config.seed, config.particle_count, config.star_count, config.interactive_camera
        );
        app
    }
}
