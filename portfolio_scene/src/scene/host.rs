//! Render-host parameters: pixel ratio and the toolkit scene's viewport.

use bevy::prelude::*;
use bevy::render::camera::{SubCameraView, Viewport};
use bevy::window::PrimaryWindow;

use crate::camera::SceneCamera;
use crate::error::SetupError;
use crate::scene::ScenePreset;

/// Parameters read from the host once at startup.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct RenderHost {
    pub pixel_ratio: f32,
}

impl Default for RenderHost {
    fn default() -> Self {
        Self { pixel_ratio: 1.0 }
    }
}

/// Where the toolkit panel sits this frame, in logical pixels, written by the
/// overlay UI. `panel` is the whole panel even when it is partly scrolled off;
/// `visible` is the part that is on screen. Both are `None` while the panel
/// is not laid out or fully hidden.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ToolkitViewport {
    pub panel: Option<Rect>,
    pub visible: Option<Rect>,
}

pub fn read_pixel_ratio(window: Option<&Window>) -> Result<f32, SetupError> {
    let window = window.ok_or(SetupError::NoPrimaryWindow)?;
    let ratio = window.scale_factor();
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(SetupError::InvalidPixelRatio(ratio))
    }
}

/// Reads the device pixel ratio. A failure is cosmetic: log it and render at 1.0.
pub fn configure_render_host(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let host = match read_pixel_ratio(windows.get_single().ok()) {
        Ok(pixel_ratio) => RenderHost { pixel_ratio },
        Err(err) => {
            warn!("portfolio: render host setup failed: {err}; using defaults");
            RenderHost::default()
        }
    };
    info!("portfolio: pixel ratio {}", host.pixel_ratio);
    commands.insert_resource(host);
}

/// Converts a logical rect to a physical viewport clipped to `bounds`.
/// Returns `None` when nothing of the rect is visible.
pub fn physical_viewport(rect: Rect, pixel_ratio: f32, bounds: Option<UVec2>) -> Option<(UVec2, UVec2)> {
    let mut min = (rect.min * pixel_ratio).max(Vec2::ZERO);
    let mut max = (rect.max * pixel_ratio).max(Vec2::ZERO);
    if let Some(bounds) = bounds {
        min = min.min(bounds.as_vec2());
        max = max.min(bounds.as_vec2());
    }
    let position = min.round().as_uvec2();
    let size = (max - min).round().as_uvec2();
    if size.x == 0 || size.y == 0 {
        return None;
    }
    Some((position, size))
}

/// Viewport over the visible part of the panel, plus the sub-view that crops
/// the whole panel's frustum down to it. The projection is always built for
/// the whole panel, so scrolling the panel half off screen cuts the scene
/// instead of squashing it.
pub fn toolkit_camera_view(
    panel: Rect,
    visible: Rect,
    pixel_ratio: f32,
    bounds: Option<UVec2>,
) -> Option<(Viewport, SubCameraView)> {
    let (physical_position, physical_size) = physical_viewport(visible, pixel_ratio, bounds)?;
    let full_size = (panel.size() * pixel_ratio).round().as_uvec2();
    if full_size.x == 0 || full_size.y == 0 {
        return None;
    }
    let offset = (physical_position.as_vec2() - panel.min * pixel_ratio).max(Vec2::ZERO);
    Some((
        Viewport {
            physical_position,
            physical_size,
            ..default()
        },
        SubCameraView {
            full_size,
            offset,
            size: physical_size,
        },
    ))
}

/// Keeps the toolkit camera's viewport on the panel the UI reserved for it.
pub fn fit_toolkit_viewport(
    placement: Res<ToolkitViewport>,
    host: Option<Res<RenderHost>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&SceneCamera, &mut Camera)>,
) {
    let pixel_ratio = host.map_or(1.0, |h| h.pixel_ratio);
    let bounds = windows.get_single().ok().map(|w| w.physical_size());
    let view = placement
        .panel
        .zip(placement.visible)
        .and_then(|(panel, visible)| toolkit_camera_view(panel, visible, pixel_ratio, bounds));

    for (scene_camera, mut camera) in &mut cameras {
        if scene_camera.0 != ScenePreset::Toolkit {
            continue;
        }
        match view {
            Some((ref viewport, sub_view)) => {
                let unchanged = camera.viewport.as_ref().is_some_and(|v| {
                    v.physical_position == viewport.physical_position
                        && v.physical_size == viewport.physical_size
                }) && camera.sub_camera_view == Some(sub_view);
                if !unchanged {
                    camera.viewport = Some(viewport.clone());
                    camera.sub_camera_view = Some(sub_view);
                }
                if !camera.is_active {
                    camera.is_active = true;
                }
            }
            None => {
                if camera.is_active {
                    camera.is_active = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::camera::CameraProjection;

    #[test]
    fn missing_window_is_a_setup_error() {
        assert_eq!(read_pixel_ratio(None), Err(SetupError::NoPrimaryWindow));
    }

    #[test]
    fn configure_without_window_falls_back_to_default() {
        let mut app = App::new();
        app.add_systems(Startup, configure_render_host);
        app.update();
        assert_eq!(
            app.world().resource::<RenderHost>(),
            &RenderHost { pixel_ratio: 1.0 }
        );
    }

    #[test]
    fn viewport_scales_and_clips() {
        let rect = Rect::new(100.0, 50.0, 500.0, 350.0);
        let (pos, size) = physical_viewport(rect, 2.0, Some(UVec2::new(900, 1000))).unwrap();
        assert_eq!(pos, UVec2::new(200, 100));
        assert_eq!(size, UVec2::new(700, 600));
        assert!(physical_viewport(Rect::new(0.0, 0.0, 0.0, 10.0), 1.0, None).is_none());
    }

    #[test]
    fn half_scrolled_panel_crops_instead_of_squashing() {
        let panel = Rect::new(0.0, -192.0, 800.0, 192.0);
        let visible = Rect::new(0.0, 0.0, 800.0, 192.0);
        let (viewport, sub) = toolkit_camera_view(panel, visible, 1.0, None).unwrap();
        assert_eq!(viewport.physical_position, UVec2::ZERO);
        assert_eq!(viewport.physical_size, UVec2::new(800, 192));
        assert_eq!(sub.full_size, UVec2::new(800, 384));
        assert_eq!(sub.offset, Vec2::new(0.0, 192.0));
        assert_eq!(sub.size, UVec2::new(800, 192));

        // Pixels per view-space unit match the fully visible panel on both axes.
        let projection = PerspectiveProjection::default();
        let cropped = projection.get_clip_from_view_for_sub(&sub);
        let whole = PerspectiveProjection {
            aspect_ratio: 800.0 / 384.0,
            ..default()
        }
        .get_clip_from_view();
        let cropped_px = Vec2::new(cropped.x_axis.x * 800.0, cropped.y_axis.y * 192.0);
        let whole_px = Vec2::new(whole.x_axis.x * 800.0, whole.y_axis.y * 384.0);
        assert!((cropped_px - whole_px).abs().max_element() < 1e-2);
        assert!((cropped_px.x - cropped_px.y).abs() < 1e-2);
    }

    #[test]
    fn hidden_panel_deactivates_the_camera() {
        let mut app = App::new();
        app.init_resource::<ToolkitViewport>()
            .add_systems(Update, fit_toolkit_viewport);
        let camera = app
            .world_mut()
            .spawn((
                SceneCamera(ScenePreset::Toolkit),
                Camera {
                    is_active: false,
                    ..default()
                },
            ))
            .id();

        app.world_mut().insert_resource(ToolkitViewport {
            panel: Some(Rect::new(10.0, 300.0, 410.0, 684.0)),
            visible: Some(Rect::new(10.0, 300.0, 410.0, 600.0)),
        });
        app.update();
        let cam = app.world().get::<Camera>(camera).unwrap();
        assert!(cam.is_active);
        let sub = cam.sub_camera_view.unwrap();
        assert_eq!(sub.full_size, UVec2::new(400, 384));
        assert_eq!(sub.offset, Vec2::ZERO);
        assert_eq!(sub.size, UVec2::new(400, 300));

        app.world_mut().insert_resource(ToolkitViewport::default());
        app.update();
        assert!(!app.world().get::<Camera>(camera).unwrap().is_active);
    }
}
