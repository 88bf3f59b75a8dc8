use glam::{Vec2, Vec3};

use crate::error::NavResult;
use crate::navigation::{Navigation, Navigator};
use crate::traits::SceneLookup;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(74, 158, 255);
const MARKER_SIZE: f32 = 22.0;

/// Overlay with the previous/next bar and clickable hotspot markers
#[derive(Debug, Clone, Default)]
pub struct NavigationUi {
    hotspots: Vec<String>,
    status: Option<String>,
}

impl NavigationUi {
    pub fn new(hotspots: Vec<String>) -> Self {
        Self {
            hotspots,
            status: None,
        }
    }

    /// Last refusal or lookup failure, shown under the bar
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Record the result of a navigation request for display
    pub fn record(&mut self, result: NavResult<Navigation>) {
        self.status = match result {
            Ok(Navigation::Queued { id }) => Some(format!("Going to {id} after this gesture")),
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    pub fn show(&mut self, ctx: &egui::Context, navigator: &mut Navigator, scene: Option<&dyn SceneLookup>) {
        self.show_markers(ctx, navigator, scene);
        self.show_bar(ctx, navigator);
    }

    fn show_bar(&mut self, ctx: &egui::Context, navigator: &mut Navigator) {
        let title = navigator.display_id().unwrap_or("Free view").to_string();

        egui::Window::new("Navigation")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("◀ Previous").clicked() {
                        let result = navigator.previous();
                        self.record(result);
                    }
                    ui.label(egui::RichText::new(title).size(16.0).color(ACCENT));
                    if ui.button("Next ▶").clicked() {
                        let result = navigator.next();
                        self.record(result);
                    }
                });
                if let Some(status) = &self.status {
                    ui.label(egui::RichText::new(status).size(11.0).color(egui::Color32::GRAY));
                }
            });
    }

    fn show_markers(&mut self, ctx: &egui::Context, navigator: &mut Navigator, scene: Option<&dyn SceneLookup>) {
        let screen = ctx.content_rect();
        let viewport = Vec2::new(screen.width(), screen.height());
        let camera = navigator.view_camera();

        let mut clicked = None;
        for name in &self.hotspots {
            let Some(object) = navigator.resolve_object(scene, name) else {
                continue;
            };
            let Some(position) = camera.project(object.world_position, viewport) else {
                continue;
            };

            let size = MARKER_SIZE * marker_scale(object.marker.scale);
            egui::Area::new(egui::Id::new(("hotspot", name.as_str())))
                .fixed_pos(egui::pos2(position.x, position.y))
                .pivot(egui::Align2::CENTER_CENTER)
                .show(ctx, |ui| {
                    let button = egui::Button::new(egui::RichText::new("●").color(ACCENT))
                        .min_size(egui::vec2(size, size));
                    if ui.add(button).on_hover_text(name.as_str()).clicked() {
                        clicked = Some(name.clone());
                    }
                });
        }

        if let Some(name) = clicked {
            let result = navigator.goto_object(scene, &name);
            self.record(result);
        }
    }
}

/// Marker size multiplier from the object's local scale
fn marker_scale(scale: Vec3) -> f32 {
    let largest = scale.abs().max_element();
    if largest.is_finite() && largest > 0.0 {
        largest.clamp(0.5, 2.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;

    #[test]
    fn status_tracks_last_result() {
        let mut ui = NavigationUi::new(vec!["Plant004".into()]);
        ui.record(Err(NavError::NotFound("Plant004".into())));
        assert!(ui.status().unwrap().contains("Plant004"));

        ui.record(Ok(Navigation::Started { id: "hotspot".into() }));
        assert_eq!(ui.status(), None);

        ui.record(Err(NavError::Busy));
        assert!(ui.status().is_some());
    }

    #[test]
    fn marker_scale_is_bounded() {
        assert_eq!(marker_scale(Vec3::ONE), 1.0);
        assert_eq!(marker_scale(Vec3::splat(10.0)), 2.0);
        assert_eq!(marker_scale(Vec3::ZERO), 1.0);
        assert_eq!(marker_scale(Vec3::new(0.1, 0.8, 0.2)), 0.8);
    }
}
