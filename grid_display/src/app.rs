// app.rs - eframe glue: poll input, advance the session, blit the raster

use eframe::egui;
use egui::{Color32, FontId, Rect, TextureHandle, TextureOptions, Vec2};

use crate::config::Config;
use crate::input::FrameInput;
use crate::render::render_image;
use crate::session::Session;

pub struct GridApp {
    config: Config,
    session: Session,
    texture: Option<TextureHandle>,
}

impl GridApp {
    pub fn new(config: Config, seed: u64) -> Self {
        let session = Session::new(&config, seed);
        Self { config, session, texture: None }
    }

    fn draw_status(&self, painter: &egui::Painter, viewport: Rect) {
        let galley = painter.layout_no_wrap(
            self.session.status().to_string(),
            FontId::monospace(13.0),
            Color32::from_rgb(0xE0, 0xE0, 0xE0),
        );
        let pos = viewport.min + Vec2::new(6.0, 6.0);
        let backdrop = Rect::from_min_size(pos, galley.size()).expand(3.0);
        painter.rect_filled(backdrop, 2.0, Color32::from_black_alpha(180));
        painter.galley(pos, galley);
    }
}

impl eframe::App for GridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let size = Vec2::new(self.config.width as f32, self.config.height as f32);
                let (viewport, _response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

                let input = ctx.input(|i| FrameInput::collect(i, viewport.min));
                let dirty = self.session.advance(&input);

                // Each raster moves into the texture; no copy stays behind.
                match &mut self.texture {
                    Some(texture) if dirty => {
                        texture.set(render_image(self.session.grid(), &self.config), TextureOptions::NEAREST);
                    }
                    Some(_) => {}
                    None => {
                        self.texture = Some(ctx.load_texture(
                            "life-grid",
                            render_image(self.session.grid(), &self.config),
                            TextureOptions::NEAREST,
                        ));
                    }
                }

                let painter = ui.painter_at(viewport);
                if let Some(texture) = &self.texture {
                    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture.id(), viewport, uv, Color32::WHITE);
                }
                self.draw_status(&painter, viewport);
            });

        // Fixed frame pacing, whether or not anything changed.
        ctx.request_repaint_after(self.config.frame_delay);
    }
}
