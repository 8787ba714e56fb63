//! The lit showroom with an egui overlay. Drag with the left mouse button
//! outside the windows to look around.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;
use gl_tutorials::{
    abs::{App, ShaderProgram},
    camera::{FlyController, FpsCamera},
    config::Settings,
    demo::{self, Demo, Frame},
    fps::FrameStats,
    gui::GuiLayer,
    logging,
    other::UpdateContext,
    render::{
        self,
        lighting::{Material, OrbitingLight, PointLight},
        scene::{self, Bulb, SHOWROOM, SceneObject},
    },
};
use sdl2::{event::Event, mouse::MouseButton};

/// State edited through the overlay.
struct Panel {
    show_inspection: bool,
    show_another_window: bool,
    value: f32,
    clear_color: [f32; 3],
    counter: u32,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            show_inspection: true,
            show_another_window: false,
            value: 0.0,
            clear_color: [0.45, 0.55, 0.60],
            counter: 0,
        }
    }
}

impl Panel {
    fn show(&mut self, ctx: &egui::Context, stats: Option<FrameStats>) {
        egui::Window::new("Hello, world!").show(ctx, |ui| {
            ui.label("This is some useful text.");
            ui.checkbox(&mut self.show_inspection, "Inspection Window");
            ui.checkbox(&mut self.show_another_window, "Another Window");

            ui.add(egui::Slider::new(&mut self.value, 0.0..=1.0).text("float"));
            ui.horizontal(|ui| {
                ui.color_edit_button_rgb(&mut self.clear_color);
                ui.label("clear color");
            });

            ui.horizontal(|ui| {
                if ui.button("Button").clicked() {
                    self.counter += 1;
                }
                ui.label(format!("counter = {}", self.counter));
            });

            if let Some(stats) = stats {
                ui.label(average_line(stats));
            }
        });

        let mut close_requested = false;
        egui::Window::new("Another Window")
            .open(&mut self.show_another_window)
            .show(ctx, |ui| {
                ui.label("Hello from another window!");
                if ui.button("Close Me").clicked() {
                    close_requested = true;
                }
            });
        if close_requested {
            self.show_another_window = false;
        }

        egui::Window::new("Inspection")
            .open(&mut self.show_inspection)
            .vscroll(true)
            .show(ctx, |ui| ctx.inspection_ui(ui));
    }

    fn clear_color(&self) -> Vec3 {
        Vec3::from_array(self.clear_color)
    }
}

fn average_line(stats: FrameStats) -> String {
    format!(
        "Application average {:.3} ms/frame ({:.1} FPS)",
        stats.ms_per_frame, stats.fps
    )
}

struct HelloImgui {
    program: ShaderProgram,
    bulb_shader: ShaderProgram,
    objects: Vec<SceneObject>,
    bulb: Bulb,
    light: OrbitingLight,
    material: Material,
    camera: FpsCamera,
    controller: FlyController,
    looking: bool,
    gui: GuiLayer,
    panel: Panel,
    title: String,
}

impl HelloImgui {
    fn new(app: &App, settings: &Settings) -> anyhow::Result<Self> {
        let gl = &app.gl;
        let assets = settings.assets();
        let program = ShaderProgram::from_assets(
            gl,
            &assets,
            "lighting_phong_materials.vert",
            "lighting_phong_materials.frag",
        )?;
        let bulb_shader = ShaderProgram::from_assets(gl, &assets, "bulb.vert", "bulb.frag")?;
        let objects = scene::load_scene(gl, &assets, &SHOWROOM)?;
        let bulb = Bulb::load(gl, &assets);
        let gui = GuiLayer::new(gl)?;

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            program,
            bulb_shader,
            objects,
            bulb,
            light: OrbitingLight::new(Vec3::new(0.0, 1.0, 10.0)),
            material: Material::default(),
            camera: FpsCamera::new(Vec3::new(0.0, 5.0, 20.0), -180.0, -10.0),
            controller: settings.fly_controller(),
            looking: false,
            gui,
            panel: Panel::default(),
            title: settings.title.clone(),
        })
    }
}

impl Demo for HelloImgui {
    fn handle_event(&mut self, event: &Event) {
        self.gui.handle_event(event);
    }

    fn update(&mut self, app: &App, ctx: &UpdateContext, frame: &Frame) {
        let dragging = ctx.mouse.down.contains(&MouseButton::Left);
        let looking = dragging && (self.looking || !self.gui.wants_pointer_input());
        if looking != self.looking {
            app.set_mouse_captured(looking);
            self.looking = looking;
        }
        if self.looking {
            self.controller.update(&mut self.camera, ctx);
        }

        self.light.advance(frame.delta);
    }

    fn render(&mut self, gl: &Arc<glow::Context>, frame: &Frame) {
        render::clear(gl, self.panel.clear_color());

        let view = self.camera.view_matrix();
        let projection = self.camera.projection(frame.aspect());
        let light_pos = self.light.position();

        self.program.use_program();
        self.program.set_uniform("view", view);
        self.program.set_uniform("projection", projection);
        self.program.set_uniform("viewPos", self.camera.position());
        PointLight::white(light_pos).apply(&self.program);
        self.material.apply(&self.program);
        for object in &self.objects {
            object.draw(&self.program);
        }

        self.bulb
            .draw(&self.bulb_shader, light_pos, view, projection);

        let Self { gui, panel, .. } = self;
        gui.run(
            (frame.width, frame.height),
            frame.pixels_per_point,
            |ctx| panel.show(ctx, frame.stats),
        );
    }

    fn fps_label(&self) -> Option<&str> {
        Some(self.title.as_str())
    }

    fn captures_keyboard(&self) -> bool {
        self.gui.wants_keyboard_input()
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::new("Hello egui", 800, 600).load()?;
    logging::init(&settings.log_level)?;

    let app = App::new(&settings)?;
    let demo = HelloImgui::new(&app, &settings)?;
    demo::run(app, demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_shows_the_loop_average() {
        let stats = FrameStats {
            fps: 60.0,
            ms_per_frame: 1000.0 / 60.0,
        };
        assert_eq!(
            average_line(stats),
            "Application average 16.667 ms/frame (60.0 FPS)"
        );

        let ctx = egui::Context::default();
        let mut panel = Panel::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx, Some(stats)));
        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx, None));
        assert_eq!(panel.counter, 0);
    }
}
