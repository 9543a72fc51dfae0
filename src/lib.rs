use std::path::PathBuf;

use anyhow::Context;

pub mod camera;
pub mod context;
pub mod demos;
pub mod error;
pub mod input;
pub mod node;
pub mod pass;
pub mod primitives;
pub mod resources;
pub mod texture;
pub mod transform;
pub mod uniform;
pub mod value;
pub mod viewer;

pub use crate::{
    context::{GraphicsContext, HeadlessContext, Primitive},
    demos::Demo,
    error::{ResourceError, SceneError},
    input::ViewerEvent,
    node::{NodeId, NodeKind, Projection, SceneGraph, Transformation},
    pass::{Pass, RenderStats, ScenePass, ShaderBindings},
    uniform::{UniformInput, UniformValue},
    value::{Control, Controls, Value, Value3},
    viewer::{Viewer, ViewerConfig},
};

/// Settings for the bundled binary.
pub struct DemoConfig {
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    pub sphere_subdivisions: u32,
    // Shows this OBJ file instead of the humanoid
    pub obj_path: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 60,
            width: 800,
            height: 600,
            sphere_subdivisions: primitives::sphere::DEFAULT_SUBDIVISIONS,
            obj_path: None,
        }
    }
}

impl DemoConfig {
    /// Defaults, with the first command line argument taken as an OBJ path.
    pub fn from_args() -> Self {
        Self {
            obj_path: std::env::args_os().nth(1).map(PathBuf::from),
            ..Default::default()
        }
    }
}

// Events a short interactive session would produce: a drag, a shift-drag
// and a scroll, spread over the frames.
fn scripted_events(config: &DemoConfig) -> Vec<ViewerEvent> {
    let (w, h) = (config.width as f64, config.height as f64);
    let mut events = vec![ViewerEvent::Resized {
        width: config.width,
        height: config.height,
    }];
    for frame in 0..config.frames {
        let t = frame as f64 / config.frames.max(1) as f64;
        match frame {
            0 => events.push(ViewerEvent::MouseDown {
                x: w / 2.0,
                y: h / 2.0,
                shift: false,
            }),
            f if f == config.frames / 3 => events.push(ViewerEvent::MouseUp {
                x: w * (0.5 + t),
                y: h / 2.0,
            }),
            f if f == config.frames / 2 => events.push(ViewerEvent::MouseDown {
                x: w / 2.0,
                y: h / 2.0,
                shift: true,
            }),
            f if f < config.frames / 3 => events.push(ViewerEvent::MouseMoved {
                x: w * (0.5 + t),
                y: h / 2.0,
                button_down: true,
            }),
            f if f > config.frames / 2 => events.push(ViewerEvent::MouseMoved {
                x: w / 2.0,
                y: h * (1.0 - t),
                button_down: f + 1 < config.frames,
            }),
            _ => events.push(ViewerEvent::Wheel { delta_y: -50.0 }),
        }
        events.push(ViewerEvent::Draw);
    }
    events
}

pub fn run() -> anyhow::Result<()> {
    env_logger::init();
    let config = DemoConfig::from_args();

    let mut ctx = HeadlessContext::with_standard_program(config.width, config.height);
    let mut viewer_config = ViewerConfig::default();
    let demo = match &config.obj_path {
        Some(path) => {
            let mut model = resources::load_obj(path)
                .with_context(|| format!("Couldn't load model {}", path.display()))?;
            viewer_config = ViewerConfig::obj_viewer(model.center_and_scale());
            log::info!(
                "{} parts, {} bytes of vertex data",
                model.parts.len(),
                bytemuck::cast_slice::<_, u8>(&model.vertex_data()).len()
            );
            for name in ["ka", "kd", "ks"] {
                ctx.declare_uniform(name, UniformValue::FloatVec(vec![0.0; 3]));
            }
            for name in ["shininess", "alpha"] {
                ctx.declare_uniform(name, UniformValue::Float(0.0));
            }
            Demo::obj(&model)
        }
        None => Demo::humanoid(config.sphere_subdivisions)?,
    };
    log::info!(
        "scene has {} nodes, {} vertices, {} index bytes",
        demo.graph.len(),
        demo.mesh.vertices.len(),
        demo.mesh.index_bytes().len()
    );

    let Demo {
        graph,
        root,
        controls,
        ..
    } = demo;
    let mut ids: Vec<String> = controls.ids().map(String::from).collect();
    ids.sort();

    let mut viewer = Viewer::new(&ctx, graph, root, &viewer_config);
    let mut total = RenderStats::default();
    for event in scripted_events(&config) {
        match event {
            ViewerEvent::Draw => {
                // Swing every joint a little out of phase with the others
                let t = viewer.frames() as f32 * 0.1;
                for (i, id) in ids.iter().enumerate() {
                    controls.set(id, 30.0 * (t + i as f32).sin());
                }
                let stats = viewer.render(&mut ctx);
                ctx.take_draws();
                total.nodes += stats.nodes;
                total.draw_calls += stats.draw_calls;
            }
            _ => {
                viewer.handle(&mut ctx, &event);
            }
        }
    }

    let controller = viewer.controller();
    log::info!(
        "{} frames, {} draw calls; final rotation {:?}, position {:?}, scale {}",
        viewer.frames(),
        total.draw_calls,
        controller.thetas,
        controller.position,
        controller.scale
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_session_drags_and_draws() {
        let config = DemoConfig {
            frames: 12,
            width: 100,
            height: 100,
            sphere_subdivisions: 0,
            obj_path: None,
        };
        let events = scripted_events(&config);
        assert_eq!(events[0], ViewerEvent::Resized { width: 100, height: 100 });
        assert_eq!(events.iter().filter(|e| **e == ViewerEvent::Draw).count(), 12);

        let demo = Demo::robot_arm().unwrap();
        let mut ctx = HeadlessContext::with_standard_program(100, 100);
        let mut viewer = Viewer::new(&ctx, demo.graph, demo.root, &ViewerConfig::default());
        for event in &events {
            viewer.handle(&mut ctx, event);
        }
        assert_eq!(viewer.frames(), 12);
        assert_eq!(ctx.draws().len(), 12 * 5);
        assert!(viewer.controller().thetas.y < 0.0);
        assert!(viewer.controller().scale > 0.5);
        assert!(viewer.controller().drag_mode().is_none());
    }
}
