use crate::{
    camera::{Camera, CameraController},
    context::GraphicsContext,
    input::ViewerEvent,
    node::{NodeId, SceneGraph},
    pass::{
        scene::{MODEL_VIEW, PROJECTION},
        RenderStats, ScenePass,
    },
    uniform::UniformValue,
};

pub struct ViewerConfig {
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    // How far the camera sits from the origin
    pub distance: f32,
    pub initial_scale: f32,
    // Degrees turned per unit of normalized mouse travel
    pub rotate_speed: f32,
    pub wheel_divisor: f32,
    // Divide shift-drag travel by the current scale so the object tracks
    // the cursor at any zoom
    pub move_scales_with_zoom: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.01,
            zfar: 10.0,
            distance: 3.0,
            initial_scale: 0.5,
            rotate_speed: 180.0,
            wheel_divisor: 1000.0,
            move_scales_with_zoom: false,
        }
    }
}

impl ViewerConfig {
    /// Settings for a loaded model shown at `scale`: dragging turns it the
    /// other way round and shift-drag follows the cursor.
    pub fn obj_viewer(scale: f32) -> Self {
        Self {
            initial_scale: scale,
            rotate_speed: -180.0,
            move_scales_with_zoom: true,
            ..Default::default()
        }
    }
}

/// One running example: the scene, the pass that draws it, and the mouse
/// state that orients it. Events and frames are fed in from outside.
pub struct Viewer {
    graph: SceneGraph,
    root: NodeId,
    pass: ScenePass,
    // Canvas size
    size: (u32, u32),
    camera: Camera,
    camera_controller: CameraController,
    frames: u64,
}

impl Viewer {
    pub fn new<C: GraphicsContext + ?Sized>(
        ctx: &C,
        graph: SceneGraph,
        root: NodeId,
        config: &ViewerConfig,
    ) -> Self {
        let size = ctx.viewport();
        let camera = Camera {
            aspect: size.0 as f32 / size.1.max(1) as f32,
            fovy: config.fovy,
            znear: config.znear,
            zfar: config.zfar,
            distance: config.distance,
        };
        let camera_controller =
            CameraController::new(config.initial_scale, config.rotate_speed, config.wheel_divisor)
                .with_move_scaling(config.move_scales_with_zoom);
        let pass = ScenePass::for_graph(ctx, &graph);
        log::debug!("viewer created with {} nodes at {}x{}", graph.len(), size.0, size.1);

        Self {
            graph,
            root,
            pass,
            size,
            camera,
            camera_controller,
            frames: 0,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn controller(&self) -> &CameraController {
        &self.camera_controller
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    // Keeps state in sync with the canvas size when changed
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.size = (width, height);
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Feeds one event in. Returns true if it changed the view; a `Draw`
    /// renders a frame.
    pub fn handle<C: GraphicsContext + ?Sized>(&mut self, ctx: &mut C, event: &ViewerEvent) -> bool {
        match *event {
            ViewerEvent::Resized { width, height } => {
                if width == 0 || height == 0 {
                    return false;
                }
                ctx.resize(width, height);
                self.resize(width, height);
                true
            }
            ViewerEvent::Draw => {
                self.render(ctx);
                true
            }
            _ => self.input(event),
        }
    }

    // Handle input using ViewerEvent
    pub fn input(&mut self, event: &ViewerEvent) -> bool {
        let (width, height) = self.size;
        match *event {
            ViewerEvent::MouseDown { x, y, shift } => {
                let coord = CameraController::mouse_coords(x, y, width, height);
                self.camera_controller.process_mouse_down(coord, shift);
                true
            }
            ViewerEvent::MouseMoved { x, y, button_down } => {
                let coord = CameraController::mouse_coords(x, y, width, height);
                self.camera_controller.process_mouse_moved(coord, button_down)
            }
            ViewerEvent::MouseUp { x, y } => {
                let coord = CameraController::mouse_coords(x, y, width, height);
                self.camera_controller.process_mouse_up(coord)
            }
            ViewerEvent::Wheel { delta_y } => {
                self.camera_controller.process_wheel(delta_y);
                true
            }
            ViewerEvent::Resized { .. } | ViewerEvent::Draw => false,
        }
    }

    /// Writes the viewer's projection and model-view, then draws the scene
    /// beneath them.
    pub fn render<C: GraphicsContext + ?Sized>(&mut self, ctx: &mut C) -> RenderStats {
        let model_view = self.camera_controller.build_model_view_matrix();
        let projection = self.camera.build_projection_matrix();
        if let Some(loc) = self.pass.bindings().location(PROJECTION) {
            ctx.set_uniform(loc, &UniformValue::mat4(&projection));
        }
        if let Some(loc) = self.pass.bindings().location(MODEL_VIEW) {
            ctx.set_uniform(loc, &UniformValue::mat4(&model_view));
        }

        let stats = self.pass.render_from(ctx, &self.graph, self.root, model_view);
        self.frames += 1;
        log::debug!(
            "frame {}: {} nodes, {} draw calls",
            self.frames,
            stats.nodes,
            stats.draw_calls
        );
        stats
    }
}
