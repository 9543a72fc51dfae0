/// Events a viewer reacts to. Positions are in pixels from the top-left of
/// the canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    Resized {
        width: u32,
        height: u32,
    },
    MouseDown {
        x: f64,
        y: f64,
        shift: bool,
    },
    MouseMoved {
        x: f64,
        y: f64,
        // false if the button went up outside the canvas
        button_down: bool,
    },
    MouseUp {
        x: f64,
        y: f64,
    },
    Wheel {
        delta_y: f32,
    },
    Draw,
}
