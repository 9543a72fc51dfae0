//! Ready-made scenes: the robot arm, the humanoid, and a loaded OBJ model.

use cgmath::vec3;

use crate::{
    error::SceneResult,
    node::{NodeId, NodeKind, Projection, SceneGraph},
    primitives::Mesh,
    resources::ObjModel,
    value::Controls,
};

const BASE_HEIGHT: f32 = 0.1;
const ARM1_LENGTH: f32 = 0.4;
const ARM2_LENGTH: f32 = 0.2;

const SHIRT: [f32; 3] = [0.0, 0.5, 0.0];
const JEANS: [f32; 3] = [0.06, 0.3, 0.55];
const SKIN: [f32; 3] = [1.0, 0.8, 0.6];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

/// A scene together with the geometry its draw nodes index into and the
/// controls its joints follow.
pub struct Demo {
    pub graph: SceneGraph,
    pub root: NodeId,
    pub mesh: Mesh,
    pub controls: Controls,
}

impl Demo {
    /// A turntable base with two two-segment arms, one red and one green.
    /// The green arm draws copies of the red arm's segments.
    ///
    /// Controls: `base-angle`, `lower-angle`, `upper-angle`, `lower2-angle`,
    /// `upper2-angle`.
    pub fn robot_arm() -> SceneResult<Self> {
        let mut graph = SceneGraph::new();
        let mut mesh = Mesh::new();
        let mut controls = Controls::new();

        let base = graph.cube(vec3(-0.1, 0.0, -0.1), vec3(0.1, BASE_HEIGHT, 0.1), &mut mesh);
        let lower = graph.cube(vec3(-0.01, 0.0, -0.01), vec3(0.01, ARM1_LENGTH, 0.01), &mut mesh);
        let upper = graph.cube(vec3(-0.01, 0.0, -0.01), vec3(0.01, ARM2_LENGTH, 0.01), &mut mesh);

        let root = graph.insert(NodeKind::Scene(Projection::perspective()));
        let turntable = graph.spawn_chain(
            root,
            [
                NodeKind::translation([0.0, -0.25, -2.0]),
                NodeKind::set_uniform("color", [0.6, 0.6, 0.6]),
                NodeKind::rotate_y(controls.value("base-angle")),
            ],
        );
        graph.add_child(turntable, base)?;

        let arms = [
            ([1.0, 0.1, 0.1], "lower-angle", "upper-angle", lower, upper),
            ([0.0, 0.5, 0.0], "lower2-angle", "upper2-angle", graph.copy(lower), graph.copy(upper)),
        ];
        for (color, lower_angle, upper_angle, lower, upper) in arms {
            let shoulder = graph.spawn_chain(
                base,
                [
                    NodeKind::set_uniform("color", color),
                    NodeKind::translation([0.0, BASE_HEIGHT, 0.0]),
                    NodeKind::rotate_z(controls.value(lower_angle)),
                ],
            );
            graph.add_child(shoulder, lower)?;
            let elbow = graph.spawn_chain(
                lower,
                [
                    NodeKind::translation([0.0, ARM1_LENGTH, 0.0]),
                    NodeKind::rotate_z(controls.value(upper_angle)),
                ],
            );
            graph.add_child(elbow, upper)?;
        }

        log::debug!("robot arm: {} nodes, {} indices", graph.len(), mesh.indices.len());
        Ok(Self {
            graph,
            root,
            mesh,
            controls,
        })
    }

    /// A jointed person. The left limbs and second eye draw copies of the
    /// right ones; spheres use `subdivisions`.
    ///
    /// Controls: `body-angle`, `yes-angle`, `no-angle`, and per side (`r`,
    /// `l`) the `-shoulder`, `-hand`, `-leg` and `-ankle` x/y/z angles plus
    /// `-elbow-angle` and `-knee-angle`.
    pub fn humanoid(subdivisions: u32) -> SceneResult<Self> {
        let mut graph = SceneGraph::new();
        let mut mesh = Mesh::new();
        let mut controls = Controls::new();
        let origin = vec3(0.0, 0.0, 0.0);

        let torso = graph.cube(vec3(-0.1, 0.0, -0.1), vec3(0.1, 0.35, 0.1), &mut mesh);
        let arm = [
            graph.sphere(origin, 0.028, subdivisions, &mut mesh),
            graph.cube(vec3(-0.025, 0.0, -0.025), vec3(0.025, 0.2, 0.025), &mut mesh),
            graph.sphere(origin, 0.018, subdivisions, &mut mesh),
            graph.cube(vec3(-0.02, 0.0, -0.02), vec3(0.02, 0.18, 0.02), &mut mesh),
            graph.sphere(origin, 0.028, subdivisions, &mut mesh),
            graph.cube(vec3(-0.03, 0.0, -0.03), vec3(0.03, 0.07, 0.03), &mut mesh),
        ];
        let neck = graph.cube(vec3(-0.025, 0.0, -0.025), vec3(0.025, 0.02, 0.025), &mut mesh);
        let head = graph.sphere(origin, 0.08, subdivisions, &mut mesh);
        let eye = graph.sphere(origin, 0.01, subdivisions, &mut mesh);
        let pants = graph.cube(vec3(-0.1, -0.05, -0.1), vec3(0.1, 0.0, 0.1), &mut mesh);
        let leg = [
            graph.sphere(origin, 0.055, subdivisions, &mut mesh),
            graph.cube(vec3(-0.05, -0.2, -0.05), vec3(0.05, 0.0, 0.05), &mut mesh),
            graph.sphere(origin, 0.05, subdivisions, &mut mesh),
            graph.cube(vec3(-0.04, -0.2, -0.04), vec3(0.04, 0.0, 0.04), &mut mesh),
            graph.sphere(origin, 0.04, subdivisions, &mut mesh),
            graph.cube(vec3(-0.035, -0.04, -0.035), vec3(0.035, 0.0, 0.08), &mut mesh),
        ];

        let root = graph.insert(NodeKind::Scene(Projection::perspective()));
        let body = graph.spawn_chain(
            root,
            [
                NodeKind::translation([0.0, -0.1, -2.0]),
                NodeKind::set_uniform("color", SHIRT),
                NodeKind::rotate_y(controls.value("body-angle")),
            ],
        );
        graph.add_child(body, torso)?;

        let left_arm = arm.map(|part| graph.copy(part));
        attach_arm(&mut graph, &mut controls, torso, "r", -0.1, arm)?;
        attach_arm(&mut graph, &mut controls, torso, "l", 0.1, left_arm)?;

        let nod = graph.spawn_chain(
            torso,
            [
                NodeKind::set_uniform("color", SKIN),
                NodeKind::translation([0.0, 0.35, 0.0]),
                NodeKind::rotate_x(controls.value("yes-angle")),
            ],
        );
        graph.add_child(nod, neck)?;
        let shake = graph.spawn_chain(
            neck,
            [
                NodeKind::translation([0.0, 0.09, 0.0]),
                NodeKind::rotate_y(controls.value("no-angle")),
            ],
        );
        graph.add_child(shake, head)?;
        let left_eye = graph.copy(eye);
        for (x, eye) in [(-0.025, eye), (0.025, left_eye)] {
            let socket = graph.spawn_chain(
                head,
                [
                    NodeKind::set_uniform("color", BLACK),
                    NodeKind::translation([x, 0.02, 0.068]),
                ],
            );
            graph.add_child(socket, eye)?;
        }

        let waist = graph.spawn(torso, NodeKind::set_uniform("color", JEANS));
        graph.add_child(waist, pants)?;
        let left_leg = leg.map(|part| graph.copy(part));
        attach_leg(&mut graph, &mut controls, pants, "r", -0.055, leg)?;
        attach_leg(&mut graph, &mut controls, pants, "l", 0.055, left_leg)?;

        log::debug!("humanoid: {} nodes, {} indices", graph.len(), mesh.indices.len());
        Ok(Self {
            graph,
            root,
            mesh,
            controls,
        })
    }

    /// Every part of `model` under a plain group, each with its material.
    /// The viewer supplies projection and model-view.
    pub fn obj(model: &ObjModel) -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.insert(NodeKind::Group);
        model.build_scene(&mut graph, root);
        Self {
            graph,
            root,
            mesh: Mesh {
                vertices: model.vertices.clone(),
                indices: model.indices.clone(),
            },
            controls: Controls::new(),
        }
    }
}

/// Shoulder, arm, elbow, forearm, wrist, hand.
fn attach_arm(
    graph: &mut SceneGraph,
    controls: &mut Controls,
    torso: NodeId,
    side: &str,
    x: f32,
    [shoulder, arm, elbow, forearm, wrist, hand]: [NodeId; 6],
) -> SceneResult<()> {
    let top = graph.spawn_chain(
        torso,
        [
            NodeKind::translation([x, 0.32, 0.0]),
            NodeKind::euler(controls.angles(&format!("{side}-shoulder"))),
        ],
    );
    let arm = graph.add_chain(top, &[shoulder, arm])?;
    let bend = graph.spawn_chain(
        arm,
        [
            NodeKind::set_uniform("color", SKIN),
            NodeKind::translation([0.0, 0.2, 0.0]),
            NodeKind::rotate_z(controls.value(&format!("{side}-elbow-angle"))),
        ],
    );
    let forearm = graph.add_chain(bend, &[elbow, forearm])?;
    let turn = graph.spawn_chain(
        forearm,
        [
            NodeKind::translation([0.0, 0.18, 0.0]),
            NodeKind::euler(controls.angles(&format!("{side}-hand"))),
        ],
    );
    graph.add_chain(turn, &[wrist, hand])?;
    Ok(())
}

/// Hip, thigh, knee, calf, ankle, foot.
fn attach_leg(
    graph: &mut SceneGraph,
    controls: &mut Controls,
    pants: NodeId,
    side: &str,
    x: f32,
    [hip, thigh, knee, calf, ankle, foot]: [NodeId; 6],
) -> SceneResult<()> {
    let top = graph.spawn_chain(
        pants,
        [
            NodeKind::translation([x, -0.05, 0.0]),
            NodeKind::euler(controls.angles(&format!("{side}-leg"))),
        ],
    );
    let thigh = graph.add_chain(top, &[hip, thigh])?;
    let bend = graph.spawn_chain(
        thigh,
        [
            NodeKind::translation([0.0, -0.2, 0.0]),
            NodeKind::rotate_x(controls.value(&format!("{side}-knee-angle"))),
        ],
    );
    let calf = graph.add_chain(bend, &[knee, calf])?;
    let turn = graph.spawn_chain(
        calf,
        [
            NodeKind::set_uniform("color", BLACK),
            NodeKind::translation([0.0, -0.2, 0.0]),
            NodeKind::euler(controls.angles(&format!("{side}-ankle"))),
        ],
    );
    graph.add_chain(turn, &[ankle, foot])?;
    Ok(())
}
