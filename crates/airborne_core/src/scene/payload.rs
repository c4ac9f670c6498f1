//! Renderable payload attached to scene nodes
//!
//! The runtime core never touches geometry; it carries opaque handles and
//! material parameters that the asset and rendering collaborators agree on.

use crate::foundation::math::Vec4;

/// Opaque handle to geometry owned by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Material parameters the renderer reads off a node
///
/// Values mirror the shading model of the game's renderer; the core only
/// stores them.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParams {
    /// Base color factor (RGBA)
    pub base_color: Vec4,
    /// Diffuse reflection weight
    pub diffuse: f32,
    /// Specular reflection weight
    pub specular: f32,
    /// Specular exponent
    pub shininess: f32,
    /// Environment-effect blend weight
    pub effect: f32,
    /// Environment reflectance
    pub reflectance: f32,
    /// Transmittance for translucent surfaces
    pub transmittance: f32,
    /// Index of refraction
    pub ior: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            base_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            diffuse: 1.0,
            specular: 1.0,
            shininess: 1.0,
            effect: 1.0,
            reflectance: 1.0,
            transmittance: 1.0,
            ior: 1.0,
        }
    }
}

/// A single drawable: one mesh with its material
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    /// Geometry handle resolved by the rendering collaborator
    pub mesh: MeshHandle,
    /// Material parameters for this instance
    pub material: MaterialParams,
}

impl ModelInstance {
    /// Create an instance with default material parameters
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            mesh,
            material: MaterialParams::default(),
        }
    }

    /// Builder pattern: set material parameters
    pub fn with_material(mut self, material: MaterialParams) -> Self {
        self.material = material;
        self
    }
}

/// What a node contributes to rendering
///
/// An explicit tagged variant instead of type inspection during traversal:
/// grouping nodes carry [`NodePayload::Empty`], flat models carry one
/// instance, and imported multi-primitive objects carry a group.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodePayload {
    /// Pure grouping/transform node, nothing to draw
    #[default]
    Empty,
    /// A single mesh and material
    Model(ModelInstance),
    /// A group of primitives sharing this node's transform
    MeshGroup(Vec<ModelInstance>),
}

impl NodePayload {
    /// Whether this payload has anything to draw
    pub fn is_drawable(&self) -> bool {
        !matches!(self, NodePayload::Empty)
    }

    /// The drawable instances of this payload
    pub fn instances(&self) -> &[ModelInstance] {
        match self {
            NodePayload::Empty => &[],
            NodePayload::Model(instance) => std::slice::from_ref(instance),
            NodePayload::MeshGroup(instances) => instances.as_slice(),
        }
    }
}
