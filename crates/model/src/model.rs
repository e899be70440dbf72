mod model_builder;

use std::path::Path;

use ash::vk;
use model_builder::ModelBuilder;
use rs42::extensions::PipeLine;
use stl_parser::{parse_file, ParseOptions, Solid, Vec3};

use crate::ModelError;

pub type VertexIndex = u32;

pub const POSITION_BINDING: u32 = 0;
pub const NORMAL_BINDING: u32 = 1;

/// Indexed mesh built from one solid.
///
/// `normals[i]` and `vertices[i]` together form vertex record `i`. `elements` holds three
/// indices per facet, in facet order.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    normals: Box<[Vec3]>,
    vertices: Box<[Vec3]>,
    elements: Box<[VertexIndex]>,
}


// Constructors:

impl TryFrom<&Solid> for Model {
    type Error = ModelError;

    /// Fails only when the solid has more distinct records than a `VertexIndex` can address, or
    /// when memory runs out.
    fn try_from(solid: &Solid) -> Result<Self, Self::Error> {
        ModelBuilder::try_from(solid)?.build().pipe(Ok)
    }
}

impl Model {
    /// Parses `path` and indexes every solid it contains.
    pub fn load_all(
        path: impl AsRef<Path>,
        options: &ParseOptions,
    ) -> Result<Vec<Self>, ModelError> {
        index_solids(&parse_file(path, options)?)
    }
}

pub fn index_solid(solid: &Solid) -> Result<Model, ModelError> {
    Model::try_from(solid)
}

pub fn index_solids(solids: &[Solid]) -> Result<Vec<Model>, ModelError> {
    solids.iter().map(Model::try_from).collect()
}


// Getters:

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn elements(&self) -> &[VertexIndex] {
        &self.elements
    }

    /// `(normals, vertices, elements)`
    pub fn into_parts(self) -> (Box<[Vec3]>, Box<[Vec3]>, Box<[VertexIndex]>) {
        (self.normals, self.vertices, self.elements)
    }
}


// GPU layout: positions and normals live in two separate vertex buffers.

impl Model {
    pub const INDEX_TYPE: vk::IndexType = vk::IndexType::UINT32;

    pub fn get_binding_descriptions() -> [vk::VertexInputBindingDescription; 2] {
        [POSITION_BINDING, NORMAL_BINDING].map(|binding| {
            vk::VertexInputBindingDescription::default()
                .binding(binding)
                .stride(size_of::<Vec3>() as u32)
                .input_rate(vk::VertexInputRate::VERTEX)
        })
    }

    pub fn get_attributes_descriptions() -> [vk::VertexInputAttributeDescription; 2] {
        [
            vk::VertexInputAttributeDescription::default()
                .binding(POSITION_BINDING)
                .location(0)
                .format(vk::Format::R32G32B32_SFLOAT)
                .offset(0),
            vk::VertexInputAttributeDescription::default()
                .binding(NORMAL_BINDING)
                .location(1)
                .format(vk::Format::R32G32B32_SFLOAT)
                .offset(0),
        ]
    }
}
