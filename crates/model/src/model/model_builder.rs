use std::collections::{HashMap, TryReserveError};

use rs42::extensions::vec::TryPush;
use stl_parser::{Solid, Vec3};

use crate::{vertex::VertexKey, ModelError, Vertex};

use super::{Model, VertexIndex};

#[derive(Default)]
pub struct ModelBuilder {
    name: String,
    normals: Vec<Vec3>,
    vertices: Vec<Vec3>,
    elements: Vec<VertexIndex>,

    vertex_map: HashMap<VertexKey, VertexIndex>,
}

impl ModelBuilder {
    pub(crate) fn build(self) -> Model {
        Model {
            name: self.name,
            normals: self.normals.into_boxed_slice(),
            vertices: self.vertices.into_boxed_slice(),
            elements: self.elements.into_boxed_slice(),
        }
    }
}

impl TryFrom<&Solid> for ModelBuilder {
    type Error = ModelError;

    fn try_from(solid: &Solid) -> Result<Self, Self::Error> {
        let mut builder = Self {
            name: solid.name().into_owned(),
            ..Self::default()
        };

        let vertex_count = solid.facets().len().saturating_mul(3);
        builder
            .elements
            .try_reserve_exact(vertex_count)
            .map_err(|err| builder.allocation_failure(err))?;
        builder
            .vertex_map
            .try_reserve(vertex_count)
            .map_err(|err| builder.allocation_failure(err))?;

        for facet in solid.facets() {
            for position in facet.vertices() {
                builder.add_vertex(Vertex::new(*facet.normal(), *position))?;
            }
        }

        Ok(builder)
    }
}

impl ModelBuilder {
    fn add_vertex(&mut self, vertex: Vertex) -> Result<(), ModelError> {
        let Some(key) = vertex.dedup_key() else {
            self.push_new_vertex(vertex)?;
            return Ok(());
        };

        if let Some(&index) = self.vertex_map.get(&key) {
            self.push_element(index)
        } else {
            let index = self.push_new_vertex(vertex)?;
            self.vertex_map.insert(key, index);
            Ok(())
        }
    }

    fn push_new_vertex(&mut self, vertex: Vertex) -> Result<VertexIndex, ModelError> {
        let index = next_index(self.normals.len()).ok_or_else(|| ModelError::TooManyVertices {
            name: self.name.clone(),
        })?;
        self.normals
            .try_push(*vertex.normal())
            .map_err(|err| self.allocation_failure(err))?;
        self.vertices
            .try_push(*vertex.position())
            .map_err(|err| self.allocation_failure(err))?;
        self.push_element(index)?;
        Ok(index)
    }

    fn push_element(&mut self, index: VertexIndex) -> Result<(), ModelError> {
        self.elements
            .try_push(index)
            .map_err(|err| self.allocation_failure(err))
    }

    fn allocation_failure(&self, source: TryReserveError) -> ModelError {
        ModelError::AllocationFailure {
            name: self.name.clone(),
            source,
        }
    }
}

/// Index of the record pushed after `len` others, if it fits a `VertexIndex`.
fn next_index(len: usize) -> Option<VertexIndex> {
    VertexIndex::try_from(len).ok()
}
