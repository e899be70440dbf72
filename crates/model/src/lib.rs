mod errors;
mod model;
mod vertex;

pub use errors::ModelError;
pub use model::{
    index_solid, index_solids, Model, VertexIndex, NORMAL_BINDING, POSITION_BINDING,
};
pub use vertex::{Normal, Position, Vertex};
