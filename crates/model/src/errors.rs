use std::collections::TryReserveError;

use stl_parser::StlParsingError;
use thiserror::Error;

use crate::VertexIndex;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Parsing(#[from] StlParsingError),
    #[error("solid \"{name}\" has more than {} distinct vertices", VertexIndex::MAX as u64 + 1)]
    TooManyVertices { name: String },
    #[error("allocation failure while indexing solid \"{name}\": {source}")]
    AllocationFailure {
        name: String,
        #[source]
        source: TryReserveError,
    },
}
