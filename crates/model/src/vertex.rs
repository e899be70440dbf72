use stl_parser::Vec3;

pub type Position = Vec3;
pub type Normal = Vec3;

/// Bit patterns of a vertex with both zeros folded to `0.0`.
pub(crate) type VertexKey = ([u32; 3], [u32; 3]);

/// One (normal, position) pair, the unit the indexer deduplicates.
///
/// `Eq` and `Hash` compare bit patterns, so a vertex always equals its copies, NaNs included,
/// and `0.0` differs from `-0.0`. The indexer matches records by float value instead, see
/// [`Vertex::dedup_key`].
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    normal: Normal,
    position: Position,
}

impl Vertex {
    pub fn new(normal: impl Into<Normal>, position: impl Into<Position>) -> Self {
        Self {
            normal: normal.into(),
            position: position.into(),
        }
    }

    pub fn normal(&self) -> &Normal {
        &self.normal
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    fn has_nan(&self) -> bool {
        self.normal
            .iter()
            .chain(self.position.iter())
            .any(|e| e.is_nan())
    }

    fn into_tuple_of_bits(self) -> VertexKey {
        (
            self.normal.map(f32::to_bits),
            self.position.map(f32::to_bits),
        )
    }

    /// Key under which two records merge: equal keys mean all six components compare equal as
    /// floats. A record holding a NaN equals nothing and has no key.
    pub(crate) fn dedup_key(&self) -> Option<VertexKey> {
        if self.has_nan() {
            return None;
        }
        // `-0.0 + 0.0` is `0.0`, so both zeros share a key.
        Some(
            Vertex::new(self.normal.map(|e| e + 0.), self.position.map(|e| e + 0.))
                .into_tuple_of_bits(),
        )
    }
}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.into_tuple_of_bits().hash(state)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.into_tuple_of_bits() == other.into_tuple_of_bits()
    }
}

impl Eq for Vertex {}
