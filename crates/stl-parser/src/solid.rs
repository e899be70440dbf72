use std::borrow::Cow;

pub type Vec3 = [f32; 3];

/// One triangle as stored in the file. Vertices are not shared between facets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    normal: Vec3,
    vertices: [Vec3; 3],
    attribute: u16,
}

impl Facet {
    pub fn new(normal: Vec3, vertices: [Vec3; 3], attribute: u16) -> Self {
        Self {
            normal,
            vertices,
            attribute,
        }
    }

    pub fn normal(&self) -> &Vec3 {
        &self.normal
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    /// Attribute byte count of the binary encoding, kept verbatim. Always 0 for ascii files.
    pub fn attribute(&self) -> u16 {
        self.attribute
    }
}

/// A named group of facets.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    header: Box<[u8]>,
    facets: Box<[Facet]>,
}

impl Solid {
    pub fn new(header: impl Into<Box<[u8]>>, facets: impl Into<Box<[Facet]>>) -> Self {
        Self {
            header: header.into(),
            facets: facets.into(),
        }
    }

    /// Raw header: the text after `solid` for ascii files, the 80 byte name field for binary
    /// ones.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Printable name, without the NUL padding binary headers usually carry.
    pub fn name(&self) -> Cow<'_, str> {
        let end = self
            .header
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(self.header.len());
        match String::from_utf8_lossy(&self.header[..end]) {
            Cow::Borrowed(name) => Cow::Borrowed(name.trim()),
            Cow::Owned(name) => Cow::Owned(name.trim().to_owned()),
        }
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }
}
