mod handle_unrecognized_line;
mod parse_vec3;

use handle_unrecognized_line::handle_unrecognized_line;
use parse_vec3::parse_vec3;

use log::warn;
use rs42::extensions::{vec::TryPush, PipeLine};

use crate::{Facet, Solid, StlParsingError, StlParsingErrorDetail, Vec3};

// solid block100
//    facet normal -1.000000e+000 0.000000e+000 0.000000e+000
//       outer loop
//          vertex 0.000000e+000 1.000000e+002 1.000000e+002
//          vertex 0.000000e+000 1.000000e+002 0.000000e+000
//          vertex 0.000000e+000 0.000000e+000 1.000000e+002
//       endloop
//    endfacet
//    ...
// endsolid

#[derive(Debug, Default)]
enum AsciiState {
    #[default]
    Idle,
    InSolid(SolidBuilder),
    InFacet {
        solid: SolidBuilder,
        facet: FacetBuilder,
    },
}

#[derive(Debug, Default)]
struct SolidBuilder {
    header: Vec<u8>,
    facets: Vec<Facet>,
}

#[derive(Debug)]
struct FacetBuilder {
    normal: Vec3,
    vertices: [Vec3; 3],
    vertex_count: usize,
}

#[derive(Debug, PartialEq)]
enum Keyword<'a> {
    OuterLoop,
    EndLoop,
    EndFacet,
    EndSolid,
    Solid(&'a [u8]),
    FacetNormal(&'a [u8]),
    Vertex(&'a [u8]),
    Unrecognized,
}

impl SolidBuilder {
    fn build(self) -> Solid {
        Solid::new(self.header, self.facets)
    }
}

impl FacetBuilder {
    fn new(normal: Vec3) -> Self {
        Self {
            normal,
            vertices: [[0.; 3]; 3],
            vertex_count: 0,
        }
    }

    fn build(self) -> Result<Facet, StlParsingErrorDetail> {
        if self.vertex_count < 3 {
            return Err(StlParsingErrorDetail::OutOfSyncToken("endfacet"));
        }
        Ok(Facet::new(self.normal, self.vertices, 0))
    }
}

/// Decodes every solid of an ascii STL buffer. Any error discards all of them.
pub fn decode(bytes: &[u8]) -> Result<Vec<Solid>, StlParsingError> {
    let mut solids = Vec::new();
    let mut state = AsciiState::default();
    let mut line_count = 0;

    for (index, line) in bytes.split(|&byte| byte == b'\n').enumerate() {
        line_count = index + 1;
        state = step(state, line_count, line, &mut solids)
            .map_err(|detail| StlParsingError::at_line(line_count, line, detail))?;
    }

    if !matches!(state, AsciiState::Idle) {
        return StlParsingError::at_line(line_count, b"", StlParsingErrorDetail::UnterminatedSolid)
            .pipe(Err);
    }

    Ok(solids)
}

fn step(
    state: AsciiState,
    line_count: usize,
    line: &[u8],
    solids: &mut Vec<Solid>,
) -> Result<AsciiState, StlParsingErrorDetail> {
    let trimmed = line.trim_ascii();

    match (classify_line(trimmed), state) {
        (Keyword::OuterLoop | Keyword::EndLoop, state) => Ok(state),

        (Keyword::EndFacet, AsciiState::InFacet { mut solid, facet }) => {
            solid
                .facets
                .try_push(facet.build()?)
                .map_err(StlParsingErrorDetail::AllocationFailure)?;
            Ok(AsciiState::InSolid(solid))
        }
        (Keyword::EndFacet, _) => Err(StlParsingErrorDetail::OutOfSyncToken("endfacet")),

        (Keyword::EndSolid, AsciiState::InSolid(solid)) => {
            solids
                .try_push(solid.build())
                .map_err(StlParsingErrorDetail::AllocationFailure)?;
            Ok(AsciiState::Idle)
        }
        (Keyword::EndSolid, _) => Err(StlParsingErrorDetail::OutOfSyncToken("endsolid")),

        (Keyword::Solid(name), AsciiState::Idle) => AsciiState::InSolid(SolidBuilder {
            header: name.to_vec(),
            facets: Vec::new(),
        })
        .pipe(Ok),
        (Keyword::Solid(_), _) => Err(StlParsingErrorDetail::NestedBlock("solid")),

        (Keyword::FacetNormal(components), AsciiState::InSolid(solid)) => AsciiState::InFacet {
            solid,
            facet: FacetBuilder::new(parse_vec3(components)?),
        }
        .pipe(Ok),
        (Keyword::FacetNormal(_), AsciiState::Idle) => {
            Err(StlParsingErrorDetail::OutOfSyncToken("facet normal"))
        }
        (Keyword::FacetNormal(_), AsciiState::InFacet { .. }) => {
            Err(StlParsingErrorDetail::NestedBlock("facet normal"))
        }

        (Keyword::Vertex(components), AsciiState::InFacet { solid, mut facet }) => {
            if facet.vertex_count < 3 {
                facet.vertices[facet.vertex_count] = parse_vec3(components)?;
                facet.vertex_count += 1;
            } else {
                warn!(
                    "Extra vertex ignored in facet at line {line_count}: \"{}\"",
                    String::from_utf8_lossy(trimmed)
                );
            }
            Ok(AsciiState::InFacet { solid, facet })
        }
        (Keyword::Vertex(_), _) => Err(StlParsingErrorDetail::OutOfSyncToken("vertex")),

        (Keyword::Unrecognized, state) => {
            handle_unrecognized_line(line_count, trimmed);
            Ok(state)
        }
    }
}

/// First keyword found anywhere in the line wins, in this order.
fn classify_line(line: &[u8]) -> Keyword<'_> {
    if find(line, b"outer loop").is_some() {
        Keyword::OuterLoop
    } else if find(line, b"endloop").is_some() {
        Keyword::EndLoop
    } else if find(line, b"endfacet").is_some() {
        Keyword::EndFacet
    } else if find(line, b"endsolid").is_some() {
        Keyword::EndSolid
    } else if let Some(rest) = after_keyword(line, b"solid") {
        Keyword::Solid(rest)
    } else if let Some(rest) = after_keyword(line, b"facet normal") {
        Keyword::FacetNormal(rest)
    } else if let Some(rest) = after_keyword(line, b"vertex") {
        Keyword::Vertex(rest)
    } else {
        Keyword::Unrecognized
    }
}

fn after_keyword<'a>(line: &'a [u8], keyword: &[u8]) -> Option<&'a [u8]> {
    find(line, keyword).map(|start| line[start + keyword.len()..].trim_ascii())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
