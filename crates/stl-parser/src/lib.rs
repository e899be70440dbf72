mod ascii;
mod binary;
mod errors;
mod options;
mod sniff;
mod solid;

pub use binary::{FACET_SIZE, SOLID_HEADER_SIZE};
pub use errors::{ErrorLocation, InvalidNumber, StlParsingError, StlParsingErrorDetail};
pub use options::{ParseOptions, TrailingData};
pub use sniff::{sniff_format, StlFormat, MIN_FILE_LEN};
pub use solid::{Facet, Solid, Vec3};

use std::{fs, path::Path};

use log::{error, info};

pub struct StlFile<'a>(pub &'a Path);

impl TryFrom<StlFile<'_>> for Vec<Solid> {
    type Error = StlParsingError;

    fn try_from(file: StlFile) -> Result<Self, Self::Error> {
        parse_file(file.0, &ParseOptions::default())
    }
}

/// Reads `path` and decodes every solid it contains.
pub fn parse_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<Vec<Solid>, StlParsingError> {
    let path = path.as_ref();
    info!("Loading STL file \"{}\"", path.display());

    fs::read(path)
        .map_err(|err| StlParsingError::from(StlParsingErrorDetail::FailedToReadFile(err)))
        .and_then(|bytes| decode(&bytes, options, &path.display().to_string()))
        .map_err(|err| {
            let err = err.with_path(path);
            error!("{err}");
            err
        })
}

/// Decodes an in-memory STL buffer, ascii or binary.
pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Vec<Solid>, StlParsingError> {
    decode(bytes, options, "<memory>")
}

/// `source` names the data in logs.
fn decode(
    bytes: &[u8],
    options: &ParseOptions,
    source: &str,
) -> Result<Vec<Solid>, StlParsingError> {
    let format = sniff_format(bytes)?;
    info!("Parsing {format} STL file \"{source}\" ({} bytes)", bytes.len());

    let solids = match format {
        StlFormat::Ascii => ascii::decode(bytes)?,
        StlFormat::Binary => binary::decode(bytes, options)?,
    };

    info!(
        "Finished parsing {format} STL file \"{source}\": {} solid(s), {} facet(s)",
        solids.len(),
        solids.iter().map(|solid| solid.facets().len()).sum::<usize>()
    );
    Ok(solids)
}
