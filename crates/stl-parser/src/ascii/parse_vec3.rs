use std::str;

use rs42::extensions::PipeLine;

use crate::{errors::InvalidNumber, StlParsingErrorDetail, Vec3};

/// Reads the first three space separated floats of `components`. Runs of spaces are
/// tolerated, anything after the third value is ignored.
pub fn parse_vec3(components: &[u8]) -> Result<Vec3, StlParsingErrorDetail> {
    let mut tokens = components
        .split(|&byte| byte == b' ')
        .filter(|token| !token.is_empty());
    let mut vec = [0.; 3];

    for (found, elem) in vec.iter_mut().enumerate() {
        *elem = tokens.next().map_or_else(
            || Err(StlParsingErrorDetail::NotEnoughComponents { expected: 3, found }),
            |token| parse_component(token.trim_ascii()),
        )?;
    }

    Ok(vec)
}

fn parse_component(token: &[u8]) -> Result<f32, StlParsingErrorDetail> {
    let to_detail = |source| StlParsingErrorDetail::NumberFormatError {
        token: String::from_utf8_lossy(token).into_owned(),
        source,
    };

    let value = str::from_utf8(token)
        .map_err(|_| to_detail(InvalidNumber::NotUtf8))?
        .parse::<f32>()
        .map_err(|err| to_detail(err.into()))?;

    if !value.is_finite() {
        return to_detail(InvalidNumber::NotFinite).pipe(Err);
    }
    Ok(value)
}
