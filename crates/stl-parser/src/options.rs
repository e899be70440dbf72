/// What the binary decoder does with bytes left over after the declared facets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingData {
    /// Log a warning and drop them.
    #[default]
    Ignore,
    /// Fail with `TrailingBytes`.
    Reject,
    /// Decode them as further `[header][count][facets]` solids while a full header remains.
    NextSolid,
}

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub trailing_data: TrailingData,
}
