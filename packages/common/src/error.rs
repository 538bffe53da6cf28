/// Error when parsing an unknown enum string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} '{invalid}'. Valid values: {valid}")]
pub struct ParseEnumError {
    kind: &'static str,
    invalid: String,
    valid: String,
}

impl ParseEnumError {
    pub fn new<'a>(
        kind: &'static str,
        invalid: &str,
        valid: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self {
            kind,
            invalid: invalid.to_string(),
            valid: valid.collect::<Vec<_>>().join(", "),
        }
    }

    /// The rejected input.
    pub fn invalid(&self) -> &str {
        &self.invalid
    }
}
