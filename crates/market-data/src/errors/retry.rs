/// Classification of a provider failure.
///
/// Nothing in the pipeline retries automatically. The class is reported with
/// the failure so an operator can tell whether re-running the batch is
/// likely to help.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Bad symbol, empty range, or malformed data. Re-running won't help.
    Never,

    /// Rate limiting, timeouts, network or upstream errors. A later run may
    /// succeed.
    Transient,
}

impl RetryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryClass::Never => "terminal",
            RetryClass::Transient => "transient",
        }
    }
}
