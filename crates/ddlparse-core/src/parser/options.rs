//! Parser configuration.

/// Options controlling a parse.
///
/// ```
/// use ddlparse_core::ParseOptions;
///
/// let options = ParseOptions::new().verbatim(true).max_depth(64);
/// assert!(options.verbatim);
/// assert!(!options.debug);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit `trace` events on entry to and exit from every grammar production.
    pub debug: bool,
    /// Capture `CHECK`, `DEFAULT (...)`, generated-column and index `WHERE`
    /// expressions as raw source text instead of parsing their structure.
    pub verbatim: bool,
    /// Maximum expression nesting depth.
    pub max_depth: usize,
}

impl ParseOptions {
    /// Default nesting limit, low enough for a thread with the default
    /// 2 MiB stack in an unoptimized build.
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            debug: false,
            verbatim: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Enables or disables trace logging.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enables or disables verbatim expression capture.
    #[must_use]
    pub const fn verbatim(mut self, verbatim: bool) -> Self {
        self.verbatim = verbatim;
        self
    }

    /// Sets the maximum expression nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
