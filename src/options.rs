use crate::minimize::Strategy;

const DEFAULT_MINIMIZE: bool = true;
const DEFAULT_SIMPLIFY: bool = true;

#[derive(Debug, Clone)]
pub struct Options {
    /// The algorithm used to minimize DFAs.
    pub minimizer: Strategy,
    /// Whether to minimize the DFA produced by [compile](crate::compile).
    /// If `false`, the result of the subset construction is returned as is.
    pub minimize: bool,
    /// Whether to simplify regexes produced by the algebraic conversion.
    pub simplify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            minimizer: Strategy::default(),
            minimize: DEFAULT_MINIMIZE,
            simplify: DEFAULT_SIMPLIFY,
        }
    }
}

impl Options {
    pub fn with_minimizer(mut self, minimizer: Strategy) -> Self {
        self.minimizer = minimizer;
        self
    }
}
