/// Default maximum depth of a tree.
pub const DEFAULT_MAX_DEPTH: u16 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeParams {
    pub max_depth: u16,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A depth of 0 is allowed and makes the root a leaf.
    pub fn set_max_depth(&mut self, max_depth: u16) {
        self.max_depth = max_depth;
    }

    pub fn max_depth(&self) -> u16 {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = TreeParams::default();
        assert_eq!(params.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_set_max_depth() {
        let mut params = TreeParams::new();
        params.set_max_depth(0);
        assert_eq!(params.max_depth(), 0);
    }
}
