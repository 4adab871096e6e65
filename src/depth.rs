pub(crate) const DEFAULT_MAX_DEPTH: usize = 64;

/// Nesting level of the geometry currently being read. It is threaded by
/// value through the recursive descent so that nothing needs to be undone
/// when a production returns. Capping the depth turns pathologically nested
/// input into an error instead of a stack overflow.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Depth {
    depth: usize,
    max: usize,
}

impl Depth {
    pub fn new(max: usize) -> Self {
        Depth { depth: 0, max }
    }

    /// The depth one level down, or `None` if that exceeds the maximum
    pub fn push(self) -> Option<Depth> {
        if self.depth >= self.max {
            None
        } else {
            Some(Depth {
                depth: self.depth + 1,
                max: self.max,
            })
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }
}
