use std::sync::Arc;

use crate::path::curve::Curve;

/// Ordered, immutable sequence of curve segments traversed back to back.
///
/// Curves are reference counted so a chain can be cloned cheaply and shared between the
/// follower and its renderer.
#[derive(Clone, Debug, Default)]
pub struct PathChain {
    curves: Vec<Arc<dyn Curve>>,
}

impl PathChain {
    pub fn new(curves: Vec<Arc<dyn Curve>>) -> Self {
        Self { curves }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Curve at `index`, or `None` outside `[0, len)`.
    pub fn curve(&self, index: usize) -> Option<&dyn Curve> {
        self.curves.get(index).map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Curve> + '_ {
        self.curves.iter().map(|c| c.as_ref())
    }
}

impl<C: Curve + 'static> FromIterator<C> for PathChain {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|c| Arc::new(c) as Arc<dyn Curve>)
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/chain.rs"]
mod tests;
