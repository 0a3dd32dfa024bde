//! Landscape view - thread graph visualization

/// Landscape view showing thread relationships as a graph
pub struct LandscapeView;

impl LandscapeView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LandscapeView {
    fn default() -> Self {
        Self::new()
    }
}
