use cw_core::WorldPoint;

/// Dimensions of the experimental setup, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentalParams {
    /// Panel height including the aluminium frame.
    pub panel_h: f64,
    /// Panel width including the aluminium frame.
    pub panel_w: f64,
    /// Height of the exposed glass.
    pub panel_h_inner: f64,
    /// Width of the exposed glass.
    pub panel_w_inner: f64,
    /// Height from the top of the panel to the next concrete floor slab.
    pub panel_top_above_floor: f64,
}

impl Default for ExperimentalParams {
    fn default() -> Self {
        Self {
            panel_h: 153.2,
            panel_w: 103.2,
            panel_h_inner: 143.2,
            panel_w_inner: 93.2,
            panel_top_above_floor: 129.0,
        }
    }
}

impl ExperimentalParams {
    /// The outer corners of a panel in the wall frame, going around from the origin.
    pub fn panel_corners(&self) -> [WorldPoint; 4] {
        [
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(0.0, self.panel_h, 0.0),
            WorldPoint::new(self.panel_w, self.panel_h, 0.0),
            WorldPoint::new(self.panel_w, 0.0, 0.0),
        ]
    }
}
