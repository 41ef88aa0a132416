//! Read-only render view
//!
//! A flat snapshot of what an external renderer needs to draw one frame.

use serde::{Deserialize, Serialize};

use crate::sim::{LevelState, ObstacleKind, Rect};

/// One drawable obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub kind: ObstacleKind,
    pub rect: Rect,
    pub visible: bool,
}

/// Everything drawn for one frame, obstacles in template order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub level: u32,
    pub player: Rect,
    pub obstacles: Vec<RenderItem>,
}

impl Frame {
    pub fn capture(state: &LevelState) -> Self {
        Self {
            level: state.level,
            player: state.player.rect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| RenderItem {
                    kind: o.kind(),
                    rect: o.rect,
                    visible: o.is_visible(),
                })
                .collect(),
        }
    }

    /// Only the items a renderer should actually draw
    pub fn visible(&self) -> impl Iterator<Item = &RenderItem> {
        self.obstacles.iter().filter(|item| item.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelCatalog;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_level_two() {
        let catalog = LevelCatalog::builtin().unwrap();
        let state = LevelState::load(&catalog, 2, Tuning::default()).unwrap();
        let frame = Frame::capture(&state);

        assert_eq!(frame.level, 2);
        assert_eq!(frame.player, Rect::new(50.0, 300.0, 20.0, 20.0));
        assert_eq!(frame.obstacles.len(), state.obstacles.len());

        // Invisible danger and hidden goal are reported but not drawn
        assert_eq!(frame.obstacles[3].kind, ObstacleKind::Danger);
        assert!(!frame.obstacles[3].visible);
        assert!(!frame.obstacles[5].visible);
        assert_eq!(frame.visible().count(), frame.obstacles.len() - 2);
    }
}
