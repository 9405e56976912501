//! Logical frame names for the external texture cache
//!
//! Sprite sheet frames are keyed `"<prefix><NN>"`, e.g. `player/walk-03` or
//! `food/17`. The core only ever asks for frames by prefix and count.

use std::collections::HashMap;

/// Sprite sheet prefix of the food textures
pub const FOOD_FRAME_PREFIX: &str = "food/";
/// Single frame used for the lives icon
pub const LIVES_ICON_FRAME: &str = "ui/lives";

/// Key of frame `index` under `prefix`, zero padded to two digits
pub fn frame_key(prefix: &str, index: usize) -> String {
    format!("{prefix}{index:02}")
}

/// Keys of the first `count` frames under `prefix`, in order
pub fn frame_keys(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| frame_key(prefix, i)).collect()
}

/// Lookup into whatever texture cache the host has loaded
pub trait FrameSource {
    type Handle: Clone;

    fn frame(&self, key: &str) -> Option<Self::Handle>;

    /// Ordered frames for an animation or texture set. Frames missing from
    /// the cache are skipped.
    fn frames(&self, prefix: &str, count: usize) -> Vec<Self::Handle> {
        frame_keys(prefix, count)
            .iter()
            .filter_map(|key| {
                let frame = self.frame(key);
                if frame.is_none() {
                    log::warn!("Missing frame {}", key);
                }
                frame
            })
            .collect()
    }
}

impl<H: Clone> FrameSource for HashMap<String, H> {
    type Handle = H;

    fn frame(&self, key: &str) -> Option<H> {
        self.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_keys_are_zero_padded() {
        assert_eq!(
            frame_keys("player/idle-", 2),
            vec!["player/idle-00", "player/idle-01"]
        );
        assert_eq!(frame_key(FOOD_FRAME_PREFIX, 42), "food/42");
    }

    #[test]
    fn test_frames_from_cache_in_order() {
        let mut cache = HashMap::new();
        cache.insert("player/walk-01".to_string(), 11u32);
        cache.insert("player/walk-00".to_string(), 10u32);
        cache.insert("player/walk-02".to_string(), 12u32);

        assert_eq!(cache.frames("player/walk-", 3), vec![10, 11, 12]);
        // Missing frames are skipped, not fatal
        assert_eq!(cache.frames("player/walk-", 5), vec![10, 11, 12]);
        assert!(cache.frame(LIVES_ICON_FRAME).is_none());
    }
}
