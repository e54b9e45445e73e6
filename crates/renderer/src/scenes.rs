use lifecycle::SceneIndex;

/// Shared uniform block, vertex stage and helpers prepended to every scene.
pub(crate) const COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");

/// Built-in full-screen scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub name: &'static str,
    pub summary: &'static str,
    fragment: &'static str,
}

impl Scene {
    /// Complete WGSL module for this scene.
    pub fn source(&self) -> String {
        format!("{COMMON_WGSL}\n{}", self.fragment)
    }
}

pub const SCENES: &[Scene] = &[
    Scene {
        name: "gradient",
        summary: "cosine palette sweeping across the surface",
        fragment: include_str!("../shaders/gradient.wgsl"),
    },
    Scene {
        name: "rings",
        summary: "concentric rings pulsing outwards",
        fragment: include_str!("../shaders/rings.wgsl"),
    },
    Scene {
        name: "plasma",
        summary: "classic sine plasma",
        fragment: include_str!("../shaders/plasma.wgsl"),
    },
    Scene {
        name: "checker",
        summary: "rotating checkerboard",
        fragment: include_str!("../shaders/checker.wgsl"),
    },
    Scene {
        name: "tunnel",
        summary: "striped tunnel flythrough",
        fragment: include_str!("../shaders/tunnel.wgsl"),
    },
];

/// Maps a requested index onto the catalog. Anything outside the catalog,
/// negative values included, selects the last scene.
pub fn resolve(index: SceneIndex) -> (usize, &'static Scene) {
    let last = SCENES.len() - 1;
    let position = usize::try_from(index.get())
        .ok()
        .filter(|position| *position < SCENES.len())
        .unwrap_or(last);
    (position, &SCENES[position])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_indices_select_their_scene() {
        assert_eq!(resolve(SceneIndex(0)).1.name, "gradient");
        assert_eq!(resolve(SceneIndex(2)).1.name, "plasma");
    }

    #[test]
    fn out_of_range_falls_back_to_last_scene() {
        let last = SCENES.len() - 1;
        assert_eq!(resolve(SceneIndex(SCENES.len() as i32)).0, last);
        assert_eq!(resolve(SceneIndex(-1)).0, last);
        assert_eq!(resolve(SceneIndex(i32::MAX)).1.name, "tunnel");
    }

    #[test]
    fn sources_carry_both_stages() {
        for scene in SCENES {
            let source = scene.source();
            assert!(source.contains("fn vs_main"), "{} lacks vertex stage", scene.name);
            assert!(source.contains("fn fs_main"), "{} lacks fragment stage", scene.name);
        }
    }
}
