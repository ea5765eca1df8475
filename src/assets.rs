//! Frame text for everything drawn as a multi-line glyph block
//!
//! A frames directory holds one `.txt` file per frame:
//! - `rocket_frame_*.txt`: ship animation frames, in name order
//! - `game_over.txt`: the banner
//! - every other `.txt` file: a debris shape

use std::path::Path;
use std::rc::Rc;

use crate::error::AssetError;
use crate::renderer::frame_size;

const ROCKET_PREFIX: &str = "rocket_frame_";
const GAME_OVER_FILE: &str = "game_over.txt";

const BUILTIN_ROCKET: [&str; 2] = [
    include_str!("../assets/frames/rocket_frame_1.txt"),
    include_str!("../assets/frames/rocket_frame_2.txt"),
];

const BUILTIN_DEBRIS: [&str; 6] = [
    include_str!("../assets/frames/duck.txt"),
    include_str!("../assets/frames/hubble.txt"),
    include_str!("../assets/frames/lamp.txt"),
    include_str!("../assets/frames/trash_large.txt"),
    include_str!("../assets/frames/trash_small.txt"),
    include_str!("../assets/frames/trash_xl.txt"),
];

const BUILTIN_GAME_OVER: &str = include_str!("../assets/frames/game_over.txt");

/// All frames a session needs
#[derive(Debug, Clone)]
pub struct Assets {
    pub rocket: Vec<Rc<str>>,
    pub debris: Vec<Rc<str>>,
    pub game_over: Rc<str>,
}

impl Default for Assets {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Assets {
    /// Frames compiled into the binary
    pub fn builtin() -> Self {
        Self {
            rocket: BUILTIN_ROCKET.iter().map(|&f| Rc::from(f)).collect(),
            debris: BUILTIN_DEBRIS.iter().map(|&f| Rc::from(f)).collect(),
            game_over: Rc::from(BUILTIN_GAME_OVER),
        }
    }

    /// Load every frame from `dir`.
    ///
    /// At least one rocket frame and the banner must be present. Debris
    /// shapes are optional; without any the spawner has nothing to drop.
    pub fn load_dir(dir: &Path) -> Result<Self, AssetError> {
        let io_err = |source| AssetError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut rocket = Vec::new();
        let mut debris = Vec::new();
        let mut game_over = None;
        for path in paths {
            let text: Rc<str> = Rc::from(read_frame(&path)?);
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if name == GAME_OVER_FILE {
                game_over = Some(text);
            } else if name.starts_with(ROCKET_PREFIX) {
                rocket.push(text);
            } else {
                debris.push(text);
            }
        }

        if rocket.is_empty() {
            return Err(AssetError::Missing {
                path: dir.join(format!("{ROCKET_PREFIX}1.txt")),
            });
        }
        let game_over = game_over.ok_or_else(|| AssetError::Missing {
            path: dir.join(GAME_OVER_FILE),
        })?;

        log::info!(
            "Loaded {} rocket and {} debris frames from {}",
            rocket.len(),
            debris.len(),
            dir.display()
        );
        Ok(Self {
            rocket,
            debris,
            game_over,
        })
    }

    /// Rows and columns covering every rocket frame
    pub fn ship_footprint(&self) -> (i32, i32) {
        self.rocket
            .iter()
            .map(|frame| frame_size(frame))
            .fold((0, 0), |(r, c), (fr, fc)| (r.max(fr), c.max(fc)))
    }
}

fn read_frame(path: &Path) -> Result<String, AssetError> {
    std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_frames_are_drawable() {
        let assets = Assets::builtin();
        assert_eq!(assets.rocket.len(), 2);
        assert_eq!(assets.debris.len(), 6);
        for frame in assets.rocket.iter().chain(&assets.debris) {
            let (rows, columns) = frame_size(frame);
            assert!(rows > 0 && columns > 0);
        }
        assert_eq!(assets.ship_footprint(), (8, 5));
    }

    #[test]
    fn test_load_dir_sorts_files() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, text: &str| std::fs::write(dir.path().join(name), text).unwrap();
        write("rocket_frame_2.txt", "B");
        write("rocket_frame_1.txt", "A");
        write("game_over.txt", "GG");
        write("zeta.txt", "z");
        write("alpha.txt", "a");
        write("notes.md", "ignored");

        let assets = Assets::load_dir(dir.path()).unwrap();
        let rocket: Vec<&str> = assets.rocket.iter().map(|f| &**f).collect();
        let debris: Vec<&str> = assets.debris.iter().map(|f| &**f).collect();
        assert_eq!(rocket, ["A", "B"]);
        assert_eq!(debris, ["a", "z"]);
        assert_eq!(&*assets.game_over, "GG");
    }

    #[test]
    fn test_load_dir_requires_banner() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rocket_frame_1.txt"), "A").unwrap();
        let err = Assets::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Missing { ref path } if path.ends_with("game_over.txt")));
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = Assets::load_dir(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }
}
