//! Asset lookup.
//!
//! Every program reads its files from fixed relative paths below an asset
//! root (`shaders/`, `textures/`, `models/`). Shaders are also embedded at
//! build time and used when the file is not on disk.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use include_dir::{Dir, include_dir};

static EMBEDDED_SHADERS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/shaders");

/// Resolves asset paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn shader(&self, name: &str) -> PathBuf {
        self.root.join("shaders").join(name)
    }

    pub fn texture(&self, name: &str) -> PathBuf {
        self.root.join("textures").join(name)
    }

    pub fn model(&self, name: &str) -> PathBuf {
        self.root.join("models").join(name)
    }

    pub fn skybox_dir(&self) -> PathBuf {
        self.root.join("textures").join("skybox")
    }

    /// Reads a shader source, preferring the file on disk over the embedded copy.
    pub fn read_shader(&self, name: &str) -> anyhow::Result<String> {
        let path = self.shader(name);
        match std::fs::read_to_string(&path) {
            Ok(source) => Ok(source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not on disk, using embedded copy", path.display());
                embedded_shader(name)
            }
            Err(e) => Err(e).with_context(|| format!("failed to read shader {}", path.display())),
        }
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Returns the shader source compiled into the binary.
pub fn embedded_shader(name: &str) -> anyhow::Result<String> {
    let file = EMBEDDED_SHADERS
        .get_file(name)
        .ok_or_else(|| anyhow!("no shader named '{name}'"))?;
    file.contents_utf8()
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("shader '{name}' is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn paths_are_rooted() {
        let assets = Assets::new("data");
        assert_eq!(assets.texture("crate.jpg"), Path::new("data/textures/crate.jpg"));
        assert_eq!(assets.model("floor.obj"), Path::new("data/models/floor.obj"));
        assert_eq!(assets.skybox_dir(), Path::new("data/textures/skybox"));
    }

    #[test]
    fn every_program_shader_is_embedded() {
        for name in [
            "basic.vert",
            "basic.frag",
            "texture.vert",
            "texture.frag",
            "camera.vert",
            "camera.frag",
            "model.vert",
            "model.frag",
            "lighting_phong.vert",
            "lighting_phong.frag",
            "lighting_blinn_phong.frag",
            "lighting_phong_materials.vert",
            "lighting_phong_materials.frag",
            "shadow_lighting.vert",
            "shadow_lighting.frag",
            "shadow.vert",
            "shadow.frag",
            "bulb.vert",
            "bulb.frag",
            "skybox.vert",
            "skybox.frag",
        ] {
            let source = embedded_shader(name).unwrap();
            assert!(source.starts_with("#version 330 core"), "{name}");
        }
    }

    #[test]
    fn missing_root_falls_back_to_embedded() {
        let assets = Assets::new("/definitely/not/here");
        let source = assets.read_shader("basic.vert").unwrap();
        assert_eq!(source, embedded_shader("basic.vert").unwrap());
    }

    #[test]
    fn unknown_shader_is_an_error() {
        let assets = Assets::new("/definitely/not/here");
        assert!(assets.read_shader("nope.frag").is_err());
    }
}
