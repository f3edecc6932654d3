use blendview_common::{Color, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or saving a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("duplicate draw item name: {0}")]
    DuplicateName(String),
}

/// Primitive mesh kinds the demo draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Horizontal quad in the XZ plane.
    Plane,
    /// Unit cube.
    Cuboid,
    /// Upright quad in the XY plane, used for sprites and windows.
    Square,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Plane => "plane",
            Shape::Cuboid => "cuboid",
            Shape::Square => "square",
        }
    }
}

/// Texture addressing outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureWrap {
    #[default]
    Repeat,
    /// Required for sprites with transparent borders so edges don't bleed.
    ClampToEdge,
}

fn unit_uv() -> [f32; 2] {
    [1.0, 1.0]
}

/// One draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub transform: Transform,
    /// Texture path, used for both diffuse and specular maps.
    pub texture: String,
    #[serde(default)]
    pub wrap: TextureWrap,
    #[serde(default = "unit_uv")]
    pub uv_scale: [f32; 2],
    /// Highlight color drawn around the item, if any.
    #[serde(default)]
    pub outline: Option<Color>,
    /// Alpha-blended items must be drawn after everything they cover.
    #[serde(default)]
    pub transparent: bool,
}

impl DrawItem {
    pub fn new(
        name: impl Into<String>,
        shape: Shape,
        transform: Transform,
        texture: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            transform,
            texture: texture.into(),
            wrap: TextureWrap::Repeat,
            uv_scale: unit_uv(),
            outline: None,
            transparent: false,
        }
    }

    pub fn with_wrap(mut self, wrap: TextureWrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_uv_scale(mut self, s: f32, t: f32) -> Self {
        self.uv_scale = [s, t];
        self
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = Some(color);
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }
}

/// Ordered draw list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    items: Vec<DrawItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The blending demo: metal floor, two outlined marble cubes, two grass
    /// sprites and a transparent window, in draw order.
    pub fn demo() -> Self {
        let grass = |name: &str, position: Vec3| {
            DrawItem::new(
                name,
                Shape::Square,
                Transform::at(position).with_scale(Vec3::splat(0.5)),
                "assets/grass.png",
            )
            .with_wrap(TextureWrap::ClampToEdge)
            .transparent()
        };

        Self {
            items: vec![
                DrawItem::new(
                    "floor",
                    Shape::Plane,
                    Transform::default().with_scale(Vec3::splat(5.0)),
                    "assets/metal.png",
                )
                .with_uv_scale(2.0, 2.0),
                DrawItem::new(
                    "cube-1",
                    Shape::Cuboid,
                    Transform::at(Vec3::new(-1.0, 0.51, -1.0)),
                    "assets/marble.jpg",
                )
                .with_outline(Color::rgb(0.99, 0.58, 0.03)),
                DrawItem::new(
                    "cube-2",
                    Shape::Cuboid,
                    Transform::at(Vec3::new(2.0, 0.51, 0.0)),
                    "assets/marble.jpg",
                )
                .with_outline(Color::rgb(0.04, 0.28, 0.26)),
                grass("grass-1", Vec3::new(-1.5, 0.25, -0.48)),
                grass("grass-2", Vec3::new(-1.0, 0.25, -0.2)),
                DrawItem::new(
                    "window",
                    Shape::Square,
                    Transform::at(Vec3::new(-1.5, 0.5, 0.1)),
                    "assets/blending_transparent_window.png",
                )
                .with_wrap(TextureWrap::ClampToEdge)
                .transparent(),
            ],
        }
    }

    /// Append a draw item. Names must be unique.
    pub fn push(&mut self, item: DrawItem) -> Result<(), SceneError> {
        if self.get(&item.name).is_some() {
            return Err(SceneError::DuplicateName(item.name));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items that get an outline pass.
    pub fn outlined(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(|item| item.outline.is_some())
    }

    /// Parse a scene from YAML (`items: [...]`).
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SceneError> {
        let parsed: Scene = serde_yaml::from_str(yaml)?;
        // Re-insert through `push` so duplicate names are rejected.
        let mut scene = Self::new();
        for item in parsed.items {
            scene.push(item)?;
        }
        Ok(scene)
    }

    pub fn to_yaml_string(&self) -> Result<String, SceneError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let scene = Self::from_yaml_str(&yaml)?;
        tracing::info!(path = %path.display(), items = scene.len(), "scene loaded");
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}
