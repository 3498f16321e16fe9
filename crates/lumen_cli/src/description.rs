//! JSON scene descriptions.
//!
//! A description lists objects in insertion order, optional render settings
//! and an optional camera override. Command-line flags take precedence over
//! the file's render settings.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lumen_renderer::{
    Camera, Color, Glossy, Plane, RenderConfig, Scene, Sphere, Vec3, DEFAULT_FOCAL_LENGTH,
    DEFAULT_ORIGIN,
};
use serde::{Deserialize, Serialize};

use crate::args::Args;

/// Worker count used when neither the command line nor the scene sets one.
pub const DEFAULT_THREADS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: Option<CameraDescription>,
    #[serde(default)]
    pub render: RenderSettings,
    pub objects: Vec<ObjectDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDescription {
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    #[serde(default = "default_focal_length")]
    pub focal_length: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ObjectDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        #[serde(default)]
        material: MaterialDescription,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        #[serde(default)]
        material: MaterialDescription,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDescription {
    pub albedo: [f32; 3],
    #[serde(default = "default_roughness")]
    pub roughness: f32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            albedo: [1.0, 1.0, 1.0],
            roughness: default_roughness(),
        }
    }
}

impl From<MaterialDescription> for Glossy {
    fn from(desc: MaterialDescription) -> Self {
        Glossy::new(Color::from_array(desc.albedo), desc.roughness)
    }
}

fn default_origin() -> [f32; 3] {
    DEFAULT_ORIGIN.to_array()
}

fn default_focal_length() -> f32 {
    DEFAULT_FOCAL_LENGTH
}

fn default_roughness() -> f32 {
    1.0
}

impl SceneDescription {
    /// Read a description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid scene file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Three spheres on a gray ground plane: blue diffuse, white mirror and
    /// near-black glossy.
    pub fn demo() -> Self {
        let sphere = |center: [f32; 3], albedo: [f32; 3], roughness: f32| ObjectDescription::Sphere {
            center,
            radius: 0.5,
            material: MaterialDescription { albedo, roughness },
        };

        Self {
            camera: None,
            render: RenderSettings::default(),
            objects: vec![
                sphere([-1.0, 0.5, -1.0], [0.1, 0.2, 0.5], 1.0),
                sphere([0.0, 0.5, -1.5], [1.0, 1.0, 1.0], 0.0),
                sphere([1.0, 0.5, -1.0], [0.01, 0.01, 0.01], 0.05),
                ObjectDescription::Plane {
                    point: [0.0, 0.0, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    material: MaterialDescription {
                        albedo: [0.5, 0.5, 0.5],
                        roughness: 1.0,
                    },
                },
            ],
        }
    }

    /// Resolve render settings: command line, then file, then defaults.
    pub fn render_config(&self, args: &Args) -> RenderConfig {
        let defaults = RenderConfig::default();
        let file = &self.render;

        RenderConfig {
            width: args.width.or(file.width).unwrap_or(defaults.width),
            height: args.height.or(file.height).unwrap_or(defaults.height),
            max_depth: args.max_depth.or(file.max_depth).unwrap_or(defaults.max_depth),
            samples_per_pixel: args.samples.or(file.samples).unwrap_or(defaults.samples_per_pixel),
            seed: args.seed.or(file.seed).unwrap_or(defaults.seed),
            workers: Some(args.threads.or(file.threads).unwrap_or(DEFAULT_THREADS)),
        }
    }

    /// Assemble a renderable scene, rejecting degenerate geometry.
    pub fn build(&self, config: RenderConfig) -> Result<Scene> {
        let (width, height) = (config.width, config.height);
        let mut scene = Scene::with_config(config);

        if let Some(camera) = &self.camera {
            scene = scene.with_camera(Camera::looking_from(
                width,
                height,
                Vec3::from_array(camera.origin),
                camera.focal_length,
            ));
        }

        for (index, object) in self.objects.iter().enumerate() {
            match *object {
                ObjectDescription::Sphere {
                    center,
                    radius,
                    material,
                } => {
                    if !(radius > 0.0) {
                        bail!("Object {index}: sphere radius must be positive, got {radius}");
                    }
                    scene.add(Sphere::new(Vec3::from_array(center), radius, Glossy::from(material)));
                }
                ObjectDescription::Plane {
                    point,
                    normal,
                    material,
                } => {
                    let normal = Vec3::from_array(normal);
                    if normal.length_squared() < 1e-12 {
                        bail!("Object {index}: plane normal must be non-zero");
                    }
                    scene.add(Plane::new(Vec3::from_array(point), normal, Glossy::from(material)));
                }
            }
        }

        log::debug!("Built scene with {} objects", scene.len());
        Ok(scene)
    }
}
