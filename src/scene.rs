use crate::{
    algebra::{vec3_from_array, Vec3},
    camera::Camera,
    config::{MarchConfig, RenderConfig},
    error::{Error, Result},
    light::Light,
    material::Material,
    plane::{Plane, PlaneSdf},
    shape::Shape,
    sphere::Sphere,
};
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Deserialize)]
struct CameraJson {
    #[serde(deserialize_with = "vec3_from_array")]
    pos: Vec3,
    look_at_depth: f64,
    fov: f64,
}

#[derive(Deserialize)]
struct MaterialJson {
    #[serde(deserialize_with = "vec3_from_array")]
    rgb: Vec3,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ObjectJson {
    Sphere { sphere: SphereDesc },
    Plane { plane: PlaneDesc },
}

#[derive(Deserialize)]
struct SphereDesc {
    name: String,
    #[serde(deserialize_with = "vec3_from_array")]
    center: Vec3,
    radius: f64,
    mat: String,
}

#[derive(Deserialize)]
struct PlaneDesc {
    name: String,
    #[serde(deserialize_with = "vec3_from_array")]
    point: Vec3,
    #[serde(deserialize_with = "vec3_from_array")]
    normal: Vec3,
    #[serde(default)]
    sdf: PlaneSdf,
    mat: String,
}

#[derive(Deserialize)]
struct LightJson {
    #[serde(deserialize_with = "vec3_from_array")]
    pos: Vec3,
}

#[derive(Deserialize)]
struct SceneFile {
    camera: CameraJson,
    #[serde(default)]
    render: RenderConfig,
    #[serde(default)]
    march: MarchConfig,
    #[serde(default)]
    materials: HashMap<String, MaterialJson>,
    #[serde(default)]
    objects: Vec<ObjectJson>,
    #[serde(default)]
    lights: Vec<LightJson>,
}

/// Lights and shapes, read-only for the whole render.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub lights: Vec<Light>,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(lights: Vec<Light>, shapes: Vec<Shape>) -> Self {
        Self { lights, shapes }
    }
}

/// Everything a scene file describes.
#[derive(Clone, Debug)]
pub struct SceneSetup {
    pub camera: Camera,
    pub render: RenderConfig,
    pub march: MarchConfig,
    pub scene: Scene,
}

impl SceneSetup {
    /// Blue ball resting above a magenta floor, lit from the upper left.
    pub fn default_scene() -> Self {
        let ball = Sphere {
            name: "ball".into(),
            center: Vec3(0.0, 1.0, -6.0),
            radius: 1.0,
            material: Material::new(Vec3(0.0, 0.0, 1.0)),
        };
        let floor = Plane {
            name: "floor".into(),
            point: Vec3::ZERO,
            normal: Vec3(0.0, 1.0, 0.0),
            sdf: PlaneSdf::Anchored,
            material: Material::FALLBACK,
        };
        Self {
            camera: Camera::new(Vec3(0.0, 1.0, 0.0), -1.0, 45.0),
            render: RenderConfig::default(),
            march: MarchConfig::default(),
            scene: Scene::new(
                vec![Light { pos: Vec3(-2.0, 5.0, -3.0) }],
                vec![ball.into(), floor.into()],
            ),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fov = self.camera.fov;
        if fov.is_nan() || fov <= 0.0 || fov >= 180.0 {
            return Err(Error::InvalidConfig(format!(
                "camera.fov must lie in (0, 180), got {fov}"
            )));
        }
        self.render.validate()?;
        self.march.validate()
    }
}

pub fn load(path: impl AsRef<Path>) -> Result<SceneSetup> {
    let data = std::fs::read_to_string(path)?;
    parse(&data)
}

pub fn parse(data: &str) -> Result<SceneSetup> {
    let file: SceneFile = serde_json::from_str(data)?;

    // 1. Create a library of materials from the JSON
    let materials: HashMap<String, Material> = file
        .materials
        .into_iter()
        .map(|(name, m)| (name, Material::new(m.rgb)))
        .collect();

    let material_for = |owner: &str, name: &str| -> Material {
        materials.get(name).copied().unwrap_or_else(|| {
            warn!("object '{owner}' references unknown material '{name}', using fallback");
            Material::FALLBACK
        })
    };

    // 2. Create shapes and assign materials from the library by name
    let mut shapes = Vec::with_capacity(file.objects.len());
    for o in file.objects {
        match o {
            ObjectJson::Sphere { sphere } => {
                if sphere.radius.is_nan() || sphere.radius < 0.0 {
                    return Err(Error::InvalidConfig(format!(
                        "sphere '{}' has negative radius {}",
                        sphere.name, sphere.radius
                    )));
                }
                let material = material_for(&sphere.name, &sphere.mat);
                shapes.push(Shape::Sphere(Sphere {
                    name: sphere.name,
                    center: sphere.center,
                    radius: sphere.radius,
                    material,
                }));
            }
            ObjectJson::Plane { plane } => {
                if plane.normal.norm() == 0.0 {
                    return Err(Error::InvalidConfig(format!(
                        "plane '{}' has a zero normal",
                        plane.name
                    )));
                }
                let material = material_for(&plane.name, &plane.mat);
                shapes.push(Shape::Plane(Plane {
                    name: plane.name,
                    point: plane.point,
                    normal: plane.normal.normalize(),
                    sdf: plane.sdf,
                    material,
                }));
            }
        }
    }

    let lights = file.lights.iter().map(|l| Light { pos: l.pos }).collect();

    let setup = SceneSetup {
        camera: Camera::new(file.camera.pos, file.camera.look_at_depth, file.camera.fov),
        render: file.render,
        march: file.march,
        scene: Scene::new(lights, shapes),
    };
    setup.validate()?;
    Ok(setup)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "camera": { "pos": [0, 1, 0], "look_at_depth": -1, "fov": 45 },
        "render": { "width": 64, "height": 32, "samples": 4, "seed": 11 },
        "march": { "max_steps": 500 },
        "materials": { "blue": { "rgb": [0, 0, 1] } },
        "objects": [
            { "sphere": { "name": "ball", "center": [0, 1, -6], "radius": 1, "mat": "blue" } },
            { "plane": { "name": "floor", "point": [0, 0, 0], "normal": [0, 2, 0], "mat": "missing", "sdf": "offset" } }
        ],
        "lights": [ { "pos": [-2, 5, -3] } ]
    }"#;

    #[test]
    fn parses_full_scene() {
        let setup = parse(SCENE).unwrap();
        assert_eq!(setup.render.width, 64);
        assert_eq!(setup.render.seed, Some(11));
        assert_eq!(setup.march.max_steps, 500);
        assert_eq!(setup.march.sun_size, 8.0);
        assert_eq!(setup.camera.position, Vec3(0.0, 1.0, 0.0));
        assert_eq!(setup.scene.lights, vec![Light { pos: Vec3(-2.0, 5.0, -3.0) }]);
        assert_eq!(setup.scene.shapes.len(), 2);

        match &setup.scene.shapes[0] {
            Shape::Sphere(s) => assert_eq!(s.material.color, Vec3(0.0, 0.0, 1.0)),
            other => panic!("expected sphere, got {other:?}"),
        }
        match &setup.scene.shapes[1] {
            Shape::Plane(p) => {
                assert_eq!(p.normal, Vec3(0.0, 1.0, 0.0));
                assert_eq!(p.sdf, PlaneSdf::Offset);
                assert_eq!(p.material, Material::FALLBACK);
            }
            other => panic!("expected plane, got {other:?}"),
        }
    }

    #[test]
    fn optional_sections_default() {
        let setup = parse(r#"{ "camera": { "pos": [0, 0, 0], "look_at_depth": -1, "fov": 60 } }"#)
            .unwrap();
        assert!(setup.scene.shapes.is_empty());
        assert!(setup.scene.lights.is_empty());
        assert_eq!(setup.render, RenderConfig::default());
        assert_eq!(setup.march, MarchConfig::default());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse("{ not json"), Err(Error::Json(_))));
        let bad_fov = r#"{ "camera": { "pos": [0, 0, 0], "look_at_depth": -1, "fov": 180 } }"#;
        assert!(matches!(parse(bad_fov), Err(Error::InvalidConfig(_))));
        let bad_plane = r#"{
            "camera": { "pos": [0, 0, 0], "look_at_depth": -1, "fov": 45 },
            "objects": [ { "plane": { "name": "p", "point": [0, 0, 0], "normal": [0, 0, 0], "mat": "x" } } ]
        }"#;
        assert!(matches!(parse(bad_plane), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(load("does/not/exist.json"), Err(Error::Io(_))));
    }

    #[test]
    fn default_scene_is_valid() {
        let setup = SceneSetup::default_scene();
        assert!(setup.validate().is_ok());
        assert_eq!(setup.scene.shapes.len(), 2);
        assert_eq!(setup.scene.shapes[0].name(), "ball");
    }
}
