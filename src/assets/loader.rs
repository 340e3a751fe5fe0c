use cgmath::{Matrix4, Rad, Vector3};
use futures::future::join_all;
use log::{error, info};

use crate::gfx::geometry::{fit_within, generate_panel_quad};
use crate::gfx::scene::{Mesh, Node, NodeId, Scene};
use crate::interact::registry::{ObjectMetadata, ObjectRegistry, PictureData, VideoHandle};

use super::AssetError;

/// Placement applied to a loaded asset's root node
#[derive(Debug, Clone, Copy)]
pub struct AssetTransform {
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied Y then X then Z
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl AssetTransform {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_scale(self.scale)
    }
}

impl Default for AssetTransform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

/// Parameters for loading the exhibition hall model
pub struct HallParams {
    /// Path to the OBJ model
    pub url: String,
    pub transform: AssetTransform,
    /// Name of the walkable floor node inside the model
    pub floor_name: String,
    /// Invoked with load progress in 0.0 ..= 1.0
    pub on_progress: Option<Box<dyn Fn(f32)>>,
}

/// One picture panel to hang in the hall
pub struct PictureItem {
    pub data: PictureData,
    pub transform: AssetTransform,
}

/// One video panel to hang in the hall
pub struct VideoItem {
    pub id: String,
    pub url: String,
    pub transform: AssetTransform,
    /// Width/height ratio of the stream; 16:9 when not declared
    pub aspect: Option<f32>,
}

/// Loads the hall model, adds it to the scene, and registers its floor
///
/// Every mesh in the model becomes a child node of one hall root node
/// carrying the requested transform. The floor child is located by
/// `floor_name` and registered as the navigation target; the hall root is
/// registered without semantic metadata so its walls participate in ray
/// occlusion.
pub async fn load_hall(
    scene: &mut Scene,
    registry: &mut ObjectRegistry,
    params: HallParams,
) -> Result<NodeId, AssetError> {
    if let Some(progress) = &params.on_progress {
        progress(0.0);
    }

    let (models, _materials) = tobj::load_obj(
        &params.url,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| AssetError::Model {
        path: params.url.clone(),
        source,
    })?;

    if let Some(progress) = &params.on_progress {
        progress(0.5);
    }

    let hall = scene.add_child(
        scene.root(),
        Node::new("hall").with_transform(params.transform.matrix()),
    );

    for (i, model) in models.into_iter().enumerate() {
        let name = if model.name.is_empty() {
            format!("mesh_{i}")
        } else {
            model.name
        };
        let mesh = Mesh::new(model.mesh.positions, model.mesh.normals, model.mesh.indices);
        scene.add_child(hall, Node::new(name).with_mesh(mesh));
    }

    registry.register(hall, ObjectMetadata::None);

    let floor = scene
        .find_by_name(hall, &params.floor_name)
        .ok_or_else(|| AssetError::MissingFloor {
            name: params.floor_name.clone(),
        })?;
    registry.register(floor, ObjectMetadata::Floor);

    if let Some(progress) = &params.on_progress {
        progress(1.0);
    }
    info!("hall model '{}' loaded, floor '{}'", params.url, params.floor_name);
    Ok(hall)
}

/// Loads a batch of picture panels, best effort
///
/// Image headers are decoded concurrently; panels whose image fails to
/// decode are logged and skipped. Returns the nodes of the panels that
/// made it into the scene.
pub async fn load_pictures(
    scene: &mut Scene,
    registry: &mut ObjectRegistry,
    max_panel_size: f32,
    items: Vec<PictureItem>,
) -> Vec<NodeId> {
    let decodes = items.into_iter().map(|item| async move {
        let dimensions =
            image::image_dimensions(&item.data.url).map_err(|source| AssetError::Image {
                path: item.data.url.clone(),
                source,
            })?;
        Ok::<(PictureItem, (u32, u32)), AssetError>((item, dimensions))
    });

    let mut loaded = Vec::new();
    for result in join_all(decodes).await {
        match result {
            Ok((item, (source_w, source_h))) => {
                let (width, height) = fit_within(source_w, source_h, max_panel_size);
                let mesh = Mesh::from_geometry(generate_panel_quad(width, height));
                let node = scene.add_child(
                    scene.root(),
                    Node::new(format!("picture:{}", item.data.id))
                        .with_mesh(mesh)
                        .with_transform(item.transform.matrix()),
                );
                registry.register(node, ObjectMetadata::Picture(item.data));
                loaded.push(node);
            }
            Err(err) => {
                error!("skipping picture panel: {err}");
            }
        }
    }
    loaded
}

/// Loads a batch of video panels, best effort
///
/// Video containers are not probed here; the panel is sized from the item's
/// declared aspect ratio and the stream itself stays with the playback
/// collaborator.
pub async fn load_videos(
    scene: &mut Scene,
    registry: &mut ObjectRegistry,
    max_panel_size: f32,
    items: Vec<VideoItem>,
) -> Vec<NodeId> {
    let mut loaded = Vec::new();
    for item in items {
        let aspect = item.aspect.unwrap_or(16.0 / 9.0).max(f32::EPSILON);
        let (width, height) = if aspect >= 1.0 {
            (max_panel_size, max_panel_size / aspect)
        } else {
            (max_panel_size * aspect, max_panel_size)
        };

        let mesh = Mesh::from_geometry(generate_panel_quad(width, height));
        let node = scene.add_child(
            scene.root(),
            Node::new(format!("video:{}", item.id))
                .with_mesh(mesh)
                .with_transform(item.transform.matrix()),
        );
        registry.register(
            node,
            ObjectMetadata::Video {
                handle: VideoHandle(item.url),
                playing: false,
            },
        );
        loaded.push(node);
    }
    loaded
}
