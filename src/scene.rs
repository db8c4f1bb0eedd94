//! Scene: named models, the camera, a background and optional terrain.
//!
//! `render` is the per-frame entry point. It validates everything first, so a
//! model without a shader or with a broken face fails the frame before the
//! image is touched.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::math::DVec3;
use crate::meshing::Model;
use crate::perf_scope;
use crate::rendering::{Image, Rasterizer, RenderStats};
use crate::terrain::Chunker;
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Scene {
    models: BTreeMap<String, Model>,
    pub camera: Camera,
    /// Clear color, linear 0..1 RGB.
    pub background: DVec3,
    pub chunker: Option<Chunker>,
}

impl Scene {
    pub fn new(camera: Camera, background: DVec3) -> Self {
        Self {
            models: BTreeMap::new(),
            camera,
            background,
            chunker: None,
        }
    }

    /// Camera, background and (if configured) a terrain chunker fogging
    /// towards the background.
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let background = config.background_color();
        let mut scene = Self::new(Camera::from_config(&config.camera), background);
        if let Some(chunker) = &config.chunker {
            scene.chunker = Some(Chunker::from_config(chunker.clone(), background)?);
        }
        Ok(scene)
    }

    pub fn with_chunker(mut self, chunker: Chunker) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Insert a model under its id. Ids are unique.
    pub fn add_model(&mut self, model: Model) -> Result<(), RenderError> {
        if self.models.contains_key(model.id()) {
            return Err(RenderError::DuplicateModel {
                id: model.id().to_string(),
            });
        }
        debug!(id = model.id(), triangles = model.triangle_count(), "added model");
        self.models.insert(model.id().to_string(), model);
        Ok(())
    }

    pub fn model(&self, id: &str) -> Result<&Model, RenderError> {
        self.models.get(id).ok_or_else(|| unknown(id))
    }

    pub fn model_mut(&mut self, id: &str) -> Result<&mut Model, RenderError> {
        self.models.get_mut(id).ok_or_else(|| unknown(id))
    }

    pub fn remove_model(&mut self, id: &str) -> Result<Model, RenderError> {
        let model = self.models.remove(id).ok_or_else(|| unknown(id))?;
        debug!(id, "removed model");
        Ok(model)
    }

    pub fn contains_model(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Model ids in render order.
    pub fn model_ids(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Render one frame into `image`.
    ///
    /// Clears to the background, draws the named models in id order, then
    /// streams the terrain window around the camera and draws it.
    pub fn render(
        &mut self,
        rasterizer: &mut Rasterizer,
        image: &mut Image,
    ) -> Result<RenderStats, RenderError> {
        perf_scope!("scene_render");

        for model in self.models.values() {
            model.validate()?;
        }

        rasterizer.begin_frame();
        image.clear(self.background);

        for model in self.models.values() {
            rasterizer.render_model(model, &self.camera, image)?;
        }

        if let Some(chunker) = &mut self.chunker {
            let active = chunker.update(self.camera.position());
            for chunk in active {
                rasterizer.render_model(chunk, &self.camera, image)?;
            }
        }

        let stats = rasterizer.end_frame();
        trace!(
            models = self.models.len(),
            chunks = self.chunker.as_ref().map_or(0, |c| c.active().len()),
            pixels_written = stats.pixels_written,
            "scene rendered"
        );
        Ok(stats)
    }
}

fn unknown(id: &str) -> RenderError {
    RenderError::UnknownModel { id: id.to_string() }
}
