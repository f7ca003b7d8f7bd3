use std::collections::HashMap;
use std::sync::Arc;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

use crate::item::ItemId;

struct CachedTexture {
    handle: TextureHandle,
    /// Pixels the texture was uploaded from
    source: Arc<ColorImage>,
    last_used: u64,
}

/// Uploads image items to the GPU once and keeps the textures around while
/// the items are painted.
pub struct TextureManager {
    textures: HashMap<ItemId, CachedTexture>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of textures to cache
    max_cache_size: usize,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.textures.len())
            .field("current_frame", &self.current_frame)
            .finish()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new(64)
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            textures: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Returns the texture for an image item, uploading `pixels` if the item
    /// has no texture yet or its pixels changed.
    pub fn get_or_create(&mut self, id: ItemId, pixels: &Arc<ColorImage>, ctx: &Context) -> TextureId {
        if let Some(cached) = self.textures.get_mut(&id) {
            if Arc::ptr_eq(&cached.source, pixels) {
                cached.last_used = self.current_frame;
                return cached.handle.id();
            }
        }

        self.textures.remove(&id);
        self.prune_cache_if_needed();
        let name = format!("item_{}", id.raw());
        let handle = ctx.load_texture(name, ColorImage::clone(pixels), TextureOptions::LINEAR);
        let texture_id = handle.id();
        self.textures.insert(
            id,
            CachedTexture {
                handle,
                source: Arc::clone(pixels),
                last_used: self.current_frame,
            },
        );
        texture_id
    }

    /// Frees textures of items that were not painted in the current frame.
    pub fn end_frame(&mut self) {
        let frame = self.current_frame;
        self.textures.retain(|_, cached| cached.last_used == frame);
    }

    fn prune_cache_if_needed(&mut self) {
        while self.textures.len() >= self.max_cache_size.max(1) {
            let oldest = self
                .textures
                .iter()
                .min_by_key(|(_, cached)| cached.last_used)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    self.textures.remove(&id);
                }
                None => break,
            }
        }
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }
}
