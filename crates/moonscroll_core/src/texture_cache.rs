//! Asynchronous texture loading
//!
//! Texture requests are fire-and-forget: [`TextureCache::request`] hands back a
//! [`TextureHandle`] immediately and decodes the file on a worker thread. Finished
//! decodes are collected on the caller's thread by [`TextureCache::poll`], so the
//! scene is never touched from the workers.
//!
//! - Requests are deduplicated by path
//! - Handle IDs are assigned sequentially starting from 1
//! - A failed load is logged once and leaves the texture in the `Failed` state

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::asset_error::AssetError;

/// Unique identifier for a texture in the cache
pub type TextureId = u64;

/// A lightweight handle to a requested texture
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct TextureHandle {
    id: TextureId,
    path: PathBuf,
}

impl TextureHandle {
    /// Get the texture ID
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Get the file path this texture was requested from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decoded RGBA8 pixels (sRGB encoded, row-major, no padding)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// A single-pixel texture of the given colour
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Read and decode an image file
    pub fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }
}

/// Load state of a texture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureStatus {
    /// Decode still running
    Pending,
    /// Pixels available through [`TextureCache::get`]
    Ready,
    /// Load failed; renderers fall back to their default texture
    Failed,
}

enum Slot {
    Pending,
    Ready(Arc<TextureData>),
    Failed,
}

type LoadResult = (TextureId, Result<TextureData, AssetError>);

/// Cache of textures decoded on worker threads
pub struct TextureCache {
    slots: HashMap<TextureId, Slot>,
    path_index: HashMap<PathBuf, TextureHandle>,
    next_id: TextureId,
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            slots: HashMap::new(),
            path_index: HashMap::new(),
            next_id: 1, // 0 is never handed out
            sender,
            receiver,
        }
    }

    /// Start loading `path`, or return the existing handle if it was already requested
    pub fn request(&mut self, path: impl AsRef<Path>) -> TextureHandle {
        let path = path.as_ref().to_path_buf();

        if let Some(handle) = self.path_index.get(&path) {
            return handle.clone();
        }

        let id = self.next_id;
        self.next_id += 1;
        let handle = TextureHandle { id, path: path.clone() };

        self.slots.insert(id, Slot::Pending);
        self.path_index.insert(path.clone(), handle.clone());

        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("texture-{}", id))
            .spawn(move || {
                let result = TextureData::load_from_file(&path);
                // The cache may have been dropped while decoding; nothing to report then
                let _ = sender.send((id, result));
            });

        if let Err(err) = spawned {
            log::warn!("Could not start loader for {}: {}", handle.path.display(), err);
            self.slots.insert(id, Slot::Failed);
        } else {
            log::debug!("Requested texture {} ({})", id, handle.path.display());
        }

        handle
    }

    /// Collect finished loads without blocking
    ///
    /// Returns the handles whose state changed.
    pub fn poll(&mut self) -> Vec<TextureHandle> {
        let finished: Vec<LoadResult> = self.receiver.try_iter().collect();
        finished
            .into_iter()
            .filter_map(|(id, result)| self.store(id, result))
            .collect()
    }

    /// Block until no request is pending or `timeout` elapses
    ///
    /// Returns `true` if every request settled in time.
    pub fn wait_all(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending_count() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok((id, result)) => {
                    self.store(id, result);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                // Unreachable while we hold a sender, kept for completeness
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn store(&mut self, id: TextureId, result: Result<TextureData, AssetError>) -> Option<TextureHandle> {
        let handle = self.path_index.values().find(|h| h.id == id)?.clone();
        match result {
            Ok(data) => {
                log::info!(
                    "Loaded texture {} ({}x{})",
                    handle.path.display(),
                    data.width,
                    data.height
                );
                self.slots.insert(id, Slot::Ready(Arc::new(data)));
            }
            Err(err) => {
                log::warn!("Failed to load texture {}: {}", handle.path.display(), err);
                self.slots.insert(id, Slot::Failed);
            }
        }
        Some(handle)
    }

    /// Current state of a texture, `None` for handles from another cache
    pub fn status(&self, handle: &TextureHandle) -> Option<TextureStatus> {
        self.slots.get(&handle.id).map(|slot| match slot {
            Slot::Pending => TextureStatus::Pending,
            Slot::Ready(_) => TextureStatus::Ready,
            Slot::Failed => TextureStatus::Failed,
        })
    }

    /// Decoded pixels, if the texture finished loading
    pub fn get(&self, handle: &TextureHandle) -> Option<Arc<TextureData>> {
        match self.slots.get(&handle.id)? {
            Slot::Ready(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }

    /// Number of requests still decoding
    pub fn pending_count(&self) -> usize {
        self.slots.values().filter(|s| matches!(s, Slot::Pending)).count()
    }

    /// Number of distinct textures requested
    pub fn texture_count(&self) -> usize {
        self.slots.len()
    }
}
