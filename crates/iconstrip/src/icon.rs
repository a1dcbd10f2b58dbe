//! Icon handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use iconstrip_render::ImageKey;

static NEXT_IMAGE_KEY: AtomicU64 = AtomicU64::new(1);

/// An image presented as one selectable element of a strip.
///
/// The image itself belongs to the host application; an icon only carries its
/// [`ImageKey`] and a display name. Two icons are the same icon exactly when
/// their keys match. Cloning is cheap.
#[derive(Clone)]
pub struct Icon {
    key: ImageKey,
    name: Arc<str>,
}

impl Icon {
    /// Create an icon with a freshly allocated, process-unique key.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let key = ImageKey(NEXT_IMAGE_KEY.fetch_add(1, Ordering::Relaxed));
        Self::with_key(key, name)
    }

    /// Create an icon for an image the host already has a key for.
    pub fn with_key(key: ImageKey, name: impl Into<Arc<str>>) -> Self {
        Self {
            key,
            name: name.into(),
        }
    }

    /// The image key.
    #[inline]
    pub fn key(&self) -> ImageKey {
        self.key
    }

    /// The display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Icon {}

impl Hash for Icon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Icon({:?}, #{})", self.name, self.key.0)
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
