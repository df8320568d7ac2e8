/// Gallery modal state machine
///
/// The gallery is either closed or open on one item. While open it keeps its
/// own copy of the item's image list and the index of the image on screen.
///
/// ```text
/// Closed --open--> Open(key, images, 0)
/// Open --show_index(i)--> Open(key, images, i)   only if i < len
/// Open --next/previous--> Open(key, images, i +/- 1 mod len)
/// Open --close--> Closed
/// ```
use tracing::debug;

use super::data::Item;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gallery {
    #[default]
    Closed,
    Open(OpenGallery),
}

/// Transient state of an open gallery
#[derive(Debug, Clone, PartialEq)]
pub struct OpenGallery {
    key: String,
    images: Vec<String>,
    index: usize,
}

impl OpenGallery {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The image on screen, `None` when the item has no images
    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Previous/next controls are only shown when there is somewhere to go
    pub fn nav_visible(&self) -> bool {
        self.images.len() > 1
    }
}

impl Gallery {
    /// Open the gallery on an item, starting at its cover image
    pub fn open(&mut self, key: &str, item: &Item) {
        debug!("Opening gallery for {} ({} images)", key, item.images.len());
        *self = Gallery::Open(OpenGallery {
            key: key.to_string(),
            images: item.images.clone(),
            index: 0,
        });
    }

    /// Jump to an image. Out of range indices are ignored.
    pub fn show_index(&mut self, index: usize) {
        if let Gallery::Open(open) = self {
            if index < open.images.len() {
                open.index = index;
            }
        }
    }

    pub fn next(&mut self) {
        if let Gallery::Open(open) = self {
            let len = open.images.len();
            if len > 1 {
                open.index = (open.index + 1) % len;
            }
        }
    }

    pub fn previous(&mut self) {
        if let Gallery::Open(open) = self {
            let len = open.images.len();
            if len > 1 {
                open.index = (open.index + len - 1) % len;
            }
        }
    }

    /// Close and drop all transient state
    pub fn close(&mut self) {
        *self = Gallery::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Gallery::Open(_))
    }

    pub fn as_open(&self) -> Option<&OpenGallery> {
        match self {
            Gallery::Open(open) => Some(open),
            Gallery::Closed => None,
        }
    }
}
