//! Full-screen image preview with wrap-around navigation.
//!
//! The carousel walks the image-type subsequence of the current listing's
//! files, in listing order. It keeps only the previewed entry; the ordering is
//! re-derived from whatever listing is current at each step.

use crate::models::{FileEntry, Listing};

/// Step direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Keys the carousel reacts to while open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselKey {
    Step(Direction),
    Close,
}

impl CarouselKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Step(Direction::Previous)),
            "ArrowRight" => Some(Self::Step(Direction::Next)),
            "Escape" => Some(Self::Close),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarouselNavigator {
    target: Option<FileEntry>,
}

impl CarouselNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&FileEntry> {
        self.target.as_ref()
    }

    /// Open on `entry` if it is an image in `listing`.
    pub fn open(&mut self, entry: &FileEntry, listing: &Listing) -> bool {
        match listing.images().into_iter().find(|f| f.id == entry.id) {
            Some(found) => {
                self.target = Some(found.clone());
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.target = None;
    }

    /// Move one image forward or back, wrapping at both ends.
    ///
    /// No-op with fewer than two images or when the target has vanished from
    /// the listing.
    pub fn step(&mut self, direction: Direction, listing: &Listing) {
        let Some(target) = &self.target else {
            return;
        };
        let images = listing.images();
        let len = images.len();
        if len <= 1 {
            return;
        }
        let Some(current) = images.iter().position(|f| f.id == target.id) else {
            return;
        };
        let next = (current as isize + direction.offset()).rem_euclid(len as isize) as usize;
        self.target = Some(images[next].clone());
    }

    /// Handle a key press. Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: &str, listing: &Listing) -> bool {
        if !self.is_open() {
            return false;
        }
        match CarouselKey::from_key(key) {
            Some(CarouselKey::Step(direction)) => {
                self.step(direction, listing);
                true
            }
            Some(CarouselKey::Close) => {
                self.close();
                true
            }
            None => false,
        }
    }

    /// Re-check the target against a freshly applied listing. Closes the
    /// preview if the target is gone, otherwise picks up the new copy.
    /// Returns `true` if the preview was closed.
    pub fn revalidate(&mut self, listing: &Listing) -> bool {
        let Some(target) = &self.target else {
            return false;
        };
        match listing.images().into_iter().find(|f| f.id == target.id) {
            Some(found) => {
                self.target = Some(found.clone());
                false
            }
            None => {
                self.target = None;
                true
            }
        }
    }

    /// One-based position and image count, for the "(2 / 5)" caption.
    pub fn position(&self, listing: &Listing) -> Option<(usize, usize)> {
        let target = self.target.as_ref()?;
        let images = listing.images();
        let index = images.iter().position(|f| f.id == target.id)?;
        Some((index + 1, images.len()))
    }
}
