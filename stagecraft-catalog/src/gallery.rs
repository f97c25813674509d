use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One image in an inventory item's gallery.
///
/// The main image is stored on the inventory record itself and so has no
/// side-table id; extra images carry the id of their row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryImage {
    pub id: Option<Uuid>,
    pub source: String,
    pub label: String,
    pub is_main: bool,
}

impl GalleryImage {
    pub fn main(source: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            label: label.into(),
            is_main: true,
        }
    }

    pub fn extra(id: Uuid, source: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            source: source.into(),
            label: label.into(),
            is_main: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveDirection {
    Up,
    Down,
}

/// The transposition applied by a move, 1-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("Gallery must contain at least a main image")]
    Empty,

    #[error("Position {position} is out of range for a gallery of {len} images")]
    InvalidPosition { position: usize, len: usize },

    #[error("The main image cannot be deleted")]
    MainImageDeletion,

    #[error("No image with id {0} in this gallery")]
    UnknownImage(Uuid),
}

/// Ordered gallery for one inventory item.
///
/// Positions are 1-indexed and dense; position is list order, nothing else.
/// The image at position 1 is always the main image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gallery {
    images: Vec<GalleryImage>,
}

impl Gallery {
    /// Build a gallery from images already in display order. The main flag
    /// is re-derived from position, so callers only need the order right.
    pub fn from_images(images: Vec<GalleryImage>) -> Result<Self, GalleryError> {
        if images.is_empty() {
            return Err(GalleryError::Empty);
        }
        let mut gallery = Self { images };
        gallery.reassign_main();
        Ok(gallery)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn main_image(&self) -> &GalleryImage {
        &self.images[0]
    }

    /// 1-indexed position of an image by id
    pub fn position_of(&self, image_id: Uuid) -> Option<usize> {
        self.images
            .iter()
            .position(|image| image.id == Some(image_id))
            .map(|index| index + 1)
    }

    /// Swap the image at `position` with its circular neighbor.
    ///
    /// Up from position 1 wraps to position N; down from position N wraps to
    /// position 1. Exactly the two images at the swapped positions change;
    /// a single-image gallery has nothing to reorder and the move is a no-op.
    pub fn move_image(
        &mut self,
        position: usize,
        direction: MoveDirection,
    ) -> Result<AppliedMove, GalleryError> {
        let len = self.images.len();
        if position < 1 || position > len {
            return Err(GalleryError::InvalidPosition { position, len });
        }

        let target = match direction {
            MoveDirection::Up => {
                if position == 1 {
                    len
                } else {
                    position - 1
                }
            }
            MoveDirection::Down => {
                if position == len {
                    1
                } else {
                    position + 1
                }
            }
        };

        if target == position {
            return Ok(AppliedMove {
                from: position,
                to: target,
            });
        }

        let a = position - 1;
        let b = target - 1;
        self.images.swap(a, b);

        if a == 0 || b == 0 {
            // The side-table row identity stays with the row: the image
            // promoted into position 1 hands its row id to the demoted one.
            let other = a.max(b);
            let row_id = self.images[0].id.take();
            self.images[other].id = row_id;
        }
        self.reassign_main();

        Ok(AppliedMove {
            from: position,
            to: target,
        })
    }

    /// Remove a non-main image by id. Higher positions shift down by one;
    /// the main image and anything below the removed position are untouched.
    pub fn delete_image(&mut self, image_id: Uuid) -> Result<usize, GalleryError> {
        let index = self
            .images
            .iter()
            .position(|image| image.id == Some(image_id))
            .ok_or(GalleryError::UnknownImage(image_id))?;

        if index == 0 {
            return Err(GalleryError::MainImageDeletion);
        }

        self.images.remove(index);
        Ok(index + 1)
    }

    fn reassign_main(&mut self) {
        for (index, image) in self.images.iter_mut().enumerate() {
            image.is_main = index == 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery_of(extra_count: usize) -> (Gallery, Vec<Uuid>) {
        let mut images = vec![GalleryImage::main("main.webp", "Front")];
        let mut ids = Vec::new();
        for i in 0..extra_count {
            let id = Uuid::new_v4();
            ids.push(id);
            images.push(GalleryImage::extra(id, format!("extra-{}.webp", i), format!("Angle {}", i)));
        }
        (Gallery::from_images(images).unwrap(), ids)
    }

    #[test]
    fn test_example_wraparound_swap() {
        // [Main@1, A@2, B@3], move(1, up) wraps to 3
        let (mut gallery, ids) = gallery_of(2);
        let applied = gallery.move_image(1, MoveDirection::Up).unwrap();
        assert_eq!((applied.from, applied.to), (1, 3));

        let images = gallery.images();
        assert_eq!(images[0].source, "extra-1.webp");
        assert!(images[0].is_main);
        assert_eq!(images[1].source, "extra-0.webp");
        assert_eq!(images[2].source, "main.webp");
        assert!(!images[2].is_main);
        // Row id stays with the side-table slot
        assert_eq!(images[0].id, None);
        assert_eq!(images[2].id, Some(ids[1]));

        // move(3, down) wraps to 1 and restores everything
        gallery.move_image(3, MoveDirection::Down).unwrap();
        let images = gallery.images();
        assert_eq!(images[0].source, "main.webp");
        assert_eq!(images[0].id, None);
        assert!(images[0].is_main);
        assert_eq!(images[1].id, Some(ids[0]));
        assert_eq!(images[2].id, Some(ids[1]));
    }

    #[test]
    fn test_move_then_reverse_restores_order() {
        for len in 2..=5 {
            for position in 1..=len {
                let (mut gallery, _) = gallery_of(len - 1);
                let original = gallery.images().to_vec();

                let applied = gallery.move_image(position, MoveDirection::Up).unwrap();
                gallery.move_image(applied.to, MoveDirection::Down).unwrap();

                assert_eq!(gallery.images(), original.as_slice(), "len {} pos {}", len, position);
            }
        }
    }

    #[test]
    fn test_interior_swap_keeps_ids_with_images() {
        let (mut gallery, ids) = gallery_of(3);
        // Swap positions 2 and 3; extra rows trade position, ids travel along
        gallery.move_image(2, MoveDirection::Down).unwrap();

        let images = gallery.images();
        assert_eq!(images[1].source, "extra-1.webp");
        assert_eq!(images[1].id, Some(ids[1]));
        assert_eq!(images[2].source, "extra-0.webp");
        assert_eq!(images[2].id, Some(ids[0]));
        // Main untouched
        assert_eq!(images[0].source, "main.webp");
        assert!(images[0].is_main);
    }

    #[test]
    fn test_main_transfers_at_both_wrap_edges() {
        let (mut gallery, _) = gallery_of(3);
        gallery.move_image(1, MoveDirection::Up).unwrap();
        assert_eq!(gallery.main_image().source, "extra-2.webp");

        let (mut gallery, _) = gallery_of(3);
        gallery.move_image(4, MoveDirection::Down).unwrap();
        assert_eq!(gallery.main_image().source, "extra-2.webp");
    }

    #[test]
    fn test_delete_shifts_higher_positions_down() {
        let (mut gallery, ids) = gallery_of(3);
        let removed_position = gallery.delete_image(ids[0]).unwrap();

        assert_eq!(removed_position, 2);
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.position_of(ids[1]), Some(2));
        assert_eq!(gallery.position_of(ids[2]), Some(3));
        assert_eq!(gallery.main_image().source, "main.webp");
    }

    #[test]
    fn test_delete_main_is_rejected() {
        // A gallery built from raw rows may carry an id on the main slot
        let main_id = Uuid::new_v4();
        let extra_id = Uuid::new_v4();
        let mut gallery = Gallery::from_images(vec![
            GalleryImage::extra(main_id, "front.webp", "Front"),
            GalleryImage::extra(extra_id, "side.webp", "Side"),
        ])
        .unwrap();
        assert!(gallery.main_image().is_main);

        let err = gallery.delete_image(main_id).unwrap_err();
        assert!(matches!(err, GalleryError::MainImageDeletion));
        assert_eq!(gallery.len(), 2);
    }

    #[test]
    fn test_delete_unknown_id_is_rejected() {
        let (mut gallery, _) = gallery_of(2);
        let err = gallery.delete_image(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, GalleryError::UnknownImage(_)));
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn test_invalid_position_is_rejected() {
        let (mut gallery, _) = gallery_of(2);
        assert!(matches!(
            gallery.move_image(0, MoveDirection::Up),
            Err(GalleryError::InvalidPosition { .. })
        ));
        assert!(matches!(
            gallery.move_image(4, MoveDirection::Down),
            Err(GalleryError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_single_image_move_is_noop() {
        let (mut gallery, _) = gallery_of(0);
        let applied = gallery.move_image(1, MoveDirection::Up).unwrap();
        assert_eq!((applied.from, applied.to), (1, 1));
        assert_eq!(gallery.len(), 1);
        assert!(gallery.main_image().is_main);
    }

    #[test]
    fn test_empty_gallery_rejected() {
        assert!(matches!(Gallery::from_images(vec![]), Err(GalleryError::Empty)));
    }
}
