#![forbid(unsafe_code)]

//! The capability set a layout consumes from each child.
//!
//! Layouts never own children: they borrow the container's list for the
//! duration of one pass. Measuring passes take `&[C]`, so only the arranging
//! pass can reach [`Sizeable::set_placed_rect`].

use crate::geometry::{Margin, Rect, Size};
use crate::sizing::{HorizontalAlign, SizeEstimate, SizeLimits, VerticalAlign};

/// A measurable, placeable rectangle.
pub trait Sizeable {
    /// Intrinsic size given a hint of the space available. `Auto` axes must
    /// come back resolved to pixels; stretch axes come back as stretch.
    fn estimate_size(&self, available: Size) -> SizeEstimate;

    /// Spacing around the placed rectangle.
    fn margin(&self) -> Margin {
        Margin::default()
    }

    /// Bounds for the placed size (margin excluded).
    fn limits(&self) -> SizeLimits {
        SizeLimits::NONE
    }

    /// Per-child override of the container's default horizontal alignment.
    fn horizontal_align(&self) -> Option<HorizontalAlign> {
        None
    }

    /// Per-child override of the container's default vertical alignment.
    fn vertical_align(&self) -> Option<VerticalAlign> {
        None
    }

    fn is_visible(&self) -> bool {
        true
    }

    /// Floating children are positioned against the container rectangle
    /// and take no part in sequential, tiled or grid placement.
    fn is_floating(&self) -> bool {
        false
    }

    /// For floating children: keep the top-left of the current placed
    /// rectangle instead of recomputing it from alignment.
    fn keep_float_position(&self) -> bool {
        false
    }

    /// Rows occupied in a grid layout.
    fn row_span(&self) -> usize {
        1
    }

    /// Columns occupied in a grid layout.
    fn column_span(&self) -> usize {
        1
    }

    /// The rectangle last assigned by a layout.
    fn placed_rect(&self) -> Rect;

    /// Assign the final rectangle. Only called by arranging passes.
    fn set_placed_rect(&mut self, rect: Rect);
}

macro_rules! forward_sizeable {
    () => {
        fn estimate_size(&self, available: Size) -> SizeEstimate {
            (**self).estimate_size(available)
        }
        fn margin(&self) -> Margin {
            (**self).margin()
        }
        fn limits(&self) -> SizeLimits {
            (**self).limits()
        }
        fn horizontal_align(&self) -> Option<HorizontalAlign> {
            (**self).horizontal_align()
        }
        fn vertical_align(&self) -> Option<VerticalAlign> {
            (**self).vertical_align()
        }
        fn is_visible(&self) -> bool {
            (**self).is_visible()
        }
        fn is_floating(&self) -> bool {
            (**self).is_floating()
        }
        fn keep_float_position(&self) -> bool {
            (**self).keep_float_position()
        }
        fn row_span(&self) -> usize {
            (**self).row_span()
        }
        fn column_span(&self) -> usize {
            (**self).column_span()
        }
        fn placed_rect(&self) -> Rect {
            (**self).placed_rect()
        }
        fn set_placed_rect(&mut self, rect: Rect) {
            (**self).set_placed_rect(rect)
        }
    };
}

impl<T: Sizeable + ?Sized> Sizeable for Box<T> {
    forward_sizeable!();
}

impl<T: Sizeable + ?Sized> Sizeable for &mut T {
    forward_sizeable!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::SizeSpec;

    struct Fixed {
        size: Size,
        rect: Rect,
    }

    impl Sizeable for Fixed {
        fn estimate_size(&self, _available: Size) -> SizeEstimate {
            SizeEstimate::fixed(self.size.width, self.size.height)
        }

        fn placed_rect(&self) -> Rect {
            self.rect
        }

        fn set_placed_rect(&mut self, rect: Rect) {
            self.rect = rect;
        }
    }

    #[test]
    fn defaults_describe_a_plain_visible_child() {
        let child = Fixed {
            size: Size::new(4, 2),
            rect: Rect::default(),
        };
        assert!(child.is_visible());
        assert!(!child.is_floating());
        assert!(!child.keep_float_position());
        assert_eq!(child.row_span(), 1);
        assert_eq!(child.column_span(), 1);
        assert_eq!(child.margin(), Margin::default());
        assert_eq!(child.limits(), SizeLimits::NONE);
        assert_eq!(child.horizontal_align(), None);
    }

    #[test]
    fn boxed_trait_objects_forward_everything() {
        let mut children: Vec<Box<dyn Sizeable>> = vec![Box::new(Fixed {
            size: Size::new(7, 3),
            rect: Rect::default(),
        })];
        let est = children[0].estimate_size(Size::new(100, 100));
        assert_eq!(est.width, SizeSpec::Fixed(7));

        children[0].set_placed_rect(Rect::new(1, 2, 8, 5));
        assert_eq!(children[0].placed_rect(), Rect::new(1, 2, 8, 5));
    }

    #[test]
    fn mutable_references_forward_everything() {
        fn place<C: Sizeable>(mut child: C) {
            child.set_placed_rect(Rect::new(0, 0, 1, 1));
        }

        let mut child = Fixed {
            size: Size::new(1, 1),
            rect: Rect::default(),
        };
        place(&mut child);
        assert_eq!(child.placed_rect(), Rect::new(0, 0, 1, 1));
    }
}
