#![forbid(unsafe_code)]

//! A plain rectangle implementing [`Sizeable`], for callers without their
//! own widget types.

use trellis_core::{
    HorizontalAlign, Margin, Rect, Size, SizeEstimate, SizeLimits, SizeSpec, Sizeable,
    VerticalAlign,
};

/// A control with a fixed intrinsic size.
///
/// `Auto` axes resolve to the intrinsic size. With [`Leaf::aspect`] set, an
/// auto height follows the resolved width instead (height-for-width).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Leaf {
    intrinsic: Size,
    width: SizeSpec,
    height: SizeSpec,
    aspect: Option<(i32, i32)>,
    margin: Margin,
    limits: SizeLimits,
    halign: Option<HorizontalAlign>,
    valign: Option<VerticalAlign>,
    hidden: bool,
    floating: bool,
    keep_float_position: bool,
    row_span: usize,
    column_span: usize,
    rect: Rect,
}

impl Leaf {
    /// Auto-sized on both axes with the given intrinsic size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            intrinsic: Size::new(width, height),
            row_span: 1,
            column_span: 1,
            ..Self::default()
        }
    }

    /// Fixed to exactly `width × height` pixels.
    pub fn fixed(width: i32, height: i32) -> Self {
        Self::new(width, height)
            .width(SizeSpec::Fixed(width))
            .height(SizeSpec::Fixed(height))
    }

    #[must_use]
    pub fn width(mut self, spec: SizeSpec) -> Self {
        self.width = spec;
        self
    }

    #[must_use]
    pub fn height(mut self, spec: SizeSpec) -> Self {
        self.height = spec;
        self
    }

    /// Resolve an auto height as `resolved_width * h / w`.
    #[must_use]
    pub fn aspect(mut self, w: i32, h: i32) -> Self {
        self.aspect = (w > 0 && h >= 0).then_some((w, h));
        self
    }

    #[must_use]
    pub fn margin(mut self, margin: impl Into<Margin>) -> Self {
        self.margin = margin.into();
        self
    }

    #[must_use]
    pub fn limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn min_size(mut self, width: i32, height: i32) -> Self {
        self.limits.min_width = width;
        self.limits.min_height = height;
        self
    }

    #[must_use]
    pub fn max_size(mut self, width: Option<i32>, height: Option<i32>) -> Self {
        self.limits.max_width = width;
        self.limits.max_height = height;
        self
    }

    #[must_use]
    pub fn halign(mut self, align: HorizontalAlign) -> Self {
        self.halign = Some(align);
        self
    }

    #[must_use]
    pub fn valign(mut self, align: VerticalAlign) -> Self {
        self.valign = Some(align);
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.hidden = !visible;
        self
    }

    #[must_use]
    pub fn floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }

    #[must_use]
    pub fn keep_float_position(mut self, keep: bool) -> Self {
        self.keep_float_position = keep;
        self
    }

    /// Grid span in rows and columns.
    #[must_use]
    pub fn span(mut self, rows: usize, columns: usize) -> Self {
        self.row_span = rows;
        self.column_span = columns;
        self
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.hidden = !visible;
    }

    pub fn set_intrinsic(&mut self, size: Size) {
        self.intrinsic = size;
    }

    fn resolve_height(&self, width: Option<i32>) -> SizeSpec {
        match (self.height, self.aspect, width) {
            (SizeSpec::Auto, Some((w, h)), Some(width)) => {
                let height = i64::from(width) * i64::from(h) / i64::from(w);
                SizeSpec::Fixed(height.clamp(0, i64::from(i32::MAX)) as i32)
            }
            (spec, _, _) => spec.resolve_auto(self.intrinsic.height),
        }
    }
}

impl Sizeable for Leaf {
    fn estimate_size(&self, available: Size) -> SizeEstimate {
        let width = self.width.resolve_auto(self.intrinsic.width);
        let basis = match width {
            SizeSpec::Fixed(px) => Some(px),
            _ if available.width > 0 => Some(available.width),
            _ => None,
        };
        SizeEstimate::new(width, self.resolve_height(basis))
    }

    fn margin(&self) -> Margin {
        self.margin
    }

    fn limits(&self) -> SizeLimits {
        self.limits
    }

    fn horizontal_align(&self) -> Option<HorizontalAlign> {
        self.halign
    }

    fn vertical_align(&self) -> Option<VerticalAlign> {
        self.valign
    }

    fn is_visible(&self) -> bool {
        !self.hidden
    }

    fn is_floating(&self) -> bool {
        self.floating
    }

    fn keep_float_position(&self) -> bool {
        self.keep_float_position
    }

    fn row_span(&self) -> usize {
        self.row_span
    }

    fn column_span(&self) -> usize {
        self.column_span
    }

    fn placed_rect(&self) -> Rect {
        self.rect
    }

    fn set_placed_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_to_intrinsic() {
        let leaf = Leaf::new(12, 7);
        assert_eq!(
            leaf.estimate_size(Size::new(100, 100)),
            SizeEstimate::fixed(12, 7)
        );
    }

    #[test]
    fn stretch_passes_through() {
        let leaf = Leaf::new(12, 7).width(SizeSpec::Stretch(30));
        assert_eq!(
            leaf.estimate_size(Size::ZERO).width,
            SizeSpec::Stretch(30)
        );
    }

    #[test]
    fn aspect_derives_height_from_width() {
        let leaf = Leaf::new(40, 0).aspect(2, 1);
        assert_eq!(leaf.estimate_size(Size::ZERO).height, SizeSpec::Fixed(20));

        let stretchy = Leaf::new(0, 0).width(SizeSpec::FILL).aspect(4, 3);
        assert_eq!(
            stretchy.estimate_size(Size::new(80, 10)).height,
            SizeSpec::Fixed(60)
        );
        assert_eq!(stretchy.estimate_size(Size::ZERO).height, SizeSpec::Fixed(0));
    }

    #[test]
    fn builder_sets_the_contract() {
        let leaf = Leaf::fixed(1, 1)
            .margin((1, 2, 3, 4))
            .min_size(5, 6)
            .max_size(Some(10), None)
            .halign(HorizontalAlign::Right)
            .visible(false)
            .floating(true)
            .keep_float_position(true)
            .span(2, 3);
        // Builder names shadow the trait getters, so go through the trait.
        assert_eq!(Sizeable::margin(&leaf), Margin::new(1, 2, 3, 4));
        assert_eq!(Sizeable::limits(&leaf).min_height, 6);
        assert_eq!(Sizeable::limits(&leaf).max_width, Some(10));
        assert_eq!(leaf.horizontal_align(), Some(HorizontalAlign::Right));
        assert_eq!(leaf.vertical_align(), None);
        assert!(!leaf.is_visible());
        assert!(leaf.is_floating() && Sizeable::keep_float_position(&leaf));
        assert_eq!((leaf.row_span(), leaf.column_span()), (2, 3));
    }
}
