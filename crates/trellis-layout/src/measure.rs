#![forbid(unsafe_code)]

//! Per-child measurement and placement helpers shared by every strategy.
//!
//! A pass first turns each visible child into an [`Item`]: its estimate with
//! `Auto` normalized away, its effective alignment, limits and spans. The
//! strategies then work purely on items and produce a [`Plan`]; only the
//! arranging entry point applies a plan to the children.

use trellis_core::{
    HorizontalAlign, Margin, Point, Rect, Size, SizeLimits, SizeSpec, Sizeable, VerticalAlign,
};

use crate::{Direction, LayoutOptions};

/// Which of the two entry points is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Compute the content size only; never touches children.
    Estimate,
    /// Compute sizes and final rectangles.
    Arrange,
}

impl Pass {
    #[inline]
    pub const fn is_arrange(self) -> bool {
        matches!(self, Pass::Arrange)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Pass::Estimate => "estimate",
            Pass::Arrange => "arrange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub(crate) const fn main(direction: Direction) -> Self {
        match direction {
            Direction::Horizontal => Axis::X,
            Direction::Vertical => Axis::Y,
        }
    }

    #[inline]
    pub(crate) const fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    #[inline]
    pub(crate) const fn of(self, size: Size) -> i32 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    #[inline]
    pub(crate) const fn start(self, rect: Rect) -> i32 {
        match self {
            Axis::X => rect.left,
            Axis::Y => rect.top,
        }
    }

    /// Build a size from a value on this axis and one on the other.
    #[inline]
    pub(crate) const fn size(self, along: i32, across: i32) -> Size {
        match self {
            Axis::X => Size::new(along, across),
            Axis::Y => Size::new(across, along),
        }
    }

    /// Build a rectangle from a span on this axis and one on the other.
    pub(crate) const fn rect(self, pos: i32, len: i32, cross_pos: i32, cross_len: i32) -> Rect {
        let (origin, size) = match self {
            Axis::X => (Point::new(pos, cross_pos), Size::new(len, cross_len)),
            Axis::Y => (Point::new(cross_pos, pos), Size::new(cross_len, len)),
        };
        Rect::from_origin_size(origin, size)
    }

    /// Container alignment on this axis.
    pub(crate) fn default_align(self, options: &LayoutOptions) -> AxisAlign {
        match self {
            Axis::X => options.child_halign.into(),
            Axis::Y => options.child_valign.into(),
        }
    }

    /// Spacing between neighbours along this axis.
    pub(crate) const fn gap(self, options: &LayoutOptions) -> i32 {
        let gap = match self {
            Axis::X => options.child_margin_x,
            Axis::Y => options.child_margin_y,
        };
        if gap < 0 { 0 } else { gap }
    }
}

/// Alignment along one axis, independent of orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AxisAlign {
    Start,
    Center,
    End,
    Justify,
}

impl AxisAlign {
    /// Offset of `size` inside `space`. Content that does not fit starts at
    /// the leading edge and overflows the trailing one.
    #[inline]
    pub(crate) const fn offset(self, space: i32, size: i32) -> i32 {
        let free = space.saturating_sub(size);
        if free <= 0 {
            return 0;
        }
        match self {
            AxisAlign::Start | AxisAlign::Justify => 0,
            AxisAlign::Center => free / 2,
            AxisAlign::End => free,
        }
    }
}

impl From<HorizontalAlign> for AxisAlign {
    fn from(align: HorizontalAlign) -> Self {
        match align {
            HorizontalAlign::Left => AxisAlign::Start,
            HorizontalAlign::Center => AxisAlign::Center,
            HorizontalAlign::Right => AxisAlign::End,
            HorizontalAlign::Justify => AxisAlign::Justify,
        }
    }
}

impl From<VerticalAlign> for AxisAlign {
    fn from(align: VerticalAlign) -> Self {
        match align {
            VerticalAlign::Top => AxisAlign::Start,
            VerticalAlign::Center => AxisAlign::Center,
            VerticalAlign::Bottom => AxisAlign::End,
            VerticalAlign::Justify => AxisAlign::Justify,
        }
    }
}

/// A visible child as seen by a strategy.
#[derive(Debug, Clone)]
pub(crate) struct Item {
    /// Position in the caller's child slice.
    pub index: usize,
    width: SizeSpec,
    height: SizeSpec,
    pub margin: Margin,
    limits: SizeLimits,
    halign: AxisAlign,
    valign: AxisAlign,
    pub row_span: usize,
    pub column_span: usize,
    pub floating: bool,
    keep_position: bool,
    previous: Rect,
}

/// An unresolved `Auto` is treated as zero pixels.
#[inline]
fn normalize(spec: SizeSpec) -> SizeSpec {
    match spec {
        SizeSpec::Auto => SizeSpec::Fixed(0),
        SizeSpec::Fixed(px) => SizeSpec::Fixed(px.max(0)),
        stretch => stretch,
    }
}

impl Item {
    pub(crate) fn measure<C: Sizeable>(
        index: usize,
        child: &C,
        available: Size,
        options: &LayoutOptions,
    ) -> Self {
        let margin = child.margin();
        let estimate = child.estimate_size(available.deflate(margin));
        Self {
            index,
            width: normalize(estimate.width),
            height: normalize(estimate.height),
            margin,
            limits: child.limits(),
            halign: child
                .horizontal_align()
                .unwrap_or(options.child_halign)
                .into(),
            valign: child
                .vertical_align()
                .unwrap_or(options.child_valign)
                .into(),
            row_span: child.row_span().max(1),
            column_span: child.column_span().max(1),
            floating: child.is_floating(),
            keep_position: child.keep_float_position(),
            previous: child.placed_rect(),
        }
    }

    #[inline]
    pub(crate) const fn spec(&self, axis: Axis) -> SizeSpec {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    #[inline]
    pub(crate) const fn is_stretch(&self, axis: Axis) -> bool {
        self.spec(axis).is_stretch()
    }

    #[inline]
    pub(crate) const fn align(&self, axis: Axis) -> AxisAlign {
        match axis {
            Axis::X => self.halign,
            Axis::Y => self.valign,
        }
    }

    /// Whether the child takes the whole slot on this axis.
    #[inline]
    pub(crate) fn fills(&self, axis: Axis) -> bool {
        self.is_stretch(axis) || self.align(axis) == AxisAlign::Justify
    }

    #[inline]
    pub(crate) fn clamp(&self, axis: Axis, value: i32) -> i32 {
        match axis {
            Axis::X => self.limits.clamp_width(value),
            Axis::Y => self.limits.clamp_height(value),
        }
    }

    /// The smallest size the limits allow.
    #[inline]
    pub(crate) fn min(&self, axis: Axis) -> i32 {
        self.clamp(axis, 0)
    }

    /// Whether `value` already sits at the maximum.
    pub(crate) fn at_max(&self, axis: Axis, value: i32) -> bool {
        let max = match axis {
            Axis::X => self.limits.max_width,
            Axis::Y => self.limits.max_height,
        };
        max.is_some_and(|max| value >= max)
    }

    pub(crate) const fn margin_sum(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.margin.horizontal_sum(),
            Axis::Y => self.margin.vertical_sum(),
        }
    }

    pub(crate) const fn margin_lead(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.margin.left,
            Axis::Y => self.margin.top,
        }
    }

    /// Intrinsic size on one axis, clamped. Stretch axes fall back to the
    /// minimum.
    pub(crate) fn natural(&self, axis: Axis) -> i32 {
        match self.spec(axis) {
            SizeSpec::Fixed(px) => self.clamp(axis, px),
            _ => self.min(axis),
        }
    }

    /// Space the child asks for before the container has a size: nothing on
    /// a stretch axis, otherwise its natural size plus margin.
    pub(crate) fn natural_footprint(&self, axis: Axis) -> i32 {
        if self.is_stretch(axis) {
            0
        } else {
            self.natural(axis).saturating_add(self.margin_sum(axis))
        }
    }

    /// Size inside a slot of `slot` pixels (margin included).
    pub(crate) fn resolve(&self, axis: Axis, slot: i32) -> i32 {
        if self.fills(axis) {
            self.clamp(axis, slot.saturating_sub(self.margin_sum(axis)))
        } else {
            self.natural(axis)
        }
    }

    /// Size inside a slot rectangle.
    pub(crate) fn fit(&self, slot: Rect) -> Size {
        Size::new(
            self.resolve(Axis::X, slot.width()),
            self.resolve(Axis::Y, slot.height()),
        )
    }

    /// Shrink `size` to fit the slot (minus margin), keeping the aspect
    /// ratio. The minimum still wins.
    pub(crate) fn scale_into(&self, size: Size, slot: Rect) -> Size {
        let scaled = scale_to_fit(size, slot.size().deflate(self.margin));
        Size::new(
            self.clamp(Axis::X, scaled.width),
            self.clamp(Axis::Y, scaled.height),
        )
    }

    /// Position `size` inside `slot` by this child's alignment.
    pub(crate) fn place(&self, slot: Rect, size: Size) -> Rect {
        let x = slot.left
            + self.margin.left
            + self.halign.offset(slot.width() - self.margin.horizontal_sum(), size.width);
        let y = slot.top
            + self.margin.top
            + self.valign.offset(slot.height() - self.margin.vertical_sum(), size.height);
        Rect::from_origin_size(Point::new(x, y), size)
    }

    /// Floating placement against the container rectangle.
    pub(crate) fn place_float(&self, container: Rect) -> Rect {
        let size = self.fit(container);
        if self.keep_position {
            Rect::from_origin_size(self.previous.origin(), size)
        } else {
            self.place(container, size)
        }
    }
}

/// Visible children split into the ones a strategy sequences and the
/// floating ones it places against the container.
pub(crate) struct Measured {
    pub items: Vec<Item>,
    pub floats: Vec<Item>,
}

impl Measured {
    pub(crate) fn new<C: Sizeable>(children: &[C], available: Size, options: &LayoutOptions) -> Self {
        let (floats, items): (Vec<Item>, Vec<Item>) = children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.is_visible())
            .map(|(index, child)| Item::measure(index, child, available, options))
            .partition(|item| item.floating);
        Self { items, floats }
    }
}

/// What a strategy decided: rectangles to assign (arrange pass only) and
/// the content size, padding excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Plan {
    pub placements: Vec<(usize, Rect)>,
    pub content: Size,
}

impl Plan {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            placements: Vec::with_capacity(n),
            content: Size::ZERO,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, item: &Item, rect: Rect) {
        self.placements.push((item.index, rect.validate()));
    }

    /// Place floating children against `container` when arranging.
    pub(crate) fn place_floats(&mut self, floats: &[Item], container: Rect, pass: Pass) {
        if pass.is_arrange() {
            for item in floats {
                self.push(item, item.place_float(container));
            }
        }
    }
}

/// Scale `size` down uniformly so it fits in `bound`, using the larger of
/// the two overflow ratios. Sizes that already fit are returned unchanged.
pub(crate) fn scale_to_fit(size: Size, bound: Size) -> Size {
    let bound = bound.validate();
    if size.width <= bound.width && size.height <= bound.height {
        return size;
    }
    if size.width <= 0 || size.height <= 0 {
        return Size::new(size.width.min(bound.width), size.height.min(bound.height)).validate();
    }
    let (w, h) = (i64::from(size.width), i64::from(size.height));
    let (bw, bh) = (i64::from(bound.width), i64::from(bound.height));
    // w/bw >= h/bh, compared without division.
    if w * bh >= h * bw {
        Size::new(bound.width, (h * bw / w) as i32)
    } else {
        Size::new((w * bh / h) as i32, bound.height)
    }
}

/// Split `total` into `count` near-equal parts, the remainder going one
/// pixel at a time to the first parts.
pub(crate) fn distribute(total: i32, count: usize) -> Vec<i32> {
    shares(total, count).collect()
}

/// The parts of [`distribute`], produced lazily so callers can take a
/// prefix of a very large split.
pub(crate) fn shares(total: i32, count: usize) -> impl Iterator<Item = i32> {
    let total = total.max(0);
    let n = i32::try_from(count).unwrap_or(i32::MAX).max(1);
    let base = total / n;
    let rem = usize::try_from(total % n).unwrap_or(0);
    (0..count).map(move |i| base + i32::from(i < rem))
}

/// Running start positions of consecutive tracks.
pub(crate) fn offsets(start: i32, tracks: &[i32], gap: i32) -> Vec<i32> {
    let mut pos = start;
    tracks
        .iter()
        .map(|track| {
            let here = pos;
            pos = pos.saturating_add(*track).saturating_add(gap);
            here
        })
        .collect()
}

/// `gap * (count - 1)`, or zero for fewer than two members.
#[inline]
pub(crate) fn gaps(gap: i32, count: usize) -> i32 {
    let between = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
    gap.saturating_mul(between)
}
