#![forbid(unsafe_code)]

//! A container owning a layout and its children.
//!
//! The container decides when layout runs: configuration setters only
//! record that a pass is pending, and [`Container::arrange_if_needed`]
//! performs it. A container is itself [`Sizeable`], so containers nest and
//! an auto-sized container answers its parent with the estimate of its own
//! children.

use trellis_core::{
    HorizontalAlign, Margin, Padding, Rect, Sides, Size, SizeEstimate, SizeLimits, SizeSpec,
    Sizeable, VerticalAlign,
};

use crate::attr::{ConfigChange, rescale, update};
use crate::error::{AttributeError, LayoutError};
use crate::Layout;

/// Scale factor of an unscaled display, in percent.
pub const DEFAULT_DPI_SCALE: u32 = 100;

/// A layout, the children it arranges and the container's own sizing.
#[derive(Debug, Clone)]
pub struct Container<C> {
    layout: Layout,
    children: Vec<C>,
    padding: Padding,
    width: SizeSpec,
    height: SizeSpec,
    margin: Margin,
    limits: SizeLimits,
    halign: Option<HorizontalAlign>,
    valign: Option<VerticalAlign>,
    visible: bool,
    rect: Rect,
    dpi_scale: u32,
    pending: bool,
    last_error: Option<LayoutError>,
}

impl<C: Sizeable> Default for Container<C> {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl<C: Sizeable> Container<C> {
    /// An empty, auto-sized container.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            children: Vec::new(),
            padding: Padding::default(),
            width: SizeSpec::Auto,
            height: SizeSpec::Auto,
            margin: Margin::default(),
            limits: SizeLimits::NONE,
            halign: None,
            valign: None,
            visible: true,
            rect: Rect::default(),
            dpi_scale: DEFAULT_DPI_SCALE,
            pending: true,
            last_error: None,
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: SizeSpec, height: SizeSpec) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: impl Into<Margin>) -> Self {
        self.margin = margin.into();
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_align(mut self, halign: HorizontalAlign, valign: VerticalAlign) -> Self {
        self.halign = Some(halign);
        self.valign = Some(valign);
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    /// Mutable access to the children. Any change may affect layout, so a
    /// pass is scheduled.
    pub fn children_mut(&mut self) -> &mut Vec<C> {
        self.pending = true;
        &mut self.children
    }

    pub fn push(&mut self, child: C) {
        self.children.push(child);
        self.pending = true;
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn dpi_scale(&self) -> u32 {
        self.dpi_scale
    }

    /// Whether a configuration change is waiting for a pass.
    pub fn needs_arrange(&self) -> bool {
        self.pending
    }

    /// The error of the most recent pass, if it failed.
    pub fn last_error(&self) -> Option<&LayoutError> {
        self.last_error.as_ref()
    }

    fn note(&mut self, change: ConfigChange) -> ConfigChange {
        if change.is_changed() {
            self.pending = true;
        }
        change
    }

    pub fn set_layout(&mut self, layout: Layout) -> ConfigChange {
        let change = update(&mut self.layout, layout);
        self.note(change)
    }

    pub fn set_padding(&mut self, padding: Padding) -> ConfigChange {
        let change = update(&mut self.padding, padding);
        self.note(change)
    }

    pub fn set_visible(&mut self, visible: bool) -> ConfigChange {
        let change = update(&mut self.visible, visible);
        self.note(change)
    }

    /// Forward a textual attribute to the layout.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<ConfigChange, AttributeError> {
        let change = self.layout.set_attribute(name, value)?;
        Ok(self.note(change))
    }

    /// Move to a new display scale (percent). Rescales padding and the
    /// layout's pixel settings.
    pub fn set_dpi_scale(&mut self, scale: u32) -> ConfigChange {
        let old = std::mem::replace(&mut self.dpi_scale, scale);
        let padding = Sides::new(
            rescale(self.padding.top, old, scale),
            rescale(self.padding.right, old, scale),
            rescale(self.padding.bottom, old, scale),
            rescale(self.padding.left, old, scale),
        );
        let change = update(&mut self.padding, padding) | self.layout.on_dpi_scale_changed(old, scale);
        self.note(change)
    }

    /// Arrange the children inside `rect`.
    pub fn arrange(&mut self, rect: Rect) -> Result<Size, LayoutError> {
        self.rect = rect;
        self.pending = false;
        let result = self
            .layout
            .arrange_children(&mut self.children, rect, self.padding);
        self.last_error = result.as_ref().err().cloned();
        result
    }

    /// Re-run layout in the current rectangle if a change is pending.
    /// Returns whether a pass ran.
    pub fn arrange_if_needed(&mut self) -> Result<bool, LayoutError> {
        if !self.pending {
            return Ok(false);
        }
        self.arrange(self.rect)?;
        Ok(true)
    }

    /// Content size needed for `available`, padding included.
    pub fn estimate(&self, available: Size) -> Result<Size, LayoutError> {
        self.layout
            .estimate_layout_size(&self.children, available, self.padding)
    }

    /// Resolve an auto axis from the children's estimate.
    fn auto_extent(&self, spec: SizeSpec, estimate: i32, all_stretch: bool, axis: &str) -> SizeSpec {
        match spec {
            SizeSpec::Auto => {
                // An auto container of stretch-only children has no size of
                // its own on this axis.
                #[cfg(feature = "tracing")]
                if all_stretch {
                    tracing::warn!(axis, "auto-sized container with only stretch children");
                }
                debug_assert!(
                    !all_stretch,
                    "auto-sized container has only stretch children on the {axis} axis"
                );
                SizeSpec::Fixed(estimate)
            }
            other => other,
        }
    }

    /// Whether every sequenced child stretches on the given axis.
    fn all_stretch(&self, available: Size, width: bool) -> bool {
        let mut sequenced = self
            .children
            .iter()
            .filter(|child| child.is_visible() && !child.is_floating())
            .peekable();
        if sequenced.peek().is_none() {
            return false;
        }
        sequenced.all(|child| {
            let estimate = child.estimate_size(available.deflate(child.margin()));
            if width {
                estimate.width.is_stretch()
            } else {
                estimate.height.is_stretch()
            }
        })
    }
}

impl<C: Sizeable> Sizeable for Container<C> {
    fn estimate_size(&self, available: Size) -> SizeEstimate {
        if self.width != SizeSpec::Auto && self.height != SizeSpec::Auto {
            return SizeEstimate::new(self.width, self.height);
        }
        let content = match self.estimate(available) {
            Ok(size) => size,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "container estimate failed");
                Size::ZERO
            }
        };
        let width = self.width == SizeSpec::Auto && self.all_stretch(available, true);
        let height = self.height == SizeSpec::Auto && self.all_stretch(available, false);
        SizeEstimate::new(
            self.auto_extent(self.width, content.width, width, "horizontal"),
            self.auto_extent(self.height, content.height, height, "vertical"),
        )
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
        self.visible
    }

    fn placed_rect(&self) -> Rect {
        self.rect
    }

    /// Being placed arranges the children; a failed pass is kept in
    /// [`Container::last_error`].
    fn set_placed_rect(&mut self, rect: Rect) {
        let _ = self.arrange(rect);
    }
}
