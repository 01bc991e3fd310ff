#![forbid(unsafe_code)]

//! Layout strategies for rectangular control trees.
//!
//! A container owns one [`Layout`] and lends it its children for every pass:
//!
//! - [`Layout::arrange_children`] computes and assigns each child's rectangle
//! - [`Layout::estimate_children`] / [`Layout::estimate_layout_size`] compute
//!   the content size only, without touching the children
//!
//! Both entry points run the same per-strategy algorithm, parameterized by
//! [`Pass`], so an estimate never disagrees with the arrangement it predicts.
//!
//! Strategies:
//!
//! - [`LayoutStrategy::Float`] - every child aligned inside the container
//! - [`LinearLayout`] - a horizontal or vertical stack with stretch shares
//! - [`TileLayout`] - near-uniform cells, with a free-flow fallback
//! - [`FlowLayout`] - sequential placement that wraps into new lines
//! - [`GridLayout`] - explicit rows and columns with cell spans
//!
//! # Example
//!
//! ```ignore
//! use trellis_core::{Padding, Rect, SizeSpec};
//! use trellis_layout::{Layout, Leaf};
//!
//! let layout = Layout::horizontal().child_margin(10, 0);
//! let mut children = vec![
//!     Leaf::fixed(100, 20),
//!     Leaf::new(0, 20).width(SizeSpec::Stretch(50)),
//!     Leaf::new(0, 20).width(SizeSpec::Stretch(50)),
//! ];
//! layout.arrange_children(&mut children, Rect::new(0, 0, 300, 20), Padding::default())?;
//! assert_eq!(children[1].placed_rect().width(), 90);
//! ```

pub mod attr;
pub mod container;
pub mod error;
mod float;
pub mod flow;
pub mod grid;
pub mod leaf;
pub mod linear;
mod measure;
pub mod tile;

pub use attr::ConfigChange;
pub use container::Container;
pub use error::{AttributeError, LayoutError};
pub use flow::FlowLayout;
pub use grid::GridLayout;
pub use leaf::Leaf;
pub use linear::LinearLayout;
pub use measure::Pass;
pub use tile::TileLayout;
pub use trellis_core::{
    HorizontalAlign, Margin, Padding, Rect, Sides, Size, SizeEstimate, SizeLimits, SizeSpec,
    Sizeable, VerticalAlign,
};

use attr::{parse_halign, parse_int, parse_pair, parse_valign, rescale, update};
use measure::Plan;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The main axis of a linear, flow or tile layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Settings every strategy shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutOptions {
    /// Horizontal spacing between neighbouring children.
    pub child_margin_x: i32,
    /// Vertical spacing between neighbouring children.
    pub child_margin_y: i32,
    /// Default horizontal alignment for children without their own.
    pub child_halign: HorizontalAlign,
    /// Default vertical alignment for children without their own.
    pub child_valign: VerticalAlign,
}

/// The placement algorithm and its strategy-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayoutStrategy {
    /// Each child aligned independently inside the container.
    #[default]
    Float,
    Linear(LinearLayout),
    Tile(TileLayout),
    Flow(FlowLayout),
    Grid(GridLayout),
}

impl LayoutStrategy {
    /// Short lowercase name, used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Float => "float",
            LayoutStrategy::Linear(_) => "linear",
            LayoutStrategy::Tile(_) => "tile",
            LayoutStrategy::Flow(_) => "flow",
            LayoutStrategy::Grid(_) => "grid",
        }
    }
}

/// A container's layout: shared options plus a strategy.
///
/// Stateless between passes. Children are borrowed per call and never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    options: LayoutOptions,
    strategy: LayoutStrategy,
}

impl Layout {
    /// Create a layout running `strategy`.
    pub fn new(strategy: LayoutStrategy) -> Self {
        Self {
            options: LayoutOptions::default(),
            strategy,
        }
    }

    /// Float layout: every child aligned inside the container.
    pub fn float() -> Self {
        Self::new(LayoutStrategy::Float)
    }

    /// Horizontal stack.
    pub fn horizontal() -> Self {
        Self::new(LayoutStrategy::Linear(LinearLayout::new(Direction::Horizontal)))
    }

    /// Vertical stack.
    pub fn vertical() -> Self {
        Self::new(LayoutStrategy::Linear(LinearLayout::new(Direction::Vertical)))
    }

    /// Wrapping flow along `direction`.
    pub fn flow(direction: Direction) -> Self {
        Self::new(LayoutStrategy::Flow(FlowLayout::new(direction)))
    }

    /// Tile layout.
    pub fn tile(tile: TileLayout) -> Self {
        Self::new(LayoutStrategy::Tile(tile))
    }

    /// Grid layout.
    pub fn grid(grid: GridLayout) -> Self {
        Self::new(LayoutStrategy::Grid(grid))
    }

    /// Set the spacing between children.
    #[must_use]
    pub fn child_margin(mut self, x: i32, y: i32) -> Self {
        let _ = self.set_child_margin(x, y);
        self
    }

    /// Set the default alignment for children.
    #[must_use]
    pub fn child_align(mut self, halign: HorizontalAlign, valign: VerticalAlign) -> Self {
        let _ = self.set_child_align(halign, valign);
        self
    }

    #[inline]
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    #[inline]
    pub fn strategy(&self) -> &LayoutStrategy {
        &self.strategy
    }

    /// Mutable access to the strategy settings. Strategy setters report
    /// their own [`ConfigChange`].
    #[inline]
    pub fn strategy_mut(&mut self) -> &mut LayoutStrategy {
        &mut self.strategy
    }

    pub fn set_strategy(&mut self, strategy: LayoutStrategy) -> ConfigChange {
        update(&mut self.strategy, strategy)
    }

    /// Negative spacing is stored as zero.
    pub fn set_child_margin(&mut self, x: i32, y: i32) -> ConfigChange {
        update(&mut self.options.child_margin_x, x.max(0))
            | update(&mut self.options.child_margin_y, y.max(0))
    }

    pub fn set_child_align(&mut self, halign: HorizontalAlign, valign: VerticalAlign) -> ConfigChange {
        update(&mut self.options.child_halign, halign)
            | update(&mut self.options.child_valign, valign)
    }

    /// Place every visible child inside `rect` minus `padding`.
    ///
    /// Returns the content size plus padding. On error nothing is placed.
    pub fn arrange_children<C: Sizeable>(
        &self,
        children: &mut [C],
        rect: Rect,
        padding: Padding,
    ) -> Result<Size, LayoutError> {
        let plan = self.plan(children, rect, padding, Pass::Arrange)?;
        for (index, placed) in plan.placements {
            children[index].set_placed_rect(placed);
        }
        Ok(plan.content.validate().inflate(padding))
    }

    /// The size [`arrange_children`](Self::arrange_children) would need for
    /// the same input, without placing anything.
    ///
    /// Children that stretch on an axis contribute nothing to that axis.
    pub fn estimate_children<C: Sizeable>(
        &self,
        children: &[C],
        rect: Rect,
        padding: Padding,
    ) -> Result<Size, LayoutError> {
        let plan = self.plan(children, rect, padding, Pass::Estimate)?;
        Ok(plan.content.validate().inflate(padding))
    }

    /// Parent-side query for an auto-sized container given the space on
    /// offer.
    pub fn estimate_layout_size<C: Sizeable>(
        &self,
        children: &[C],
        available: Size,
        padding: Padding,
    ) -> Result<Size, LayoutError> {
        self.estimate_children(children, Rect::from_size(available), padding)
    }

    fn plan<C: Sizeable>(
        &self,
        children: &[C],
        rect: Rect,
        padding: Padding,
        pass: Pass,
    ) -> Result<Plan, LayoutError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "layout_pass",
            strategy = self.strategy.name(),
            pass = pass.as_str(),
            left = rect.left,
            top = rect.top,
            width = rect.width(),
            height = rect.height(),
            children = children.len()
        )
        .entered();

        let rect = rect.validate();
        let content = rect.inner(padding);
        let options = &self.options;
        let plan = match &self.strategy {
            LayoutStrategy::Float => float::plan(options, children, content, pass),
            LayoutStrategy::Linear(linear) => linear.plan(options, children, rect, content, pass),
            LayoutStrategy::Tile(tile) => tile.plan(options, children, rect, content, pass),
            LayoutStrategy::Flow(flow) => flow.plan(options, children, rect, content, pass),
            LayoutStrategy::Grid(grid) => grid.plan(options, children, rect, content, pass)?,
        };
        Ok(plan)
    }

    /// Apply a textual attribute.
    ///
    /// Shared names: `child_margin` (`"x,y"` or one value), `child_margin_x`,
    /// `child_margin_y`, `child_halign`, `child_valign`. Tile and grid
    /// layouts add their own; anything else is
    /// [`AttributeError::Unrecognized`].
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<ConfigChange, AttributeError> {
        match name {
            "child_margin" => {
                let (x, y) = parse_pair(name, value)?;
                Ok(self.set_child_margin(x, y))
            }
            "child_margin_x" => {
                let x = parse_int(name, value)?;
                Ok(update(&mut self.options.child_margin_x, x))
            }
            "child_margin_y" => {
                let y = parse_int(name, value)?;
                Ok(update(&mut self.options.child_margin_y, y))
            }
            "child_halign" => {
                let halign = parse_halign(name, value)?;
                Ok(update(&mut self.options.child_halign, halign))
            }
            "child_valign" => {
                let valign = parse_valign(name, value)?;
                Ok(update(&mut self.options.child_valign, valign))
            }
            _ => match &mut self.strategy {
                LayoutStrategy::Tile(tile) => tile.set_attribute(name, value),
                LayoutStrategy::Grid(grid) => grid.set_attribute(name, value),
                _ => Err(AttributeError::unrecognized(name)),
            },
        }
    }

    /// Rescale pixel settings from one percent scale factor to another.
    ///
    /// Only the configuration changes; the caller re-arranges.
    pub fn on_dpi_scale_changed(&mut self, old: u32, new: u32) -> ConfigChange {
        let x = rescale(self.options.child_margin_x, old, new);
        let y = rescale(self.options.child_margin_y, old, new);
        let margins = self.set_child_margin(x, y);
        let cells = match &mut self.strategy {
            LayoutStrategy::Tile(tile) => tile.rescale(old, new),
            LayoutStrategy::Grid(grid) => grid.rescale(old, new),
            _ => ConfigChange::Unchanged,
        };
        margins | cells
    }
}

/// Rescale a size between two percent scale factors.
pub(crate) fn rescale_size(size: Size, old: u32, new: u32) -> Size {
    Size::new(rescale(size.width, old, new), rescale(size.height, old, new))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_float() {
        let layout = Layout::default();
        assert_eq!(layout.strategy().name(), "float");
        assert_eq!(layout.options(), &LayoutOptions::default());
    }

    #[test]
    fn setters_report_changes() {
        let mut layout = Layout::vertical();
        assert_eq!(layout.set_child_margin(4, 4), ConfigChange::Changed);
        assert_eq!(layout.set_child_margin(4, 4), ConfigChange::Unchanged);
        assert_eq!(
            layout.set_child_align(HorizontalAlign::Center, VerticalAlign::Top),
            ConfigChange::Changed
        );
        assert_eq!(layout.set_child_margin(-3, 4), ConfigChange::Changed);
        assert_eq!(layout.options().child_margin_x, 0);
    }

    #[test]
    fn shared_attributes() {
        let mut layout = Layout::horizontal();
        assert_eq!(layout.set_attribute("child_margin", "6,2"), Ok(ConfigChange::Changed));
        assert_eq!(layout.options().child_margin_x, 6);
        assert_eq!(layout.options().child_margin_y, 2);
        assert_eq!(layout.set_attribute("child_margin_y", "2"), Ok(ConfigChange::Unchanged));
        assert_eq!(layout.set_attribute("child_valign", "bottom"), Ok(ConfigChange::Changed));
        assert_eq!(layout.options().child_valign, VerticalAlign::Bottom);
        assert_eq!(
            layout.set_attribute("child_halign", "middle"),
            Err(AttributeError::InvalidValue {
                name: "child_halign".into(),
                value: "middle".into()
            })
        );
    }

    #[test]
    fn strategy_attributes_are_unrecognized_elsewhere() {
        let mut layout = Layout::horizontal();
        assert_eq!(
            layout.set_attribute("columns", "3"),
            Err(AttributeError::Unrecognized {
                name: "columns".into()
            })
        );
        let mut layout = Layout::grid(GridLayout::default());
        assert_eq!(layout.set_attribute("columns", "3"), Ok(ConfigChange::Changed));
    }

    #[test]
    fn dpi_rescales_spacing_only_when_scale_moves() {
        let mut layout = Layout::flow(Direction::Horizontal).child_margin(10, 4);
        assert_eq!(layout.on_dpi_scale_changed(100, 100), ConfigChange::Unchanged);
        assert_eq!(layout.on_dpi_scale_changed(100, 150), ConfigChange::Changed);
        assert_eq!(layout.options().child_margin_x, 15);
        assert_eq!(layout.options().child_margin_y, 6);
        assert_eq!(layout.on_dpi_scale_changed(0, 200), ConfigChange::Unchanged);
    }

    #[test]
    fn estimate_layout_size_matches_estimate_children() {
        let layout = Layout::vertical().child_margin(0, 5);
        let children = vec![Leaf::fixed(30, 10), Leaf::fixed(50, 20)];
        let available = Size::new(200, 200);
        let padding = Padding::all(3);
        assert_eq!(
            layout.estimate_layout_size(&children, available, padding),
            layout.estimate_children(&children, Rect::from_size(available), padding)
        );
        assert_eq!(
            layout.estimate_layout_size(&children, available, padding),
            Ok(Size::new(56, 41))
        );
    }
}
