#![forbid(unsafe_code)]

//! Explicit row/column grid with cell spans.
//!
//! Children claim cells in row-major order: each takes the next free cell
//! and, from there, `row_span × column_span` cells (clamped to the grid
//! edge). A span that runs into a cell claimed earlier is a configuration
//! error and aborts the pass before anything is placed.
//!
//! Alignment works on two levels: the grid as a block inside the container
//! follows the container's default alignment, and each child inside its
//! merged cell follows its own.

use std::collections::HashSet;

use trellis_core::{Rect, Size, Sizeable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attr::{ConfigChange, parse_bool, parse_int, parse_pair, update};
use crate::error::{AttributeError, LayoutError};
use crate::measure::{Axis, Item, Measured, Pass, Plan, gaps, offsets, shares};
use crate::{LayoutOptions, rescale_size};

/// Grid layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridLayout {
    rows: usize,
    columns: usize,
    item_size: Size,
    scale_down: bool,
}

/// A child's merged cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Area {
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
}

/// Column widths or row heights. Only the tracks some child reaches are
/// materialized; `total` spans all of them, gaps included.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tracks {
    sizes: Vec<i32>,
    total: i32,
}

impl GridLayout {
    /// A grid with both counts on auto.
    pub fn new() -> Self {
        Self::default()
    }

    /// Row count (0 = derive from the children).
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Column count (0 = derive from the children).
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Fixed cell size; 0 on an axis divides the container instead.
    #[must_use]
    pub fn item_size(mut self, width: i32, height: i32) -> Self {
        self.item_size = Size::new(width, height).validate();
        self
    }

    /// Shrink oversized children to their merged cell, keeping aspect ratio.
    #[must_use]
    pub fn scale_down(mut self, scale_down: bool) -> Self {
        self.scale_down = scale_down;
        self
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns
    }

    pub fn cell_size(&self) -> Size {
        self.item_size
    }

    pub fn set_rows(&mut self, rows: usize) -> ConfigChange {
        update(&mut self.rows, rows)
    }

    pub fn set_columns(&mut self, columns: usize) -> ConfigChange {
        update(&mut self.columns, columns)
    }

    pub fn set_item_size(&mut self, size: Size) -> ConfigChange {
        update(&mut self.item_size, size.validate())
    }

    pub fn set_scale_down(&mut self, scale_down: bool) -> ConfigChange {
        update(&mut self.scale_down, scale_down)
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) -> Result<ConfigChange, AttributeError> {
        match name {
            "rows" => Ok(self.set_rows(parse_int(name, value)?)),
            "columns" => Ok(self.set_columns(parse_int(name, value)?)),
            "item_size" => {
                let (w, h) = parse_pair(name, value)?;
                Ok(self.set_item_size(Size::new(w, h)))
            }
            "scale_down" => Ok(self.set_scale_down(parse_bool(name, value)?)),
            _ => Err(AttributeError::unrecognized(name)),
        }
    }

    pub(crate) fn rescale(&mut self, old: u32, new: u32) -> ConfigChange {
        self.set_item_size(rescale_size(self.item_size, old, new))
    }

    /// Effective `(rows, columns)` for a grid that must hold `cells` cells.
    pub fn dimensions(&self, cells: usize) -> (usize, usize) {
        match (self.rows, self.columns) {
            (0, 0) => {
                // A spare column leaves room for spans past a square.
                let columns = ceil_sqrt(cells) + 1;
                (cells.div_ceil(columns).max(1), columns)
            }
            (rows, 0) => (rows, cells.div_ceil(rows).max(1)),
            (0, columns) => (cells.div_ceil(columns).max(1), columns),
            fixed => fixed,
        }
    }

    pub(crate) fn plan<C: Sizeable>(
        &self,
        options: &LayoutOptions,
        children: &[C],
        rect: Rect,
        content: Rect,
        pass: Pass,
    ) -> Result<Plan, LayoutError> {
        let Measured { items, floats } = Measured::new(children, content.size(), options);
        let mut plan = Plan::with_capacity(items.len() + floats.len());
        if items.is_empty() {
            plan.place_floats(&floats, rect, pass);
            return Ok(plan);
        }

        let cells = items
            .iter()
            .map(|item| item.row_span.saturating_mul(item.column_span))
            .fold(0usize, usize::saturating_add);
        let (rows, columns) = self.dimensions(cells);
        let areas = match occupy(&items, rows, columns) {
            Ok(areas) => areas,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %err, rows, columns, "grid placement aborted");
                return Err(err);
            }
        };

        let (gap_x, gap_y) = (Axis::X.gap(options), Axis::Y.gap(options));
        let widths = self.tracks(&items, &areas, Axis::X, columns, content.width(), gap_x, pass);
        let heights = self.tracks(&items, &areas, Axis::Y, rows, content.height(), gap_y, pass);
        let block = Size::new(widths.total, heights.total);
        plan.content = block;

        if pass.is_arrange() {
            let left = content.left
                + Axis::X
                    .default_align(options)
                    .offset(content.width(), block.width);
            let top = content.top
                + Axis::Y
                    .default_align(options)
                    .offset(content.height(), block.height);
            let (widths, heights) = (&widths.sizes, &heights.sizes);
            let xs = offsets(left, widths, gap_x);
            let ys = offsets(top, heights, gap_y);

            for (item, area) in items.iter().zip(&areas) {
                let last_col = area.column + area.columns - 1;
                let last_row = area.row + area.rows - 1;
                let cell = Rect::new(
                    xs[area.column],
                    ys[area.row],
                    xs[last_col] + widths[last_col],
                    ys[last_row] + heights[last_row],
                );
                let mut size = item.fit(cell);
                if self.scale_down {
                    size = item.scale_into(size, cell);
                }
                plan.push(item, item.place(cell, size));
            }
            plan.place_floats(&floats, rect, pass);
        }
        Ok(plan)
    }

    /// Column widths or row heights for `count` tracks.
    #[allow(clippy::too_many_arguments)]
    fn tracks(
        &self,
        items: &[Item],
        areas: &[Area],
        axis: Axis,
        count: usize,
        extent: i32,
        gap: i32,
        pass: Pass,
    ) -> Tracks {
        let reach = |area: &Area| match axis {
            Axis::X => (area.column, area.columns),
            Axis::Y => (area.row, area.rows),
        };
        let used = areas
            .iter()
            .map(|area| {
                let (start, span) = reach(area);
                start + span
            })
            .max()
            .unwrap_or(0);
        let between = gaps(gap, count);
        let n = i32::try_from(count).unwrap_or(i32::MAX);

        let fixed = axis.of(self.item_size);
        if fixed > 0 {
            return Tracks {
                sizes: vec![fixed; used],
                total: fixed.saturating_mul(n).saturating_add(between),
            };
        }
        if pass.is_arrange() {
            let free = extent.saturating_sub(between);
            return Tracks {
                sizes: shares(free, count).take(used).collect(),
                total: free.max(0).saturating_add(between),
            };
        }
        // Uniform cell big enough for every child's share of its span.
        let cell = items
            .iter()
            .zip(areas)
            .map(|(item, area)| {
                let (_, span) = reach(area);
                let spanned = item
                    .natural_footprint(axis)
                    .saturating_sub(gaps(gap, span))
                    .max(0);
                let span = i32::try_from(span).unwrap_or(i32::MAX);
                spanned.saturating_add(span - 1) / span
            })
            .max()
            .unwrap_or(0);
        Tracks {
            sizes: vec![cell; used],
            total: cell.saturating_mul(n).saturating_add(between),
        }
    }
}

/// Claim cells in row-major order. Only claimed cells are stored, so the
/// configured counts never decide how much is allocated.
fn occupy(items: &[Item], rows: usize, columns: usize) -> Result<Vec<Area>, LayoutError> {
    let mut taken = HashSet::new();
    let mut cursor = 0usize;
    let mut areas = Vec::with_capacity(items.len());

    for item in items {
        while taken.contains(&(cursor / columns, cursor % columns)) {
            cursor += 1;
        }
        let (row, column) = (cursor / columns, cursor % columns);
        if row >= rows {
            return Err(LayoutError::GridFull { child: item.index });
        }
        let area = Area {
            row,
            column,
            rows: item.row_span.min(rows - row),
            columns: item.column_span.min(columns - column),
        };
        for r in row..row + area.rows {
            for c in column..column + area.columns {
                if !taken.insert((r, c)) {
                    return Err(LayoutError::GridConflict {
                        child: item.index,
                        row: r,
                        column: c,
                    });
                }
            }
        }
        areas.push(area);
    }
    Ok(areas)
}

fn ceil_sqrt(n: usize) -> usize {
    let root = n.isqrt();
    if root * root < n { root + 1 } else { root }
}
