#![forbid(unsafe_code)]

//! Tile layout: children in near-uniform cells.
//!
//! For a horizontal tile the configured count is the number of columns and
//! the cell's main size its width; a vertical tile mirrors this with rows
//! and height. The mode follows from the configuration:
//!
//! | count | cell size | auto calc | behaviour                                   |
//! |-------|-----------|-----------|---------------------------------------------|
//! | 0     | 0         | off       | free flow, lines filled with actual sizes   |
//! | 0     | set       | -         | as many cells as fit                        |
//! | set   | 0         | off       | per-column widths from the widest member    |
//! | set   | set       | -         | uniform grid                                |
//! | 0     | 0         | on        | as many cells as fit, each as wide as the widest child |

use trellis_core::{Rect, Size, Sizeable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attr::{ConfigChange, parse_bool, parse_int, parse_pair, update};
use crate::error::AttributeError;
use crate::flow::{block_size, break_lines, main_footprint, place_lines};
use crate::measure::{Axis, Item, Measured, Pass, Plan, gaps, offsets, shares};
use crate::{Direction, LayoutOptions, rescale_size};

/// Tile layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileLayout {
    direction: Direction,
    columns: usize,
    rows: usize,
    item_size: Size,
    scale_down: bool,
    auto_calc_columns: bool,
}

impl TileLayout {
    /// A tile filling lines along `direction`, every setting on auto.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Tiles filling rows left to right.
    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Tiles filling columns top to bottom.
    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Fixed column count (0 = auto). Used by horizontal tiles.
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Fixed row count (0 = auto). Used by vertical tiles.
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Fixed cell size; 0 on an axis means auto.
    #[must_use]
    pub fn item_size(mut self, width: i32, height: i32) -> Self {
        self.item_size = Size::new(width, height).validate();
        self
    }

    /// Shrink oversized children to their cell, keeping aspect ratio.
    #[must_use]
    pub fn scale_down(mut self, scale_down: bool) -> Self {
        self.scale_down = scale_down;
        self
    }

    /// Derive the column count from the widest child.
    #[must_use]
    pub fn auto_calc_columns(mut self, auto: bool) -> Self {
        self.auto_calc_columns = auto;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn num_columns(&self) -> usize {
        self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> Size {
        self.item_size
    }

    pub fn set_direction(&mut self, direction: Direction) -> ConfigChange {
        update(&mut self.direction, direction)
    }

    pub fn set_columns(&mut self, columns: usize) -> ConfigChange {
        update(&mut self.columns, columns)
    }

    pub fn set_rows(&mut self, rows: usize) -> ConfigChange {
        update(&mut self.rows, rows)
    }

    pub fn set_item_size(&mut self, size: Size) -> ConfigChange {
        update(&mut self.item_size, size.validate())
    }

    pub fn set_scale_down(&mut self, scale_down: bool) -> ConfigChange {
        update(&mut self.scale_down, scale_down)
    }

    pub fn set_auto_calc_columns(&mut self, auto: bool) -> ConfigChange {
        update(&mut self.auto_calc_columns, auto)
    }

    pub(crate) fn set_attribute(&mut self, name: &str, value: &str) -> Result<ConfigChange, AttributeError> {
        match name {
            "columns" => Ok(self.set_columns(parse_int(name, value)?)),
            "rows" => Ok(self.set_rows(parse_int(name, value)?)),
            "item_size" => {
                let (w, h) = parse_pair(name, value)?;
                Ok(self.set_item_size(Size::new(w, h)))
            }
            "scale_down" => Ok(self.set_scale_down(parse_bool(name, value)?)),
            "auto_calc_columns" => Ok(self.set_auto_calc_columns(parse_bool(name, value)?)),
            _ => Err(AttributeError::unrecognized(name)),
        }
    }

    pub(crate) fn rescale(&mut self, old: u32, new: u32) -> ConfigChange {
        self.set_item_size(rescale_size(self.item_size, old, new))
    }

    /// Configured count along the main axis.
    fn count(&self) -> usize {
        match self.direction {
            Direction::Horizontal => self.columns,
            Direction::Vertical => self.rows,
        }
    }

    pub(crate) fn plan<C: Sizeable>(
        &self,
        options: &LayoutOptions,
        children: &[C],
        rect: Rect,
        content: Rect,
        pass: Pass,
    ) -> Plan {
        let main = Axis::main(self.direction);
        let cross = main.cross();
        let Measured { items, floats } = Measured::new(children, content.size(), options);
        let main_gap = main.gap(options);
        let cross_gap = cross.gap(options);
        let extent = main.of(content.size());
        let cell_main = main.of(self.item_size);
        let cell_cross = cross.of(self.item_size);

        let mut plan = Plan::with_capacity(items.len() + floats.len());
        plan.place_floats(&floats, rect, pass);
        if items.is_empty() {
            return plan;
        }

        if self.count() == 0 && cell_main == 0 && !self.auto_calc_columns {
            let footprints: Vec<i32> = items
                .iter()
                .map(|item| main_footprint(item, main, extent, pass))
                .collect();
            let wrap = (pass.is_arrange() || extent > 0).then_some(extent);
            let lines = break_lines(&items, &footprints, cross, main_gap, wrap);
            plan.content = block_size(&lines, main, cross_gap);
            if pass.is_arrange() {
                place_lines(
                    &mut plan,
                    &items,
                    &footprints,
                    &lines,
                    main,
                    (main.start(content), cross.start(content)),
                    (main_gap, cross_gap),
                );
            }
            return plan;
        }

        let widest = items
            .iter()
            .map(|item| item.natural_footprint(main))
            .max()
            .unwrap_or(0);
        let count = match self.count() {
            0 => per_line(extent, if cell_main > 0 { cell_main } else { widest }, main_gap),
            n => n,
        };
        let columns = self.column_table(&items, main, count, widest, extent, main_gap, pass);
        let lines = items.len().div_ceil(count);
        let thickness: Vec<i32> = (0..lines)
            .map(|line| {
                if cell_cross > 0 {
                    cell_cross
                } else {
                    let start = line.saturating_mul(count);
                    items[start..start.saturating_add(count).min(items.len())]
                        .iter()
                        .map(|item| item.natural_footprint(cross))
                        .max()
                        .unwrap_or(0)
                }
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(count, lines, cell_main, cell_cross, "tile cells");

        let used = count.min(items.len());
        let along = columns
            .iter()
            .fold(gaps(main_gap, used), |acc, w| acc.saturating_add(*w));
        let across = thickness
            .iter()
            .fold(gaps(cross_gap, lines), |acc, h| acc.saturating_add(*h));
        plan.content = main.size(along, across);

        if pass.is_arrange() {
            let column_pos = offsets(main.start(content), &columns, main_gap);
            let line_pos = offsets(cross.start(content), &thickness, cross_gap);
            for (k, item) in items.iter().enumerate() {
                let (line, col) = (k / count, k % count);
                let slot = main.rect(column_pos[col], columns[col], line_pos[line], thickness[line]);
                let mut size = item.fit(slot);
                if self.scale_down {
                    size = item.scale_into(size, slot);
                }
                plan.push(item, item.place(slot, size));
            }
        }
        plan
    }

    /// Main-axis extent of every column (row, for a vertical tile) that
    /// holds a child. The estimate and the arrangement share this table;
    /// only arranging hands out the space left in the container, split over
    /// all `count` columns.
    #[allow(clippy::too_many_arguments)]
    fn column_table(
        &self,
        items: &[Item],
        main: Axis,
        count: usize,
        widest: i32,
        extent: i32,
        gap: i32,
        pass: Pass,
    ) -> Vec<i32> {
        let used = count.min(items.len());
        let cell_main = main.of(self.item_size);
        if cell_main > 0 {
            return vec![cell_main; used];
        }
        if self.auto_calc_columns {
            return vec![widest; used];
        }
        let mut columns = vec![0; used];
        for (k, item) in items.iter().enumerate() {
            let col = k % count;
            columns[col] = columns[col].max(item.natural_footprint(main));
        }
        if pass.is_arrange() {
            let taken = columns
                .iter()
                .fold(gaps(gap, count), |acc, w| acc.saturating_add(*w));
            for (width, extra) in columns.iter_mut().zip(shares(extent.saturating_sub(taken), count)) {
                *width += extra;
            }
        }
        columns
    }
}

/// How many cells of `cell` pixels fit in `extent`, at least one.
fn per_line(extent: i32, cell: i32, gap: i32) -> usize {
    let step = cell.saturating_add(gap);
    if step <= 0 {
        return 1;
    }
    let fit = extent.saturating_add(gap) / step;
    usize::try_from(fit).unwrap_or(0).max(1)
}
