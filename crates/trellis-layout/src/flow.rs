#![forbid(unsafe_code)]

//! Wrapping flow layout.
//!
//! Children are laid out one after another along the main axis. After each
//! child the layout looks ahead: if the next one (plus spacing) would cross
//! the container edge, the line is closed. The first child of a line is
//! always placed, even when it overflows on its own.

use std::ops::Range;

use trellis_core::{Rect, Size, Sizeable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::measure::{Axis, Item, Measured, Pass, Plan, gaps};
use crate::{Direction, LayoutOptions};

/// Flow along `direction`, wrapping into new lines (rows for a horizontal
/// flow, columns for a vertical one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowLayout {
    pub direction: Direction,
}

/// One closed line of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    /// Items on the line, as indices into the measured item list.
    pub range: Range<usize>,
    /// Main-axis extent: footprints plus spacing.
    pub main: i32,
    /// Thickest footprint on the line.
    pub cross: i32,
}

/// Main-axis footprint of an item. Stretch children fill the line when
/// arranging and count for nothing when estimating.
pub(crate) fn main_footprint(item: &Item, main: Axis, limit: i32, pass: Pass) -> i32 {
    let len = if !item.is_stretch(main) {
        item.natural(main)
    } else if pass.is_arrange() {
        item.clamp(main, limit.saturating_sub(item.margin_sum(main)))
    } else {
        return 0;
    };
    len.saturating_add(item.margin_sum(main))
}

/// Greedy line breaking with one-item lookahead. `None` disables wrapping.
pub(crate) fn break_lines(
    items: &[Item],
    footprints: &[i32],
    cross: Axis,
    gap: i32,
    limit: Option<i32>,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut cursor = 0;
    let mut thickness = 0;

    for (k, item) in items.iter().enumerate() {
        cursor = if k == start {
            footprints[k]
        } else {
            cursor.saturating_add(gap).saturating_add(footprints[k])
        };
        thickness = thickness.max(item.natural_footprint(cross));

        let close = match (footprints.get(k + 1), limit) {
            (None, _) => true,
            (Some(&next), Some(limit)) => cursor.saturating_add(gap).saturating_add(next) > limit,
            (Some(_), None) => false,
        };
        if close {
            #[cfg(feature = "tracing")]
            tracing::trace!(line = lines.len(), items = k + 1 - start, extent = cursor, "line closed");
            lines.push(Line {
                range: start..k + 1,
                main: cursor,
                cross: thickness,
            });
            start = k + 1;
            thickness = 0;
        }
    }
    lines
}

/// Place closed lines one after another on the cross axis, each child
/// aligned within its line's thickness.
pub(crate) fn place_lines(
    plan: &mut Plan,
    items: &[Item],
    footprints: &[i32],
    lines: &[Line],
    main: Axis,
    origin: (i32, i32),
    gaps_between: (i32, i32),
) {
    let cross = main.cross();
    let (main_origin, mut line_pos) = origin;
    let (main_gap, cross_gap) = gaps_between;

    for line in lines {
        let mut pos = main_origin;
        for k in line.range.clone() {
            let item = &items[k];
            let len = footprints[k] - item.margin_sum(main);
            let thickness = item.resolve(cross, line.cross);
            let cross_pos = line_pos
                + item.margin_lead(cross)
                + item
                    .align(cross)
                    .offset(line.cross - item.margin_sum(cross), thickness);
            plan.push(
                item,
                main.rect(pos + item.margin_lead(main), len, cross_pos, thickness),
            );
            pos += footprints[k] + main_gap;
        }
        line_pos += line.cross + cross_gap;
    }
}

/// Extent of a block of lines: the widest line by the summed thickness.
pub(crate) fn block_size(lines: &[Line], main: Axis, cross_gap: i32) -> Size {
    let widest = lines.iter().map(|line| line.main).max().unwrap_or(0);
    let thick = lines
        .iter()
        .map(|line| line.cross)
        .fold(gaps(cross_gap, lines.len()), i32::saturating_add);
    main.size(widest, thick)
}

impl FlowLayout {
    pub const fn new(direction: Direction) -> Self {
        Self { direction }
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

        let limit = main.of(content.size());
        let wrap = (pass.is_arrange() || limit > 0).then_some(limit);
        let footprints: Vec<i32> = items
            .iter()
            .map(|item| main_footprint(item, main, limit, pass))
            .collect();
        let lines = break_lines(&items, &footprints, cross, main_gap, wrap);

        let block = block_size(&lines, main, cross_gap);
        let mut plan = Plan::with_capacity(items.len() + floats.len());
        plan.content = floats.iter().fold(block, |acc, item| {
            acc.max(Size::new(
                item.natural_footprint(Axis::X),
                item.natural_footprint(Axis::Y),
            ))
        });

        if pass.is_arrange() {
            let shift = main.default_align(options).offset(limit, main.of(block));
            place_lines(
                &mut plan,
                &items,
                &footprints,
                &lines,
                main,
                (main.start(content) + shift, cross.start(content)),
                (main_gap, cross_gap),
            );
            plan.place_floats(&floats, rect, pass);
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, Layout, Leaf};
    use trellis_core::{
        HorizontalAlign, Padding, Rect, Size, SizeSpec, Sizeable, VerticalAlign,
    };

    #[test]
    fn third_child_wraps_at_the_edge() {
        let layout = Layout::flow(Direction::Horizontal);
        let mut children = vec![Leaf::fixed(40, 10), Leaf::fixed(40, 10), Leaf::fixed(40, 10)];
        let size = layout
            .arrange_children(&mut children, Rect::new(0, 0, 100, 100), Padding::default())
            .unwrap();
        assert_eq!(children[0].placed_rect(), Rect::new(0, 0, 40, 10));
        assert_eq!(children[1].placed_rect(), Rect::new(40, 0, 80, 10));
        assert_eq!(children[2].placed_rect(), Rect::new(0, 10, 40, 20));
        assert_eq!(size, Size::new(80, 20));
    }

    #[test]
    fn oversized_first_child_still_gets_a_line() {
        let layout = Layout::flow(Direction::Horizontal).child_margin(5, 5);
        let mut children = vec![Leaf::fixed(150, 10), Leaf::fixed(30, 20)];
        layout
            .arrange_children(&mut children, Rect::new(0, 0, 100, 100), Padding::default())
            .unwrap();
        assert_eq!(children[0].placed_rect(), Rect::new(0, 0, 150, 10));
        assert_eq!(children[1].placed_rect(), Rect::new(0, 15, 30, 35));
    }

    #[test]
    fn children_align_within_their_line() {
        let layout = Layout::flow(Direction::Horizontal);
        let mut children = vec![
            Leaf::fixed(20, 30),
            Leaf::fixed(20, 10).valign(VerticalAlign::Bottom),
            Leaf::fixed(20, 10).valign(VerticalAlign::Justify),
        ];
        layout
            .arrange_children(&mut children, Rect::new(0, 0, 100, 100), Padding::default())
            .unwrap();
        assert_eq!(children[1].placed_rect(), Rect::new(20, 20, 40, 30));
        assert_eq!(children[2].placed_rect(), Rect::new(40, 0, 60, 30));
    }

    #[test]
    fn block_is_shifted_by_container_alignment() {
        let layout = Layout::flow(Direction::Horizontal)
            .child_align(HorizontalAlign::Right, VerticalAlign::Top);
        let mut children = vec![Leaf::fixed(40, 10), Leaf::fixed(40, 10), Leaf::fixed(20, 10)];
        layout
            .arrange_children(&mut children, Rect::new(0, 0, 100, 100), Padding::default())
            .unwrap();
        // widest line is 80: every line starts at 20.
        assert_eq!(children[0].placed_rect().left, 20);
        assert_eq!(children[2].placed_rect().left, 20);
    }

    #[test]
    fn vertical_flow_wraps_into_columns() {
        let layout = Layout::flow(Direction::Vertical).child_margin(4, 0);
        let mut children = vec![Leaf::fixed(10, 30), Leaf::fixed(12, 30), Leaf::fixed(10, 30)];
        let size = layout
            .arrange_children(&mut children, Rect::new(0, 0, 100, 70), Padding::default())
            .unwrap();
        assert_eq!(children[1].placed_rect(), Rect::new(0, 30, 12, 60));
        assert_eq!(children[2].placed_rect(), Rect::new(16, 0, 26, 30));
        assert_eq!(size, Size::new(26, 60));
    }

    #[test]
    fn unknown_extent_means_one_line() {
        let layout = Layout::flow(Direction::Horizontal).child_margin(10, 0);
        let children = vec![Leaf::fixed(40, 10), Leaf::fixed(40, 12), Leaf::fixed(40, 10)];
        let size = layout
            .estimate_layout_size(&children, Size::ZERO, Padding::default())
            .unwrap();
        assert_eq!(size, Size::new(140, 12));
    }

    #[test]
    fn floating_footprint_is_folded_in() {
        let layout = Layout::flow(Direction::Horizontal);
        let children = vec![Leaf::fixed(40, 10), Leaf::fixed(10, 90).floating(true)];
        let size = layout
            .estimate_layout_size(&children, Size::new(100, 100), Padding::default())
            .unwrap();
        assert_eq!(size, Size::new(40, 90));
    }

    #[test]
    fn stretch_fills_its_own_line_when_arranging() {
        let layout = Layout::flow(Direction::Horizontal);
        let mut children = vec![
            Leaf::fixed(30, 10),
            Leaf::new(0, 10).width(SizeSpec::FILL),
        ];
        layout
            .arrange_children(&mut children, Rect::new(0, 0, 100, 100), Padding::default())
            .unwrap();
        assert_eq!(children[1].placed_rect(), Rect::new(0, 10, 100, 20));
    }
}
