#![forbid(unsafe_code)]

//! Linear stacking along one axis.
//!
//! Fixed and auto children take their own size; stretch children share what
//! is left by weight. A share that violates a child's limits is clamped, the
//! child leaves the pool, and the rest is redistributed among the remaining
//! stretch children until nothing more needs clamping.

use trellis_core::{Rect, Sizeable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::measure::{Axis, AxisAlign, Item, Measured, Pass, Plan, distribute, gaps};
use crate::{Direction, LayoutOptions};

/// A horizontal or vertical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinearLayout {
    pub direction: Direction,
}

impl LinearLayout {
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
        let gap = main.gap(options);
        let spacing = gaps(gap, items.len());

        let mut plan = Plan::with_capacity(items.len() + floats.len());
        plan.place_floats(&floats, rect, pass);

        if !pass.is_arrange() {
            let along = items
                .iter()
                .map(|item| item.natural_footprint(main))
                .fold(spacing, i32::saturating_add);
            let across = items
                .iter()
                .map(|item| item.natural_footprint(cross))
                .max()
                .unwrap_or(0);
            plan.content = main.size(along, across);
            return plan;
        }

        let extent = main.of(content.size());
        let sizes = main_sizes(&items, main, extent, gap);
        let cross_extent = cross.of(content.size());

        let used = items
            .iter()
            .zip(&sizes)
            .map(|(item, size)| size.saturating_add(item.margin_sum(main)))
            .fold(spacing, i32::saturating_add);
        let leftover = (extent - used).max(0);
        let align = main.default_align(options);
        let (mut pos, between) = match align {
            AxisAlign::Justify if items.len() > 1 => (0, distribute(leftover, items.len() - 1)),
            other => (other.offset(extent, used), Vec::new()),
        };
        pos += main.start(content);

        let mut across = 0;
        for (k, (item, &size)) in items.iter().zip(&sizes).enumerate() {
            let thickness = item.resolve(cross, cross_extent);
            let cross_pos = cross.start(content)
                + item.margin_lead(cross)
                + item
                    .align(cross)
                    .offset(cross_extent - item.margin_sum(cross), thickness);
            plan.push(
                item,
                main.rect(pos + item.margin_lead(main), size, cross_pos, thickness),
            );
            across = across.max(thickness.saturating_add(item.margin_sum(cross)));
            pos += size + item.margin_sum(main) + gap + between.get(k).copied().unwrap_or(0);
        }

        plan.content = main.size(used, across);
        plan
    }
}

/// Main-axis sizes for the arranging pass.
fn main_sizes(items: &[Item], main: Axis, extent: i32, gap: i32) -> Vec<i32> {
    let mut sizes = vec![0; items.len()];
    let mut pool = Vec::new();
    let mut fixed_total = gaps(gap, items.len());
    let mut consumed = 0;

    for (k, item) in items.iter().enumerate() {
        let margin = item.margin_sum(main);
        fixed_total = fixed_total.saturating_add(margin);
        if item.is_stretch(main) {
            pool.push(k);
            consumed += item.min(main) + margin + gap;
            continue;
        }
        // First fit: an earlier child keeps its size, a later one shrinks
        // to what is left but never below its minimum.
        let room = (extent - consumed - margin).max(0);
        let size = item.natural(main).min(room).max(item.min(main));
        sizes[k] = size;
        fixed_total = fixed_total.saturating_add(size);
        consumed += size + margin + gap;
    }

    let usable = (extent - fixed_total).max(0);
    share_stretch(items, main, &mut sizes, pool, usable);
    sizes
}

/// Clamp-and-redistribute over the stretch pool.
fn share_stretch(items: &[Item], main: Axis, sizes: &mut [i32], mut pool: Vec<usize>, mut usable: i32) {
    let weight = |k: usize| i64::from(items[k].spec(main).stretch_weight());

    // Every round removes at least one child, so this is bounded by the
    // pool size.
    while !pool.is_empty() {
        let total: i64 = pool.iter().map(|&k| weight(k)).sum();
        let targets: Vec<i32> = pool
            .iter()
            .map(|&k| (i64::from(usable) * weight(k) / total.max(1)) as i32)
            .collect();

        let clamped: Vec<(usize, i32)> = pool
            .iter()
            .zip(&targets)
            .filter_map(|(&k, &target)| {
                let size = items[k].clamp(main, target);
                (size != target).then_some((k, size))
            })
            .collect();

        if clamped.is_empty() {
            for (&k, &target) in pool.iter().zip(&targets) {
                sizes[k] = target;
            }
            let remainder = usable - targets.iter().sum::<i32>();
            hand_out(items, main, sizes, &pool, remainder);
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            clamped = clamped.len(),
            remaining = pool.len() - clamped.len(),
            usable,
            "stretch shares clamped"
        );

        for (k, size) in clamped {
            sizes[k] = size;
            usable -= size;
            pool.retain(|&p| p != k);
        }
        usable = usable.max(0);
    }
}

/// Give leftover pixels one at a time in order, skipping children already
/// at their maximum.
fn hand_out(items: &[Item], main: Axis, sizes: &mut [i32], pool: &[usize], mut remainder: i32) {
    while remainder > 0 {
        let mut progressed = false;
        for &k in pool {
            if remainder == 0 {
                break;
            }
            if !items[k].at_max(main, sizes[k]) {
                sizes[k] += 1;
                remainder -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
}
