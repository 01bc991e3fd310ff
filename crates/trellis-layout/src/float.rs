#![forbid(unsafe_code)]

//! Float placement: every child aligned on its own inside the container.

use trellis_core::{Rect, Size, Sizeable};

use crate::LayoutOptions;
use crate::measure::{Axis, Measured, Pass, Plan};

pub(crate) fn plan<C: Sizeable>(
    options: &LayoutOptions,
    children: &[C],
    content: Rect,
    pass: Pass,
) -> Plan {
    let Measured { items, floats } = Measured::new(children, content.size(), options);
    let mut plan = Plan::with_capacity(items.len() + floats.len());

    plan.content = items.iter().fold(Size::ZERO, |acc, item| {
        acc.max(Size::new(
            item.natural_footprint(Axis::X),
            item.natural_footprint(Axis::Y),
        ))
    });

    if pass.is_arrange() {
        for item in items.iter().chain(&floats) {
            plan.push(item, item.place_float(content));
        }
    }
    plan
}
