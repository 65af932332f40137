//! # Changing elements on the reference line
//!
//! Pass and vertical mode position the next pels relative to `b1` and `b2`,
//! the next two changing elements of the previous ("reference") line.

use crate::Color;

/// Find `b1` and `b2` on `reference`
///
/// A changing element is a pel whose color differs from the one before it,
/// the pel before index 0 counts as white. `b1` is the first changing element
/// after `a0` whose color is the opposite of `a0_color`, `b2` the next
/// changing element after `b1`. When `a0` is 0 the search includes index 0,
/// otherwise it starts at `a0 + 1`.
///
/// Elements that don't exist are reported as `reference.len()`. If `only_b1`
/// is set, the search stops after `b1` and `b2` is always `reference.len()`.
pub fn find_changing_elements(
    reference: &[Color],
    a0: usize,
    a0_color: Color,
    only_b1: bool,
) -> (usize, usize) {
    let width = reference.len();
    let other = !a0_color;
    let start = if a0 == 0 { 0 } else { a0 + 1 };

    let mut b1 = None;
    let mut last = if start == 0 {
        Color::White
    } else if start <= width {
        reference[start - 1]
    } else {
        return (width, width);
    };

    for (i, &color) in reference.iter().enumerate().skip(start) {
        if color != last {
            // changing element
            match b1 {
                None if color == other => {
                    if only_b1 {
                        return (i, width);
                    }
                    b1 = Some(i);
                }
                Some(b1) if color == a0_color => return (b1, i),
                _ => {}
            }
            last = color;
        }
    }
    (b1.unwrap_or(width), width)
}
