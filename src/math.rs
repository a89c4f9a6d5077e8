/// Linearly rescale a value from one integer range to another
///
/// Uses integer math for efficiency on embedded systems. The result is
/// truncated toward zero, so `in_hi` maps to `out_hi` exactly and
/// intermediate values land on the floor of the ideal line.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn map_range(value: u16, in_lo: u16, in_hi: u16, out_lo: u16, out_hi: u16) -> u16 {
    if in_hi == in_lo {
        return out_lo;
    }

    let span_in = (in_hi - in_lo) as u32;
    let span_out = (out_hi - out_lo) as u32;
    let offset = (value.saturating_sub(in_lo)) as u32;

    (offset * span_out / span_in) as u16 + out_lo
}
