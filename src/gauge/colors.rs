use plotters::style::RGBColor;
pub const GOOD: RGBColor = RGBColor(0x5b, 0xe7, 0xa9);
pub const OK: RGBColor = RGBColor(0x8d, 0xc6, 0xff);
pub const WARN: RGBColor = RGBColor(0xf8, 0xb4, 0x00);
pub const BAD: RGBColor = RGBColor(0xff, 0x00, 0x7b);
/// Discrete classification of a frame rate, ordered from worst to best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RateTier {
    Bad,
    Warn,
    Ok,
    Good,
}
impl RateTier {
    pub fn of(rate: f64) -> Self {
        if rate > 59.0 {
            RateTier::Good
        } else if rate > 55.0 {
            RateTier::Ok
        } else if rate > 25.0 {
            RateTier::Warn
        } else {
            RateTier::Bad
        }
    }
    pub fn color(self) -> RGBColor {
        match self {
            RateTier::Good => GOOD,
            RateTier::Ok => OK,
            RateTier::Warn => WARN,
            RateTier::Bad => BAD,
        }
    }
}
/// Breakpoints of the color ramp, ascending by rate.
const STOPS: [(f64, RateTier); 4] = [
    (0.0, RateTier::Bad),
    (25.0, RateTier::Warn),
    (55.0, RateTier::Ok),
    (60.0, RateTier::Good),
];
/// Maps a rate to a display color by interpolating linearly between the ramp stops.
pub fn rate_color(rate: f64) -> RGBColor {
    let (lo, hi, t) = bracket(rate);
    lerp(lo.color(), hi.color(), t)
}
/// Ramp segment holding `rate`: the tiers at its ends and the position between them.
fn bracket(rate: f64) -> (RateTier, RateTier, f64) {
    if !rate.is_finite() || rate <= STOPS[0].0 {
        return (RateTier::Bad, RateTier::Bad, 0.0);
    }
    for pair in STOPS.windows(2) {
        let (lo, lo_tier) = pair[0];
        let (hi, hi_tier) = pair[1];
        if rate <= hi {
            return (lo_tier, hi_tier, (rate - lo) / (hi - lo));
        }
    }
    (RateTier::Good, RateTier::Good, 0.0)
}
fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}
