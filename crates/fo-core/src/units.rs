// fo-core/src/units.rs

use uom::si::f64::Time as UomTime;

// Public canonical unit types (SI, f64)
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn ms(v: f64) -> Time {
    use uom::si::time::millisecond;
    Time::new::<millisecond>(v)
}

/// Raw value in seconds.
#[inline]
pub fn seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}
