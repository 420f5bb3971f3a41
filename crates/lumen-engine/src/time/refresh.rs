/// Refresh rate used when the display cannot report one.
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Snaps a raw refresh rate onto one of the canonical rates.
///
/// Misreported hardware values (0, 1, 59, 75...) would otherwise produce odd
/// per-frame sleeps. Anything at or above 100 Hz is trusted as-is.
#[must_use]
pub fn normalize_hz(raw: i64) -> u32 {
    match raw {
        i64::MIN..=0 => DEFAULT_REFRESH_HZ,
        1..=30 => 30,
        31..=55 => 50,
        56..=99 => 60,
        hz => u32::try_from(hz).unwrap_or(u32::MAX),
    }
}

/// A canonical display refresh rate in whole Hz.
///
/// Only produced through normalization, so the value is never zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RefreshRate(u32);

impl RefreshRate {
    /// Normalizes a raw Hz value.
    pub fn from_hz(raw: i64) -> Self {
        Self(normalize_hz(raw))
    }

    /// Normalizes a monitor query result.
    ///
    /// winit reports refresh rates in millihertz and returns `None` when the
    /// platform cannot tell; that case falls back to the default rate.
    pub fn from_millihertz(mhz: Option<u32>) -> Self {
        match mhz {
            Some(mhz) => Self::from_hz(i64::from(mhz / 1000)),
            None => {
                log::warn!("refresh rate unavailable, falling back to default {DEFAULT_REFRESH_HZ}Hz");
                Self(DEFAULT_REFRESH_HZ)
            }
        }
    }

    #[inline]
    pub fn hz(self) -> u32 {
        self.0
    }
}

impl Default for RefreshRate {
    fn default() -> Self {
        Self(DEFAULT_REFRESH_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_falls_back_to_default() {
        assert_eq!(normalize_hz(0), 60);
        assert_eq!(normalize_hz(-1), 60);
        assert_eq!(normalize_hz(i64::MIN), 60);
    }

    #[test]
    fn up_to_thirty_snaps_to_thirty() {
        assert_eq!(normalize_hz(1), 30);
        assert_eq!(normalize_hz(24), 30);
        assert_eq!(normalize_hz(30), 30);
    }

    #[test]
    fn up_to_fifty_five_snaps_to_fifty() {
        assert_eq!(normalize_hz(31), 50);
        assert_eq!(normalize_hz(50), 50);
        assert_eq!(normalize_hz(55), 50);
    }

    #[test]
    fn below_hundred_snaps_to_sixty() {
        assert_eq!(normalize_hz(56), 60);
        assert_eq!(normalize_hz(59), 60);
        assert_eq!(normalize_hz(75), 60);
        assert_eq!(normalize_hz(99), 60);
    }

    #[test]
    fn hundred_and_above_pass_through() {
        assert_eq!(normalize_hz(100), 100);
        assert_eq!(normalize_hz(144), 144);
        assert_eq!(normalize_hz(240), 240);
    }

    #[test]
    fn millihertz_is_truncated_to_whole_hz() {
        assert_eq!(RefreshRate::from_millihertz(Some(59_940)).hz(), 60);
        assert_eq!(RefreshRate::from_millihertz(Some(143_856)).hz(), 143);
        assert_eq!(RefreshRate::from_millihertz(Some(0)).hz(), 60);
    }

    #[test]
    fn missing_rate_uses_default() {
        assert_eq!(RefreshRate::from_millihertz(None), RefreshRate::default());
        assert_eq!(RefreshRate::default().hz(), DEFAULT_REFRESH_HZ);
    }
}
