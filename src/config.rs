//! Runtime-tunable judgement policy (§6), built through a `const fn`
//! chaining builder in the same style as the teacher's `Difficulty` builder:
//! an immutable struct, a `Default` impl carrying the documented defaults,
//! and per-field setters that consume and return `Self`.

/// Immutable judgement configuration. Length fields are stored in
/// 1080-reference pixels; the `_px` accessors apply [`JudgeConfig::scale`]
/// to convert to actual canvas pixels. Tick-valued fields need no scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JudgeConfig {
    canvas_size: f64,
    hand_radius_max: f64,
    hand_radius_wifi: f64,
    hand_radius_normal: f64,
    distance_merge_slide: f64,
    delta_tangent_merge_slide_degrees: f64,
    tap_on_slide_threshold: f64,
    touch_on_slide_threshold: f64,
    overlay_threshold: f64,
    collide_threshold: f64,
    extra_paddown_delay: f64,
    release_delay: f64,
    wifi_need_c: bool,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl JudgeConfig {
    pub const fn new() -> Self {
        Self {
            canvas_size: 540.0,
            hand_radius_max: 180.0,
            hand_radius_wifi: 100.0,
            hand_radius_normal: 40.0,
            distance_merge_slide: 20.0,
            delta_tangent_merge_slide_degrees: 3.0,
            tap_on_slide_threshold: 1.0 / 3.0,
            touch_on_slide_threshold: 8.0,
            overlay_threshold: 2.0,
            collide_threshold: 12.0,
            extra_paddown_delay: 3.0,
            release_delay: 1.0,
            wifi_need_c: false,
        }
    }

    pub const fn with_canvas_size(mut self, v: f64) -> Self {
        self.canvas_size = v;
        self
    }

    pub const fn with_hand_radius_max(mut self, v: f64) -> Self {
        self.hand_radius_max = v;
        self
    }

    pub const fn with_hand_radius_wifi(mut self, v: f64) -> Self {
        self.hand_radius_wifi = v;
        self
    }

    pub const fn with_hand_radius_normal(mut self, v: f64) -> Self {
        self.hand_radius_normal = v;
        self
    }

    pub const fn with_distance_merge_slide(mut self, v: f64) -> Self {
        self.distance_merge_slide = v;
        self
    }

    pub const fn with_delta_tangent_merge_slide_degrees(mut self, v: f64) -> Self {
        self.delta_tangent_merge_slide_degrees = v;
        self
    }

    pub const fn with_tap_on_slide_threshold(mut self, v: f64) -> Self {
        self.tap_on_slide_threshold = v;
        self
    }

    pub const fn with_touch_on_slide_threshold(mut self, v: f64) -> Self {
        self.touch_on_slide_threshold = v;
        self
    }

    pub const fn with_overlay_threshold(mut self, v: f64) -> Self {
        self.overlay_threshold = v;
        self
    }

    pub const fn with_collide_threshold(mut self, v: f64) -> Self {
        self.collide_threshold = v;
        self
    }

    pub const fn with_extra_paddown_delay(mut self, v: f64) -> Self {
        self.extra_paddown_delay = v;
        self
    }

    pub const fn with_release_delay(mut self, v: f64) -> Self {
        self.release_delay = v;
        self
    }

    pub const fn with_wifi_need_c(mut self, v: bool) -> Self {
        self.wifi_need_c = v;
        self
    }

    /// `canvas_size / 1080`; multiply any reference-unit length by this to
    /// get the actual pixel length for the configured canvas.
    pub fn scale(&self) -> f64 {
        self.canvas_size / crate::geometry::REFERENCE_CANVAS
    }

    pub fn hand_radius_max_px(&self) -> f64 {
        self.hand_radius_max * self.scale()
    }

    pub fn hand_radius_wifi_px(&self) -> f64 {
        self.hand_radius_wifi * self.scale()
    }

    pub fn hand_radius_normal_px(&self) -> f64 {
        self.hand_radius_normal * self.scale()
    }

    pub fn distance_merge_slide_px(&self) -> f64 {
        self.distance_merge_slide * self.scale()
    }

    /// Reference-unit (1080-canvas) value, for comparison against geometry
    /// the catalogue and `Pad` never scale (engine-internal use — external
    /// renderers drawing to an actual `canvas_size` canvas want the `_px`
    /// accessor above instead).
    pub fn hand_radius_max(&self) -> f64 {
        self.hand_radius_max
    }

    pub fn distance_merge_slide(&self) -> f64 {
        self.distance_merge_slide
    }

    pub fn hand_radius_wifi(&self) -> f64 {
        self.hand_radius_wifi
    }

    pub fn hand_radius_normal(&self) -> f64 {
        self.hand_radius_normal
    }

    /// Chord length `2 sin(theta / 2)` corresponding to the configured
    /// tangent-angle merge tolerance, for comparison against the difference
    /// of two unit tangent vectors.
    pub fn delta_tangent_merge_slide(&self) -> f64 {
        2.0 * (self.delta_tangent_merge_slide_degrees.to_radians() / 2.0).sin()
    }

    pub fn tap_on_slide_threshold(&self) -> f64 {
        self.tap_on_slide_threshold
    }

    pub fn touch_on_slide_threshold(&self) -> f64 {
        self.touch_on_slide_threshold
    }

    pub fn overlay_threshold(&self) -> f64 {
        self.overlay_threshold
    }

    pub fn collide_threshold(&self) -> f64 {
        self.collide_threshold
    }

    pub fn extra_paddown_delay(&self) -> f64 {
        self.extra_paddown_delay
    }

    pub fn release_delay(&self) -> f64 {
        self.release_delay
    }

    pub fn wifi_need_c(&self) -> bool {
        self.wifi_need_c
    }

    /// Build a config from an external key-value map (e.g. a chart's
    /// embedded config block). Unrecognized keys or unparsable values are
    /// logged at `warn!` and fall back to the default for that key; this
    /// never fails.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();

        for (key, value) in pairs {
            match key {
                "canvas_size" => apply(&mut cfg.canvas_size, key, value),
                "hand_radius_max" => apply(&mut cfg.hand_radius_max, key, value),
                "hand_radius_wifi" => apply(&mut cfg.hand_radius_wifi, key, value),
                "hand_radius_normal" => apply(&mut cfg.hand_radius_normal, key, value),
                "distance_merge_slide" => apply(&mut cfg.distance_merge_slide, key, value),
                "delta_tangent_merge_slide" => {
                    apply(&mut cfg.delta_tangent_merge_slide_degrees, key, value)
                }
                "tap_on_slide_threshold" => apply(&mut cfg.tap_on_slide_threshold, key, value),
                "touch_on_slide_threshold" => apply(&mut cfg.touch_on_slide_threshold, key, value),
                "overlay_threshold" => apply(&mut cfg.overlay_threshold, key, value),
                "collide_threshold" => apply(&mut cfg.collide_threshold, key, value),
                "extra_paddown_delay" => apply(&mut cfg.extra_paddown_delay, key, value),
                "release_delay" => apply(&mut cfg.release_delay, key, value),
                "wifi_need_c" => match value.parse::<bool>() {
                    Ok(v) => cfg.wifi_need_c = v,
                    Err(_) => {
                        log::warn!("config key {key:?} has non-bool value {value:?}, keeping default")
                    }
                },
                _ => log::warn!("unrecognized config key {key:?}, keeping default"),
            }
        }

        cfg
    }
}

fn apply(field: &mut f64, key: &str, value: &str) {
    match value.parse::<f64>() {
        Ok(v) => *field = v,
        Err(_) => log::warn!("config key {key:?} has non-numeric value {value:?}, keeping default"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_table() {
        let cfg = JudgeConfig::default();
        assert_eq!(cfg.hand_radius_max, 180.0);
        assert_eq!(cfg.hand_radius_wifi, 100.0);
        assert_eq!(cfg.hand_radius_normal, 40.0);
        assert!(!cfg.wifi_need_c);
    }

    #[test]
    fn scale_is_identity_at_reference_canvas() {
        let cfg = JudgeConfig::new().with_canvas_size(1080.0);
        assert!((cfg.scale() - 1.0).abs() < 1e-9);
        assert!((cfg.hand_radius_max_px() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn builder_overrides_apply() {
        let cfg = JudgeConfig::new().with_wifi_need_c(true).with_collide_threshold(99.0);
        assert!(cfg.wifi_need_c());
        assert_eq!(cfg.collide_threshold(), 99.0);
    }

    #[test]
    fn from_pairs_falls_back_on_unknown_key() {
        let cfg = JudgeConfig::from_pairs([("not_a_real_key", "5")]);
        assert_eq!(cfg, JudgeConfig::default());
    }

    #[test]
    fn from_pairs_applies_recognized_keys() {
        let cfg = JudgeConfig::from_pairs([("wifi_need_c", "true"), ("overlay_threshold", "5")]);
        assert!(cfg.wifi_need_c());
        assert_eq!(cfg.overlay_threshold(), 5.0);
    }
}
