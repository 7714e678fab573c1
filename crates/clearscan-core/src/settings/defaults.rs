//! Default values for filter parameters, shared between `Default` and serde.

pub(crate) fn default_blur_times() -> i32 {
    13
}

pub(crate) fn default_bilateral_d() -> i32 {
    3
}

pub(crate) fn default_bilateral_sigma() -> f64 {
    20.0
}

pub(crate) fn default_nlm_h() -> f64 {
    3.0
}

pub(crate) fn default_nlm_template() -> i32 {
    7
}

pub(crate) fn default_nlm_search() -> i32 {
    21
}

pub(crate) fn default_unsharp_k() -> f64 {
    1.5
}

pub(crate) fn default_blend_alpha() -> f64 {
    1.0
}

pub(crate) fn default_zero_i32() -> i32 {
    0
}

pub(crate) fn default_zero_f64() -> f64 {
    0.0
}
