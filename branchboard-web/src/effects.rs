//! DOM-facing effect sink.
//!
//! The core pushes scalar signals here; the decorative layers (noise,
//! scanline, hue shift, background video) read the exported custom
//! properties and data attributes on their own animation cadence. No
//! rendering happens in this module.

use branchboard_core::EffectSink;
use wasm_bindgen::JsCast;

use crate::dom;

/// Chaos tier driving which background ambience the cosmetic layer picks.
#[must_use]
pub fn chaos_tier(level: u32) -> &'static str {
    match level {
        80.. => "high",
        50..=79 => "mid",
        2..=49 => "strong",
        _ => "calm",
    }
}

/// Forwards chaos/witness scalars to CSS custom properties on the root
/// element plus data attributes on `<body>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomEffectSink;

impl DomEffectSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn set_root_property(name: &str, value: &str) {
        let Some(root) = dom::document().document_element() else {
            return;
        };
        if let Ok(el) = root.dyn_into::<web_sys::HtmlElement>() {
            let _ = el.style().set_property(name, value);
        }
    }

    fn set_body_attribute(name: &str, value: &str) {
        if let Some(body) = dom::document().body() {
            let _ = body.set_attribute(name, value);
        }
    }
}

impl EffectSink for DomEffectSink {
    fn chaos_level(&self, level: u32) {
        Self::set_root_property("--chaos-level", &level.to_string());
        Self::set_body_attribute("data-chaos-tier", chaos_tier(level));
    }

    fn witness_level(&self, level: u32, rapid: bool) {
        Self::set_root_property("--witness-level", &level.to_string());
        Self::set_body_attribute("data-witness-rapid", if rapid { "1" } else { "0" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaos_tiers_match_ambience_thresholds() {
        assert_eq!(chaos_tier(0), "calm");
        assert_eq!(chaos_tier(1), "calm");
        assert_eq!(chaos_tier(2), "strong");
        assert_eq!(chaos_tier(49), "strong");
        assert_eq!(chaos_tier(50), "mid");
        assert_eq!(chaos_tier(80), "high");
        assert_eq!(chaos_tier(500), "high");
    }
}
