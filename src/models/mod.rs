//! Data models for the chip design flow diagram.
//!
//! The flow is a fixed, ordered table of [`Step`]s. Each step pairs a short
//! title with a one-line description; the pairing is structural (one struct
//! per step) so titles and descriptions can never drift out of step.

use serde::Serialize;

/// Title shown above the diagram.
pub const DIAGRAM_TITLE: &str = "Modern VLSI Chip Design Flow";

/// Number of stages in the chip design flow.
pub const STEP_COUNT: usize = 18;

/// A single stage of the chip design flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Primary label (drawn bold, upper half of the box)
    pub title: &'static str,
    /// Secondary label (drawn smaller, lower half of the box)
    pub description: &'static str,
}

impl Step {
    /// Create a new step.
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }
}

/// The stages of a modern VLSI chip design flow, in reading order.
pub const FLOW_STEPS: [Step; STEP_COUNT] = [
    Step::new("🟢 Concept", "Product definition"),
    Step::new("🔷 Architecture", "Architecture & Microarch."),
    Step::new("🧩 IP Selection", "IP & System Design"),
    Step::new("📝 RTL Coding", "RTL Design & Coding"),
    Step::new("🔎 Verification", "Verification"),
    Step::new("⏩ Synthesis", "RTL to Gates"),
    Step::new("🛠️ DFT", "Design-for-Test"),
    Step::new("📐 Physical Design", "Floorplan, Place, Route"),
    Step::new("⏱️ Timing & Signoff", "Timing Closure & Signoff"),
    Step::new("🚩 Tapeout", "Tapeout & Mask Gen."),
    Step::new("🏭 Fabrication", "Fab to Silicon"),
    Step::new("📦 Wafer Probe & Packaging", "Probe & Package"),
    Step::new("🧑‍💻 Bring-Up", "Post-Silicon Bring-Up"),
    Step::new("🔬 Testing", "Testing & Qualification"),
    Step::new("💾 Firmware & SW", "Firmware, Drivers, SW"),
    Step::new("🚚 Production", "Production & Supply Chain"),
    Step::new("💡 Launch", "Commercialization"),
    Step::new("⚠️ Pitfalls", "Best Practices & Pitfalls"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_has_eighteen_steps() {
        assert_eq!(FLOW_STEPS.len(), 18);
    }

    #[test]
    fn test_flow_endpoints() {
        assert_eq!(FLOW_STEPS[0].title, "🟢 Concept");
        assert_eq!(FLOW_STEPS[0].description, "Product definition");
        assert_eq!(FLOW_STEPS[17].title, "⚠️ Pitfalls");
        assert_eq!(FLOW_STEPS[17].description, "Best Practices & Pitfalls");
    }

    #[test]
    fn test_flow_labels_non_empty() {
        for step in FLOW_STEPS.iter() {
            assert!(!step.title.trim().is_empty());
            assert!(!step.description.trim().is_empty());
        }
    }

    #[test]
    fn test_step_serializes_as_pair() {
        let json = serde_json::to_value(FLOW_STEPS[9]).unwrap();
        assert_eq!(json["title"], "🚩 Tapeout");
        assert_eq!(json["description"], "Tapeout & Mask Gen.");
    }
}
