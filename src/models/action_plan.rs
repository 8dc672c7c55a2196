use serde::Serialize;

use crate::models::parameter::Level;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActionPlan {
    pub level: Level,
    pub title: &'static str,
    /// Numbered headings followed by their indented sub-steps.
    pub steps: &'static [&'static str],
    pub resident_guidance: &'static [&'static str],
    pub classification_impact: &'static str,
}

impl ActionPlan {
    pub fn for_level(level: Level) -> &'static ActionPlan {
        match level {
            Level::High => &HIGH_PLAN,
            Level::Moderate => &MODERATE_PLAN,
            Level::Low => &LOW_PLAN,
        }
    }
}

/// Short action list written into report exports.
pub fn recommended_actions(level: Option<Level>) -> &'static str {
    match level {
        Some(Level::High) => {
            "1. Issue public advisory 2. Identify pollution source 3. Install barriers"
        }
        Some(Level::Moderate) => {
            "1. Increase monitoring 2. Audit industries 3. Community education"
        }
        Some(Level::Low) => "1. Routine monitoring 2. Maintain buffers 3. Public awareness",
        None => "1. Monitor trends 2. Investigate sources 3. Compare to historical data",
    }
}

pub const MONITORING_GUIDANCE: [&str; 5] = [
    "Compare current readings to historical trends",
    "Correlate with rainfall and seasonal patterns",
    "Review upstream land use changes",
    "Coordinate with metal concentration data",
    "Consider follow-up testing if values are anomalous",
];

/// Classification impact per level as printed in the threshold table.
pub fn level_impact(level: Level) -> &'static str {
    match level {
        Level::Low => "Meets Class A/B standards",
        Level::Moderate => "Exceeds Class B/C standards",
        Level::High => "Exceeds Class D standards",
    }
}

static HIGH_PLAN: ActionPlan = ActionPlan {
    level: Level::High,
    title: "High Contamination Immediate Response Plan (Exceeds Class D)",
    steps: &[
        "1. EMERGENCY NOTIFICATION:",
        "   Issue public health advisory within 24 hours",
        "   Notify DENR-EMB and local health department immediately",
        "   Post warning signs in affected areas (500m radius)",
        "   Activate community alert system (text, radio, social media)",
        "2. SOURCE IDENTIFICATION:",
        "   Conduct immediate tracer study upstream",
        "   Identify all potential industrial/commercial sources",
        "   Implement 24/7 monitoring at suspected discharge points",
        "3. IMMEDIATE MITIGATION:",
        "   Install temporary sediment barriers",
        "   Deploy aerators to increase dissolved oxygen",
        "   Begin emergency dredging if sediment contamination >50cm deep",
        "4. COMMUNITY PROTECTION:",
        "   Distribute bottled water to affected households",
        "   Provide free medical checkups for exposed residents",
        "   Establish alternative water sources (water tanks)",
        "   Set up community health monitoring stations",
        "5. LONG-TERM ACTIONS:",
        "   Require industries to install advanced treatment systems",
        "   Implement watershed rehabilitation program",
        "   Establish continuous monitoring network",
        "   Conduct public awareness campaigns on contamination risks",
        "   Review and update emergency response protocols",
    ],
    resident_guidance: &[
        "DO NOT use water for drinking, cooking, or bathing",
        "Avoid all contact with contaminated water",
        "Report any health symptoms immediately",
        "Attend community briefings for updates",
        "Follow all posted advisories and warnings",
    ],
    classification_impact:
        "Water exceeds Class D standards - unsuitable for any use without treatment",
};

static MODERATE_PLAN: ActionPlan = ActionPlan {
    level: Level::Moderate,
    title: "Moderate Contamination Management Plan (Exceeds Class B/C)",
    steps: &[
        "1. ENHANCED MONITORING:",
        "   Increase sampling frequency to weekly",
        "   Install 3 additional monitoring stations upstream",
        "   Conduct 24-hour composite sampling at key points",
        "   Publish weekly water quality reports",
        "2. SOURCE CONTROL:",
        "   Audit all permitted dischargers in watershed",
        "   Require pollution control plans from industries",
        "   Implement stricter wastewater discharge limits",
        "   Require regular compliance reporting from industries",
        "3. COMMUNITY ENGAGEMENT:",
        "   Conduct monthly community water forums",
        "   Train local water monitors from the community",
        "   Distribute water testing kits to barangays",
        "   Launch public awareness campaign on pollution sources",
        "4. PREVENTIVE MEASURES:",
        "   Establish 50m vegetative buffer zones",
        "   Implement erosion control projects",
        "   Upgrade stormwater management systems",
        "5. CONTINGENCY PLANNING:",
        "   Develop emergency response protocols",
        "   Identify alternative water sources",
        "   Prepare public notification templates",
    ],
    resident_guidance: &[
        "Boil water before drinking if advised",
        "Limit recreational water contact",
        "Report any unusual water conditions",
        "Participate in community monitoring",
        "Practice proper waste disposal",
    ],
    classification_impact: "Water exceeds Class B/C standards - limited recreational use, not suitable for drinking without treatment",
};

static LOW_PLAN: ActionPlan = ActionPlan {
    level: Level::Low,
    title: "Low Contamination Maintenance Plan (Class A/B)",
    steps: &[
        "1. ROUTINE MONITORING:",
        "   Maintain monthly water quality sampling",
        "   Calibrate monitoring equipment quarterly",
        "   Conduct annual watershed surveys",
        "   Distribute annual water quality brochures",
        "2. PREVENTIVE MAINTENANCE:",
        "   Inspect and maintain sewage systems",
        "   Clear drainage channels monthly",
        "   Maintain vegetative buffers",
        "3. COMMUNITY EDUCATION:",
        "   Conduct annual water conservation workshops",
        "   Distribute pollution prevention materials",
        "   Organize river clean-up events",
        "   Promote responsible land use practices",
        "4. REGULATORY COMPLIANCE:",
        "   Verify all dischargers have valid permits",
        "   Conduct unannounced industry inspections",
        "   Review zoning near water bodies",
        "   Update pollution control regulations annually",
        "5. CONTINUOUS IMPROVEMENT:",
        "   Update water quality database",
        "   Evaluate new treatment technologies",
        "   Benchmark against similar watersheds",
        "   Review and revise action plans annually",
    ],
    resident_guidance: &[
        "Continue normal water use with routine testing",
        "Maintain proper septic system care",
        "Use eco-friendly cleaning products",
        "Participate in watershed protection activities",
        "Report any pollution incidents immediately",
    ],
    classification_impact:
        "Water meets Class A/B standards - suitable for drinking with appropriate treatment",
};
