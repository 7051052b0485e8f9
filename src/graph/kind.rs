//! Node kind enumeration for the automation canvas.
//!
//! The kind only selects visual style and icon; the editor attaches no
//! behavior to it.

use serde::{Deserialize, Serialize};

/// Step types a flow node can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Entry point of a flow (new lead, inbound message, schedule).
    Trigger,
    /// Something the flow does (send message, update CRM record).
    Action,
    /// A branch point.
    Condition,
    /// A generative-AI step (classification, drafting, scoring).
    AiStep,
    /// A call into a third-party system.
    #[serde(alias = "external-integration")]
    Integration,
}

/// Style metadata used by the renderer for a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    /// Accent color as RGB.
    pub accent: [u8; 3],
    /// Single glyph drawn next to the label.
    pub icon: &'static str,
}

impl NodeKind {
    /// Get the display name for this node kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "Trigger",
            NodeKind::Action => "Action",
            NodeKind::Condition => "Condition",
            NodeKind::AiStep => "AI Step",
            NodeKind::Integration => "Integration",
        }
    }

    /// Get all available node kinds.
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Trigger,
            NodeKind::Action,
            NodeKind::Condition,
            NodeKind::AiStep,
            NodeKind::Integration,
        ]
    }

    /// Default label given to freshly added nodes of this kind.
    pub fn default_label(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "New Trigger",
            NodeKind::Action => "New Action",
            NodeKind::Condition => "New Condition",
            NodeKind::AiStep => "New AI Step",
            NodeKind::Integration => "New Integration",
        }
    }

    pub fn style(&self) -> NodeStyle {
        match self {
            NodeKind::Trigger => NodeStyle {
                accent: [234, 179, 8],
                icon: "⚡",
            },
            NodeKind::Action => NodeStyle {
                accent: [59, 130, 246],
                icon: "▶",
            },
            NodeKind::Condition => NodeStyle {
                accent: [249, 115, 22],
                icon: "◆",
            },
            NodeKind::AiStep => NodeStyle {
                accent: [168, 85, 247],
                icon: "✨",
            },
            NodeKind::Integration => NodeStyle {
                accent: [20, 184, 166],
                icon: "🔌",
            },
        }
    }

    /// Get a short description shown in the add-node menu tooltip.
    pub fn description(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "Starts the flow when an event happens.",
            NodeKind::Action => "Performs a step such as sending a message.",
            NodeKind::Condition => "Branches the flow on a rule.",
            NodeKind::AiStep => "Runs an AI completion on the flow data.",
            NodeKind::Integration => "Calls an external service.",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
