//! Built-in blueprint catalog.

use std::sync::OnceLock;

use super::{Blueprint, BlueprintCategory, BlueprintEdge, BlueprintNode};
use crate::graph::{HandleSide, NodeKind};

static CATALOG: OnceLock<Vec<Blueprint>> = OnceLock::new();

/// All built-in blueprints, in menu order.
pub fn catalog() -> &'static [Blueprint] {
    CATALOG.get_or_init(build_catalog)
}

/// Look up a built-in blueprint by id.
pub fn find(id: &str) -> Option<&'static Blueprint> {
    catalog().iter().find(|b| b.id == id)
}

fn node(id: &str, kind: NodeKind, label: &str, description: &str) -> BlueprintNode {
    BlueprintNode {
        id: id.to_string(),
        kind,
        label: label.to_string(),
        description: description.to_string(),
    }
}

fn edge(source: &str, target: &str, source_handle: HandleSide, target_handle: HandleSide) -> BlueprintEdge {
    BlueprintEdge {
        source: source.to_string(),
        target: target.to_string(),
        source_handle,
        target_handle,
    }
}

/// Straight downward connection between consecutive steps.
fn down(source: &str, target: &str) -> BlueprintEdge {
    edge(source, target, HandleSide::Bottom, HandleSide::Top)
}

fn build_catalog() -> Vec<Blueprint> {
    vec![
        Blueprint {
            id: "lead-qualification".to_string(),
            name: "Lead Qualification".to_string(),
            category: BlueprintCategory::Sales,
            description: "Score inbound leads with AI and route hot ones to a rep.".to_string(),
            nodes: vec![
                node("new-lead", NodeKind::Trigger, "New lead captured", "Web form or landing page"),
                node("score", NodeKind::AiStep, "AI lead scoring", "Rates fit and intent from 0 to 100"),
                node("is-hot", NodeKind::Condition, "Score above 70?", ""),
                node("notify", NodeKind::Action, "Notify sales rep", "Assigns the lead and pings the owner"),
                node("nurture", NodeKind::Action, "Add to nurture sequence", "Weekly educational emails"),
            ],
            edges: vec![
                down("new-lead", "score"),
                down("score", "is-hot"),
                edge("is-hot", "notify", HandleSide::Right, HandleSide::Left),
                down("is-hot", "nurture"),
            ],
        },
        Blueprint {
            id: "abandoned-cart".to_string(),
            name: "Abandoned Cart Recovery".to_string(),
            category: BlueprintCategory::Marketing,
            description: "Win back shoppers who left items in their cart.".to_string(),
            nodes: vec![
                node("cart", NodeKind::Trigger, "Cart abandoned", "No checkout within 1 hour"),
                node("draft", NodeKind::AiStep, "Write reminder", "Personalised copy with cart items"),
                node("whatsapp", NodeKind::Integration, "Send WhatsApp message", "Via messaging provider"),
                node("purchased", NodeKind::Condition, "Purchased within 24h?", ""),
                node("coupon", NodeKind::Action, "Send 10% coupon", ""),
            ],
            edges: vec![
                down("cart", "draft"),
                down("draft", "whatsapp"),
                down("whatsapp", "purchased"),
                down("purchased", "coupon"),
            ],
        },
        Blueprint {
            id: "support-triage".to_string(),
            name: "Support Triage".to_string(),
            category: BlueprintCategory::Support,
            description: "Classify inbound messages and escalate urgent ones.".to_string(),
            nodes: vec![
                node("inbound", NodeKind::Trigger, "Inbound message", "Email, chat or WhatsApp"),
                node("classify", NodeKind::AiStep, "Classify intent", "billing, bug, question, other"),
                node("urgent", NodeKind::Condition, "Is urgent?", ""),
                node("ticket", NodeKind::Integration, "Create helpdesk ticket", "Priority: high"),
                node("reply", NodeKind::Action, "Send auto-reply", "Links to the help center"),
            ],
            edges: vec![
                down("inbound", "classify"),
                down("classify", "urgent"),
                edge("urgent", "ticket", HandleSide::Right, HandleSide::Left),
                down("urgent", "reply"),
            ],
        },
        Blueprint {
            id: "appointment-reminder".to_string(),
            name: "Appointment Reminder".to_string(),
            category: BlueprintCategory::Scheduling,
            description: "Confirm bookings and remind attendees the day before.".to_string(),
            nodes: vec![
                node("booked", NodeKind::Trigger, "Appointment booked", ""),
                node("calendar", NodeKind::Integration, "Sync to calendar", ""),
                node("confirm", NodeKind::Action, "Send confirmation", "Email with meeting link"),
                node("remind", NodeKind::Action, "Remind 24h before", "SMS reminder"),
            ],
            edges: vec![
                down("booked", "calendar"),
                down("calendar", "confirm"),
                down("confirm", "remind"),
            ],
        },
        Blueprint {
            id: "manual-broadcast".to_string(),
            name: "Manual Broadcast".to_string(),
            category: BlueprintCategory::Marketing,
            description: "Starting blocks for a one-off campaign, left unconnected.".to_string(),
            nodes: vec![
                node("manual", NodeKind::Trigger, "Run manually", ""),
                node("segment", NodeKind::Condition, "Segment: active customers", ""),
                node("send", NodeKind::Action, "Send campaign", ""),
            ],
            edges: Vec::new(),
        },
    ]
}
