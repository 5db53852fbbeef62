//! Artifact document generator
//!
//! Named sales/marketing templates rendered through the `{placeholder}`
//! renderer. Fields the caller does not supply stay as visible tokens in the
//! output, which is how drafts flag what still needs filling in.

use crate::template::{placeholders, render};
use fieldhook_core::{Error, Result};
use std::collections::BTreeMap;

const PROPOSAL: &str = "\
# Proposal: {company_name} - {project_title}

## Executive Summary
{executive_summary}

## Understanding Your Needs
{needs_analysis}

## Proposed Solution
{solution_description}

### Deliverables
{deliverables}

## Investment & Pricing
{pricing_section}

## Timeline
{timeline}
";

const LAUNCH_EMAIL: &str = "\
Subject: Introducing {feature_name} - {value_proposition}

Hi {first_name},

{feature_name} is now available!

## What's New
{feature_description}

## Get Started Today
{cta_instructions}

[Get Started Now]({cta_link})

---
Questions? Just reply to this email - we read every message.
";

const SOCIAL_POST: &str = "\
{hook_line}

{feature_name} just landed: {feature_description}

{cta_link} {hashtags}
";

const CASE_STUDY: &str = "\
# Case Study: {customer_name}

## The Challenge
{challenge}

## The Solution
{solution}

## Results
{results}

> \"{customer_quote}\"
> — {customer_contact}, {customer_name}
";

const ONBOARDING_PLAN: &str = "\
# Customer Onboarding Plan: {customer_name}

## Onboarding Goals
{onboarding_goals}

## Week 1: Setup
{week_one}

## Week 2-4: Adoption
{adoption_plan}

## Success Criteria
{success_criteria}

## Check-in Schedule
{checkin_schedule}
";

fn lookup(name: &str) -> Option<&'static str> {
    match name {
        "proposal" => Some(PROPOSAL),
        "launch_email" => Some(LAUNCH_EMAIL),
        "social_post" => Some(SOCIAL_POST),
        "case_study" => Some(CASE_STUDY),
        "onboarding_plan" => Some(ONBOARDING_PLAN),
        _ => None,
    }
}

/// Names of all known artifacts, sorted.
pub fn artifact_names() -> Vec<&'static str> {
    vec![
        "case_study",
        "launch_email",
        "onboarding_plan",
        "proposal",
        "social_post",
    ]
}

/// Render the named artifact with the supplied fields.
pub fn generate(name: &str, fields: &BTreeMap<String, String>) -> Result<String> {
    let template = lookup(name).ok_or_else(|| Error::UnknownArtifact(name.to_string()))?;
    Ok(render(template, fields))
}

/// Fields the named artifact accepts.
pub fn artifact_fields(name: &str) -> Result<Vec<String>> {
    let template = lookup(name).ok_or_else(|| Error::UnknownArtifact(name.to_string()))?;
    Ok(placeholders(template))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_artifact_resolves() {
        for name in artifact_names() {
            assert!(lookup(name).is_some(), "{} missing", name);
            assert!(!artifact_fields(name).unwrap().is_empty());
        }
    }

    #[test]
    fn unknown_artifact_errors() {
        let err = generate("press_release", &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownArtifact(_)));
    }

    #[test]
    fn supplied_fields_land_in_output() {
        let mut fields = BTreeMap::new();
        fields.insert("company_name".to_string(), "Acme".to_string());
        fields.insert("project_title".to_string(), "Pilot".to_string());
        let doc = generate("proposal", &fields).unwrap();
        assert!(doc.contains("# Proposal: Acme - Pilot"));
        // Unfilled fields stay visible for the drafter.
        assert!(doc.contains("{executive_summary}"));
    }
}
