//! Default templates written by `specify init`.
//!
//! Projects own their copies under `.specify/templates/` and may edit them
//! freely; these are only the starting point.

use crate::paths;

/// `(file name, content)` for every template `init` installs.
pub fn defaults() -> [(&'static str, &'static str); 3] {
    [
        (paths::SPEC_TEMPLATE, SPEC_TEMPLATE),
        (paths::PLAN_TEMPLATE, PLAN_TEMPLATE),
        (paths::AGENT_TEMPLATE, AGENT_TEMPLATE),
    ]
}

pub const SPEC_TEMPLATE: &str = r#"# Feature Specification: [FEATURE NAME]

**Feature Branch**: `[###-feature-name]`
**Created**: [DATE]
**Status**: Draft

## User Scenarios & Testing

### Primary User Story

[Describe the main user journey in plain language]

### Acceptance Scenarios

1. **Given** [initial state], **When** [action], **Then** [expected outcome]

### Edge Cases

- What happens when [boundary condition]?

## Requirements

### Functional Requirements

- **FR-001**: System MUST [specific capability]
- **FR-002**: System MUST [NEEDS CLARIFICATION: requirement not yet specified]

### Key Entities

- **[Entity]**: [What it represents, key attributes without implementation]

## Review Checklist

- [ ] No implementation details (languages, frameworks, APIs)
- [ ] Requirements are testable and unambiguous
- [ ] No [NEEDS CLARIFICATION] markers remain
"#;

pub const PLAN_TEMPLATE: &str = r#"# Implementation Plan: [FEATURE]

**Branch**: `[###-feature-name]` | **Date**: [DATE] | **Spec**: [link]

## Summary

[Primary requirement + technical approach from research]

## Technical Context

**Language/Version**: NEEDS CLARIFICATION
**Primary Dependencies**: NEEDS CLARIFICATION
**Storage**: N/A
**Testing**: NEEDS CLARIFICATION
**Target Platform**: NEEDS CLARIFICATION
**Project Type**: NEEDS CLARIFICATION
**Performance Goals**: NEEDS CLARIFICATION
**Constraints**: NEEDS CLARIFICATION

## Project Structure

### Documentation (this feature)

```text
specs/[###-feature]/
├── plan.md
├── research.md
├── data-model.md
├── quickstart.md
├── contracts/
└── tasks.md
```

## Phase 0: Outline & Research

Resolve every NEEDS CLARIFICATION above; record decisions in `research.md`.

## Phase 1: Design & Contracts

Extract entities into `data-model.md`, interfaces into `contracts/`, and the
validation walkthrough into `quickstart.md`. Then run
`specify update-agent-context` to refresh the assistant context files.

## Phase 2: Task Planning

Described here, executed by `/course.tasks`.
"#;

pub const AGENT_TEMPLATE: &str = r#"# [PROJECT NAME] Development Guidelines

Auto-generated from all feature plans. Last Updated: [DATE]

## Technology Stack

[EXTRACTED FROM ALL PLAN.MD FILES]

## Project Structure

```text
[ACTUAL STRUCTURE FROM PLANS]
```

## Commands

```sh
[ONLY COMMANDS FOR ACTIVE TECHNOLOGIES]
```

## Code Style

[LANGUAGE-SPECIFIC, ONLY FOR LANGUAGES IN USE]

## Recent Changes

[LAST 3 FEATURES AND WHAT THEY ADDED]

<!-- MANUAL ADDITIONS START -->
<!-- MANUAL ADDITIONS END -->
"#;
