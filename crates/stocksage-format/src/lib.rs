// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Splits assistant replies into `**Heading**` sections for collapsible
//! rendering.
mod icon;
mod sections;
mod view;

pub use icon::SectionIcon;
pub use sections::{format, FormattedMessage, Section, Segment, SegmentKind, HEADING_MARKER};
pub use view::SectionView;
