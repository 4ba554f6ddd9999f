//! Types for transit sequence generation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gochara_ephem::{Body, PositionFlags};
use serde::{Deserialize, Serialize};

use crate::error::TransitError;
use crate::transit_types::{SearchDirection, TransitEvent};

/// Direction of step `k` in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionRule {
    /// Even steps backward, odd steps forward.
    #[default]
    AlternateBackwardFirst,
    /// Even steps forward, odd steps backward.
    AlternateForwardFirst,
    Forward,
    Backward,
}

impl DirectionRule {
    pub fn direction_at(self, step: u32) -> SearchDirection {
        let even = step % 2 == 0;
        match self {
            Self::AlternateBackwardFirst if even => SearchDirection::Backward,
            Self::AlternateBackwardFirst => SearchDirection::Forward,
            Self::AlternateForwardFirst if even => SearchDirection::Forward,
            Self::AlternateForwardFirst => SearchDirection::Backward,
            Self::Forward => SearchDirection::Forward,
            Self::Backward => SearchDirection::Backward,
        }
    }

    pub const fn alternates(self) -> bool {
        matches!(self, Self::AlternateBackwardFirst | Self::AlternateForwardFirst)
    }

    /// How many boundaries out step `k` lies in its own direction, counting
    /// from the reference instant (0 = adjacent).
    pub const fn ordinal_at(self, step: u32) -> u32 {
        if self.alternates() { step / 2 } else { step }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AlternateBackwardFirst => "alternate_backward_first",
            Self::AlternateForwardFirst => "alternate_forward_first",
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

impl Display for DirectionRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "alternate_backward_first" | "alternate" | "backward_first" => {
                Ok(Self::AlternateBackwardFirst)
            }
            "alternate_forward_first" | "forward_first" => Ok(Self::AlternateForwardFirst),
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            other => Err(format!("unknown direction rule: {other}")),
        }
    }
}

/// Where each step's search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainPolicy {
    /// Each step starts at the previous event of the same direction; the
    /// first step of a direction starts at the reference instant.
    #[default]
    FromPrevious,
    /// Every step starts at the reference instant and targets a boundary
    /// further out. Steps are independent.
    FromReference,
}

impl FromStr for ChainPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "previous" | "from_previous" => Ok(Self::FromPrevious),
            "reference" | "from_reference" => Ok(Self::FromReference),
            other => Err(format!("unknown chain policy: {other}")),
        }
    }
}

/// A sequence of transit searches around one reference instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceRequest {
    pub body: Body,
    pub flags: PositionFlags,
    pub reference_deg: f64,
    pub start_jd_ut: f64,
    pub count: u32,
    pub rule: DirectionRule,
    pub chain: ChainPolicy,
    /// Solve independent steps on scoped worker threads.
    /// Only honoured with [`ChainPolicy::FromReference`].
    pub parallel: bool,
}

impl SequenceRequest {
    pub fn new(
        body: Body,
        flags: PositionFlags,
        reference_deg: f64,
        start_jd_ut: f64,
        count: u32,
    ) -> Self {
        Self {
            body,
            flags,
            reference_deg,
            start_jd_ut,
            count,
            rule: DirectionRule::default(),
            chain: ChainPolicy::default(),
            parallel: false,
        }
    }

    pub fn with_rule(self, rule: DirectionRule) -> Self {
        Self { rule, ..self }
    }

    pub fn with_chain(self, chain: ChainPolicy) -> Self {
        Self { chain, ..self }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.start_jd_ut.is_finite() {
            return Err("start instant must be finite");
        }
        if !self.reference_deg.is_finite() {
            return Err("reference longitude must be finite");
        }
        if self.chain == ChainPolicy::FromReference
            && self.count > 0
            && self.rule.ordinal_at(self.count - 1) >= 12
        {
            return Err("reference-chained sequence would wrap a full circle");
        }
        Ok(())
    }
}

/// The step that stopped a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: u32,
    pub direction: SearchDirection,
    pub error: TransitError,
}

/// Events in step order, plus the failure that ended the sequence early.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceOutcome {
    pub events: Vec<TransitEvent>,
    pub failure: Option<StepFailure>,
}

impl SequenceOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Events sorted by instant.
    pub fn chronological(&self) -> Vec<TransitEvent> {
        let mut sorted = self.events.clone();
        sorted.sort_by(|a, b| a.jd_ut.total_cmp(&b.jd_ut));
        sorted
    }
}
