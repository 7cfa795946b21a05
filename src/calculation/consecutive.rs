//! Consecutive sentence aggregation.
//!
//! Sentences served back-to-back are treated as one effective custodial
//! period. This module assembles chains from the `consecutive_to` links on
//! the input sentences, combines member durations into one effective length,
//! and exposes chains behind the same capability surface as a single
//! sentence so downstream calculators never special-case them.

use chrono::{NaiveDate, TimeDelta};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Duration, Offence, RecallType, ReleaseDateType, Sentence, SentenceCalculation,
};

/// An ordered, non-empty chain of sentences served consecutively.
///
/// The chain's `sentenced_at` is the minimum of its members' start dates and
/// its nominal offence is the member offence with the earliest committed
/// date. The combined duration compounds member terms date-by-date rather
/// than summing independently computed day counts, so variable month lengths
/// are accounted for member-by-member.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsecutiveSentence {
    members: Vec<Sentence>,
    calculation: Option<SentenceCalculation>,
}

impl ConsecutiveSentence {
    /// Creates a chain from ordered members. The member list must be
    /// non-empty.
    pub fn new(members: Vec<Sentence>) -> EngineResult<Self> {
        if members.is_empty() {
            return Err(EngineError::InvalidConsecutiveChain {
                message: "a consecutive chain must have at least one member".to_string(),
            });
        }
        Ok(Self {
            members,
            calculation: None,
        })
    }

    /// The ordered members of the chain.
    pub fn members(&self) -> &[Sentence] {
        &self.members
    }

    /// The chain's start date: the earliest member sentencing date.
    pub fn sentenced_at(&self) -> NaiveDate {
        let mut earliest = self.members[0].sentenced_at;
        for member in &self.members[1..] {
            if member.sentenced_at < earliest {
                earliest = member.sentenced_at;
            }
        }
        earliest
    }

    /// The chain's nominal offence: the member offence with the earliest
    /// committed date.
    pub fn offence(&self) -> &Offence {
        let mut earliest = &self.members[0];
        for member in &self.members[1..] {
            if member.offence.committed_at < earliest.offence.committed_at {
                earliest = member;
            }
        }
        &earliest.offence
    }

    /// The combined length of the chain in days.
    ///
    /// Generic chains walk the ordered member list, each member's term
    /// measured from the date the previous member's term rolled forward to.
    /// DTO-only chains instead use the single-term merge with the 24-month
    /// statutory cap; see [`ConsecutiveSentence::single_term_length`].
    ///
    /// An indeterminate member is a configuration violation and fails the
    /// calculation.
    pub fn length_in_days(&self) -> EngineResult<i64> {
        if self.is_dto_only() {
            return Ok(self.single_term_length());
        }
        let start = self.sentenced_at();
        let mut date = start;
        for member in &self.members {
            if member.kind.is_indeterminate() {
                return Err(EngineError::UnsupportedConsecutiveMember {
                    sentence_id: member.id.clone(),
                    kind: member.kind.name().to_string(),
                });
            }
            date += TimeDelta::days(member.length_in_days_from(date));
        }
        Ok(date.signed_duration_since(start).num_days())
    }

    /// True when every member is a detention-and-training order.
    pub fn is_dto_only(&self) -> bool {
        self.members.iter().all(|m| m.kind.is_dto())
    }

    /// The single-term merge for DTO-only chains.
    ///
    /// Combined DTO terms run from the earliest member's sentencing date to
    /// the latest member end date, and the statutory maximum caps the
    /// combined term at exactly 24 months from the earliest start. The cap
    /// compares end dates rather than raw day counts, which keeps
    /// calendar-month variability out of the comparison.
    fn single_term_length(&self) -> i64 {
        let start = self.sentenced_at();
        let mut latest_end = self.members[0]
            .custodial_duration()
            .end_date(self.members[0].sentenced_at);
        for member in &self.members[1..] {
            let end = member.custodial_duration().end_date(member.sentenced_at);
            if end > latest_end {
                latest_end = end;
            }
        }
        let cap = Duration::from_months(24).end_date(start);
        let end = if latest_end > cap {
            debug!(
                chain_start = %start,
                uncapped_end = %latest_end,
                capped_end = %cap,
                "combined DTO term capped at 24 months"
            );
            cap
        } else {
            latest_end
        };
        end.signed_duration_since(start).num_days() + 1
    }

    /// True when any member carries an extended determinate or SOPC
    /// component.
    pub fn has_any_eds_or_sopc(&self) -> bool {
        self.members.iter().any(|m| m.has_any_eds_or_sopc())
    }

    /// True when any member has been recalled.
    pub fn is_recall(&self) -> bool {
        self.members.iter().any(|m| m.is_recall())
    }

    /// The recall type of the first recalled member, if any member both is
    /// recalled and carries a type.
    pub fn recall(&self) -> Option<RecallType> {
        self.members.iter().find(|m| m.is_recall()).and_then(|m| m.recall)
    }

    /// True when any member follows a post-ORA release regime.
    pub fn has_ora_sentences(&self) -> EngineResult<bool> {
        for member in &self.members {
            if member.track()?.is_ora() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True when every member predates the CJA/LASPO reforms.
    pub fn is_made_up_of_only_before_cja_laspo_sentences(&self) -> EngineResult<bool> {
        for member in &self.members {
            if !member.track()?.is_before_cja_laspo() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// True when the chain mixes standard and enhanced (SDS+) standard
    /// determinate sentences and nothing else.
    pub fn is_made_up_of_sds_and_sds_plus_sentences(&self) -> EngineResult<bool> {
        let mut any_plus = false;
        for member in &self.members {
            let track = member.track()?;
            if !track.is_sds_family() {
                return Ok(false);
            }
            any_plus |= track.is_sds_plus();
        }
        Ok(any_plus)
    }

    fn primary_id(&self) -> &str {
        &self.members[0].id
    }
}

/// A single sentence or a consecutive chain, behind one capability surface.
///
/// Callers of the unadjusted calculator and adjustment application never
/// need to distinguish the two structurally.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculableSentence {
    /// A sentence with no consecutive partners.
    Single(Sentence),
    /// A chain of consecutively served sentences.
    Consecutive(ConsecutiveSentence),
}

impl CalculableSentence {
    /// The date the sentence (or chain) starts.
    pub fn sentenced_at(&self) -> NaiveDate {
        match self {
            CalculableSentence::Single(s) => s.sentenced_at,
            CalculableSentence::Consecutive(c) => c.sentenced_at(),
        }
    }

    /// The nominal offence.
    pub fn offence(&self) -> &Offence {
        match self {
            CalculableSentence::Single(s) => &s.offence,
            CalculableSentence::Consecutive(c) => c.offence(),
        }
    }

    /// The IDs of the covered sentences, in served order.
    pub fn sentence_ids(&self) -> Vec<String> {
        match self {
            CalculableSentence::Single(s) => vec![s.id.clone()],
            CalculableSentence::Consecutive(c) => {
                c.members().iter().map(|m| m.id.clone()).collect()
            }
        }
    }

    /// The ID used in error payloads: the single sentence's ID or the
    /// chain's first member.
    pub fn primary_id(&self) -> &str {
        match self {
            CalculableSentence::Single(s) => &s.id,
            CalculableSentence::Consecutive(c) => c.primary_id(),
        }
    }

    /// The nominal length in days.
    pub fn length_in_days(&self) -> EngineResult<i64> {
        match self {
            CalculableSentence::Single(s) => Ok(s.length_in_days()),
            CalculableSentence::Consecutive(c) => c.length_in_days(),
        }
    }

    /// True when any covered sentence carries an extended determinate or
    /// SOPC component.
    pub fn has_any_eds_or_sopc(&self) -> bool {
        match self {
            CalculableSentence::Single(s) => s.has_any_eds_or_sopc(),
            CalculableSentence::Consecutive(c) => c.has_any_eds_or_sopc(),
        }
    }

    /// True when the offender has been recalled on any covered sentence.
    pub fn is_recall(&self) -> bool {
        match self {
            CalculableSentence::Single(s) => s.is_recall(),
            CalculableSentence::Consecutive(c) => c.is_recall(),
        }
    }

    /// The governing recall type, when recalled.
    pub fn recall(&self) -> Option<RecallType> {
        match self {
            CalculableSentence::Single(s) => s.recall,
            CalculableSentence::Consecutive(c) => c.recall(),
        }
    }

    /// The release-date types that apply: the single sentence's set, or the
    /// ordered union of member sets for a chain.
    pub fn release_date_types(&self) -> EngineResult<Vec<ReleaseDateType>> {
        match self {
            CalculableSentence::Single(s) => Ok(s.release_date_types()?.to_vec()),
            CalculableSentence::Consecutive(c) => {
                let mut types = Vec::new();
                for member in c.members() {
                    for date_type in member.release_date_types()? {
                        if !types.contains(date_type) {
                            types.push(*date_type);
                        }
                    }
                }
                Ok(types)
            }
        }
    }

    /// Attaches the completed calculation. May be called exactly once.
    pub fn initialise_calculation(&mut self, calculation: SentenceCalculation) -> EngineResult<()> {
        match self {
            CalculableSentence::Single(s) => s.initialise_calculation(calculation),
            CalculableSentence::Consecutive(c) => {
                if c.calculation.is_some() {
                    return Err(EngineError::AlreadyInitialised {
                        sentence_id: c.primary_id().to_string(),
                        field: "sentence_calculation".to_string(),
                    });
                }
                c.calculation = Some(calculation);
                Ok(())
            }
        }
    }

    /// True once the calculation has been attached.
    pub fn is_calculation_initialised(&self) -> bool {
        match self {
            CalculableSentence::Single(s) => s.is_calculation_initialised(),
            CalculableSentence::Consecutive(c) => c.calculation.is_some(),
        }
    }

    /// The completed calculation.
    pub fn calculation(&self) -> EngineResult<&SentenceCalculation> {
        match self {
            CalculableSentence::Single(s) => s.calculation(),
            CalculableSentence::Consecutive(c) => {
                c.calculation
                    .as_ref()
                    .ok_or_else(|| EngineError::CalculationNotInitialised {
                        sentence_id: c.primary_id().to_string(),
                    })
            }
        }
    }

    /// Mutable access to the completed calculation.
    pub fn calculation_mut(&mut self) -> EngineResult<&mut SentenceCalculation> {
        match self {
            CalculableSentence::Single(s) => s.calculation_mut(),
            CalculableSentence::Consecutive(c) => {
                let id = c.primary_id().to_string();
                c.calculation
                    .as_mut()
                    .ok_or(EngineError::CalculationNotInitialised { sentence_id: id })
            }
        }
    }
}

/// Assembles single sentences and consecutive chains from `consecutive_to`
/// links.
///
/// Every link must resolve to a sentence on the booking and chains must be
/// acyclic; violations are typed errors rather than silently dropped
/// sentences. Chain members keep the input order of the source records at
/// each link level.
pub fn assemble(sentences: Vec<Sentence>) -> EngineResult<Vec<CalculableSentence>> {
    let mut seen = HashSet::new();
    for sentence in &sentences {
        if !seen.insert(sentence.id.clone()) {
            return Err(EngineError::InvalidConsecutiveChain {
                message: format!("duplicate sentence id '{}'", sentence.id),
            });
        }
    }
    for sentence in &sentences {
        if let Some(target) = &sentence.consecutive_to {
            if !seen.contains(target) {
                return Err(EngineError::InvalidConsecutiveChain {
                    message: format!(
                        "sentence '{}' chains to unknown sentence '{}'",
                        sentence.id, target
                    ),
                });
            }
        }
    }

    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<Sentence>> = HashMap::new();
    for sentence in sentences {
        match sentence.consecutive_to.clone() {
            None => roots.push(sentence),
            Some(parent) => children.entry(parent).or_default().push(sentence),
        }
    }

    let mut calculables = Vec::new();
    for root in roots {
        let mut members = vec![root];
        let mut next = 0;
        while next < members.len() {
            let id = members[next].id.clone();
            if let Some(kids) = children.remove(&id) {
                members.extend(kids);
            }
            next += 1;
        }
        if members.len() == 1 {
            if let Some(single) = members.pop() {
                calculables.push(CalculableSentence::Single(single));
            }
        } else {
            calculables.push(CalculableSentence::Consecutive(ConsecutiveSentence::new(
                members,
            )?));
        }
    }

    if let Some(orphan) = children.keys().next() {
        return Err(EngineError::InvalidConsecutiveChain {
            message: format!("cyclic consecutive reference involving sentence '{}'", orphan),
        });
    }

    Ok(calculables)
}
