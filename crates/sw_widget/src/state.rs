//! The widget's interaction state machine.
//!
//! [`Machine::step`] is pure apart from logging: it takes the current state
//! and an [`Event`] and returns the next state plus the [`Effect`]s the
//! controller must carry out, in order.

use sw_core::{
    CorrelationId, Error, Outcome, Query, RelatedOutcome, Result, SearchRequest, SummaryOutcome,
};

/// The four user-visible states of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    OpenIdle,
    OpenPending,
    OpenDisplaying,
}

/// What the result area is doing, independent of modal visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// The related-articles lookup for `seq` is in flight.
    Pending { seq: u64, want_summary: bool },
    /// Results are shown; a summary for `awaiting_summary` may still arrive.
    Displaying { awaiting_summary: Option<u64> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Launcher or close control clicked.
    Toggle,
    /// Submit control clicked with the input's current text.
    Submit { text: String, want_summary: bool },
    RelatedResolved { seq: u64, outcome: RelatedOutcome },
    SummaryResolved { seq: u64, outcome: SummaryOutcome },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearResults,
    /// Render the outcome and append its entries to the result area.
    Render(Outcome),
    FetchRelated { seq: u64, request: SearchRequest },
    FetchSummary { seq: u64, id: CorrelationId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Machine {
    open: bool,
    phase: Phase,
    latest_seq: u64,
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WidgetState {
        if !self.open {
            return WidgetState::Closed;
        }
        match self.phase {
            Phase::Idle => WidgetState::OpenIdle,
            Phase::Pending { .. } => WidgetState::OpenPending,
            Phase::Displaying { .. } => WidgetState::OpenDisplaying,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sequence number of the most recent submit.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn step(self, event: Event) -> Result<(Self, Vec<Effect>)> {
        match event {
            Event::Toggle => Ok((
                Self {
                    open: !self.open,
                    ..self
                },
                Vec::new(),
            )),
            Event::Submit { text, want_summary } => self.submit(&text, want_summary),
            Event::RelatedResolved { seq, outcome } => Ok(self.related_resolved(seq, outcome)),
            Event::SummaryResolved { seq, outcome } => Ok(self.summary_resolved(seq, outcome)),
        }
    }

    fn submit(self, text: &str, want_summary: bool) -> Result<(Self, Vec<Effect>)> {
        if !self.open {
            return Err(Error::InvalidTransition(
                "submit while the modal is closed".to_string(),
            ));
        }

        // Every submit supersedes whatever is still in flight
        let seq = self.latest_seq + 1;

        match Query::parse(text) {
            Err(err) => {
                tracing::debug!(seq, error = %err, "Rejected query");
                let next = Self {
                    phase: Phase::Displaying {
                        awaiting_summary: None,
                    },
                    latest_seq: seq,
                    ..self
                };
                Ok((next, vec![Effect::ClearResults, Effect::Render(err.into())]))
            }
            Ok(query) => {
                let next = Self {
                    phase: Phase::Pending { seq, want_summary },
                    latest_seq: seq,
                    ..self
                };
                let request = SearchRequest::new(query, want_summary);
                Ok((
                    next,
                    vec![Effect::ClearResults, Effect::FetchRelated { seq, request }],
                ))
            }
        }
    }

    fn related_resolved(self, seq: u64, outcome: RelatedOutcome) -> (Self, Vec<Effect>) {
        let want_summary = match self.phase {
            Phase::Pending {
                seq: pending,
                want_summary,
            } if pending == seq && seq == self.latest_seq => want_summary,
            _ => {
                tracing::debug!(seq, latest = self.latest_seq, "Discarding stale related articles");
                return (self, Vec::new());
            }
        };

        let mut effects = Vec::with_capacity(2);
        let mut awaiting_summary = None;

        match outcome {
            RelatedOutcome::Found(result) if want_summary => {
                match result.correlation_id.clone() {
                    Some(id) => {
                        awaiting_summary = Some(seq);
                        effects.push(Effect::Render(Outcome::Related(result)));
                        effects.push(Effect::FetchSummary { seq, id });
                    }
                    None => {
                        tracing::warn!(seq, "Related articles came back without an id, skipping summary");
                        effects.push(Effect::Render(Outcome::Related(result)));
                        effects.push(Effect::Render(Outcome::NoSummary));
                    }
                }
            }
            other => effects.push(Effect::Render(other.into())),
        }

        let next = Self {
            phase: Phase::Displaying { awaiting_summary },
            ..self
        };
        (next, effects)
    }

    fn summary_resolved(self, seq: u64, outcome: SummaryOutcome) -> (Self, Vec<Effect>) {
        match self.phase {
            Phase::Displaying {
                awaiting_summary: Some(awaited),
            } if awaited == seq && seq == self.latest_seq => {
                let next = Self {
                    phase: Phase::Displaying {
                        awaiting_summary: None,
                    },
                    ..self
                };
                (next, vec![Effect::Render(outcome.into())])
            }
            _ => {
                tracing::debug!(seq, latest = self.latest_seq, "Discarding stale summary");
                (self, Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_core::{Article, RelatedResult, SummaryResult};

    fn open() -> Machine {
        let (machine, effects) = Machine::new().step(Event::Toggle).unwrap();
        assert!(effects.is_empty());
        machine
    }

    fn submit(machine: Machine, text: &str, want_summary: bool) -> (Machine, Vec<Effect>) {
        machine
            .step(Event::Submit {
                text: text.to_string(),
                want_summary,
            })
            .unwrap()
    }

    fn found(id: Option<&str>) -> RelatedOutcome {
        RelatedOutcome::Found(RelatedResult {
            articles: vec![Article {
                title: "Hands".to_string(),
                url: "https://example.org/hands".to_string(),
                description: String::new(),
                published: None,
            }],
            correlation_id: id.map(CorrelationId::new),
        })
    }

    #[test]
    fn test_toggle_opens_and_closes() {
        let machine = Machine::new();
        assert_eq!(machine.state(), WidgetState::Closed);

        let machine = open();
        assert_eq!(machine.state(), WidgetState::OpenIdle);

        let (machine, _) = machine.step(Event::Toggle).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);
    }

    #[test]
    fn test_submit_while_closed_is_rejected() {
        let result = Machine::new().step(Event::Submit {
            text: "flu".to_string(),
            want_summary: false,
        });
        assert!(matches!(result, Err(Error::InvalidTransition(_))));
    }

    #[test]
    fn test_blank_submit_renders_empty_query_without_fetching() {
        for text in ["", "   ", "\n\t"] {
            let (machine, effects) = submit(open(), text, true);
            assert_eq!(machine.state(), WidgetState::OpenDisplaying);
            assert_eq!(
                effects,
                vec![Effect::ClearResults, Effect::Render(Outcome::EmptyQuery)]
            );
        }
    }

    #[test]
    fn test_overlong_submit_renders_too_long() {
        let (_, effects) = submit(open(), &"a".repeat(301), false);
        assert_eq!(
            effects,
            vec![Effect::ClearResults, Effect::Render(Outcome::QueryTooLong)]
        );
    }

    #[test]
    fn test_submit_clears_before_fetching() {
        let (machine, effects) = submit(open(), "  how do I wash my hands ", false);
        assert_eq!(machine.state(), WidgetState::OpenPending);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::ClearResults);
        match &effects[1] {
            Effect::FetchRelated { seq, request } => {
                assert_eq!(*seq, 1);
                assert_eq!(request.query().as_str(), "how do I wash my hands");
                assert!(!request.want_summary());
            }
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_related_without_summary_renders_only_articles() {
        let (machine, _) = submit(open(), "flu", false);
        let (machine, effects) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(Some("abc")),
            })
            .unwrap();

        assert_eq!(machine.state(), WidgetState::OpenDisplaying);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Render(Outcome::Related(_))));
    }

    #[test]
    fn test_related_with_summary_fetches_with_same_id() {
        let (machine, _) = submit(open(), "flu", true);
        let (machine, effects) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(Some("abc")),
            })
            .unwrap();

        assert_eq!(machine.state(), WidgetState::OpenDisplaying);
        assert_eq!(
            machine.phase(),
            Phase::Displaying {
                awaiting_summary: Some(1)
            }
        );
        assert!(matches!(effects[0], Effect::Render(Outcome::Related(_))));
        assert_eq!(
            effects[1],
            Effect::FetchSummary {
                seq: 1,
                id: CorrelationId::new("abc")
            }
        );

        let summary = SummaryOutcome::Found(SummaryResult {
            text: "Use soap.".to_string(),
        });
        let (machine, effects) = machine
            .step(Event::SummaryResolved {
                seq: 1,
                outcome: summary,
            })
            .unwrap();
        assert_eq!(
            machine.phase(),
            Phase::Displaying {
                awaiting_summary: None
            }
        );
        assert!(matches!(effects[..], [Effect::Render(Outcome::Summary(_))]));
    }

    #[test]
    fn test_missing_id_renders_no_summary() {
        let (machine, _) = submit(open(), "flu", true);
        let (_, effects) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(None),
            })
            .unwrap();

        assert_eq!(effects.len(), 2);
        assert_eq!(effects[1], Effect::Render(Outcome::NoSummary));
    }

    #[test]
    fn test_failed_related_never_fetches_summary() {
        for outcome in [RelatedOutcome::NetworkFailure, RelatedOutcome::NoResults] {
            let (machine, _) = submit(open(), "flu", true);
            let (machine, effects) = machine
                .step(Event::RelatedResolved { seq: 1, outcome })
                .unwrap();

            assert_eq!(machine.state(), WidgetState::OpenDisplaying);
            assert_eq!(effects.len(), 1);
            assert!(!effects
                .iter()
                .any(|e| matches!(e, Effect::FetchSummary { .. })));
        }
    }

    #[test]
    fn test_stale_related_resolution_is_discarded() {
        let (machine, _) = submit(open(), "first", false);
        let (machine, _) = submit(machine, "second", false);
        assert_eq!(machine.latest_seq(), 2);

        let (after, effects) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(None),
            })
            .unwrap();
        assert!(effects.is_empty());
        assert_eq!(after, machine);
    }

    #[test]
    fn test_stale_summary_is_discarded_after_new_submit() {
        let (machine, _) = submit(open(), "first", true);
        let (machine, _) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(Some("one")),
            })
            .unwrap();
        // A blank submit still supersedes the pending summary
        let (machine, _) = submit(machine, "", true);

        let (_, effects) = machine
            .step(Event::SummaryResolved {
                seq: 1,
                outcome: SummaryOutcome::NoSummary,
            })
            .unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_duplicate_related_resolution_is_ignored() {
        let (machine, _) = submit(open(), "flu", false);
        let (machine, _) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(None),
            })
            .unwrap();
        let (_, effects) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(None),
            })
            .unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_closing_while_pending_still_resolves() {
        let (machine, _) = submit(open(), "flu", false);
        let (machine, _) = machine.step(Event::Toggle).unwrap();
        assert_eq!(machine.state(), WidgetState::Closed);

        let (machine, effects) = machine
            .step(Event::RelatedResolved {
                seq: 1,
                outcome: found(None),
            })
            .unwrap();
        assert_eq!(effects.len(), 1);
        assert_eq!(machine.state(), WidgetState::Closed);

        // Reopening shows what was rendered while hidden
        let (machine, _) = machine.step(Event::Toggle).unwrap();
        assert_eq!(machine.state(), WidgetState::OpenDisplaying);
    }
}
