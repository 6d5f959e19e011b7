//! The quiz session state machine.
//!
//! One logical timeline of discrete events: an external clock driver calls
//! [`SessionEngine::tick`] once per second, and user intents arrive as method
//! calls in between. All timing state is data (generation-tagged countdowns),
//! so tests advance virtual time by calling `tick` — no real delays anywhere.
//!
//! Every operation silently ignores invalid preconditions (answering during a
//! reveal, re-using a lifeline, and so on). The UI layer may double-fire
//! events; the machine must be safe to over-invoke.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::hints::hint_for;
use crate::metrics::sink::MetricsSink;
use crate::models::question::Question;
use crate::session::poll::AudiencePoll;
use crate::session::timer::Countdown;

/// Number of question snapshots a session plays.
pub const SESSION_QUESTIONS: usize = 10;
/// Seconds the correct answer stays highlighted before the session advances.
pub const REVEAL_SECONDS: u32 = 2;
/// Length of the audience-poll voting window.
pub const AUDIENCE_POLL_SECONDS: u32 = 60;
/// Seconds the judge "thinks" before a requested hint is revealed.
pub const HINT_RESPONSE_SECONDS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Welcome,
    Playing,
    GameOver,
    Winner,
    Creator,
    Library,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifeline {
    FiftyFifty,
    Audience,
    Flip,
    Hint,
}

impl Lifeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifeline::FiftyFifty => "50-50",
            Lifeline::Audience => "audience",
            Lifeline::Flip => "flip",
            Lifeline::Hint => "hint",
        }
    }
}

/// Per-session lifeline availability. Each kind is consumable exactly once;
/// there are no refills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifelineInventory {
    fifty_fifty: bool,
    audience: bool,
    flip: bool,
    hint: bool,
}

impl LifelineInventory {
    fn fresh() -> Self {
        Self {
            fifty_fifty: true,
            audience: true,
            flip: true,
            hint: true,
        }
    }

    pub fn is_available(&self, lifeline: Lifeline) -> bool {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty,
            Lifeline::Audience => self.audience,
            Lifeline::Flip => self.flip,
            Lifeline::Hint => self.hint,
        }
    }

    fn consume(&mut self, lifeline: Lifeline) {
        match lifeline {
            Lifeline::FiftyFifty => self.fifty_fifty = false,
            Lifeline::Audience => self.audience = false,
            Lifeline::Flip => self.flip = false,
            Lifeline::Hint => self.hint = false,
        }
    }
}

/// Where a session draws its questions from.
#[derive(Debug, Clone)]
pub enum QuestionSource {
    Bank,
    Custom(Vec<Question>),
}

#[derive(Debug)]
struct Reveal {
    countdown: Countdown,
    selected: usize,
}

#[derive(Debug)]
struct ActiveLifeline {
    kind: Lifeline,
    countdown: Countdown,
    poll: AudiencePoll,
}

pub struct SessionEngine<S: MetricsSink> {
    bank: QuestionBank,
    sink: S,
    phase: Phase,
    source: QuestionSource,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    time_remaining: u32,
    lifelines: LifelineInventory,
    eliminated: Vec<usize>,
    selected_answer: Option<usize>,
    reveal: Option<Reveal>,
    active_lifeline: Option<ActiveLifeline>,
    hint_request: Option<Countdown>,
    hint_text: Option<String>,
    last_poll: Option<[u8; 4]>,
    generation: u64,
}

impl<S: MetricsSink> SessionEngine<S> {
    pub fn new(bank: QuestionBank, sink: S) -> Self {
        Self {
            bank,
            sink,
            phase: Phase::Welcome,
            source: QuestionSource::Bank,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            time_remaining: 0,
            lifelines: LifelineInventory::fresh(),
            eliminated: Vec::new(),
            selected_answer: None,
            reveal: None,
            active_lifeline: None,
            hint_request: None,
            hint_text: None,
            last_poll: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn lifelines(&self) -> &LifelineInventory {
        &self.lifelines
    }

    pub fn eliminated_options(&self) -> &[usize] {
        &self.eliminated
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    /// The hint string, once the judge has responded.
    pub fn hint_text(&self) -> Option<&str> {
        self.hint_text.as_deref()
    }

    /// The finalized audience poll percentages, once the poll has closed.
    pub fn audience_poll_result(&self) -> Option<[u8; 4]> {
        self.last_poll
    }

    pub fn is_lifeline_active(&self) -> bool {
        self.active_lifeline.is_some()
    }

    pub fn active_lifeline_seconds(&self) -> Option<u32> {
        self.active_lifeline.as_ref().map(|l| l.countdown.remaining())
    }

    pub fn is_reveal_pending(&self) -> bool {
        self.reveal.is_some()
    }

    /// Begin a fresh session. A custom set with at least ten questions plays
    /// its first ten; anything else samples ten from the bank.
    pub fn start(&mut self, source: QuestionSource) {
        let questions = match &source {
            QuestionSource::Custom(custom) if custom.len() >= SESSION_QUESTIONS => {
                custom[..SESSION_QUESTIONS].to_vec()
            }
            _ => self.bank.sample_random(SESSION_QUESTIONS),
        };

        self.source = source;
        self.generation += 1;
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.time_remaining = self
            .questions
            .first()
            .map(|q| q.time_limit)
            .unwrap_or_default();
        self.lifelines = LifelineInventory::fresh();
        self.eliminated.clear();
        self.selected_answer = None;
        self.reveal = None;
        self.active_lifeline = None;
        self.hint_request = None;
        self.hint_text = None;
        self.last_poll = None;
        self.phase = Phase::Playing;

        tracing::debug!(questions = self.questions.len(), "session started");
        self.sink.quiz_started();
    }

    /// Restart with the same question source as the previous run.
    pub fn restart(&mut self) {
        let source = self.source.clone();
        self.start(source);
    }

    /// Commit an answer. Ignored while a reveal is pending, while a lifeline
    /// is active, or when the option is eliminated or out of range.
    pub fn select_answer(&mut self, option: usize) {
        if self.phase != Phase::Playing
            || self.reveal.is_some()
            || self.active_lifeline.is_some()
            || self.eliminated.contains(&option)
        {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        if option >= question.options.len() {
            return;
        }

        self.selected_answer = Some(option);
        self.hint_request = None;
        self.reveal = Some(Reveal {
            countdown: Countdown::new(REVEAL_SECONDS, self.generation),
            selected: option,
        });
    }

    /// Advance the session clock by one second. Exactly one timer class runs
    /// per tick: an active lifeline countdown, else a pending reveal, else
    /// the main question timer (with any pending hint request alongside it).
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }

        if let Some(lifeline) = &mut self.active_lifeline {
            if lifeline.countdown.is_stale(self.generation) {
                self.active_lifeline = None;
            } else if lifeline.countdown.tick() {
                self.finalize_active_lifeline();
            }
            return;
        }

        if let Some(reveal) = &mut self.reveal {
            if reveal.countdown.is_stale(self.generation) {
                self.reveal = None;
            } else if reveal.countdown.tick() {
                self.resolve_reveal();
            }
            return;
        }

        if let Some(request) = &mut self.hint_request {
            if request.is_stale(self.generation) {
                self.hint_request = None;
            } else if request.tick() {
                self.hint_request = None;
                self.hint_text = self.current_question().map(hint_for);
            }
        }

        if self.time_remaining > 0 {
            self.time_remaining -= 1;
        }
        if self.time_remaining == 0 {
            // Timeout is a loss, not a scored answer.
            tracing::debug!(index = self.current_index, "question timed out");
            self.finish(Phase::GameOver);
        }
    }

    /// Consume a lifeline. Ignored when already used, while a reveal is
    /// pending, or while another lifeline is active. The kind is marked
    /// consumed even when its effect turns out to be invisible (flip with an
    /// exhausted bank, a canceled hint request).
    pub fn use_lifeline(&mut self, lifeline: Lifeline) {
        if self.phase != Phase::Playing
            || self.reveal.is_some()
            || self.active_lifeline.is_some()
            || !self.lifelines.is_available(lifeline)
        {
            return;
        }

        self.lifelines.consume(lifeline);
        tracing::debug!(lifeline = lifeline.as_str(), "lifeline used");
        self.sink.lifeline_used(lifeline);

        match lifeline {
            Lifeline::FiftyFifty => self.apply_fifty_fifty(),
            Lifeline::Audience => {
                self.last_poll = None;
                self.active_lifeline = Some(ActiveLifeline {
                    kind: Lifeline::Audience,
                    countdown: Countdown::new(AUDIENCE_POLL_SECONDS, self.generation),
                    poll: AudiencePoll::new(),
                });
            }
            Lifeline::Flip => self.apply_flip(),
            Lifeline::Hint => {
                self.hint_request = Some(Countdown::new(HINT_RESPONSE_SECONDS, self.generation));
            }
        }
    }

    /// Record an audience vote while the poll window is open.
    pub fn record_audience_vote(&mut self, option: usize) {
        if let Some(lifeline) = &mut self.active_lifeline {
            if lifeline.kind == Lifeline::Audience {
                lifeline.poll.record_vote(option);
            }
        }
    }

    /// Close the active lifeline before its countdown expires. The audience
    /// poll finalizes with whatever partial tally it has.
    pub fn close_lifeline(&mut self) {
        if self.active_lifeline.is_some() {
            self.finalize_active_lifeline();
        }
    }

    /// Skip the judge wait and reveal the hint immediately.
    pub fn reveal_hint_now(&mut self) {
        if self.phase == Phase::Playing && self.hint_request.take().is_some() {
            self.hint_text = self.current_question().map(hint_for);
        }
    }

    /// Dismiss a pending hint request without revealing anything. The
    /// lifeline stays consumed.
    pub fn close_hint(&mut self) {
        self.hint_request = None;
    }

    pub fn open_creator(&mut self) {
        self.navigate(Phase::Creator);
    }

    pub fn open_library(&mut self) {
        self.navigate(Phase::Library);
    }

    pub fn open_editor(&mut self) {
        self.navigate(Phase::Editor);
    }

    pub fn back_to_welcome(&mut self) {
        self.navigate(Phase::Welcome);
    }

    fn navigate(&mut self, target: Phase) {
        if self.phase != Phase::Playing {
            self.phase = target;
        }
    }

    fn apply_fifty_fifty(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        let wrong = question.wrong_option_indices();
        self.eliminated = wrong
            .choose_multiple(&mut rand::thread_rng(), 2)
            .copied()
            .collect();
    }

    fn apply_flip(&mut self) {
        match self.bank.pick_replacement(&self.questions) {
            Some(replacement) => {
                tracing::debug!(
                    old = self.questions[self.current_index].id,
                    new = replacement.id,
                    "question flipped"
                );
                self.questions[self.current_index] = replacement;
                self.eliminated.clear();
                self.selected_answer = None;
                self.hint_request = None;
                self.hint_text = None;
                self.generation += 1;
            }
            None => {
                // Bank exhausted: the lifeline is spent with no visible
                // effect.
                tracing::debug!("flip requested but no replacement available");
            }
        }
    }

    fn finalize_active_lifeline(&mut self) {
        if let Some(lifeline) = self.active_lifeline.take() {
            if lifeline.kind == Lifeline::Audience {
                self.last_poll = Some(lifeline.poll.finalize());
            }
        }
    }

    fn resolve_reveal(&mut self) {
        let Some(reveal) = self.reveal.take() else {
            return;
        };
        if reveal.countdown.is_stale(self.generation) {
            return;
        }
        let Some(question) = self.current_question().cloned() else {
            return;
        };

        let correct = reveal.selected == question.correct_answer;
        let time_spent = question.time_limit.saturating_sub(self.time_remaining);
        self.sink
            .answer_recorded(correct, question.difficulty, question.id, time_spent);

        if correct {
            self.score += 1;
            if self.current_index + 1 == self.questions.len() {
                self.finish(Phase::Winner);
            } else {
                self.advance_question();
            }
        } else {
            self.finish(Phase::GameOver);
        }
    }

    fn advance_question(&mut self) {
        self.current_index += 1;
        self.generation += 1;
        self.time_remaining = self
            .current_question()
            .map(|q| q.time_limit)
            .unwrap_or_default();
        self.eliminated.clear();
        self.selected_answer = None;
        self.reveal = None;
        self.active_lifeline = None;
        self.hint_request = None;
        self.hint_text = None;
        self.last_poll = None;
    }

    fn finish(&mut self, outcome: Phase) {
        self.phase = outcome;
        self.reveal = None;
        self.active_lifeline = None;
        self.hint_request = None;
        tracing::debug!(score = self.score, outcome = ?outcome, "session finished");
        self.sink.quiz_completed(self.score);
    }
}
