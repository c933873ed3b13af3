use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::ListState;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::api::PasswordBackend;
use crate::checks;
use crate::config::Settings;
use crate::copy::ClipboardSink;
use crate::debounce::Debouncer;
use crate::model::{AnalyzeOutcome, AppEvent, AppScreen, Focus, GenerateKind};
use crate::render::{RenderState, Signal, render};

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
const WELCOME_DURATION: Duration = Duration::from_millis(1500);

pub struct GeneratorState {
    pub kind: GenerateKind,
    pub password: Option<String>,
    pub copy_label: &'static str,
    pub generating: bool,
}

pub struct App {
    pub screen: AppScreen,
    pub focus: Focus,
    pub password: String,
    pub masked: bool,
    pub view: RenderState,
    pub suggestion_state: ListState,
    pub analyzing: bool,
    pub generator: GeneratorState,
    pub message: Option<String>,
    pub throbber_state: ThrobberState,
    pub welcome_shown_at: Instant,
    pub quit: bool,

    backend: Arc<dyn PasswordBackend>,
    clipboard: Box<dyn ClipboardSink>,
    tx: UnboundedSender<AppEvent>,
    debouncer: Debouncer,
    request_seq: u64,
    generate_seq: u64,
    copy_token: u64,
    copy_ack: Duration,
}

impl App {
    pub fn new(
        backend: Arc<dyn PasswordBackend>,
        clipboard: Box<dyn ClipboardSink>,
        tx: UnboundedSender<AppEvent>,
        settings: &Settings,
    ) -> Self {
        Self {
            screen: AppScreen::Welcome,
            focus: Focus::Input,
            password: String::new(),
            masked: true,
            view: RenderState::default(),
            suggestion_state: ListState::default(),
            analyzing: false,
            generator: GeneratorState {
                kind: GenerateKind::default(),
                password: None,
                copy_label: COPY_LABEL,
                generating: false,
            },
            message: None,
            throbber_state: ThrobberState::default(),
            welcome_shown_at: Instant::now(),
            quit: false,
            backend,
            clipboard,
            tx,
            debouncer: Debouncer::new(settings.debounce),
            request_seq: 0,
            generate_seq: 0,
            copy_token: 0,
            copy_ack: settings.copy_ack,
        }
    }

    pub fn busy(&self) -> bool {
        self.analyzing || self.generator.generating
    }

    /// Periodic housekeeping from the draw loop.
    pub fn tick(&mut self) {
        if self.busy() {
            self.throbber_state.calc_next();
        }
        if self.screen == AppScreen::Welcome && self.welcome_shown_at.elapsed() >= WELCOME_DURATION {
            self.screen = AppScreen::Analyzer;
        }
    }

    /// Input field changed: local checks now, remote analysis after the quiet interval.
    pub fn on_input(&mut self, password: String) {
        self.password = password;
        self.view = render(&self.view, Signal::Checks(checks::evaluate(&self.password)));
        if self.password.is_empty() {
            self.debouncer.cancel();
            self.reset();
        } else {
            self.debouncer.arm(&self.tx, self.password.clone());
        }
    }

    pub fn reset(&mut self) {
        // responses still in flight belong to a field that no longer exists
        self.request_seq += 1;
        self.analyzing = false;
        self.view = render(&self.view, Signal::Reset);
        self.suggestion_state.select(None);
        if self.focus == Focus::Suggestions {
            self.focus = Focus::Input;
        }
        debug!("render state reset");
    }

    fn dispatch_analysis(&mut self, password: String) {
        self.request_seq += 1;
        let seq = self.request_seq;
        self.analyzing = true;
        let backend = self.backend.clone();
        let tx2 = self.tx.clone();
        debug!("dispatching analysis #{}", seq);
        tokio::spawn(async move {
            let outcome = backend.analyze(&password).await;
            let _ = tx2.send(AppEvent::AnalysisFinished { seq, outcome });
        });
    }

    pub fn use_suggestion(&mut self, index: usize) {
        let Some(suggestion) = self.view.suggestions.get(index).cloned() else {
            return;
        };
        self.debouncer.cancel();
        self.password = suggestion.clone();
        self.view = render(&self.view, Signal::Checks(checks::evaluate(&self.password)));
        self.focus = Focus::Input;
        self.dispatch_analysis(suggestion);
    }

    pub fn toggle_visibility(&mut self) {
        self.masked = !self.masked;
    }

    pub fn request_generation(&mut self) {
        let kind = self.generator.kind;
        self.generate_seq += 1;
        let seq = self.generate_seq;
        self.generator.generating = true;
        let backend = self.backend.clone();
        let tx2 = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.generate(kind).await;
            let _ = tx2.send(AppEvent::Generated { seq, result });
        });
    }

    pub fn copy_generated(&mut self) {
        let Some(password) = self.generator.password.clone() else {
            self.message = Some("Nothing to copy yet".into());
            return;
        };
        match self.clipboard.set_text(password) {
            Ok(()) => {
                self.copy_token += 1;
                let token = self.copy_token;
                self.generator.copy_label = COPIED_LABEL;
                let deadline = tokio::time::Instant::now() + self.copy_ack;
                let tx2 = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    let _ = tx2.send(AppEvent::CopyAckExpired { token });
                });
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.message = Some(format!("Copy failed: {}", e));
            }
        }
    }

    pub fn handle_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::DebounceElapsed { generation, password } => {
                if self.debouncer.take_fired(generation) {
                    self.dispatch_analysis(password);
                } else {
                    debug!("ignoring superseded debounce generation {}", generation);
                }
            }
            AppEvent::AnalysisFinished { seq, outcome } => {
                if seq != self.request_seq {
                    debug!("discarding stale analysis #{} (latest #{})", seq, self.request_seq);
                    return;
                }
                self.analyzing = false;
                match outcome {
                    Ok(AnalyzeOutcome::Report(report)) => {
                        self.view = render(&self.view, Signal::Analysis(&report));
                        if self.view.suggestions_visible() {
                            self.suggestion_state.select(Some(0));
                        } else {
                            self.suggestion_state.select(None);
                            if self.focus == Focus::Suggestions {
                                self.focus = Focus::Input;
                            }
                        }
                    }
                    Ok(AnalyzeOutcome::RateLimited) => {
                        info!("analysis rate limited");
                        self.view = render(&self.view, Signal::RateLimited);
                    }
                    Err(e) => {
                        error!("Analysis error: {}", e);
                    }
                }
            }
            AppEvent::Generated { seq, result } => {
                if seq != self.generate_seq {
                    debug!("discarding stale generation #{} (latest #{})", seq, self.generate_seq);
                    return;
                }
                self.generator.generating = false;
                match result {
                    Ok(password) => {
                        self.generator.password = Some(password);
                        self.generator.copy_label = COPY_LABEL;
                    }
                    Err(e) => {
                        error!("Generation error: {}", e);
                    }
                }
            }
            AppEvent::CopyAckExpired { token } => {
                if token == self.copy_token {
                    self.generator.copy_label = COPY_LABEL;
                }
            }
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.view.suggestions_visible() => Focus::Suggestions,
            Focus::Input | Focus::Suggestions => Focus::Generator,
            Focus::Generator => Focus::Input,
        };
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        // any key skips the welcome screen
        if self.screen == AppScreen::Welcome {
            self.screen = AppScreen::Analyzer;
            return;
        }

        // AltGr arrives as Ctrl+Alt on Windows and must still type text
        let ctrl = modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT);
        match code {
            KeyCode::Esc => {
                self.quit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.quit = true;
                return;
            }
            KeyCode::Char('t') if ctrl => {
                self.toggle_visibility();
                return;
            }
            KeyCode::Tab => {
                self.cycle_focus();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => match code {
                KeyCode::Char('u') if ctrl => self.on_input(String::new()),
                KeyCode::Char(c) if !ctrl => {
                    let mut next = self.password.clone();
                    next.push(c);
                    self.on_input(next);
                }
                KeyCode::Backspace => {
                    if !self.password.is_empty() {
                        let mut next = self.password.clone();
                        next.pop();
                        self.on_input(next);
                    }
                }
                _ => {}
            },
            Focus::Suggestions => {
                let count = self.view.suggestions.len();
                let selected = self.suggestion_state.selected().unwrap_or(0);
                match code {
                    KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                        self.suggestion_state.select(Some((selected + 1).min(count - 1)));
                    }
                    KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                        self.suggestion_state.select(Some(selected.saturating_sub(1)));
                    }
                    KeyCode::Enter => self.use_suggestion(selected),
                    _ => {}
                }
            }
            Focus::Generator => match code {
                KeyCode::Left => self.generator.kind = self.generator.kind.prev(),
                KeyCode::Right => self.generator.kind = self.generator.kind.next(),
                KeyCode::Enter | KeyCode::Char('g') => self.request_generation(),
                KeyCode::Char('c') => self.copy_generated(),
                _ => {}
            },
        }
    }
}
