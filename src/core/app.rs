//! Main application orchestrator

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyEvent;
use crossterm::style::Print;
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};

use crate::collector::SystemCollector;
use crate::config::Config;
use crate::core::events::{Event, EventHandler, EventResult, KeyBindings};
use crate::metrics::MetricsSnapshot;
use crate::render::{DashboardRenderer, Theme};

pub struct App {
    renderer: DashboardRenderer,
    collector: SystemCollector,
    /// Latest complete snapshot; replaced whole, never patched.
    snapshot: MetricsSnapshot,
    error: Option<String>,
    /// Externally owned animation counter, one step per render tick.
    anim_frame: u64,
    term_width: u16,
    animations: bool,
    refresh_interval: Duration,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let theme = Theme::from_name(&config.display.theme);
        let renderer = DashboardRenderer::new(theme, config.network.primary_interface.clone());
        let collector = SystemCollector::new(&config.collector);
        let (term_width, _) = crossterm::terminal::size().unwrap_or((80, 24));

        Ok(Self {
            renderer,
            collector,
            snapshot: MetricsSnapshot::default(),
            error: None,
            anim_frame: 0,
            term_width,
            animations: config.display.animations,
            refresh_interval: Duration::from_secs(config.collector.interval_secs.max(1)),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.setup_terminal()?;

        // Prime data before the first frame
        self.resample();
        let mut events = EventHandler::new(self.refresh_interval);
        self.draw()?;

        let result = self.event_loop(&mut events).await;

        self.shutdown()?;
        result
    }

    fn setup_terminal(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        execute!(std::io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    async fn event_loop(&mut self, events: &mut EventHandler) -> Result<()> {
        loop {
            let Some(event) = events.next().await else {
                break;
            };
            match self.handle_event(event)? {
                EventResult::Continue => {}
                EventResult::Quit => break,
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<EventResult> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, _height) => {
                self.term_width = width;
                self.draw()?;
                Ok(EventResult::Continue)
            }
            Event::Tick => {
                if self.animations {
                    self.anim_frame = self.anim_frame.wrapping_add(1);
                }
                self.draw()?;
                Ok(EventResult::Continue)
            }
            Event::SlowTick => {
                self.resample();
                Ok(EventResult::Continue)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult> {
        if KeyBindings::quit().matches(&key) || KeyBindings::quit_alt().matches(&key) {
            return Ok(EventResult::Quit);
        }
        if KeyBindings::refresh().matches(&key) {
            self.resample();
            self.draw()?;
        }
        Ok(EventResult::Continue)
    }

    fn resample(&mut self) {
        match self.collector.sample() {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "metric collection failed");
                self.error = Some(e.to_string());
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let frame = self.renderer.render(
            &self.snapshot,
            self.error.as_deref(),
            self.anim_frame,
            self.term_width,
        );

        let mut stdout = std::io::stdout();
        queue!(
            stdout,
            BeginSynchronizedUpdate,
            cursor::MoveTo(0, 0),
            Clear(ClearType::All)
        )?;
        for line in frame.lines() {
            queue!(stdout, Print(line), Print("\r\n"))?;
        }
        queue!(stdout, EndSynchronizedUpdate)?;
        stdout.flush()?;
        Ok(())
    }
}
