use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hsla_anim::AnimatedColor;
use hsla_config::Config;
use hsla_core::Hsla;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

mod logging;

/// Degrees of hue rotation per arrow key press.
const HUE_KEY_STEP: f64 = 15.0;

/// Saturation/lightness change per key press.
const LEVEL_KEY_STEP: f64 = 0.05;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _logging = logging::init();
    let config = Config::load()?;

    let terminal = ratatui::init();
    let result = App::new(config, hsla_config::config_path()).run(terminal);
    ratatui::restore();
    result
}

/// The preview application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The color being previewed.
    color: AnimatedColor<Hsla>,
    /// Settings the preview was started with, written back on save.
    config: Config,
    /// Where `w` saves the config, if anywhere.
    config_path: Option<PathBuf>,
    /// Result of the last save, shown under the color.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded config.
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let animation = config.animation.clone();
        let color = AnimatedColor::new(config.color, move |c| animation.step(c))
            .with_interval(config.animation.tick_interval());
        if config.animation.autostart {
            color.start();
        }
        Self {
            running: false,
            color,
            config,
            config_path,
            status: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        tracing::info!(
            color = %self.color.color(),
            interval = ?self.color.interval(),
            "preview started"
        );
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.color.stop();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let hsla = self.color.color();
        let rgba = hsla.to_rgba8();
        let area = frame.area();

        let rows = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(7), // Swatch
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // hsla()
            Constraint::Length(1), // Hex
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let columns = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(28),
            Constraint::Fill(1),
        ])
        .split(rows[1]);

        let swatch = Block::new().style(Style::new().bg(Color::from(rgba)));
        frame.render_widget(swatch, columns[1]);

        frame.render_widget(
            Paragraph::new(hsla.to_string()).alignment(Alignment::Center),
            rows[3],
        );

        let state = if self.color.is_running() {
            "running"
        } else {
            "paused"
        };
        let status = self.status.as_deref().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(format!("{}  {state}  {status}", rgba.to_hex()))
                .dark_gray()
                .alignment(Alignment::Center),
            rows[4],
        );

        let help = Line::from(vec![
            "q".bold(),
            " quit  ".dark_gray(),
            "space".bold(),
            " start/stop  ".dark_gray(),
            "←/→".bold(),
            " hue  ".dark_gray(),
            "↑/↓".bold(),
            " lightness  ".dark_gray(),
            "s/d".bold(),
            " saturation  ".dark_gray(),
            "w".bold(),
            " save".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, rows[6]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        // Redraw at least once per tick so the animation stays smooth.
        if event::poll(Duration::from_millis(30))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_animation(),
            (_, KeyCode::Left) => self.color.modify(|c| c.rotate_hue(-HUE_KEY_STEP)),
            (_, KeyCode::Right) => self.color.modify(|c| c.rotate_hue(HUE_KEY_STEP)),
            (_, KeyCode::Up) => self.color.modify(|c| c.lighten(LEVEL_KEY_STEP)),
            (_, KeyCode::Down) => self.color.modify(|c| c.lighten(-LEVEL_KEY_STEP)),
            (_, KeyCode::Char('s')) => self.color.modify(|c| c.saturate(-LEVEL_KEY_STEP)),
            (_, KeyCode::Char('d')) => self.color.modify(|c| c.saturate(LEVEL_KEY_STEP)),
            (_, KeyCode::Char('w')) => self.save_color(),
            _ => {}
        }
    }

    /// Start or stop the animation.
    fn toggle_animation(&mut self) {
        if self.color.is_running() {
            self.color.stop();
        } else {
            self.color.start();
        }
    }

    /// Save the current color as the starting color of the config.
    fn save_color(&mut self) {
        let Some(path) = self.config_path.as_deref() else {
            self.status = Some("no config directory".to_string());
            return;
        };
        self.config.color = self.color.color();
        self.status = Some(match self.config.save_to(path) {
            Ok(()) => "saved".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "failed to save config");
                format!("save failed: {e}")
            }
        });
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
