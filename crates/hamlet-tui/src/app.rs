//! Application state and main UI controller

use crossterm::event::{Event, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use hamlet_core::retry::generate_with_retries_observed;
use hamlet_core::sketch::draw_sketch;
use hamlet_core::{GenError, Grid, Tile, Town, TownConfig, TownRng};

use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::widgets::{MapWidget, StatusInfo, StatusWidget};

/// What the map area is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Town,
    /// Geometry showcase for the current seed
    Sketch,
}

/// Viewer state
pub struct App {
    config: TownConfig,
    seed: u64,
    grid: Grid,
    mode: ViewMode,
    status: StatusInfo,
    theme: Theme,
    quit: bool,
}

impl App {
    /// Create the viewer and generate the first town
    pub fn new(config: TownConfig, seed: u64, theme: Theme) -> Self {
        let grid = Grid::new(config.width, config.height);
        let mut app = Self {
            config,
            seed,
            grid,
            mode: ViewMode::Town,
            status: StatusInfo::default(),
            theme,
            quit: false,
        };
        app.refresh();
        app
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn status(&self) -> &StatusInfo {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a terminal event, returning the action it triggered
    pub fn handle_event(&mut self, event: Event) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let action = key_to_action(key)?;
        self.execute(action);
        Some(action)
    }

    pub fn execute(&mut self, action: Action) {
        match action {
            Action::NextSeed => {
                self.seed = self.seed.wrapping_add(1);
                self.refresh();
            }
            Action::PrevSeed => {
                self.seed = self.seed.wrapping_sub(1);
                self.refresh();
            }
            Action::Regenerate => self.refresh(),
            Action::ToggleSketch => {
                self.mode = match self.mode {
                    ViewMode::Town => ViewMode::Sketch,
                    ViewMode::Sketch => ViewMode::Town,
                };
                self.refresh();
            }
            Action::TogglePalette => {
                self.theme = self.theme.with_palette(self.theme.palette.next());
            }
            Action::Quit => self.quit = true,
        }
    }

    fn refresh(&mut self) {
        match self.mode {
            ViewMode::Town => self.generate_town(),
            ViewMode::Sketch => self.generate_sketch(),
        }
    }

    fn generate_town(&mut self) {
        self.status.error = None;
        let mut failures = 0;
        let result = generate_with_retries_observed(&self.config, self.seed, |_, _| failures += 1);
        self.status.failures += failures;

        match result {
            Ok(generated) => {
                self.seed = generated.seed;
                self.show_town(&generated.town);
            }
            Err(err) => {
                if let GenError::RetriesExhausted { last_seed, .. } = &err {
                    self.seed = *last_seed;
                }
                let mut failed = Town::new(self.config.clone(), self.seed);
                failed.fill(Tile::Error, self.config.error_color);
                self.show_town(&failed);
                self.status.error = Some(err.to_string());
            }
        }
    }

    fn show_town(&mut self, town: &Town) {
        let stats = town.stats();
        self.grid = town.grid().clone();
        self.status.seed = town.seed();
        self.status.streets = stats.streets;
        self.status.standing = stats.standing;
        self.status.placed = stats.buildings_placed;
    }

    fn generate_sketch(&mut self) {
        let mut grid = Grid::new(self.config.width, self.config.height);
        let mut rng = TownRng::new(self.seed);
        self.status.error = draw_sketch(&mut grid, &mut rng).err().map(|e| e.to_string());
        self.grid = grid;
        self.status.seed = self.seed;
        self.status.streets = 0;
        self.status.standing = 0;
        self.status.placed = 0;
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(frame.area());

        let title = match self.mode {
            ViewMode::Town => "Hamlet",
            ViewMode::Sketch => "Hamlet - sketch",
        };
        frame.render_widget(MapWidget::new(&self.grid, &self.theme, title), chunks[0]);
        frame.render_widget(StatusWidget::new(&self.status, &self.theme), chunks[1]);
    }
}
