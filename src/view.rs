use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use termion::{event::Key, input::TermRead, raw::IntoRawMode};
use tracing::{debug, warn};

use sparselife::{game::DEFAULT_TICK_INTERVAL, Chunk, Game, Pos, Vec2, ViewTransform};

use canvas::Canvas;
mod canvas;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const PAN_STEP: f64 = 4.0;
/// in mouse wheel units, see `ViewTransform::zoom_at`.
const ZOOM_STEP: f64 = 200.0;

#[derive(Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    ZoomIn,
    ZoomOut,
    ToggleRunning,
    ToggleCell,
    Step,
    Accelerate,
    Decelerate,
    ResetSpeed,
    Clear,
    /// toggles a neighbor count in the rule list being edited.
    ToggleCount(u8),
    SwitchRuleList,
    NextPreset,
}

/// which rule list the digit keys edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleList {
    Birth,
    Survival,
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let key = match key {
            Ok(key) => key,
            Err(error) => {
                warn!(%error, "stopped reading input");
                break;
            }
        };
        let command = match key {
            Key::Char('q') | Key::Ctrl('c') => InputCmd::Exit,
            Key::Up => InputCmd::Move(Dir::Up),
            Key::Down => InputCmd::Move(Dir::Down),
            Key::Left => InputCmd::Move(Dir::Left),
            Key::Right => InputCmd::Move(Dir::Right),
            Key::Char('+') | Key::Char('=') => InputCmd::ZoomIn,
            Key::Char('-') => InputCmd::ZoomOut,
            Key::Char('\n') => InputCmd::ToggleRunning,
            Key::Char(' ') => InputCmd::ToggleCell,
            Key::Char('n') => InputCmd::Step,
            Key::Char('>') => InputCmd::Accelerate,
            Key::Char('<') => InputCmd::Decelerate,
            Key::Char('x') => InputCmd::ResetSpeed,
            Key::Char('c') => InputCmd::Clear,
            Key::Char(digit @ '0'..='8') => InputCmd::ToggleCount(digit as u8 - b'0'),
            Key::Char('\t') => InputCmd::SwitchRuleList,
            Key::Char('r') => InputCmd::NextPreset,
            _ => continue,
        };

        if sender.send(command).is_err() {
            break;
        }
    }
}

/// Terminal front end: draws chunk visuals and forwards keys to the game.
pub struct View {
    transform: ViewTransform,
    cell_pixel_size: f64,
    speed: f64,
    editing: RuleList,
}

impl View {
    pub fn new(cell_pixel_size: f64) -> Self {
        Self {
            transform: ViewTransform::default(),
            cell_pixel_size,
            speed: 1.0,
            editing: RuleList::Birth,
        }
    }

    /// Runs the frame loop until the user quits. `focus` is the cell shown
    /// in the middle of the screen at startup.
    pub fn run(mut self, game: &mut Game, focus: Vec2) -> Result<()> {
        let mut stdout = stdout()
            .into_raw_mode()
            .context("stdout is not a terminal")?;
        write!(stdout, "{}", termion::cursor::Hide)?;

        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || input_loop(sender));

        let screen = Canvas::from_screen()?.size();
        self.transform.offset = screen / 2.0 - focus * self.cell_pixel_size;

        while self.handle_inputs(&receiver, game) {
            if let Some(report) = game.tick() {
                debug!(?report, "tick");
            }
            self.display(game, &mut stdout)?;
            thread::sleep(FRAME_INTERVAL);
        }

        write!(
            stdout,
            "{}{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1),
            termion::cursor::Show
        )?;
        stdout.flush()?;
        Ok(())
    }

    fn cursor(&self, screen: Vec2) -> (Vec2, Pos) {
        let center = (screen / 2.0).floor().as_vec2();
        // middle of the character, away from cell borders
        let cell = self
            .transform
            .cell_at_screen(center + Vec2::new(0.5, 0.5), self.cell_pixel_size);
        (center, cell)
    }

    /// returns false once the user asked to exit.
    fn handle_inputs(&mut self, receiver: &mpsc::Receiver<InputCmd>, game: &mut Game) -> bool {
        while let Ok(cmd) = receiver.try_recv() {
            let screen = match Canvas::from_screen() {
                Ok(canvas) => canvas.size(),
                Err(_) => Vec2::default(),
            };
            if !self.apply(cmd, game, screen) {
                return false;
            }
        }
        true
    }

    /// returns false for `InputCmd::Exit`.
    fn apply(&mut self, cmd: InputCmd, game: &mut Game, screen: Vec2) -> bool {
        let (center, cursor) = self.cursor(screen);
        match cmd {
            InputCmd::Exit => return false,
            InputCmd::Move(direction) => self.transform.pan(match direction {
                Dir::Up => Vec2::new(0.0, PAN_STEP),
                Dir::Down => Vec2::new(0.0, -PAN_STEP),
                Dir::Left => Vec2::new(PAN_STEP, 0.0),
                Dir::Right => Vec2::new(-PAN_STEP, 0.0),
            }),
            InputCmd::ZoomIn => {
                self.transform.zoom_at(center, -ZOOM_STEP);
            }
            InputCmd::ZoomOut => {
                self.transform.zoom_at(center, ZOOM_STEP);
            }
            InputCmd::ToggleRunning => {
                game.toggle_running();
            }
            InputCmd::ToggleCell => {
                game.world_mut().toggle(cursor);
            }
            InputCmd::Step => {
                game.step();
            }
            InputCmd::Accelerate => self.change_speed(game, self.speed * 2.0),
            InputCmd::Decelerate => self.change_speed(game, self.speed / 2.0),
            InputCmd::ResetSpeed => {
                game.set_tick_interval(DEFAULT_TICK_INTERVAL);
                self.speed = 1.0;
            }
            InputCmd::Clear => game.world_mut().clear(),
            InputCmd::ToggleCount(count) => {
                let rules = game.rules_mut();
                let present = match self.editing {
                    RuleList::Birth => rules.toggle_birth(count),
                    RuleList::Survival => rules.toggle_survival(count),
                };
                debug!(list = ?self.editing, count, present, "toggled rule count");
            }
            InputCmd::SwitchRuleList => {
                self.editing = match self.editing {
                    RuleList::Birth => RuleList::Survival,
                    RuleList::Survival => RuleList::Birth,
                }
            }
            InputCmd::NextPreset => {
                let (name, rules) = game.rules().next_preset();
                debug!(name, "switching rule preset");
                game.set_rules(rules);
            }
        }
        true
    }

    /// the displayed multiplier only follows speeds the game accepted.
    fn change_speed(&mut self, game: &mut Game, speed: f64) {
        if game.set_speed(speed) {
            self.speed = speed;
        }
    }

    fn display(&self, game: &mut Game, out: &mut impl Write) -> Result<()> {
        let mut canvas = Canvas::from_screen()?;
        let screen = canvas.size();

        let visible = self.transform.visible_chunks(screen, self.cell_pixel_size);
        for chunk_pos in visible.iter() {
            let world = game.world_mut();
            if world.chunk(chunk_pos).is_none() {
                world.register_chunk(Chunk::new(chunk_pos));
            }
        }

        let cell_side = self.cell_pixel_size * self.transform.scale;
        for chunk in visible.iter().filter_map(|chunk_pos| game.world().chunk(chunk_pos)) {
            let origin = self
                .transform
                .world_to_screen(chunk.placement(self.cell_pixel_size));
            for local in chunk.visual().cells() {
                canvas.fill_square(origin + local.as_pos().as_vec2() * cell_side, cell_side, '#');
            }
        }

        let (center, cursor) = self.cursor(screen);
        let marker = if game.world().get(cursor) { '@' } else { '+' };
        canvas.put(center.x as usize, center.y as usize, marker);

        let status = format!(
            " {} | gen {} | pop {} | chunks {} | {} (editing {:?}) | x{} | cursor {} | zoom {:.2}",
            if game.is_running() { "running" } else { "stopped" },
            game.generation(),
            game.world().population(),
            game.world().chunk_count(),
            game.rules(),
            self.editing,
            self.speed,
            cursor,
            self.transform.scale,
        );
        canvas.display(out, &status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sparselife::Rules;

    use super::*;

    const SCREEN: Vec2 = Vec2::new(80.0, 24.0);

    #[test]
    fn digits_toggle_the_edited_rule_list() {
        let mut view = View::new(1.0);
        let mut game = Game::new();

        assert!(view.apply(InputCmd::ToggleCount(6), &mut game, SCREEN));
        assert_eq!(game.rules(), &Rules::highlife());

        view.apply(InputCmd::SwitchRuleList, &mut game, SCREEN);
        view.apply(InputCmd::ToggleCount(2), &mut game, SCREEN);
        view.apply(InputCmd::ToggleCount(0), &mut game, SCREEN);
        assert_eq!(game.rules(), &Rules::new(&[3, 6], &[3, 0]));

        view.apply(InputCmd::SwitchRuleList, &mut game, SCREEN);
        view.apply(InputCmd::ToggleCount(6), &mut game, SCREEN);
        assert_eq!(game.rules().birth, vec![3]);
    }

    #[test]
    fn preset_key_cycles_rules() {
        let mut view = View::new(1.0);
        let mut game = Game::new();
        view.apply(InputCmd::NextPreset, &mut game, SCREEN);
        assert_eq!(game.rules(), &Rules::highlife());
        view.apply(InputCmd::NextPreset, &mut game, SCREEN);
        assert_eq!(game.rules(), &Rules::seeds());
    }

    #[test]
    fn displayed_speed_tracks_accepted_speed() {
        let mut view = View::new(1.0);
        let mut game = Game::new();

        view.apply(InputCmd::Accelerate, &mut game, SCREEN);
        assert_eq!(view.speed, 2.0);
        assert_eq!(game.tick_interval(), Duration::from_millis(50));

        // halving keeps working until the interval no longer fits a Duration
        for _ in 0..2000 {
            view.apply(InputCmd::Decelerate, &mut game, SCREEN);
        }
        assert!(view.speed > 0.0);
        let expected = DEFAULT_TICK_INTERVAL.as_secs_f64() / view.speed;
        let actual = game.tick_interval().as_secs_f64();
        assert!((expected - actual).abs() / expected < 1e-9);

        view.apply(InputCmd::ResetSpeed, &mut game, SCREEN);
        assert_eq!(view.speed, 1.0);
        assert_eq!(game.tick_interval(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut view = View::new(1.0);
        let mut game = Game::new();
        assert!(!view.apply(InputCmd::Exit, &mut game, SCREEN));
    }

    #[test]
    fn space_toggles_cell_under_cursor() {
        let mut view = View::new(1.0);
        let mut game = Game::new();
        view.apply(InputCmd::ToggleCell, &mut game, SCREEN);
        assert_eq!(game.world().live_cells(), &[sparselife::pos!(40, 12)]);
    }
}
