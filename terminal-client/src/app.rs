use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use nrow_common::games::tictactoe::{
    AI_MARK, Board, Difficulty, GameConfig, GameMode, GameSession, Mark, Phase, Position,
};
use nrow_common::log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Restart,
    NewGame,
    Help,
    Quit,
}

/// Cells are numbered from 1 in row-major order; `row col` is 1-based too.
pub fn parse_command(line: &str, board: &Board) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => Err("Enter a cell number, or h for help".to_string()),
        ["q" | "quit"] => Ok(Command::Quit),
        ["r" | "restart"] => Ok(Command::Restart),
        ["n" | "new"] => Ok(Command::NewGame),
        ["h" | "help" | "?"] => Ok(Command::Help),
        [cell] => {
            let number = parse_number(cell)?;
            Ok(Command::Place(number - 1))
        }
        [row, col] => {
            let row = parse_number(row)?;
            let col = parse_number(col)?;
            board
                .index_of(Position::new(row - 1, col - 1))
                .map(Command::Place)
                .ok_or_else(|| format!("Row and column must be between 1 and {}", board.size()))
        }
        _ => Err(format!("Unknown command '{}'", line.trim())),
    }
}

fn parse_number(word: &str) -> Result<usize, String> {
    match word.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(format!("Unknown command '{}'", word)),
    }
}

/// Reads `<size> [pvp|pvc] [difficulty]` on top of `current`. A blank line keeps it.
pub fn parse_setup(line: &str, current: &GameConfig) -> Result<GameConfig, String> {
    let mut config = current.clone();
    let mut words = line.split_whitespace();

    if let Some(size) = words.next() {
        config.size = size
            .parse()
            .map_err(|_| format!("Board size must be a number, got '{}'", size))?;
        config.win_length = None;
    }

    for word in words {
        if let Ok(mode) = word.parse::<GameMode>() {
            config.mode = mode;
            continue;
        }
        let difficulty: Difficulty = word.parse()?;
        config.mode = GameMode::HumanVsAi;
        config.difficulty = Some(difficulty);
    }

    if config.mode == GameMode::HumanVsAi && config.difficulty.is_none() {
        config.difficulty = Some(Difficulty::Medium);
    }

    Ok(config)
}

pub fn render_board(session: &GameSession) -> String {
    let board = session.board();
    let size = board.size();
    let width = board.cell_count().to_string().len();
    let winning_cells = session.winning_cells().unwrap_or(&[]);

    let mut rendered = String::new();
    for row in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|col| {
                let index = row * size + col;
                let label = match board.get(index) {
                    Some(Mark::X) => Mark::X.to_string(),
                    Some(Mark::O) => Mark::O.to_string(),
                    _ => (index + 1).to_string(),
                };
                if winning_cells.contains(&index) {
                    format!("[{:>width$}]", label)
                } else {
                    format!(" {:>width$} ", label)
                }
            })
            .collect();
        rendered.push_str(&cells.join("|"));
        rendered.push('\n');
    }
    rendered
}

fn describe_config(config: &GameConfig) -> String {
    match (config.mode, config.difficulty) {
        (GameMode::HumanVsAi, Some(difficulty)) => format!("{} pvc {}", config.size, difficulty),
        _ => format!("{} pvp", config.size),
    }
}

pub struct TerminalApp<R, W> {
    session: GameSession,
    config: GameConfig,
    input: R,
    output: W,
    ai_delay: Duration,
}

impl<R: BufRead, W: Write> TerminalApp<R, W> {
    pub fn new(session: GameSession, config: GameConfig, input: R, output: W, ai_delay: Duration) -> Self {
        Self {
            session,
            config,
            input,
            output,
            ai_delay,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Runs until `q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_help()?;
        self.draw()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let command = match parse_command(&line, self.session.board()) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{}", message)?;
                    continue;
                }
            };

            match command {
                Command::Quit => return Ok(()),
                Command::Help => self.print_help()?,
                Command::Restart => {
                    self.session.restart();
                    self.draw()?;
                }
                Command::NewGame => self.new_game()?,
                Command::Place(index) => self.human_move(index)?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn print_help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Commands: <cell> or <row> <col> to move, r restart, n new game, h help, q quit")
    }

    fn draw(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", render_board(&self.session))?;
        writeln!(self.output, "{}", self.session.status_message())
    }

    fn human_move(&mut self, index: usize) -> io::Result<()> {
        if let Err(err) = self.session.apply_human_move(index) {
            log!("Rejected move {}: {}", index, err);
            return writeln!(self.output, "{}", err);
        }
        self.draw()?;

        if self.session.is_ai_turn() {
            if !self.ai_delay.is_zero() {
                thread::sleep(self.ai_delay);
            }
            match self.session.apply_ai_move() {
                Ok(snapshot) => {
                    if let Some(cell) = snapshot.last_move {
                        let position = self.session.board().position_of(cell);
                        writeln!(
                            self.output,
                            "{} plays {} (row {}, col {})",
                            self.session.player_name(AI_MARK),
                            cell + 1,
                            position.row + 1,
                            position.col + 1
                        )?;
                    }
                    self.draw()?;
                }
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
        Ok(())
    }

    fn new_game(&mut self) -> io::Result<()> {
        self.session.reconfigure();

        while self.session.phase() == Phase::Setup {
            writeln!(
                self.output,
                "New game: <size> [pvp|pvc] [easy|medium|hard|very-hard], blank keeps {}",
                describe_config(&self.config)
            )?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let config = match parse_setup(&line, &self.config) {
                Ok(config) => config,
                Err(message) => {
                    writeln!(self.output, "{}", message)?;
                    continue;
                }
            };

            match self.session.start(&config) {
                Ok(()) => self.config = config,
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }

        self.draw()
    }
}
