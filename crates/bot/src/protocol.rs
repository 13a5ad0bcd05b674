//! Text protocol spoken with the game referee.
//!
//! Once per game the referee sends the cell listing:
//!
//! ```text
//! <cell count>
//! <index> <richness> <n0> <n1> <n2> <n3> <n4> <n5>    (one line per cell)
//! ```
//!
//! Then every turn:
//!
//! ```text
//! <day>
//! <nutrients>
//! <sun> <score>
//! <opponent sun> <opponent score> <opponent is waiting>
//! <tree count>
//! <cell> <size> <is mine> <is dormant>                (one line per tree)
//! <possible action count>
//! <action>                                            (one line per action)
//! ```
//!
//! The answer is a single action line. Booleans are `0` or `1`. The
//! possible-action listing is read and dropped since the agent generates
//! its own.

use std::io::BufRead;
use std::str::FromStr;
use std::time::Instant;

use sunforest_core::{Result, Side, SunforestError};
use sunforest_forest::{Board, GameState, PlayerState, Tree, MAX_RADIUS};
use tracing::{debug, warn};

/// Line-oriented reader that keeps track of where it is for error messages.
pub struct LineReader<R> {
    input: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The next line without its terminator, or `None` at end of input.
    ///
    /// # Errors
    /// Returns `SunforestError::Protocol` if the input cannot be read.
    pub fn try_next(&mut self) -> Result<Option<&str>> {
        self.line.clear();
        let read = self
            .input
            .read_line(&mut self.line)
            .map_err(|e| SunforestError::Protocol(format!("read failed: {e}")))?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.line.trim_end_matches(['\r', '\n'])))
    }

    /// The next line; end of input is an error.
    pub fn next_line(&mut self) -> Result<&str> {
        let number = self.line_number + 1;
        self.try_next()?.ok_or_else(|| {
            SunforestError::Protocol(format!("line {number}: unexpected end of input"))
        })
    }

    /// The next line as a single integer.
    pub fn next_number<T: FromStr>(&mut self) -> Result<T> {
        let line = self.next_line()?.to_owned();
        self.parse_one(&line)
    }

    fn parse_numbers<T: FromStr>(&self, line: &str) -> Result<Vec<T>> {
        line.split_whitespace()
            .map(|token| {
                token.parse().map_err(|_| {
                    SunforestError::Protocol(format!(
                        "line {}: expected a number, got {token:?}",
                        self.line_number
                    ))
                })
            })
            .collect()
    }

    fn parse_one<T: FromStr>(&self, line: &str) -> Result<T> {
        let mut values = self.parse_numbers(line)?;
        if values.len() != 1 {
            return Err(self.shape_error(line, "one number"));
        }
        Ok(values.remove(0))
    }

    fn shape_error(&self, line: &str, expected: &str) -> SunforestError {
        SunforestError::Protocol(format!(
            "line {}: expected {expected}, got {line:?}",
            self.line_number
        ))
    }
}

/// Radius of the board with `cells` cells.
fn radius_for(cells: usize) -> Result<u8> {
    (0..=MAX_RADIUS)
        .find(|&r| Board::cell_count(r) == cells)
        .ok_or_else(|| SunforestError::Protocol(format!("no hexagonal board has {cells} cells")))
}

/// Read the cell listing and build the board.
///
/// Cells may arrive in any order. Neighbour columns are checked against the
/// board's own layout and a mismatch is only logged, since the agent never
/// uses them.
///
/// # Errors
/// Returns `SunforestError::Protocol` for malformed or duplicate lines, and
/// the board's own errors for bad radius or richness.
pub fn read_board<R: BufRead>(reader: &mut LineReader<R>) -> Result<Board> {
    let count: usize = reader.next_number()?;
    let radius = radius_for(count)?;

    let mut richness: Vec<Option<u8>> = vec![None; count];
    let mut neighbors: Vec<[i32; 6]> = vec![[-1; 6]; count];
    for _ in 0..count {
        let line = reader.next_line()?.to_owned();
        let values: Vec<i32> = reader.parse_numbers(&line)?;
        if values.len() != 8 {
            return Err(reader.shape_error(&line, "index, richness and six neighbours"));
        }
        let index = usize::try_from(values[0])
            .ok()
            .filter(|&i| i < count)
            .ok_or(SunforestError::InvalidCell(values[0].max(0) as usize))?;
        if richness[index].is_some() {
            return Err(SunforestError::Protocol(format!(
                "line {}: cell {index} listed twice",
                reader.line_number()
            )));
        }
        let value =
            u8::try_from(values[1]).map_err(|_| reader.shape_error(&line, "a richness"))?;
        richness[index] = Some(value);
        neighbors[index].copy_from_slice(&values[2..]);
    }

    // Every slot was filled exactly once: count lines, no duplicates.
    let richness: Vec<u8> = richness.into_iter().flatten().collect();
    let board = Board::with_richness(radius, &richness)?;

    let mismatched = board
        .cells()
        .filter(|&cell| {
            (0..6).any(|dir| {
                let expected = board.neighbor(cell, dir).map_or(-1, |n| n.index() as i32);
                neighbors[cell.index()][dir] != expected
            })
        })
        .count();
    if mismatched > 0 {
        warn!(mismatched, "neighbour listing differs from the board layout");
    }
    debug!(cells = count, radius, "board read");
    Ok(board)
}

/// One turn of input.
#[derive(Clone, Debug)]
pub struct TurnInput {
    pub state: GameState,
    /// When the turn's first line arrived; the turn clock starts here.
    pub received: Instant,
    /// Size of the referee's possible-action listing.
    pub possible_actions: usize,
}

/// Read one turn. Returns `None` if the input ends cleanly before it starts.
///
/// # Errors
/// Returns `SunforestError::Protocol` for malformed input, and the state's
/// own errors for inconsistent positions.
pub fn read_turn<R: BufRead>(
    reader: &mut LineReader<R>,
    board: &Board,
) -> Result<Option<TurnInput>> {
    let day_line = match reader.try_next()? {
        Some(line) => line.to_owned(),
        None => return Ok(None),
    };
    let received = Instant::now();
    let day: u8 = reader.parse_one(&day_line)?;
    let nutrients: u8 = reader.next_number()?;
    let player = read_player(reader, Side::Player)?;
    let opponent = read_player(reader, Side::Opponent)?;

    let tree_count: usize = reader.next_number()?;
    let mut trees = Vec::with_capacity(tree_count);
    for _ in 0..tree_count {
        let line = reader.next_line()?.to_owned();
        let values: Vec<u32> = reader.parse_numbers(&line)?;
        let [cell, size, mine, dormant] = values[..] else {
            return Err(reader.shape_error(&line, "cell, size, is mine, is dormant"));
        };
        let cell = board.cell(cell as usize)?;
        let owner = if flag(reader, mine)? {
            Side::Player
        } else {
            Side::Opponent
        };
        let size = u8::try_from(size).map_err(|_| reader.shape_error(&line, "a tree size"))?;
        trees.push(Tree::new(cell, size, owner, flag(reader, dormant)?));
    }

    let possible_actions: usize = reader.next_number()?;
    for _ in 0..possible_actions {
        reader.next_line()?;
    }

    let state = GameState::new(day, nutrients, trees, player, opponent, board)?;
    Ok(Some(TurnInput {
        state,
        received,
        possible_actions,
    }))
}

/// `sun score [is waiting]`. The referee only sends the flag for the
/// opponent, and a missing flag means not waiting.
fn read_player<R: BufRead>(reader: &mut LineReader<R>, side: Side) -> Result<PlayerState> {
    let line = reader.next_line()?.to_owned();
    let values: Vec<u32> = reader.parse_numbers(&line)?;
    let (sun, score, waiting) = match values[..] {
        [sun, score] => (sun, score, 0),
        [sun, score, waiting] => (sun, score, waiting),
        _ => {
            return Err(reader.shape_error(&line, &format!("{side} sun, score and waiting flag")))
        }
    };
    Ok(PlayerState::new(sun, score, flag(reader, waiting)?))
}

fn flag<R>(reader: &LineReader<R>, value: u32) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(SunforestError::Protocol(format!(
            "line {}: expected 0 or 1, got {other}",
            reader.line_number
        ))),
    }
}

/// Cell listing for `board` in the referee's format.
pub fn write_board(board: &Board) -> String {
    let mut out = format!("{}\n", board.len());
    for cell in board.cells() {
        out.push_str(&format!("{} {}", cell.index(), board.richness(cell)));
        for dir in 0..6 {
            let neighbor = board.neighbor(cell, dir).map_or(-1, |n| n.index() as i32);
            out.push_str(&format!(" {neighbor}"));
        }
        out.push('\n');
    }
    out
}

/// One turn of `state` in the referee's format, as seen by the player seat,
/// without a possible-action listing.
pub fn write_turn(state: &GameState) -> String {
    let player = state.player(Side::Player);
    let opponent = state.player(Side::Opponent);
    let mut out = format!(
        "{}\n{}\n{} {}\n{} {} {}\n{}\n",
        state.day(),
        state.nutrients(),
        player.sun,
        player.score,
        opponent.sun,
        opponent.score,
        u8::from(opponent.is_waiting),
        state.trees().len()
    );
    for tree in state.trees() {
        out.push_str(&format!(
            "{} {} {} {}\n",
            tree.cell.index(),
            tree.size,
            u8::from(tree.owner == Side::Player),
            u8::from(tree.dormant)
        ));
    }
    out.push_str("0\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use sunforest_forest::CellId;

    fn reader(text: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_board_listing_round_trips() {
        let board = Board::standard();
        let mut input = reader(&write_board(&board));
        let parsed = read_board(&mut input).unwrap();
        assert_eq!(parsed.len(), 37);
        assert_eq!(parsed.radius(), 3);
        for cell in board.cells() {
            assert_eq!(parsed.richness(cell), board.richness(cell));
        }
    }

    #[test]
    fn test_board_cells_in_any_order() {
        let text = "7\n\
                    6 1 -1 -1 -1 -1 -1 -1\n\
                    0 3 1 2 3 4 5 6\n\
                    1 2 -1 -1 -1 -1 -1 -1\n\
                    2 2 -1 -1 -1 -1 -1 -1\n\
                    3 0 -1 -1 -1 -1 -1 -1\n\
                    4 2 -1 -1 -1 -1 -1 -1\n\
                    5 2 -1 -1 -1 -1 -1 -1\n";
        let board = read_board(&mut reader(text)).unwrap();
        assert_eq!(board.radius(), 1);
        assert_eq!(board.richness(CellId::new(6).unwrap()), 1);
        assert_eq!(board.richness(CellId::new(3).unwrap()), 0);
    }

    #[test]
    fn test_board_rejects_odd_cell_count() {
        let err = read_board(&mut reader("5\n")).unwrap_err();
        assert!(matches!(err, SunforestError::Protocol(_)));
    }

    #[test]
    fn test_board_rejects_duplicate_cell() {
        let text = "1\n0 3 -1 -1 -1 -1 -1 -1\n";
        assert!(read_board(&mut reader(text)).is_ok());

        let text = "7\n0 3 1 2 3 4 5 6\n0 3 1 2 3 4 5 6\n";
        let err = read_board(&mut reader(text)).unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_turn_round_trips() {
        let board = Board::standard();
        let state = GameState::standard_start(&board);
        let mut input = reader(&write_turn(&state));
        let turn = read_turn(&mut input, &board).unwrap().unwrap();
        assert_eq!(turn.state, state);
        assert_eq!(turn.possible_actions, 0);
        assert!(read_turn(&mut input, &board).unwrap().is_none());
    }

    #[test]
    fn test_turn_reads_trees_and_flags() {
        let board = Board::standard();
        let text = "5\n18\n7 4\n3 9 1\n2\n0 3 1 0\n20 1 0 1\n3\nWAIT\nGROW 0\nCOMPLETE 0\n";
        let turn = read_turn(&mut reader(text), &board).unwrap().unwrap();
        let state = &turn.state;

        assert_eq!(state.day(), 5);
        assert_eq!(state.nutrients(), 18);
        assert_eq!(*state.player(Side::Player), PlayerState::new(7, 4, false));
        assert_eq!(*state.player(Side::Opponent), PlayerState::new(3, 9, true));
        assert_eq!(
            state.tree_at(CellId::new(0).unwrap()),
            Some(&Tree::new(CellId::new(0).unwrap(), 3, Side::Player, false))
        );
        assert_eq!(
            state.tree_at(CellId::new(20).unwrap()),
            Some(&Tree::new(CellId::new(20).unwrap(), 1, Side::Opponent, true))
        );
        assert_eq!(turn.possible_actions, 3);
    }

    #[test]
    fn test_turn_errors() {
        let board = Board::standard();
        // Truncated after the tree count.
        let err = read_turn(&mut reader("1\n20\n0 0\n0 0 0\n1\n"), &board).unwrap_err();
        assert!(err.to_string().contains("unexpected end of input"));

        // Boolean out of range.
        let err = read_turn(&mut reader("1\n20\n0 0\n0 0 2\n"), &board).unwrap_err();
        assert!(err.to_string().contains("expected 0 or 1"));

        // Cell off the board.
        let err = read_turn(&mut reader("1\n20\n0 0\n0 0 0\n1\n40 1 1 0\n0\n"), &board).unwrap_err();
        assert_eq!(err, SunforestError::InvalidCell(40));

        // Not a number.
        let err = read_turn(&mut reader("one\n"), &board).unwrap_err();
        assert!(matches!(err, SunforestError::Protocol(_)));
    }
}
