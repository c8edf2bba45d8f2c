//! Line protocol spoken with the game manager.
//!
//! ```text
//! agent   -> Mancala AI
//! manager -> 0,-1,1,1                 side,limit,caching,algorithm
//! manager -> SCORE 0 0
//! manager -> [[4, 4, 4], [4, 4, 4]]   pockets, Dark's row first
//! manager -> [0, 0]                   stores
//! agent   -> 2
//! ...
//! manager -> FINAL 13 11
//! ```
//!
//! stdout carries only protocol lines. Diagnostics go through `tracing`.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use mancala_core::{Board, Move, SearchLimit, Side};
use thiserror::Error;

/// A protocol line that could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("malformed handshake '{line}': {reason}")]
    Handshake { line: String, reason: String },

    #[error("malformed status line '{0}', expected SCORE or FINAL with two scores")]
    Status(String),

    #[error("malformed {what} line '{line}': {reason}")]
    Board {
        what: &'static str,
        line: String,
        reason: String,
    },

    #[error("input ended while waiting for the {0} line")]
    UnexpectedEof(&'static str),
}

/// Search algorithm requested by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Mcts,
}

impl Algorithm {
    /// Decode the handshake's algorithm field.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Algorithm::Minimax),
            1 => Some(Algorithm::AlphaBeta),
            2 => Some(Algorithm::Mcts),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "MINIMAX"),
            Algorithm::AlphaBeta => write!(f, "ALPHA-BETA"),
            Algorithm::Mcts => write!(f, "MCTS"),
        }
    }
}

/// Per-game settings from the first line the manager sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handshake {
    pub side: Side,
    pub limit: SearchLimit,
    pub caching: bool,
    pub algorithm: Algorithm,
}

impl Handshake {
    /// Parse `side,limit,caching,algorithm`.
    pub fn parse(line: &str) -> std::result::Result<Self, ProtocolError> {
        let malformed = |reason: String| ProtocolError::Handshake {
            line: line.to_string(),
            reason,
        };

        let fields: Vec<i64> = line
            .trim()
            .split(',')
            .map(|field| field.trim().parse::<i64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| malformed(e.to_string()))?;
        let [side, limit, caching, algorithm] = fields[..] else {
            return Err(malformed(format!("expected 4 fields, got {}", fields.len())));
        };

        let side = Side::try_from(side).map_err(|e| malformed(e.to_string()))?;
        let caching = match caching {
            0 => false,
            1 => true,
            other => return Err(malformed(format!("caching must be 0 or 1, got {}", other))),
        };
        let algorithm = Algorithm::from_code(algorithm)
            .ok_or_else(|| malformed(format!("unknown algorithm {}", algorithm)))?;

        Ok(Self {
            side,
            limit: SearchLimit::from_protocol(limit),
            caching,
            algorithm,
        })
    }
}

/// What the manager sent at the top of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// The game continues and a move is expected for this board.
    Play { board: Board, scores: [u32; 2] },
    /// The game is over.
    Final { scores: [u32; 2] },
}

/// Parse `SCORE <dark> <light>` or `FINAL <dark> <light>`.
///
/// Returns the scores and whether the game is over.
fn parse_status(line: &str) -> std::result::Result<([u32; 2], bool), ProtocolError> {
    let malformed = || ProtocolError::Status(line.to_string());

    let mut parts = line.split_whitespace();
    let (Some(status), Some(dark), Some(light), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let over = match status {
        "SCORE" => false,
        "FINAL" => true,
        _ => return Err(malformed()),
    };
    let dark = dark.parse().map_err(|_| malformed())?;
    let light = light.parse().map_err(|_| malformed())?;
    Ok(([dark, light], over))
}

/// Parse the pockets and stores lines into a board.
fn parse_board(pockets: &str, stores: &str) -> std::result::Result<Board, ProtocolError> {
    let rows: Vec<Vec<u32>> =
        serde_json::from_str(pockets.trim()).map_err(|e| ProtocolError::Board {
            what: "pockets",
            line: pockets.to_string(),
            reason: e.to_string(),
        })?;
    let stores: [u32; 2] = serde_json::from_str(stores.trim()).map_err(|e| ProtocolError::Board {
        what: "stores",
        line: stores.to_string(),
        reason: e.to_string(),
    })?;

    Board::from_rows(rows, stores).map_err(|e| ProtocolError::Board {
        what: "pockets",
        line: pockets.to_string(),
        reason: e.to_string(),
    })
}

/// One agent's side of the conversation.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from the game manager")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Read a line that must be present.
    fn expect_line(&mut self, what: &'static str) -> Result<String> {
        Ok(self
            .read_line()?
            .ok_or(ProtocolError::UnexpectedEof(what))?)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("failed to write to the game manager")?;
        self.output
            .flush()
            .context("failed to flush output to the game manager")
    }

    /// Introduce the agent by name.
    pub fn announce(&mut self, name: &str) -> Result<()> {
        self.write_line(name)
    }

    pub fn read_handshake(&mut self) -> Result<Handshake> {
        let line = self.expect_line("handshake")?;
        Ok(Handshake::parse(&line)?)
    }

    /// Read the next turn. `None` if the input ends between turns.
    pub fn next_turn(&mut self) -> Result<Option<Turn>> {
        let Some(status) = self.read_line()? else {
            return Ok(None);
        };
        let (scores, over) = parse_status(&status)?;
        if over {
            return Ok(Some(Turn::Final { scores }));
        }

        let pockets = self.expect_line("pockets")?;
        let stores = self.expect_line("stores")?;
        let board = parse_board(&pockets, &stores)?;
        Ok(Some(Turn::Play { board, scores }))
    }

    pub fn send_move(&mut self, mv: Move) -> Result<()> {
        self.write_line(&mv.pocket().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn protocol_error(err: anyhow::Error) -> ProtocolError {
        err.downcast::<ProtocolError>().unwrap()
    }

    #[test]
    fn test_handshake() {
        let hs = Handshake::parse("0,-1,1,1").unwrap();
        assert_eq!(hs.side, Side::Dark);
        assert_eq!(hs.limit, SearchLimit::Unbounded);
        assert!(hs.caching);
        assert_eq!(hs.algorithm, Algorithm::AlphaBeta);

        let hs = Handshake::parse(" 1, 4, 0, 2 \n").unwrap();
        assert_eq!(hs.side, Side::Light);
        assert_eq!(hs.limit, SearchLimit::Plies(4));
        assert!(!hs.caching);
        assert_eq!(hs.algorithm, Algorithm::Mcts);
    }

    #[test]
    fn test_handshake_rejects_bad_fields() {
        for line in ["", "0,1,1", "0,1,1,1,1", "2,1,1,1", "0,x,1,1", "0,1,3,1", "0,1,1,7"] {
            assert!(
                matches!(Handshake::parse(line), Err(ProtocolError::Handshake { .. })),
                "accepted {:?}",
                line
            );
        }
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::Minimax.to_string(), "MINIMAX");
        assert_eq!(Algorithm::AlphaBeta.to_string(), "ALPHA-BETA");
        assert_eq!(Algorithm::Mcts.to_string(), "MCTS");
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(parse_status("SCORE 2 3").unwrap(), ([2, 3], false));
        assert_eq!(parse_status("  FINAL 33 31 ").unwrap(), ([33, 31], true));
        assert!(parse_status("SCORE 2").is_err());
        assert!(parse_status("SCORE 2 3 4").is_err());
        assert!(parse_status("DONE 2 3").is_err());
        assert!(parse_status("SCORE a 3").is_err());
    }

    #[test]
    fn test_board_lines() {
        let board = parse_board("[[4, 0, 4], [1, 2, 3]]", "[5, 6]").unwrap();
        assert_eq!(board.row(Side::Dark), &[4, 0, 4]);
        assert_eq!(board.row(Side::Light), &[1, 2, 3]);
        assert_eq!(board.stores(), [5, 6]);

        assert!(parse_board("[[4, 4], [4]]", "[0, 0]").is_err());
        assert!(parse_board("[[4, 4]]", "[0, 0]").is_err());
        assert!(parse_board("[[4, -1], [4, 4]]", "[0, 0]").is_err());
        assert!(parse_board("[[4, 4], [4, 4]]", "[0]").is_err());
    }

    #[test]
    fn test_board_too_many_stones() {
        let err = parse_board("[[4294967295, 1], [1, 1]]", "[0, 0]").unwrap_err();
        assert!(matches!(err, ProtocolError::Board { what: "pockets", .. }));
        assert!(err.to_string().contains("4294967295"));
    }

    #[test]
    fn test_full_exchange() {
        let mut s = session("0,3,0,0\nSCORE 0 0\n[[1, 2], [3, 4]]\n[0, 0]\nFINAL 6 4\n");
        s.announce("Mancala AI").unwrap();

        let hs = s.read_handshake().unwrap();
        assert_eq!(hs.limit, SearchLimit::Plies(3));

        match s.next_turn().unwrap() {
            Some(Turn::Play { board, scores }) => {
                assert_eq!(scores, [0, 0]);
                assert_eq!(board.row(Side::Light), &[3, 4]);
            }
            other => panic!("expected a play turn, got {:?}", other),
        }
        s.send_move(Move(1)).unwrap();

        assert_eq!(s.next_turn().unwrap(), Some(Turn::Final { scores: [6, 4] }));
        assert_eq!(String::from_utf8(s.output).unwrap(), "Mancala AI\n1\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut s = session("1,-1,1,0\r\nSCORE 1 2\r\n[[1], [1]]\r\n[1, 2]\r\n");
        assert_eq!(s.read_handshake().unwrap().side, Side::Light);
        assert!(matches!(s.next_turn().unwrap(), Some(Turn::Play { .. })));
    }

    #[test]
    fn test_end_of_input_between_turns() {
        let mut s = session("0,-1,0,1\n");
        s.read_handshake().unwrap();
        assert_eq!(s.next_turn().unwrap(), None);
    }

    #[test]
    fn test_end_of_input_mid_turn() {
        let mut s = session("SCORE 0 0\n[[1, 1], [1, 1]]\n");
        let err = protocol_error(s.next_turn().unwrap_err());
        assert_eq!(err, ProtocolError::UnexpectedEof("stores"));
    }

    #[test]
    fn test_missing_handshake() {
        let mut s = session("");
        let err = protocol_error(s.read_handshake().unwrap_err());
        assert_eq!(err, ProtocolError::UnexpectedEof("handshake"));
    }

    #[test]
    fn test_malformed_status_names_line() {
        let mut s = session("SCORES 1 1\n");
        let err = s.next_turn().unwrap_err();
        assert!(err.to_string().contains("SCORES 1 1"));
    }
}
