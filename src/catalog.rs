//! Predefined example boards.
use clap::ValueEnum;

use crate::board::Board;
use crate::error::BoardError;

/// The example boards offered by the menu and the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 2x2 board with one color.
    #[value(name = "2x2")]
    OneColor2x2,
    /// 3x3 board with one color.
    #[value(name = "3x3")]
    OneColor3x3,
    /// 5x5 board with two colors.
    #[value(name = "5x5")]
    TwoColors5x5,
    /// 6x6 board with six colors.
    #[value(name = "6x6")]
    SixColors6x6,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::OneColor2x2,
        Preset::OneColor3x3,
        Preset::TwoColors5x5,
        Preset::SixColors6x6,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Preset::OneColor2x2 => "2x2 board with 1 color",
            Preset::OneColor3x3 => "3x3 board with 1 color",
            Preset::TwoColors5x5 => "5x5 board with 2 colors",
            Preset::SixColors6x6 => "6x6 board with 6 colors",
        }
    }

    pub fn grid(&self) -> Vec<Vec<u8>> {
        match self {
            Preset::OneColor2x2 => vec![vec![1, 0], vec![0, 1]],
            Preset::OneColor3x3 => vec![vec![1, 0, 0], vec![0, 0, 0], vec![1, 0, 0]],
            Preset::TwoColors5x5 => vec![
                vec![1, 0, 0, 0, 2],
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 2],
            ],
            Preset::SixColors6x6 => vec![
                vec![1, 0, 0, 0, 2, 0],
                vec![0, 1, 0, 0, 0, 2],
                vec![0, 0, 3, 4, 0, 0],
                vec![0, 0, 3, 0, 4, 0],
                vec![0, 5, 0, 0, 0, 0],
                vec![5, 0, 6, 0, 6, 0],
            ],
        }
    }

    pub fn board(&self) -> Result<Board, BoardError> {
        Board::new(self.grid())
    }
}
