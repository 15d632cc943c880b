use serde::Serialize;

use super::{
    palette::{AvatarColors, Color},
    seed::Seed,
    stream::SeededStream,
};

pub const GRID_SIZE: usize = 8;

const HALF_WIDTH: usize = GRID_SIZE.div_ceil(2);
const EYE_ROW: usize = 2;
const COIN_THRESHOLD: f64 = 0.5;
const DETAIL_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Empty,
    Body,
    /// Body on a coin flip.
    Coin,
}

use Template::{Body as B, Coin as C, Empty as E};

/// Left half of the invader, mirrored onto the right.
const TEMPLATE: [[Template; HALF_WIDTH]; GRID_SIZE] = [
    [E, E, B, B], // antennae
    [E, B, B, B],
    [B, B, B, B], // head, eyes land here
    [B, B, B, B],
    [B, C, C, B],
    [B, E, E, B], // legs
    [E, B, B, E], // feet
    [E, E, E, E],
];

/// 8x8 matrix of optional colours, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Option<Color>; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        self.cells[row][col]
    }

    pub fn set(&mut self, col: usize, row: usize, color: Option<Color>) {
        self.cells[row][col] = color;
    }

    pub fn rows(&self) -> &[[Option<Color>; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Non-empty cells as `(col, row, color)`, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|color| (col, row, color)))
        })
    }

    /// Whether every column pair `(c, GRID_SIZE - 1 - c)` matches.
    pub fn is_mirrored(&self) -> bool {
        self.cells
            .iter()
            .all(|cells| (0..HALF_WIDTH).all(|col| cells[col] == cells[GRID_SIZE - 1 - col]))
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.cells.serialize(serializer)
    }
}

/// Generated avatar, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub colors: AvatarColors,
    pub grid: Grid,
}

/// Full pipeline: colours, silhouette, eyes and detail noise.
pub fn generate(seed: &Seed) -> Avatar {
    build(seed, true)
}

/// Same as [`generate`] without the detail pass, so the grid is mirrored.
pub fn generate_silhouette(seed: &Seed) -> Avatar {
    build(seed, false)
}

#[tracing::instrument(name = "Generate avatar", level = "debug", skip_all, fields(seed = %seed))]
fn build(seed: &Seed, with_detail: bool) -> Avatar {
    let mut stream = SeededStream::new(seed);
    let colors = AvatarColors::draw(&mut stream);

    let mut grid = Grid::default();
    fill_silhouette(&mut grid, &mut stream, colors.body);
    place_eyes(&mut grid, colors.eye);

    if with_detail {
        add_detail(&mut grid, &mut stream, &colors);
    }

    Avatar { colors, grid }
}

fn fill_silhouette(grid: &mut Grid, stream: &mut SeededStream, body: Color) {
    for (row, cells) in TEMPLATE.iter().enumerate() {
        for (col, template) in cells.iter().enumerate() {
            let color = match template {
                Template::Empty => None,
                Template::Body => Some(body),
                Template::Coin => (stream.next_fraction() < COIN_THRESHOLD).then_some(body),
            };

            grid.set(col, row, color);
            grid.set(GRID_SIZE - 1 - col, row, color);
        }
    }
}

fn place_eyes(grid: &mut Grid, eye: Color) {
    grid.set(GRID_SIZE / 2 - 1, EYE_ROW, Some(eye));
    grid.set(GRID_SIZE / 2, EYE_ROW, Some(eye));
}

/// Interior body cells may turn into detail, each decided on its own.
fn add_detail(grid: &mut Grid, stream: &mut SeededStream, colors: &AvatarColors) {
    for row in 1..GRID_SIZE - 1 {
        for col in 1..GRID_SIZE - 1 {
            // Only body cells consume a draw
            if grid.get(col, row) == Some(colors.body) && stream.next_fraction() < DETAIL_THRESHOLD
            {
                grid.set(col, row, Some(colors.detail));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::avatar::palette::PALETTE;

    fn encode(grid: &Grid) -> Vec<String> {
        grid.rows()
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| match cell {
                        None => '.',
                        Some(color) => {
                            let index = PALETTE.iter().position(|p| p == color).unwrap();
                            char::from_digit(index as u32, 10).unwrap()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_default_user_seed() {
        let avatar = generate(&Seed::from("default-user-seed"));

        assert_eq!(
            encode(&avatar.grid),
            [
                "..4444..", ".444444.", "44400444", "44444444", "4.4444.4", "4..44..4",
                ".41..44.", "........"
            ]
        );
    }

    #[test]
    fn test_empty_seed() {
        let avatar = generate(&Seed::from(""));

        assert_eq!(
            encode(&avatar.grid),
            [
                "..5555..", ".555555.", "55544555", "55555555", "5..55..5", "5..55..5",
                ".55..55.", "........"
            ]
        );
    }

    #[test]
    fn test_integer_seed() {
        let avatar = generate(&Seed::from(12345));

        assert_eq!(
            encode(&avatar.grid),
            [
                "..4444..", ".443444.", "44333444", "44444444", "44.44.44", "4..44..4",
                ".44..44.", "........"
            ]
        );
    }

    #[test]
    fn test_non_ascii_seed() {
        let avatar = generate(&Seed::from("héllo"));

        assert_eq!(
            encode(&avatar.grid),
            [
                "..6666..", ".666666.", "66655666", "66666666", "6.6666.6", "6..66..6",
                ".46..66.", "........"
            ]
        );
    }

    #[test]
    fn test_similar_seeds_diverge() {
        let abc = generate(&Seed::from("abc"));
        let abd = generate(&Seed::from("abd"));

        assert_eq!(
            encode(&abc.grid),
            [
                "..6666..", ".666666.", "66655666", "66666666", "66666666", "6..66..6",
                ".66..66.", "........"
            ]
        );
        assert_eq!(
            encode(&abd.grid),
            [
                "..1111..", ".111111.", "11166141", "11111111", "1.1114.1", "1..11..1",
                ".11..11.", "........"
            ]
        );
        assert_ne!(abc.colors, abd.colors);
    }

    #[test]
    fn test_deterministic() {
        for seed in ["default-user-seed", "conversation-42", "", "\u{1F47E}"] {
            assert_eq!(generate(&Seed::from(seed)), generate(&Seed::from(seed)));
        }
    }

    #[test]
    fn test_silhouette_is_mirrored() {
        for state in 0..2_000 {
            let avatar = generate_silhouette(&Seed::Number(state));

            assert!(avatar.grid.is_mirrored(), "seed {} not mirrored", state);
        }
    }

    #[test]
    fn test_detail_can_break_symmetry() {
        // Detail lands on (2, 6) but not on its mirror
        let avatar = generate(&Seed::from("default-user-seed"));

        assert!(!avatar.grid.is_mirrored());
        assert_eq!(avatar.grid.get(2, 6), Some(PALETTE[1]));
        assert_eq!(avatar.grid.get(5, 6), Some(PALETTE[4]));
    }

    #[test]
    fn test_eyes_differ_from_body() {
        for state in -1_000..1_000 {
            let avatar = generate(&Seed::Number(state));
            let left = avatar.grid.get(GRID_SIZE / 2 - 1, EYE_ROW);
            let right = avatar.grid.get(GRID_SIZE / 2, EYE_ROW);

            assert_eq!(left, Some(avatar.colors.eye));
            assert_eq!(right, Some(avatar.colors.eye));
            assert_ne!(avatar.colors.eye, avatar.colors.body);
        }
    }

    #[test]
    fn test_palette_closure() {
        for state in 0..1_000 {
            let avatar = generate(&Seed::Number(state));

            for (_, _, color) in avatar.grid.filled() {
                assert!(PALETTE.contains(&color));
            }
        }
    }

    #[test]
    fn test_fixed_cells_are_body() {
        let avatar = generate_silhouette(&Seed::from("fixed"));
        let body = Some(avatar.colors.body);

        for (col, row) in [(2, 0), (3, 0), (1, 1), (0, 2), (0, 3), (0, 4), (3, 4), (0, 5), (1, 6)]
        {
            assert_eq!(avatar.grid.get(col, row), body, "({}, {})", col, row);
            assert_eq!(avatar.grid.get(GRID_SIZE - 1 - col, row), body);
        }

        assert!(avatar.grid.rows()[GRID_SIZE - 1].iter().all(Option::is_none));
    }

    #[test]
    fn test_filled_is_row_major() {
        let avatar = generate(&Seed::from(""));
        let cells: Vec<(usize, usize)> = avatar
            .grid
            .filled()
            .map(|(c, r, _)| (c, r))
            .take(3)
            .collect();

        assert_eq!(cells, [(2, 0), (3, 0), (4, 0)]);
    }
}
