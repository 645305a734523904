//! Map loading: a whitespace-delimited text grid of integer tile codes.
//!
//! One row per line, `0` for empty ground, `1` for a brick wall. There is
//! no header; the grid size is inferred from the line and token counts.
//! Anything that is not a rectangular grid of integers is rejected at
//! parse time, before the terminal is touched.

use std::fs;

use anyhow::{bail, Context, Result};

/// Tile code that produces a wall. Other codes are accepted and ignored.
pub const WALL: i32 = 1;

#[derive(Debug, Clone)]
pub struct TileMap {
    /// Row-major, exactly as read from the file.
    cells: Vec<Vec<i32>>,
}

impl TileMap {
    pub fn load(path: &str) -> Result<TileMap> {
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {path}"))
    }

    /// Parse map text into a rectangular grid.
    ///
    /// Ragged rows are invalid input, not something to pad over: the first
    /// row whose length differs from the first row's is reported.
    pub fn parse(text: &str) -> Result<TileMap> {
        let mut cells: Vec<Vec<i32>> = Vec::new();
        for (row, line) in text.lines().enumerate() {
            let codes = line
                .split_whitespace()
                .map(|token| {
                    token
                        .parse::<i32>()
                        .with_context(|| format!("line {}: invalid tile code {token:?}", row + 1))
                })
                .collect::<Result<Vec<i32>>>()?;
            cells.push(codes);
        }

        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            bail!("map is empty");
        }
        if let Some(row) = cells.iter().position(|r| r.len() != width) {
            bail!(
                "line {}: expected {} cells, found {}",
                row + 1,
                width,
                cells[row].len(),
            );
        }

        Ok(TileMap { cells })
    }

    pub fn columns(&self) -> usize {
        self.cells[0].len()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Tile code at `(column, row)`. Storage is row-major; the game layer
    /// addresses cells column-first.
    pub fn cell(&self, column: usize, row: usize) -> i32 {
        self.cells[row][column]
    }

    pub fn is_wall(&self, column: usize, row: usize) -> bool {
        self.cell(column, row) == WALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_preserves_dimensions_and_values() -> anyhow::Result<()> {
        let map = TileMap::parse("0 1 0\n1 0 7\n")?;
        assert_eq!(map.rows(), 2);
        assert_eq!(map.columns(), 3);
        assert_eq!(map.cell(1, 0), 1);
        assert_eq!(map.cell(2, 1), 7);
        assert!(map.is_wall(0, 1));
        assert!(!map.is_wall(0, 0));
        // Code 7 is accepted but never a wall.
        assert!(!map.is_wall(2, 1));
        Ok(())
    }

    #[test]
    fn rejects_non_integer_token() {
        let err = TileMap::parse("1 1\n1 x\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = TileMap::parse("1 1 1\n1 1\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(TileMap::parse("").is_err());
        assert!(TileMap::parse("\n\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = TileMap::load("/no/such/map.txt").unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/map.txt"));
    }
}
