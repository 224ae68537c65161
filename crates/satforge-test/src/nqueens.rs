//! N-Queens as a boolean model.
//!
//! One variable per square keyed `(row, column)`. Each row holds exactly one
//! queen; each column and each diagonal holds at most one.
//!
//! # Example
//!
//! ```
//! use satforge_test::nqueens::{nqueens_model, NQUEENS_SOLUTION_COUNTS};
//! use satforge_test::count_solutions;
//!
//! let model = nqueens_model(4);
//! assert_eq!(model.variable_count(), 16);
//! assert_eq!(count_solutions(&model), NQUEENS_SOLUTION_COUNTS[4]);
//! ```

use satforge_core::{Comparison, Model, VariableId};

/// Known solution counts, indexed by board size.
pub const NQUEENS_SOLUTION_COUNTS: [usize; 9] = [1, 1, 0, 0, 2, 10, 4, 40, 92];

/// Builds the `n`-queens model with variables in row-major order.
pub fn nqueens_model(n: usize) -> Model<(usize, usize)> {
    let mut model = Model::new();
    let mut squares = vec![Vec::with_capacity(n); n];
    for (row, cells) in squares.iter_mut().enumerate() {
        for column in 0..n {
            cells.push(model.new_variable((row, column)).unwrap());
        }
    }

    for cells in &squares {
        model.add_sum(cells.iter().copied(), Comparison::Eq, 1).unwrap();
    }
    for column in 0..n {
        let cells = (0..n).map(|row| squares[row][column]);
        model.add_sum(cells, Comparison::Le, 1).unwrap();
    }
    for line in diagonals(&squares) {
        if line.len() > 1 {
            model.add_sum(line, Comparison::Le, 1).unwrap();
        }
    }
    model
}

fn diagonals(squares: &[Vec<VariableId>]) -> Vec<Vec<VariableId>> {
    let n = squares.len();
    if n == 0 {
        return Vec::new();
    }
    let mut down = vec![Vec::new(); 2 * n - 1];
    let mut up = vec![Vec::new(); 2 * n - 1];
    for (row, cells) in squares.iter().enumerate() {
        for (column, &var) in cells.iter().enumerate() {
            down[row + n - 1 - column].push(var);
            up[row + column].push(var);
        }
    }
    down.into_iter().chain(up).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::count_solutions;

    #[test]
    fn test_small_boards_match_known_counts() {
        for n in 1..=4 {
            assert_eq!(count_solutions(&nqueens_model(n)), NQUEENS_SOLUTION_COUNTS[n]);
        }
    }

    #[test]
    fn test_keys_are_row_major() {
        let model = nqueens_model(3);
        assert_eq!(model.key(VariableId::new(4)), Some(&(1, 1)));
        assert_eq!(model.lookup(&(2, 0)).unwrap(), VariableId::new(6));
    }
}
