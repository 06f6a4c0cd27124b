//! M-coloring of an undirected graph
//!
//! Vertices are colored in index order with colors `1..=m`; a candidate is
//! feasible when no neighbor already carries the same color.

use super::{Puzzle, PuzzleError, PuzzleKind, PuzzleShape};
use crate::engine::{search, Outcome, Problem, SearchMode, Workspace};
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphColoring {
    neighbors: Vec<Vec<usize>>,
    colors: u8,
}

/// Colors assigned so far. `0` means uncolored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<u8>,
    next: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assign {
    pub vertex: usize,
    pub color: u8,
}

impl Coloring {
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    /// Next vertex to color
    pub fn next(&self) -> usize {
        self.next
    }
}

impl Workspace for Coloring {
    type Edit = Assign;

    fn apply(&mut self, assign: &Assign) {
        self.colors[assign.vertex] = assign.color;
        self.next += 1;
    }

    fn undo(&mut self, assign: &Assign) {
        self.colors[assign.vertex] = 0;
        self.next -= 1;
    }
}

impl GraphColoring {
    /// Graph on `vertices` vertices with undirected `edges` and `colors` colors
    pub fn new(vertices: usize, edges: &[(usize, usize)], colors: u8) -> Result<Self, PuzzleError> {
        if colors == 0 {
            return Err(PuzzleError::OutOfRange {
                what: "color count",
                found: 0,
                min: 1,
                max: u8::MAX as i64,
            });
        }

        let mut neighbors = vec![Vec::new(); vertices];
        for &(a, b) in edges {
            for vertex in [a, b] {
                if vertex >= vertices {
                    return Err(PuzzleError::VertexOutOfRange { vertex, vertices });
                }
            }
            if a != b {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self { neighbors, colors })
    }

    /// Build from an adjacency matrix
    pub fn from_matrix(matrix: &[Vec<bool>], colors: u8) -> Result<Self, PuzzleError> {
        let vertices = matrix.len();
        for (row, line) in matrix.iter().enumerate() {
            if line.len() != vertices {
                return Err(PuzzleError::RaggedRow {
                    row,
                    found: line.len(),
                    expected: vertices,
                });
            }
        }
        let edges: Vec<(usize, usize)> = (0..vertices)
            .tuple_combinations()
            .filter(|&(a, b)| matrix[a][b] || matrix[b][a])
            .collect();
        Self::new(vertices, &edges, colors)
    }

    pub fn vertices(&self) -> usize {
        self.neighbors.len()
    }

    pub fn colors(&self) -> u8 {
        self.colors
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.neighbors[vertex]
    }

    /// First coloring in generation order, or `None` if `m` colors are too few
    pub fn color(&self) -> Option<Vec<u8>> {
        let (mut coloring, budget) = self.initial();
        match search(self, &mut coloring, budget, SearchMode::First, None, false) {
            Outcome::Found(coloring) => Some(coloring.colors),
            _ => None,
        }
    }

    /// No edge joins two vertices of the same color and every vertex is colored
    pub fn is_proper(&self, colors: &[u8]) -> bool {
        colors.len() == self.vertices()
            && colors.iter().all(|&c| (1..=self.colors).contains(&c))
            && self
                .neighbors
                .iter()
                .enumerate()
                .all(|(v, list)| list.iter().all(|&u| colors[u] != colors[v]))
    }
}

impl Problem for GraphColoring {
    type Workspace = Coloring;
    type Key = ();

    fn moves(&self, coloring: &Coloring, budget: u32) -> Vec<Assign> {
        if budget == 0 || coloring.next >= self.vertices() {
            return Vec::new();
        }
        (1..=self.colors)
            .map(|color| Assign {
                vertex: coloring.next,
                color,
            })
            .collect()
    }

    fn feasible(&self, coloring: &Coloring, assign: &Assign) -> bool {
        self.neighbors[assign.vertex]
            .iter()
            .all(|&neighbor| coloring.colors[neighbor] != assign.color)
    }

    fn is_goal(&self, coloring: &Coloring, _budget: u32) -> bool {
        coloring.next == self.vertices()
    }
}

impl Puzzle for GraphColoring {
    const KIND: PuzzleKind = PuzzleKind::Coloring;

    fn initial(&self) -> (Coloring, u32) {
        let coloring = Coloring {
            colors: vec![0; self.vertices()],
            next: 0,
        };
        (coloring, self.vertices() as u32)
    }

    fn render(&self, coloring: &Coloring) -> String {
        coloring.colors.iter().join(" ")
    }

    fn shape(&self) -> PuzzleShape {
        PuzzleShape {
            size: self.vertices(),
            max_branching: self.colors as usize,
            depth_bound: self.vertices(),
            memoizable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: usize, colors: u8) -> GraphColoring {
        let edges: Vec<_> = (0..n).map(|v| (v, (v + 1) % n)).collect();
        GraphColoring::new(n, &edges, colors).unwrap()
    }

    #[test]
    fn test_four_cycle_two_colors() {
        let graph = cycle(4, 2);
        let colors = graph.color().unwrap();
        assert_eq!(colors, vec![1, 2, 1, 2]);
        assert!(graph.is_proper(&colors));
    }

    #[test]
    fn test_four_cycle_one_color_has_no_coloring() {
        assert_eq!(cycle(4, 1).color(), None);
    }

    #[test]
    fn test_triangle_count() {
        let graph = cycle(3, 3);
        let (mut coloring, budget) = graph.initial();
        let count = search(&graph, &mut coloring, budget, SearchMode::Count, None, false);
        assert_eq!(count, Outcome::Count(6));
        let all = search(&graph, &mut coloring, budget, SearchMode::All, None, false);
        assert!(all.solutions().iter().all(|c| graph.is_proper(c.colors())));
        assert_eq!(coloring, graph.initial().0);
    }

    #[test]
    fn test_classic_matrix_graph() {
        let matrix = vec![
            vec![false, true, true, true],
            vec![true, false, true, false],
            vec![true, true, false, true],
            vec![true, false, true, false],
        ];
        let graph = GraphColoring::from_matrix(&matrix, 3).unwrap();
        assert_eq!(graph.color(), Some(vec![1, 2, 3, 2]));
    }

    #[test]
    fn test_graph_without_vertices() {
        let graph = GraphColoring::new(0, &[], 2).unwrap();
        assert_eq!(graph.color(), Some(Vec::new()));
    }

    #[test]
    fn test_invalid_graphs() {
        assert_eq!(
            GraphColoring::new(2, &[(0, 2)], 2),
            Err(PuzzleError::VertexOutOfRange { vertex: 2, vertices: 2 })
        );
        assert!(GraphColoring::new(2, &[(0, 1)], 0).is_err());
    }

    #[test]
    fn test_render() {
        let graph = cycle(4, 2);
        let (mut coloring, _) = graph.initial();
        coloring.apply(&Assign { vertex: 0, color: 1 });
        coloring.apply(&Assign { vertex: 1, color: 2 });
        assert_eq!(graph.render(&coloring), "1 2 0 0");
    }
}
