//! Configuration and puzzle files driving full runs

use backtrack_search::config::{OutputFormat, Settings};
use backtrack_search::engine::SearchMode;
use backtrack_search::puzzles::{create_example_puzzles, load_puzzles_from_directory, PuzzleKind, PuzzleSpec};
use backtrack_search::solve_puzzle;
use backtrack_search::solver::{PuzzleRun, RunReport};
use backtrack_search::utils::SolutionFormatter;
use tempfile::tempdir;

#[test]
fn example_puzzles_load_back() {
    let temp_dir = tempdir().unwrap();
    create_example_puzzles(temp_dir.path()).unwrap();
    std::fs::write(temp_dir.path().join("broken.yaml"), "kind: maze\ngrid: []\n").unwrap();

    let puzzles = load_puzzles_from_directory(temp_dir.path()).unwrap();
    let names: Vec<&str> = puzzles.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["coloring", "expression", "k_swaps", "knights_tour", "maze", "parentheses", "word_break"]
    );
    assert_eq!(puzzles.len(), PuzzleSpec::examples().len());
}

#[test]
fn every_example_solves_and_validates() {
    let temp_dir = tempdir().unwrap();
    create_example_puzzles(temp_dir.path()).unwrap();

    for (name, spec) in load_puzzles_from_directory(temp_dir.path()).unwrap() {
        let mut settings = Settings::default();
        settings.search.mode = SearchMode::First;
        settings.search.heuristic = true;
        settings.search.verify_undo = true;
        let report = PuzzleRun::with_puzzle(settings, spec).unwrap().solve().unwrap();
        assert_eq!(report.count, 1, "{} has no solution", name);
        assert!(report.all_validated());
    }
}

#[test]
fn config_file_drives_a_json_run() {
    let temp_dir = tempdir().unwrap();
    let puzzle_path = temp_dir.path().join("word_break.yaml");
    std::fs::write(
        &puzzle_path,
        "kind: word_break\ntext: catsanddog\ndictionary: [cat, cats, and, sand, dog]\n",
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.input.puzzle_file = puzzle_path;
    settings.output.format = OutputFormat::Json;
    settings.output.output_directory = temp_dir.path().join("out");
    let config_path = temp_dir.path().join("config.yaml");
    settings.to_file(&config_path).unwrap();

    let loaded = Settings::from_file(&config_path).unwrap();
    assert_eq!(loaded, settings);
    loaded.validate().unwrap();

    let report = solve_puzzle(loaded.clone()).unwrap();
    assert_eq!(report.kind, PuzzleKind::WordBreak);
    assert_eq!(report.distinct_renderings(), vec!["cat sand dog", "cats and dog"]);

    SolutionFormatter::save_report(&report, &loaded.output.output_directory, loaded.output.format).unwrap();
    let saved = RunReport::load_from_file(loaded.output.output_directory.join("report.json")).unwrap();
    assert_eq!(saved.count, 2);
    assert_eq!(saved.solutions, report.solutions);
}

#[test]
fn missing_puzzle_file_is_an_error() {
    let mut settings = Settings::default();
    settings.input.puzzle_file = "no/such/puzzle.yaml".into();
    assert!(settings.validate().is_err());
    assert!(solve_puzzle(settings).is_err());
}
