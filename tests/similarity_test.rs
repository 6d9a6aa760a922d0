/*!
# Similarity Integration Tests

Scoring properties checked through the public API.
*/

use plagiarism_analyzer::{normalize, similarity, Language, SimilarityLevel, SimilarityScore};
use pretty_assertions::assert_eq;

const AVERAGE: &str = "def calculate_average(numbers):\n    total = 0\n    for n in numbers:\n        total += n\n    return total / len(numbers)\n";
const AVERAGE_RENAMED: &str = "def calculate_average(values):\n    total = 0\n    for v in values:\n        total += v\n    return total / len(values)\n";
const STACK: &str = "class Stack:\n    def __init__(self):\n        self.items = []\n\n    def push(self, item):\n        self.items.append(item)\n\n    def pop(self):\n        while not self.items:\n            raise IndexError('empty')\n        return self.items.pop()\n";

fn assert_weighted(score: &SimilarityScore) {
    let expected = 0.3 * score.text_similarity + 0.4 * score.structural_similarity + 0.3 * score.normalized_similarity;
    assert_eq!(score.overall, (expected * 10_000.0).round() / 10_000.0);
}

#[test]
fn test_self_similarity_is_one() {
    let samples = [
        (AVERAGE, Language::Python),
        ("function f(a) { return a * 2; }", Language::JavaScript),
        ("public class A { void m() {} }", Language::Java),
        ("puts 'hello'", Language::from_tag("rb")),
    ];
    for (code, language) in samples {
        let score = similarity(code, code, &language);
        assert_eq!(score.overall, 1.0, "{language}");
        assert_eq!(score.level, SimilarityLevel::NearIdentical);
    }
}

#[test]
fn test_empty_sources_are_identical() {
    let score = similarity("", "", &Language::Python);
    assert_eq!(score.overall, 1.0);
}

#[test]
fn test_symmetric_for_same_language() {
    let forward = similarity(AVERAGE, AVERAGE_RENAMED, &Language::Python);
    let backward = similarity(AVERAGE_RENAMED, AVERAGE, &Language::Python);
    assert_eq!(forward, backward);
}

#[test]
fn test_symmetric_when_argument_order_changes_matching() {
    let loop_body = "for i in r:\nprint(x)\ny = b + a\n";
    let assignments = "x = a + b\ny = b + a\nx = a + b\n";
    for language in [Language::C, Language::Python, Language::from_tag("rb")] {
        let forward = similarity(loop_body, assignments, &language);
        let backward = similarity(assignments, loop_body, &language);
        assert_eq!(forward, backward, "{language}");
    }
}

#[test]
fn test_weighted_sum_invariant() {
    for (a, b) in [(AVERAGE, AVERAGE_RENAMED), (AVERAGE, STACK), ("", STACK)] {
        let score = similarity(a, b, &Language::Python);
        assert_weighted(&score);
        assert_eq!(score.level, SimilarityLevel::from_score(score.overall));
    }
}

#[test]
fn test_renamed_variables_stay_similar() {
    let score = similarity(AVERAGE, AVERAGE_RENAMED, &Language::Python);
    assert_eq!(score.structural_similarity, 1.0);
    assert!(score.overall >= 0.9, "{score:?}");
}

#[test]
fn test_unrelated_programs_score_low() {
    let score = similarity(AVERAGE, STACK, &Language::Python);
    assert!(score.overall < 0.5, "{score:?}");
}

#[test]
fn test_comment_only_changes_keep_normalized_identical() {
    let original = "int add(int a, int b) {\n    return a + b;\n}\n";
    let commented = "// adds two numbers\nint add(int a, int b) {\n    /* sum */ return a + b;\n}\n";
    let score = similarity(original, commented, &Language::C);
    assert_eq!(score.normalized_similarity, 1.0);
    assert!(score.text_similarity < 1.0);
}

#[test]
fn test_normalization_is_idempotent() {
    for language in [Language::Python, Language::Cpp, Language::from_tag("rb")] {
        let once = normalize(STACK, &language);
        assert_eq!(normalize(&once, &language), once);
    }
}

#[test]
fn test_python2_source_has_no_structure() {
    let legacy = "def greet(name):\n    print \"hello\", name\n";
    let score = similarity(legacy, legacy, &Language::Python);
    assert_eq!(score.structural_similarity, 0.0);
    assert_eq!(score.text_similarity, 1.0);
    assert_weighted(&score);
}

#[test]
fn test_syntax_error_degrades_structure_only() {
    let broken = "def calculate_average(numbers:\n    return 0\n";
    let score = similarity(AVERAGE, broken, &Language::Python);
    assert_eq!(score.structural_similarity, 0.0);
    assert!(score.text_similarity > 0.0);
    assert_weighted(&score);
}
