//! End-to-end coverage of the documented segmentation scenarios, run against
//! both the accurate and the streaming iterator.

use std::sync::Arc;

use srx_seg::model::{LanguageRule, Rule};
use srx_seg::{Segmenter, SrxDocument};

fn document(cascade: bool, language_rules: Vec<(&str, Vec<Rule>)>) -> SrxDocument {
    let mut doc = SrxDocument::new(cascade);
    for (name, rules) in language_rules {
        let mut lr = LanguageRule::new(name);
        for r in rules {
            lr.add_rule(r);
        }
        doc.add_language_map(".*", Arc::new(lr)).unwrap();
    }
    doc
}

fn single_rule_document(rules: Vec<Rule>) -> SrxDocument {
    document(true, vec![("any", rules)])
}

fn accurate_segments(doc: &SrxDocument, text: &str) -> Vec<String> {
    Segmenter::new(doc, "en").segment_str(text).unwrap()
}

fn streaming_segments(doc: &SrxDocument, text: &str, window: usize, margin: usize) -> Vec<String> {
    Segmenter::new(doc, "en")
        .streaming_str(text, window, margin)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn scenario_simple_polish_cascade() {
    let doc = document(
        true,
        vec![
            ("Polish", vec![Rule::new(false, r"[Pp]rof\.", r"\s")]),
            ("Default", vec![Rule::new(true, r"\.", r"\s"), Rule::new(true, "", r"\n")]),
        ],
    );
    let text = "Ala ma kota. Prof. Kot nie wie kim jest. Ech.\nA inny prof. to już w ogole. Uch";
    let expected = vec![
        "Ala ma kota.",
        " Prof. Kot nie wie kim jest.",
        " Ech.",
        "\nA inny prof. to już w ogole.",
        " Uch",
    ];
    assert_eq!(accurate_segments(&doc, text), expected);
}

#[test]
fn scenario_overlapping_exceptions() {
    let doc = single_rule_document(vec![
        Rule::new(false, r"n\.", ""),
        Rule::new(false, r"n\.e\.", ""),
        Rule::new(true, r"\.", ""),
    ]);
    let text = "W 59 n.e. Julek nie zrobił nic ciekawego. Ja też nie";
    let expected = vec!["W 59 n.e. Julek nie zrobił nic ciekawego.", " Ja też nie"];
    assert_eq!(accurate_segments(&doc, text), expected);
    assert_eq!(streaming_segments(&doc, text, 4096, 64), expected);
}

#[test]
fn scenario_break_at_end_of_text() {
    let doc = single_rule_document(vec![Rule::new(true, r"\.", "")]);
    assert_eq!(accurate_segments(&doc, "a."), vec!["a."]);
    assert_eq!(streaming_segments(&doc, "a.", 64, 8), vec!["a."]);
}

#[test]
fn scenario_empty_break_rule() {
    let doc = single_rule_document(vec![Rule::new(true, "", "")]);
    assert_eq!(accurate_segments(&doc, "abc"), vec!["a", "b", "c"]);
}

#[test]
fn scenario_matching_all_rule() {
    let doc = single_rule_document(vec![Rule::new(true, r"[^\s]*", r"\s"), Rule::new(true, r"\.", r"\s")]);
    let expected = vec!["A", " B.", " C", " "];
    assert_eq!(accurate_segments(&doc, "A B. C "), expected);
}

#[test]
fn scenario_specification_example_uk_mr_exceptions() {
    let doc = single_rule_document(vec![
        Rule::new(false, r"\sU\.K\.", r"\s"),
        Rule::new(false, r"Mr\.", r"\s"),
        Rule::new(true, r"[\.\?!]+", r"\s"),
    ]);
    let text = "The U.K. Prime Minister, Mr. Blair, was seen out today.";
    assert_eq!(accurate_segments(&doc, text), vec![text]);
}

#[test]
fn scenario_text_longer_than_window() {
    let doc = single_rule_document(vec![Rule::new(true, r"\.", "")]);
    let segment = "AAAAAAAAA.";
    let repetitions = 10_000;
    let text: String = segment.repeat(repetitions);

    let accurate = accurate_segments(&doc, &text);
    let streaming = streaming_segments(&doc, &text, 256, 32);

    assert_eq!(accurate.len(), repetitions);
    assert_eq!(streaming, accurate);
    assert_eq!(streaming.concat(), text);
}

#[test]
fn reconstruction_holds_across_all_scenarios() {
    let cases: Vec<(SrxDocument, &str)> = vec![
        (single_rule_document(vec![Rule::new(true, r"\.", r"\s")]), "One. Two. Three."),
        (single_rule_document(vec![Rule::new(true, "", "")]), "abc"),
        (
            single_rule_document(vec![Rule::new(true, r"[^\s]*", r"\s"), Rule::new(true, r"\.", r"\s")]),
            "A B. C ",
        ),
    ];

    for (doc, text) in cases {
        let segments = accurate_segments(&doc, text);
        assert_eq!(segments.concat(), text);
    }
}

#[test]
fn finitize_monotonicity_sample() {
    use srx_seg::finitize::finitize;

    let finitized = finitize(r"a*b\*\\+c+", 100);
    assert_eq!(finitized, r"a{0,100}b\*\\{1,100}c{1,100}");
}
