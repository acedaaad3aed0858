//! Integration test for whole-survey scoring
//!
//! Builds a small survey export the way the survey platform writes it (two
//! metadata rows, desktop/mobile IAT columns with double-escaped trial logs)
//! and runs it through `DScoreProcessor::score_survey`.

use iat_flux::config::FAT_BAD_FIRST_LABEL;
use iat_flux::{
    ColumnSource, DScoreProcessor, ParticipantResult, ScoreSummary, SurveyTable,
    EXCLUDED_SENTINEL, INVALID_SENTINEL, NO_DATA_SENTINEL,
};
use pretty_assertions::assert_eq;

const THIN_BAD_FIRST: &str = "Thin people/Bad words,Fat people/Good words";
const FLOWERS_FIRST: &str = "Flowers/Good words,Insects/Bad words";

/// Trial log with block means 500/500/800/700, as the IAT script writes it
fn trial_log(first_condition: &str, scale: f64) -> String {
    let mut log = String::from("block,trial,cond,rt\n");
    log.push_str(&format!("1,1,\"{}\",950\n", first_condition));
    let rows = [
        (3, 400.0),
        (3, 500.0),
        (3, 600.0),
        (6, 700.0),
        (6, 800.0),
        (6, 900.0),
        (4, 450.0),
        (4, 550.0),
        (7, 650.0),
        (7, 750.0),
    ];
    for (i, (block, rt)) in rows.iter().enumerate() {
        log.push_str(&format!("{},{},,{}\n", block, i + 2, rt * scale));
    }
    log
}

/// Double-escape a trial log the way the survey export does
fn exported(log: &str) -> Option<String> {
    Some(format!("\"{}", log.replace('"', "\"\"")))
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn reference_score() -> f64 {
    let sd_36 = (175_000.0_f64 / 6.0).sqrt();
    let sd_47 = 12_500.0_f64.sqrt();
    ((800.0 - 500.0) / sd_36 + (700.0 - 500.0) / sd_47) / 2.0
}

fn fast_log() -> String {
    let mut log = trial_log(THIN_BAD_FIRST, 1.0);
    log.push_str("3,12,,120\n6,13,,140\n");
    log
}

fn sample_survey() -> SurveyTable {
    SurveyTable::from_columns(vec![
        (
            "ResponseId",
            vec![
                text("Response ID"),
                text("{\"ImportId\":\"_recordId\"}"),
                text("R_1"),
                text("R_2"),
                text("R_3"),
                text("R_4"),
                text("R_5"),
            ],
        ),
        (
            "Q25_1",
            vec![
                text("Height"),
                text("{\"ImportId\":\"QID25_1\"}"),
                text("5 ft 11 in: 180 cm"),
                text("5 ft 4 in: 163 cm"),
                None,
                text("6 ft 0 in: 183 cm"),
                text("5 ft 8 in: 173 cm"),
            ],
        ),
        (
            "Q26_1",
            vec![
                text("Weight"),
                text("{\"ImportId\":\"QID26_1\"}"),
                text("170lb: 77kg"),
                text("Below 100lb: 45kg"),
                text("140lb: 64kg"),
                text("Above 300lb: 136kg"),
                text("95lb: 43kg"),
            ],
        ),
        (
            "Desktop IAT",
            vec![
                text("Desktop IAT"),
                text("{\"ImportId\":\"QID30\"}"),
                exported(&trial_log(THIN_BAD_FIRST, 1.0)),
                None,
                None,
                exported(&fast_log()),
                text("block,trial,cond,rt\n3,1,,oops\n"),
            ],
        ),
        (
            "Mobile IAT",
            vec![
                text("Mobile IAT"),
                text("{\"ImportId\":\"QID31\"}"),
                None,
                exported(&trial_log(FAT_BAD_FIRST_LABEL, 1.0)),
                None,
                None,
                None,
            ],
        ),
        (
            "Desktop Decoy",
            vec![
                text("Desktop Decoy"),
                text("{\"ImportId\":\"QID32\"}"),
                exported(&trial_log(FLOWERS_FIRST, 1.0)),
                None,
                exported(&trial_log(FLOWERS_FIRST, 2.0)),
                None,
                None,
            ],
        ),
        (
            "Mobile Decoy",
            vec![
                text("Mobile Decoy"),
                text("{\"ImportId\":\"QID33\"}"),
                None,
                exported(&trial_log(FLOWERS_FIRST, 1.0)),
                None,
                None,
                None,
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn test_weight_iat_column() {
    let table = sample_survey();
    let scores = DScoreProcessor::new().score_survey(&table).unwrap();

    let weight = &scores.variants[0];
    assert_eq!(weight.output_column, "Weight D-Scores");
    assert_eq!(weight.column.len(), 7);
    assert_eq!(weight.column[0], None);
    assert_eq!(weight.column[1], None);
    assert!((weight.column[2].unwrap() - reference_score()).abs() < 1e-9);
    assert!((weight.column[3].unwrap() + reference_score()).abs() < 1e-9);
    assert_eq!(weight.column[4], Some(NO_DATA_SENTINEL));
    assert_eq!(weight.column[5], Some(EXCLUDED_SENTINEL));
    assert_eq!(weight.column[6], Some(INVALID_SENTINEL));
    assert!(matches!(weight.results[4], ParticipantResult::Invalid { .. }));

    assert_eq!(
        weight.summary,
        ScoreSummary {
            scored: 2,
            no_data: 1,
            excluded: 1,
            invalid: 1,
        }
    );
}

#[test]
fn test_decoy_column_is_independent() {
    let table = sample_survey();
    let scores = DScoreProcessor::new().score_survey(&table).unwrap();

    let decoy = &scores.variants[1];
    assert_eq!(decoy.output_column, "Flower/Insect D-Scores");
    assert!((decoy.column[2].unwrap() - reference_score()).abs() < 1e-9);
    assert!((decoy.column[3].unwrap() - reference_score()).abs() < 1e-9);
    // Scaling every latency leaves the standardized score unchanged
    assert!((decoy.column[4].unwrap() - reference_score()).abs() < 1e-9);
    assert_eq!(decoy.column[5], Some(NO_DATA_SENTINEL));
    assert_eq!(decoy.column[6], Some(NO_DATA_SENTINEL));
}

#[test]
fn test_bmi_column() {
    let table = sample_survey();
    let scores = DScoreProcessor::new().score_survey(&table).unwrap();

    assert_eq!(scores.bmi[0], None);
    assert_eq!(scores.bmi[1], None);
    assert!((scores.bmi[2].unwrap() - 703.0 * 170.0 / (71.0 * 71.0)).abs() < 1e-9);
    assert!((scores.bmi[3].unwrap() - 703.0 * 50.0 / (64.0 * 64.0)).abs() < 1e-9);
    assert_eq!(scores.bmi[4], Some(-1.0));
    assert!((scores.bmi[5].unwrap() - 703.0 * 300.0 / (72.0 * 72.0)).abs() < 1e-9);
    assert!((scores.bmi[6].unwrap() - 703.0 * 95.0 / (68.0 * 68.0)).abs() < 1e-9);
}

#[test]
fn test_apply_appends_columns() {
    let mut table = sample_survey();
    let scores = DScoreProcessor::new().score_survey(&table).unwrap();
    scores.apply_to(&mut table).unwrap();

    let headers = table.headers();
    assert_eq!(
        &headers[headers.len() - 3..],
        &[
            "BMI".to_string(),
            "Weight D-Scores".to_string(),
            "Flower/Insect D-Scores".to_string(),
        ]
    );

    let weight = table.column("Weight D-Scores").unwrap();
    assert_eq!(weight.len(), table.row_count());
    assert_eq!(weight[0], None);
    assert_eq!(weight[4].as_deref(), Some("-100"));
    assert_eq!(weight[5].as_deref(), Some("-101"));
}

#[test]
fn test_scores_encode_to_json() {
    let table = sample_survey();
    let scores = DScoreProcessor::new().score_survey(&table).unwrap();

    let json: serde_json::Value = serde_json::from_str(&scores.to_json().unwrap()).unwrap();
    assert_eq!(json["variants"][0]["variant"], "IAT");
    assert_eq!(json["variants"][0]["summary"]["excluded"], 1);
    assert_eq!(json["variants"][0]["results"][2]["status"], "no_data");
    assert!(json["computed_at"].is_string());
}

#[test]
fn test_missing_bmi_columns_fail_the_survey() {
    let table = SurveyTable::from_columns(vec![
        ("Desktop IAT", vec![text("Desktop IAT"), text("{}")]),
        ("Mobile IAT", vec![text("Mobile IAT"), text("{}")]),
    ])
    .unwrap();

    assert!(DScoreProcessor::new().score_survey(&table).is_err());
}
