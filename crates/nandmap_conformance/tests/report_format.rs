//! Golden text of the mapped-netlist report.

use nandmap_conformance::*;
use nandmap_timing::ReportOptions;

/// x = AND(!a, b), y = NAND(x, c).
const TWO_LEVEL_AAG: &str = "\
aag 5 3 0 2 2
2
4
6
8
11
8 3 4
10 8 6
i0 a
i1 b
i2 c
o0 x
o1 y
";

fn line(text: &str, width: usize, slack: &str) -> String {
    format!("{text}{} slack : {slack}\n", " ".repeat(width.abs_diff(text.len())))
}

fn expected(width: usize) -> String {
    let mut text = String::from(
        "Initial delay : 11.000\n\
         Original area : 12.000\n\
         Optimized area : 12.000\n\
         INPUT(a)\n\
         INPUT(b)\n\
         INPUT(c)\n\
         OUTPUT(x)\n\
         OUTPUT(y)\n",
    );
    text += &line("X1 = INV1(a)", width, "0.00");
    text += &line("X2 = NAND1(X1, b)", width, "0.00");
    text += &line("X3 = INV1(X2)", width, "0.00");
    text += &line("X4 = NAND1(X3, c)", width, "0.00");
    text += &line("X5 = INV1(X2)", width, "3.00");
    text
}

#[test]
fn two_level_report() {
    let result = run_pipeline(TWO_LEVEL_AAG, SINGLE_CELL_LIBRARY);
    let text = report_text(&result, &ReportOptions::default());
    assert_eq!(text, expected(45));
}

#[test]
fn overflowing_column_still_pads() {
    let result = run_pipeline(TWO_LEVEL_AAG, SINGLE_CELL_LIBRARY);
    let text = report_text(&result, &ReportOptions { column_width: 10 });
    assert_eq!(text, expected(10));
    assert!(text.contains("X2 = NAND1(X1, b)        slack : 0.00\n"));
}

#[test]
fn passthrough_output_emits_no_instance() {
    let result = run_pipeline("aag 1 1 0 1 0\n2\n2\ni0 a\no0 z\n", SINGLE_CELL_LIBRARY);
    let text = report_text(&result, &ReportOptions::default());
    assert_eq!(
        text,
        "Initial delay : 0.000\n\
         Original area : 0.000\n\
         Optimized area : 0.000\n\
         INPUT(a)\n\
         OUTPUT(z)\n"
    );
}

#[test]
fn instance_numbers_are_sequential() {
    let result = run_pipeline(TWO_LEVEL_AAG, SAMPLE_LIBRARY);
    let text = report_text(&result, &ReportOptions::default());
    let ids: Vec<_> = text
        .lines()
        .filter(|l| l.starts_with('X'))
        .map(|l| l.split(' ').next().unwrap_or(""))
        .collect();
    assert_eq!(ids, vec!["X1", "X2", "X3", "X4", "X5"]);
    assert!(text.lines().all(|l| !l.contains("-0.00")));
}
