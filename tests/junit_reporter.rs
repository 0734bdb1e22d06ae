//! End-to-end reporting over a recorded statistics fixture

use std::fs;
use std::path::{Path, PathBuf};

use junit_reporter::{
    FileNameContext, JunitReporter, ReportError, ReporterConfig, RunnerStats, SuiteNameFormat,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use tempfile::tempdir;

const FIXTURE: &str = include_str!("fixtures/runners.json");

fn stats() -> RunnerStats {
    RunnerStats::from_json_str(FIXTURE).unwrap()
}

/// Report files in the directory, sorted by name
fn report_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

fn file_name(path: &Path) -> &str {
    path.file_name().unwrap().to_str().unwrap()
}

/// Count opening `testsuite` and `testcase` elements, failing on malformed XML
fn count_elements(xml: &str) -> (usize, usize) {
    let mut reader = Reader::from_str(xml);
    let (mut suites, mut cases) = (0, 0);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"testsuite" => suites += 1,
                b"testcase" => cases += 1,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed XML at {}: {e}", reader.buffer_position()),
        }
    }
    (suites, cases)
}

fn write_reports(config: ReporterConfig) -> (tempfile::TempDir, Vec<PathBuf>) {
    let dir = tempdir().unwrap();
    let reporter = JunitReporter::new(config.with_output_dir(dir.path()));
    let summary = reporter.finalize(&stats(), || {});
    assert!(summary.is_success(), "failed: {:?}", summary.failed);
    let files = report_files(dir.path());
    (dir, files)
}

#[test]
fn test_generates_one_file_per_context() {
    let (_dir, files) = write_reports(ReporterConfig::default());

    let names: Vec<_> = files.iter().map(|f| file_name(f)).collect();
    assert_eq!(
        names,
        vec!["WDIO.xunit.phantomjs.0-0.xml", "WDIO.xunit.phantomjs.0-1.xml"]
    );
}

#[test]
fn test_reports_are_well_formed() {
    let (_dir, files) = write_reports(ReporterConfig::default());

    let first = fs::read_to_string(&files[0]).unwrap();
    let second = fs::read_to_string(&files[1]).unwrap();

    // the before-all hook suite and the `undefined` hook test are excluded
    assert_eq!(count_elements(&first), (2, 2));
    assert_eq!(count_elements(&second), (1, 1));
}

#[test]
fn test_expected_content() {
    let (_dir, files) = write_reports(ReporterConfig::default());
    let first = fs::read_to_string(&files[0]).unwrap();
    let second = fs::read_to_string(&files[1]).unwrap();

    assert!(first.contains(r#"<property name="file" value="/path/to/file.spec.js"/>"#));
    assert!(second.contains(r#"<property name="file" value="/path/to/file2.spec.js"/>"#));
    assert!(first.contains(r#"<property name="suiteName" value="some other foobar test"/>"#));
    assert!(first.contains(r#"<property name="capabilities" value="phantomjs"/>"#));
    assert!(first.contains(r#"<property name="specId" value="12345"/>"#));

    assert!(first.contains(
        r#"<testcase classname="phantomjs.some_other_foobar_test" name="that_is_a_test" time="1">"#
    ));
    assert!(first.contains("<![CDATA[\nCOMMAND: POST /path/to/command - \"some payload\"\n]]>"));
    assert!(!first.contains("ignored.png"));

    assert!(first.contains(r#"<error message="expected true to be false"/>"#));
    assert!(first.contains("<![CDATA[\nsome error stack\nwith new line\n]]>"));
    assert!(first.contains(r#"timestamp="2017-03-07T14:05:09" time="2""#));
}

#[test]
fn test_skipped_test() {
    let (_dir, files) = write_reports(ReporterConfig::default());
    let second = fs::read_to_string(&files[1]).unwrap();

    assert!(second.contains(
        r#"<testcase classname="phantomjs.some_special_spec_title" name="skipped_test" time="1">"#
    ));
    assert!(second.contains("<skipped/>"));
    assert!(second.contains(r#"skipped="1""#));
}

#[test]
fn test_output_file_format() {
    let (_dir, files) = write_reports(
        ReporterConfig::default().with_output_file_format(|ctx: &FileNameContext<'_>| {
            format!("some-file-{}.xml", ctx.cid)
        }),
    );

    let names: Vec<_> = files.iter().map(|f| file_name(f)).collect();
    assert_eq!(names, vec!["some-file-0-0.xml", "some-file-0-1.xml"]);
}

#[test]
fn test_suite_name_format() {
    let format = SuiteNameFormat::new("[^a-z0-9*]+").unwrap();
    let (_dir, files) = write_reports(ReporterConfig::default().with_suite_name_format(format));

    let second = fs::read_to_string(&files[1]).unwrap();
    assert!(second.contains(r#"<testsuite name="some_special_***_spec_title""#));
}

#[test]
fn test_package_name() {
    let (_dir, files) = write_reports(ReporterConfig::default().with_package_name("____O.o____"));

    let first = fs::read_to_string(&files[0]).unwrap();
    assert!(first.contains(r#"classname="phantomjs-____O.o____.some_foobar_test""#));
}

#[test]
fn test_without_standard_output() {
    let (_dir, files) = write_reports(ReporterConfig::default().with_write_standard_output(false));

    let first = fs::read_to_string(&files[0]).unwrap();
    assert!(!first.contains("<system-out>"));
    assert!(first.contains("<system-err>"));
}

#[test]
fn test_missing_output_dir_writes_nothing() {
    let mut epilogue_called = false;
    let summary = JunitReporter::new(ReporterConfig::default()).finalize(&stats(), || {
        epilogue_called = true;
    });

    assert!(epilogue_called);
    assert!(summary.written.is_empty());
    assert_eq!(summary.failed.len(), 2);
    assert!(matches!(
        summary.failed[0].1,
        ReportError::MissingOutputDir { .. }
    ));
}

#[test]
fn test_reports_are_regenerated() {
    let dir = tempdir().unwrap();
    let reporter = JunitReporter::new(ReporterConfig::default().with_output_dir(dir.path()));

    let first = reporter.finalize(&stats(), || {});
    let before = fs::read_to_string(&first.written[0]).unwrap();
    let second = reporter.finalize(&stats(), || {});
    let after = fs::read_to_string(&second.written[0]).unwrap();

    assert_eq!(before, after);
    assert_eq!(report_files(dir.path()).len(), 2);
}

/// Characters allowed by the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || !(c < '\u{20}' || c == '\u{fffe}' || c == '\u{ffff}')
}

#[test]
fn test_colored_failures_stay_well_formed() {
    let stats = RunnerStats::from_json_str(
        r#"{
            "runners": {
                "0-0": {
                    "sanitizedCapabilities": "chrome",
                    "specs": {
                        "1": {
                            "files": [],
                            "suites": {
                                "colors": {
                                    "title": "colors",
                                    "start": "2017-03-07T14:05:09Z",
                                    "duration": 10,
                                    "tests": {
                                        "fails": {
                                            "title": "fails",
                                            "duration": 10,
                                            "state": "failed",
                                            "error": {
                                                "message": "\u001b[31mexpected\u001b[0m 1 to equal 2\u0000",
                                                "stack": "AssertionError\n\u001b[90m    at Context\u001b[39m"
                                            },
                                            "output": [
                                                {
                                                    "type": "command",
                                                    "payload": {
                                                        "method": "POST",
                                                        "uri": "/session/\u001b[1mid\u0000",
                                                        "data": "\u0000\u001b"
                                                    }
                                                }
                                            ]
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }"#,
    )
    .unwrap();

    let reporter = JunitReporter::new(ReporterConfig::default());
    let xml = reporter.render(stats.context("0-0").unwrap()).unwrap();

    assert_eq!(xml.chars().find(|&c| !is_xml_char(c)), None);
    assert_eq!(count_elements(&xml), (1, 1));
    assert!(xml.contains(r#"<error message="expected 1 to equal 2"/>"#));
    assert!(xml.contains("AssertionError\n    at Context"));
    assert!(xml.contains("COMMAND: POST /session/id - "));
}
