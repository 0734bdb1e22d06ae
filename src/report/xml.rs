//! Serialize a [`JunitReport`] to JUnit XML.

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io;

use super::document::{format_seconds, format_timestamp, JunitReport, Property, TestCase, TestSuite};
use crate::error::ReportError;

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static PROPERTIES_TAG: &str = "properties";
static PROPERTY_TAG: &str = "property";
static ERROR_TAG: &str = "error";
static SKIPPED_TAG: &str = "skipped";
static SYSTEM_OUT_TAG: &str = "system-out";
static SYSTEM_ERR_TAG: &str = "system-err";

/// Serialize the report into a string, terminated by a newline
pub fn to_xml_string(report: &JunitReport) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    serialize_report(report, &mut buf)?;
    let mut xml = String::from_utf8(buf)?;
    xml.push('\n');
    Ok(xml)
}

pub fn serialize_report(report: &JunitReport, writer: impl io::Write) -> quick_xml::Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(TESTSUITES_TAG)))?;

    for testsuite in &report.testsuites {
        serialize_testsuite(testsuite, &mut writer)?;
    }

    writer.write_event(Event::End(BytesEnd::new(TESTSUITES_TAG)))
}

fn serialize_testsuite(
    testsuite: &TestSuite,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut testsuite_tag = BytesStart::new(TESTSUITE_TAG);
    testsuite_tag.push_attribute(("name", &*xml_safe(&testsuite.name)));
    testsuite_tag.push_attribute(("timestamp", format_timestamp(&testsuite.timestamp).as_str()));
    testsuite_tag.push_attribute(("time", format_seconds(testsuite.duration_ms).as_str()));
    testsuite_tag.push_attribute(("tests", testsuite.tests().to_string().as_str()));
    testsuite_tag.push_attribute(("failures", testsuite.failures().to_string().as_str()));
    testsuite_tag.push_attribute(("errors", testsuite.errors().to_string().as_str()));
    testsuite_tag.push_attribute(("skipped", testsuite.skipped().to_string().as_str()));
    writer.write_event(Event::Start(testsuite_tag))?;

    if !testsuite.properties.is_empty() {
        writer.write_event(Event::Start(BytesStart::new(PROPERTIES_TAG)))?;
        for property in &testsuite.properties {
            serialize_property(property, writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(PROPERTIES_TAG)))?;
    }

    for testcase in &testsuite.testcases {
        serialize_testcase(testcase, writer)?;
    }

    writer.write_event(Event::End(BytesEnd::new(TESTSUITE_TAG)))
}

fn serialize_property(
    property: &Property,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut property_tag = BytesStart::new(PROPERTY_TAG);
    property_tag.push_attribute(("name", &*xml_safe(&property.name)));
    property_tag.push_attribute(("value", &*xml_safe(&property.value)));
    writer.write_event(Event::Empty(property_tag))
}

fn serialize_testcase(
    testcase: &TestCase,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let mut testcase_tag = BytesStart::new(TESTCASE_TAG);
    testcase_tag.push_attribute(("classname", &*xml_safe(&testcase.classname)));
    testcase_tag.push_attribute(("name", &*xml_safe(&testcase.name)));
    testcase_tag.push_attribute(("time", format_seconds(testcase.duration_ms).as_str()));
    writer.write_event(Event::Start(testcase_tag))?;

    if testcase.skipped {
        writer.write_event(Event::Empty(BytesStart::new(SKIPPED_TAG)))?;
    }
    if let Some(message) = &testcase.error {
        let mut error_tag = BytesStart::new(ERROR_TAG);
        error_tag.push_attribute(("message", &*xml_safe(message)));
        writer.write_event(Event::Empty(error_tag))?;
    }
    if let Some(system_err) = &testcase.system_err {
        serialize_output(system_err, SYSTEM_ERR_TAG, writer)?;
    }
    if let Some(system_out) = &testcase.system_out {
        serialize_output(system_out, SYSTEM_OUT_TAG, writer)?;
    }

    writer.write_event(Event::End(BytesEnd::new(TESTCASE_TAG)))
}

fn serialize_output(
    text: &str,
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> quick_xml::Result<()> {
    let text = xml_safe(text);
    writer.write_event(Event::Start(BytesStart::new(tag_name)))?;
    for section in cdata_sections(&text) {
        writer.write_event(Event::CData(BytesCData::new(section)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag_name)))
}

/// Drop ANSI escape sequences and any character outside the XML 1.0 `Char`
/// production.
///
/// Text without such characters is returned as is.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    let text = if text.contains('\x1b') {
        Cow::Owned(strip_ansi_escapes::strip_str(text))
    } else {
        Cow::Borrowed(text)
    };
    Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => false,
        _ => true,
    }
}

/// Split text so that no section contains the `]]>` terminator.
///
/// Concatenating the sections yields the original text.
fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(idx) = rest.find("]]>") {
        sections.push(&rest[..idx + 2]);
        rest = &rest[idx + 2..];
    }
    sections.push(rest);
    sections
}
