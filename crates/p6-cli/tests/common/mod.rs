//! Shared fixtures for CLI integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Small but complete export with one baseline copy and one calendar
pub const SAMPLE_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<APIBusinessObjects xmlns="http://xmlns.oracle.com/Primavera/P6/V23.12/API/BusinessObjects" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Calendar>
    <Name>Standard 5 Day Workweek</Name>
    <ObjectId>597</ObjectId>
    <HoursPerDay>8</HoursPerDay>
    <HoursPerWeek>40</HoursPerWeek>
    <HoursPerMonth>172</HoursPerMonth>
    <HoursPerYear>2000</HoursPerYear>
    <StandardWorkWeek>
      <StandardWorkHours>
        <DayOfWeek>Monday</DayOfWeek>
        <WorkTime><Start>08:00:00</Start><Finish>12:00:00</Finish></WorkTime>
        <WorkTime><Start>13:00:00</Start><Finish>17:00:00</Finish></WorkTime>
      </StandardWorkHours>
      <StandardWorkHours>
        <DayOfWeek>Sunday</DayOfWeek>
        <WorkTime/>
      </StandardWorkHours>
    </StandardWorkWeek>
    <HolidayOrExceptions>
      <HolidayOrException>
        <Date>2024-12-25T00:00:00</Date>
      </HolidayOrException>
    </HolidayOrExceptions>
  </Calendar>
  <Resource>
    <ObjectId>3100</ObjectId>
    <GUID>{7D4F1C52-1B9A-4C3E-9F0B-6A2E5D8C1F00}</GUID>
    <Id>CRANE</Id>
    <Name> Tower crane </Name>
    <EmailAddress>crane@example.test</EmailAddress>
    <IsActive>true</IsActive>
    <ResourceType>Nonlabor</ResourceType>
  </Resource>
  <Project>
    <ObjectId>4500</ObjectId>
    <GUID>2f0c6f1e-8b2a-4d6e-a1c3-5b7d9e0f1a2b</GUID>
    <Id>BLD-01</Id>
    <Name>Building 1</Name>
    <DataDate>2024-05-06T08:00:00</DataDate>
    <WBS>
      <ObjectId>4600</ObjectId>
      <ProjectObjectId>4500</ProjectObjectId>
      <Code>1.1</Code>
      <Name>Foundations</Name>
      <SequenceNumber>10</SequenceNumber>
    </WBS>
    <WBS>
      <ObjectId>4601</ObjectId>
      <ProjectObjectId>4500</ProjectObjectId>
      <Code>   </Code>
    </WBS>
    <Activity>
      <ObjectId>5000</ObjectId>
      <Id>A1000</Id>
      <Name>Excavate &amp; shore</Name>
      <PlannedStartDate>2024-05-06T08:00:00</PlannedStartDate>
      <PercentComplete>0.5</PercentComplete>
      <Code><TypeObjectId>11</TypeObjectId><ValueObjectId>110</ValueObjectId></Code>
      <Code><TypeObjectId>12</TypeObjectId><ValueObjectId>120</ValueObjectId></Code>
    </Activity>
    <Activity>
      <ObjectId>5001</ObjectId>
      <Name><![CDATA[Pour <footings>]]></Name>
    </Activity>
    <ResourceAssignment>
      <ObjectId>7000</ObjectId>
      <ActivityObjectId>5000</ActivityObjectId>
      <ResourceObjectId>3100</ResourceObjectId>
      <GUID>{0A1B2C3D-4E5F-4A6B-8C7D-9E0F1A2B3C4D}</GUID>
      <PlannedUnits>16</PlannedUnits>
    </ResourceAssignment>
  </Project>
  <BaselineProject>
    <ObjectId>4700</ObjectId>
    <Name>Building 1 - B1</Name>
    <WBS>
      <ObjectId>4800</ObjectId>
      <Code>1.1</Code>
    </WBS>
    <Activity>
      <ObjectId>5100</ObjectId>
      <Name>Excavate &amp; shore</Name>
    </Activity>
  </BaselineProject>
</APIBusinessObjects>
"#;

/// Export with a single resource and nothing else
pub const RESOURCES_ONLY: &str = r#"<APIBusinessObjects>
  <Resource><ObjectId>1</ObjectId><Name>Crew A</Name></Resource>
  <Resource><ObjectId>2</ObjectId><Name>Crew B</Name></Resource>
</APIBusinessObjects>
"#;

/// Truncated document
pub const MALFORMED_EXPORT: &str = "<APIBusinessObjects><Project><ObjectId>1</ObjectId></Proj";

pub const TOKEN: &str = "test-token";

/// Every sink collection path, in dispatch order
pub const SINK_PATHS: [&str; 6] = [
    "/p6calendars",
    "/p6resources",
    "/projects",
    "/p6wbsstagingroots",
    "/p6activityroots",
    "/p6resourceassignmentroots",
];

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    path
}

pub fn token_response() -> Value {
    json!({ "access_token": TOKEN, "token_type": "Bearer", "expires_in": 3599 })
}

/// Mount a token endpoint that always succeeds
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(server)
        .await;
}

/// Mount every sink path below `prefix` with a 201 reply
pub async fn mount_sink_under(server: &MockServer, prefix: &str) {
    for sink_path in SINK_PATHS {
        Mock::given(method("POST"))
            .and(path(format!("{prefix}{sink_path}")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
            .mount(server)
            .await;
    }
}

/// Paths of all requests the server saw, in arrival order
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}
