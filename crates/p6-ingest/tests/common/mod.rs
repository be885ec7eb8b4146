//! Shared fixtures for ingest integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use p6_common::UploadDate;

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

pub fn upload_date() -> UploadDate {
    UploadDate::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default())
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    path
}

pub fn write_gzip(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap_or_else(|e| panic!("create {}: {e}", path.display()));
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
    encoder
        .write_all(contents.as_bytes())
        .and_then(|_| encoder.finish().map(|_| ()))
        .unwrap_or_else(|e| panic!("gzip {}: {e}", path.display()));
    path
}
