//! Cross-checks the record parser against the `csv` crate on well-formed input.

use airgraph_lib::{parse_record, read_records};
use csv::ReaderBuilder;

mod common;

fn csv_fields(line: &str) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = reader
        .records()
        .next()
        .expect("one record")
        .expect("valid csv");
    record.iter().map(str::to_string).collect()
}

#[test]
fn matches_csv_crate_on_well_formed_lines() {
    let lines = [
        r#"JFK,"New York, NY",USA"#,
        r#"a,"b""c",d"#,
        r#"3830,"Chicago O'Hare International Airport","Chicago","United States","ORD","KORD",41.9786,-87.9048"#,
        r#"AA,24,LAX,3484,JFK,3797,,0,32B 762"#,
        r#"4296,"Smith, Jones & ""Partners"" Air",\N,"SJ","SJP",\N,"United States","Y""#,
        r#"-1,"Unknown",\N,"-","N/A",\N,\N,"Y""#,
        "a,,b,",
    ];

    for line in lines {
        assert_eq!(parse_record(line), csv_fields(line), "{line}");
    }
}

#[test]
fn fixture_files_parse_like_csv() {
    for name in ["airlines.dat", "airports.dat", "routes.dat"] {
        let path = common::fixtures_dir().join(name);
        let contents = std::fs::read_to_string(&path).expect("fixture readable");
        let records = read_records(contents.as_bytes()).expect("records");
        let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();

        assert_eq!(records.len(), lines.len(), "{name}");
        for (record, line) in records.iter().zip(lines) {
            assert_eq!(record.fields, csv_fields(line), "{name}:{}", record.line);
        }
    }
}
